use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    services::{PosterLookup, Recommender},
    store::ModelState,
};

/// Shared application state
///
/// Built once before the server starts and never modified afterwards.
#[derive(Clone)]
pub struct AppState {
    pub model: ModelState,
    pub posters: Arc<dyn PosterLookup>,
    pub recommendation_count: usize,
}

impl AppState {
    pub fn new(
        model: ModelState,
        posters: Arc<dyn PosterLookup>,
        recommendation_count: usize,
    ) -> Self {
        Self {
            model,
            posters,
            recommendation_count,
        }
    }

    /// Recommender over the loaded model, or [`AppError::ModelNotLoaded`]
    pub fn recommender(&self) -> AppResult<Recommender> {
        let model = self.model.model().ok_or(AppError::ModelNotLoaded)?;

        Ok(Recommender::new(
            Arc::clone(model),
            Arc::clone(&self.posters),
            self.recommendation_count,
        ))
    }
}
