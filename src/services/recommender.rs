use std::sync::Arc;

use crate::{
    models::RecommendationResult,
    services::posters::{PosterLookup, ERROR_PLACEHOLDER},
    store::Model,
};

/// Ranks catalog positions by similarity to `query`
///
/// Returns `None` when the title is not in the catalog. Otherwise returns at
/// most `count` positions ordered by score, highest first; equal scores keep
/// catalog order. The matched movie itself is never included.
pub fn rank_similar(model: &Model, query: &str, count: usize) -> Option<Vec<usize>> {
    let matched = model.catalog.position_of(query)?;
    let scores = model.similarity.row(matched)?;

    let mut ranked: Vec<usize> = (0..scores.len()).collect();
    // sort_by is stable, so ties stay in catalog order
    ranked.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    if let Some(&top) = ranked.first() {
        if top != matched {
            tracing::warn!(
                matched,
                top,
                score = scores[top],
                self_score = scores[matched],
                "Another movie outranks the query movie itself"
            );
        }
    }

    Some(
        ranked
            .into_iter()
            .filter(|&position| position != matched)
            .take(count)
            .collect(),
    )
}

/// Resolves a title and assembles ranked recommendations with posters
#[derive(Clone)]
pub struct Recommender {
    model: Arc<Model>,
    posters: Arc<dyn PosterLookup>,
    count: usize,
}

impl Recommender {
    pub fn new(model: Arc<Model>, posters: Arc<dyn PosterLookup>, count: usize) -> Self {
        Self {
            model,
            posters,
            count,
        }
    }

    /// Recommends movies similar to `query`
    ///
    /// An empty result means the title was not found. Poster lookups run
    /// concurrently; results stay in rank order and a failed lookup only
    /// replaces that entry's poster with a placeholder.
    pub async fn recommend(&self, query: &str) -> Vec<RecommendationResult> {
        let Some(positions) = rank_similar(&self.model, query, self.count) else {
            return Vec::new();
        };

        let records: Vec<_> = positions
            .into_iter()
            .filter_map(|position| self.model.catalog.get(position))
            .collect();

        let tasks: Vec<_> = records
            .iter()
            .map(|record| {
                let posters = Arc::clone(&self.posters);
                let movie_id = record.id;
                tokio::spawn(async move { posters.fetch_poster(movie_id).await })
            })
            .collect();

        let mut results = Vec::with_capacity(records.len());
        for (record, task) in records.into_iter().zip(tasks) {
            let poster = match task.await {
                Ok(poster) => poster,
                Err(e) => {
                    tracing::error!(movie_id = record.id, error = %e, "Poster task join error");
                    ERROR_PLACEHOLDER.to_string()
                }
            };
            results.push(RecommendationResult::new(record, poster));
        }

        results
    }
}
