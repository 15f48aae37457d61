use std::{path::Path, sync::Arc, time::Duration};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use movie_rec_api::{
    api::{create_router, AppState},
    config::Config,
    services::{DisabledPosterLookup, PosterLookup, TmdbPosterLookup},
    store::ModelState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_rec_api=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // A failed load leaves the server up but refusing recommendations
    let model = ModelState::load(
        Path::new(&config.catalog_path),
        Path::new(&config.similarity_path),
    );

    let posters = create_poster_lookup(&config)?;

    let state = AppState::new(model, posters, config.recommendation_count);
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}

fn create_poster_lookup(config: &Config) -> anyhow::Result<Arc<dyn PosterLookup>> {
    match config.tmdb_api_key.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => {
            let lookup = TmdbPosterLookup::new(
                key.to_string(),
                config.tmdb_api_url.clone(),
                config.tmdb_image_base_url.clone(),
                Duration::from_secs(config.poster_timeout_secs),
            )?;
            Ok(Arc::new(lookup))
        }
        _ => {
            tracing::warn!("TMDB_API_KEY not set, posters will use the error placeholder");
            Ok(Arc::new(DisabledPosterLookup))
        }
    }
}
