//! TMDB poster lookup
//!
//! API Flow:
//! 1. Movie details: /3/movie/{movie_id} → `poster_path` (may be null)
//! 2. Poster URL: image base URL + `poster_path`

use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::MovieId,
    services::posters::{PosterLookup, ERROR_PLACEHOLDER, NO_IMAGE_PLACEHOLDER},
};

const LANGUAGE: &str = "en-US";

#[derive(Debug, Deserialize)]
struct MovieDetails {
    #[serde(default)]
    poster_path: Option<String>,
}

#[derive(Clone)]
pub struct TmdbPosterLookup {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_base_url: String,
}

impl TmdbPosterLookup {
    /// Creates a TMDB lookup whose requests give up after `timeout`
    pub fn new(
        api_key: String,
        api_url: String,
        image_base_url: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            image_base_url: image_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches the movie's `poster_path`, `None` when TMDB has no image
    async fn fetch_poster_path(&self, movie_id: MovieId) -> AppResult<Option<String>> {
        let url = format!("{}/3/movie/{}", self.api_url, movie_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("language", LANGUAGE)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB returned status {}: {}",
                status, body
            )));
        }

        let details: MovieDetails = response.json().await?;

        Ok(details.poster_path.filter(|path| !path.trim().is_empty()))
    }

    fn image_url(&self, poster_path: &str) -> String {
        format!(
            "{}/{}",
            self.image_base_url,
            poster_path.trim_start_matches('/')
        )
    }
}

#[async_trait::async_trait]
impl PosterLookup for TmdbPosterLookup {
    async fn fetch_poster(&self, movie_id: MovieId) -> String {
        match self.fetch_poster_path(movie_id).await {
            Ok(Some(path)) => self.image_url(&path),
            Ok(None) => {
                tracing::debug!(movie_id, "No poster available");
                NO_IMAGE_PLACEHOLDER.to_string()
            }
            Err(e) => {
                tracing::warn!(movie_id, error = %e, provider = self.name(), "Poster lookup failed");
                ERROR_PLACEHOLDER.to_string()
            }
        }
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

    fn create_test_lookup(server: &MockServer, timeout: Duration) -> TmdbPosterLookup {
        TmdbPosterLookup::new(
            "test_key".to_string(),
            server.uri(),
            IMAGE_BASE.to_string(),
            timeout,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_poster_path_is_joined_with_image_base() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/movie/550"))
            .and(query_param("api_key", "test_key"))
            .and(query_param("language", "en-US"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({
                    "id": 550,
                    "title": "Fight Club",
                    "poster_path": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg"
                })),
            )
            .mount(&server)
            .await;

        let lookup = create_test_lookup(&server, Duration::from_secs(5));
        let poster = lookup.fetch_poster(550).await;

        assert_eq!(
            poster,
            "https://image.tmdb.org/t/p/w500/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg"
        );
    }

    #[tokio::test]
    async fn test_null_poster_path_yields_no_image_placeholder() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/movie/42"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "id": 42, "poster_path": null })),
            )
            .mount(&server)
            .await;

        let lookup = create_test_lookup(&server, Duration::from_secs(5));

        assert_eq!(lookup.fetch_poster(42).await, NO_IMAGE_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_rejected_credential_yields_error_placeholder() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "status_code": 7,
                "status_message": "Invalid API key: You must be granted a valid key."
            })))
            .mount(&server)
            .await;

        let lookup = create_test_lookup(&server, Duration::from_secs(5));

        assert_eq!(lookup.fetch_poster(550).await, ERROR_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_malformed_body_yields_error_placeholder() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let lookup = create_test_lookup(&server, Duration::from_secs(5));

        assert_eq!(lookup.fetch_poster(550).await, ERROR_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_slow_response_times_out_to_error_placeholder() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "poster_path": "/late.jpg" }))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let lookup = create_test_lookup(&server, Duration::from_millis(50));

        assert_eq!(lookup.fetch_poster(550).await, ERROR_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_unreachable_service_yields_error_placeholder() {
        let lookup = TmdbPosterLookup::new(
            "test_key".to_string(),
            "http://127.0.0.1:9".to_string(),
            IMAGE_BASE.to_string(),
            Duration::from_secs(1),
        )
        .unwrap();

        assert_eq!(lookup.fetch_poster(550).await, ERROR_PLACEHOLDER);
    }
}
