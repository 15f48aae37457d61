//! Poster lookup abstraction
//!
//! Maps a movie id to a displayable image URL. Lookups never fail from the
//! caller's point of view: any error is absorbed and turned into one of the
//! placeholder URLs below.

use crate::models::MovieId;

pub mod tmdb;

pub use tmdb::TmdbPosterLookup;

/// Returned when the metadata service has no image for the movie
pub const NO_IMAGE_PLACEHOLDER: &str = "https://placehold.co/500x750?text=No+Image";

/// Returned when the lookup itself failed
pub const ERROR_PLACEHOLDER: &str = "https://placehold.co/500x750?text=Error";

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterLookup: Send + Sync {
    /// Fetch the poster URL for a movie, or a placeholder
    async fn fetch_poster(&self, movie_id: MovieId) -> String;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Lookup used when no credential is configured
///
/// Every poster degrades to [`ERROR_PLACEHOLDER`] without touching the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledPosterLookup;

#[async_trait::async_trait]
impl PosterLookup for DisabledPosterLookup {
    async fn fetch_poster(&self, _movie_id: MovieId) -> String {
        ERROR_PLACEHOLDER.to_string()
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}
