pub mod posters;
pub mod recommender;

pub use posters::{DisabledPosterLookup, PosterLookup, TmdbPosterLookup};
pub use recommender::{rank_similar, Recommender};
