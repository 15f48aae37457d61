use serde::{Deserialize, Serialize};

/// External movie identifier, as issued by TMDB
pub type MovieId = i64;

/// A single catalog entry produced by the training pipeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    /// Stable external identifier used for poster lookups
    #[serde(rename = "movie_id")]
    pub id: MovieId,
    /// Display title; casing is only used for presentation
    pub title: String,
    /// Derived feature text, opaque to the recommender
    #[serde(rename = "tags", default)]
    pub tag_text: String,
}

/// Request body for `POST /recommend`
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub movie: Option<String>,
}

/// A recommended movie returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResult {
    pub title: String,
    /// Fully qualified image URL, or a placeholder when the lookup failed
    pub poster: String,
    /// Movie id rendered as a string
    pub id: String,
}

impl RecommendationResult {
    pub fn new(record: &MovieRecord, poster: String) -> Self {
        Self {
            title: record.title.clone(),
            poster,
            id: record.id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_movie_record_uses_pipeline_field_names() {
        let record: MovieRecord = serde_json::from_value(json!({
            "movie_id": 19995,
            "title": "Avatar",
            "tags": "in the 22nd century a paraplegic marine"
        }))
        .unwrap();

        assert_eq!(record.id, 19995);
        assert_eq!(record.title, "Avatar");
        assert!(record.tag_text.starts_with("in the 22nd"));
    }

    #[test]
    fn test_recommendation_id_is_serialized_as_string() {
        let record = MovieRecord {
            id: 155,
            title: "The Dark Knight".to_string(),
            tag_text: String::new(),
        };
        let result = RecommendationResult::new(&record, "https://example.com/p.jpg".to_string());

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "The Dark Knight",
                "poster": "https://example.com/p.jpg",
                "id": "155"
            })
        );
    }

    #[test]
    fn test_request_without_movie_field() {
        let request: RecommendRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.movie.is_none());
    }
}
