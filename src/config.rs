use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key used for poster lookups
    ///
    /// Optional: without it every poster degrades to the error placeholder.
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Prefix joined with a movie's `poster_path`
    #[serde(default = "default_tmdb_image_base_url")]
    pub tmdb_image_base_url: String,

    /// Timeout for a single poster lookup, in seconds
    #[serde(default = "default_poster_timeout_secs")]
    pub poster_timeout_secs: u64,

    /// Catalog artifact produced by the training pipeline
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Similarity matrix artifact produced by the training pipeline
    #[serde(default = "default_similarity_path")]
    pub similarity_path: String,

    /// Number of recommendations returned per request
    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org".to_string()
}

fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_poster_timeout_secs() -> u64 {
    5
}

fn default_catalog_path() -> String {
    "movie_dict.json".to_string()
}

fn default_similarity_path() -> String {
    "similarity.json".to_string()
}

fn default_recommendation_count() -> usize {
    5
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?
            .validate()
    }

    /// Rejects values that would leave the service unable to recommend anything
    fn validate(self) -> anyhow::Result<Self> {
        anyhow::ensure!(
            self.recommendation_count > 0,
            "RECOMMENDATION_COUNT must be at least 1"
        );
        Ok(self)
    }

    /// Address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_environment() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();

        assert_eq!(config.tmdb_api_key, None);
        assert_eq!(config.poster_timeout_secs, 5);
        assert_eq!(config.recommendation_count, 5);
        assert_eq!(config.bind_addr(), "127.0.0.1:5000");
    }

    #[test]
    fn test_overrides_from_environment() {
        let vars = vec![
            ("TMDB_API_KEY".to_string(), "secret".to_string()),
            ("CATALOG_PATH".to_string(), "data/movies.bin".to_string()),
            ("PORT".to_string(), "8080".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.tmdb_api_key.as_deref(), Some("secret"));
        assert_eq!(config.catalog_path, "data/movies.bin");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_zero_recommendation_count_is_rejected() {
        let vars = vec![("RECOMMENDATION_COUNT".to_string(), "0".to_string())];
        let config: Config = envy::from_iter(vars).unwrap();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("RECOMMENDATION_COUNT"));
    }

    #[test]
    fn test_defaults_pass_validation() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_port_is_rejected() {
        let vars = vec![("PORT".to_string(), "not-a-port".to_string())];
        assert!(envy::from_iter::<_, Config>(vars).is_err());
    }
}
