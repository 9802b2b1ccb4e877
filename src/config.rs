use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Place-search provider API key
    pub places_api_key: String,

    /// Place-search provider base URL
    #[serde(default = "default_places_api_url")]
    pub places_api_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON file holding the station catalog
    #[serde(default = "default_stations_path")]
    pub stations_path: String,

    /// Language hint sent with every provider search
    #[serde(default = "default_search_language")]
    pub search_language: String,

    /// Region hint sent with every provider search
    #[serde(default = "default_search_region")]
    pub search_region: String,

    #[serde(default = "default_radius_meters")]
    pub default_radius_meters: u32,

    /// Upper bound accepted for a requested radius (the provider's own ceiling)
    #[serde(default = "default_max_radius_meters")]
    pub max_radius_meters: u32,

    #[serde(default = "default_max_results")]
    pub default_max_results: usize,

    /// Largest result count a caller may ask for
    #[serde(default = "default_max_results_limit")]
    pub max_results_limit: usize,

    /// Candidates kept per category fetch
    #[serde(default = "default_per_category_limit")]
    pub per_category_limit: usize,

    /// Lifetime of a cached provider response, 0 disables the cache
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Maximum number of cached queries, 0 disables the cache
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Provider request timeout
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

fn default_places_api_url() -> String {
    "https://maps.googleapis.com/maps/api/place".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_stations_path() -> String {
    "data/stations.json".to_string()
}

fn default_search_language() -> String {
    "ja".to_string()
}

fn default_search_region() -> String {
    "jp".to_string()
}

fn default_radius_meters() -> u32 {
    1000
}

fn default_max_radius_meters() -> u32 {
    50_000
}

fn default_max_results() -> usize {
    4
}

fn default_max_results_limit() -> usize {
    20
}

fn default_per_category_limit() -> usize {
    5
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_cache_capacity() -> usize {
    512
}

fn default_http_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Configuration with every default applied, for tests and local tooling
    pub fn with_api(places_api_key: &str, places_api_url: &str) -> Self {
        Self {
            places_api_key: places_api_key.to_string(),
            places_api_url: places_api_url.to_string(),
            host: default_host(),
            port: default_port(),
            stations_path: default_stations_path(),
            search_language: default_search_language(),
            search_region: default_search_region(),
            default_radius_meters: default_radius_meters(),
            max_radius_meters: default_max_radius_meters(),
            default_max_results: default_max_results(),
            max_results_limit: default_max_results_limit(),
            per_category_limit: default_per_category_limit(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_capacity: default_cache_capacity(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
