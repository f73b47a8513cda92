use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Movie catalog (TMDb) API key
    pub catalog_api_key: String,

    /// Movie catalog API base URL
    #[serde(default = "default_catalog_api_url")]
    pub catalog_api_url: String,

    /// Base URL poster paths are appended to
    #[serde(default = "default_catalog_image_url")]
    pub catalog_image_url: String,

    /// Redis connection URL; the catalog response cache is disabled when unset
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Quiet period before a search is sent to the catalog
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_catalog_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_catalog_image_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let vars = vec![("CATALOG_API_KEY".to_string(), "abc123".to_string())];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.catalog_api_key, "abc123");
        assert_eq!(config.catalog_api_url, "https://api.themoviedb.org/3");
        assert_eq!(config.catalog_image_url, "https://image.tmdb.org/t/p/w500");
        assert_eq!(config.redis_url, None);
        assert_eq!(config.search_debounce_ms, 300);
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_missing_api_key_fails() {
        let vars: Vec<(String, String)> = vec![("PORT".to_string(), "8080".to_string())];
        let result = envy::from_iter::<_, Config>(vars);
        assert!(result.is_err());
    }

    #[test]
    fn test_redis_url_enables_cache() {
        let vars = vec![
            ("CATALOG_API_KEY".to_string(), "abc123".to_string()),
            ("REDIS_URL".to_string(), "redis://localhost:6379".to_string()),
            ("PORT".to_string(), "8080".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.redis_url.as_deref(), Some("redis://localhost:6379"));
        assert_eq!(config.port, 8080);
    }
}
