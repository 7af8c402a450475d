/// Configuration management for KrishiLink services
///
/// Loads configuration from environment variables. Every setting has a
/// default so the stores work out of the box in tests and demos.
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Shared store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Seed Bengali demo data into freshly constructed stores
    pub seed_demo_data: bool,
    /// Maximum length for post/comment/description content
    pub max_content_len: usize,
    /// Default page size for feed and listing queries
    pub default_page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed_demo_data: true,
            max_content_len: 2000,
            default_page_size: 20,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let seed_demo_data = std::env::var("KRISHI_SEED_DEMO_DATA")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.seed_demo_data);

        let max_content_len = std::env::var("KRISHI_MAX_CONTENT_LEN")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_content_len);

        let default_page_size = std::env::var("KRISHI_DEFAULT_PAGE_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.default_page_size);

        Ok(Config {
            seed_demo_data,
            max_content_len,
            default_page_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();

        assert!(config.seed_demo_data);
        assert_eq!(config.max_content_len, 2000);
        assert_eq!(config.default_page_size, 20);
    }
}
