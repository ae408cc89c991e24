//! Environment-based configuration.

/// Runtime configuration loaded from the environment (and `.env` if present).
#[derive(Debug, Clone)]
pub struct Config {
    /// API key for the Polygon.io data provider.
    pub polygon_api_key: String,
    /// Deployment environment name, drives log formatting.
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            polygon_api_key: std::env::var("POLYGON_API_KEY").unwrap_or_default(),
            environment: get_environment(),
        }
    }
}

/// Current environment name, defaulting to `sandbox`.
pub fn get_environment() -> String {
    std::env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}
