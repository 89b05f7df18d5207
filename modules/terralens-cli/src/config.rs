use std::env;

/// CLI configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base address of the processing service. Artifact paths in responses
    /// are resolved against this at display time.
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("GEOPROC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
        }
    }
}
