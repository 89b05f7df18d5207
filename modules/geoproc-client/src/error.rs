use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiFailure>;

/// Failure of one submission call.
#[derive(Debug, Clone, Error)]
pub enum ApiFailure {
    /// No response was received at all.
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("API error (status {status})")]
    Api { status: u16, detail: Option<String> },
}

impl ApiFailure {
    /// The service-supplied human-readable message, when the error body
    /// carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiFailure::Api { detail, .. } => detail.as_deref(),
            ApiFailure::Network(_) => None,
        }
    }
}

impl From<reqwest::Error> for ApiFailure {
    fn from(err: reqwest::Error) -> Self {
        ApiFailure::Network(err.to_string())
    }
}

/// Pull the `detail` field out of a JSON error body, if there is one.
pub(crate) fn detail_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("detail")?
        .as_str()
        .map(str::to_string)
}
