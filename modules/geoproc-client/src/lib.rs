pub mod error;
pub mod fixtures;
pub mod payload;

pub use error::{ApiFailure, Result};
pub use payload::{MultipartPayload, Part};

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// Seam between the submission lifecycle and the wire. The production
/// implementation is [`GeoProcClient`]; tests run against
/// [`fixtures::FixtureTransport`].
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    /// POST a multipart payload to an endpoint path and return the parsed
    /// JSON success body.
    async fn submit(&self, path: &str, payload: &MultipartPayload) -> Result<Value>;
}

/// HTTP client for the geospatial image-processing service.
pub struct GeoProcClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeoProcClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn form_from(payload: &MultipartPayload) -> reqwest::multipart::Form {
        let mut form = reqwest::multipart::Form::new();
        for part in &payload.parts {
            form = match part {
                Part::File {
                    name,
                    file_name,
                    bytes,
                } => form.part(
                    name.clone(),
                    reqwest::multipart::Part::bytes(bytes.clone()).file_name(file_name.clone()),
                ),
                Part::Text { name, value } => form.text(name.clone(), value.clone()),
            };
        }
        form
    }
}

#[async_trait]
impl AnalysisTransport for GeoProcClient {
    async fn submit(&self, path: &str, payload: &MultipartPayload) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, parts = payload.parts.len(), "Submitting analysis request");

        let resp = self
            .client
            .post(&url)
            .multipart(Self::form_from(payload))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiFailure::Api {
                status: status.as_u16(),
                detail: error::detail_from_body(&body),
            });
        }

        Ok(resp.json().await?)
    }
}
