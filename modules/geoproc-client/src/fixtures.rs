//! Fixture transport for exercising the submission lifecycle without a
//! network. Outcomes are served from a queue and every call is recorded,
//! so tests can assert on the endpoint path, part ordering, and the
//! exact number of outbound calls.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::{AnalysisTransport, ApiFailure, MultipartPayload, Result};

/// One call the fixture received, payload included.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub payload: MultipartPayload,
}

#[derive(Default)]
pub struct FixtureTransport {
    outcomes: Mutex<VecDeque<Result<Value>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FixtureTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a success body.
    pub fn respond(self, body: Value) -> Self {
        self.outcomes.lock().unwrap().push_back(Ok(body));
        self
    }

    /// Queue a failure.
    pub fn fail(self, failure: ApiFailure) -> Self {
        self.outcomes.lock().unwrap().push_back(Err(failure));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisTransport for FixtureTransport {
    async fn submit(&self, path: &str, payload: &MultipartPayload) -> Result<Value> {
        self.calls.lock().unwrap().push(RecordedCall {
            path: path.to_string(),
            payload: payload.clone(),
        });
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiFailure::Network("fixture transport exhausted".into())))
    }
}
