//! Per-workflow form state and the submission lifecycle.
//!
//! One `AnalysisForm` per workflow instance owns the selected files, the
//! parameter values, and the state of at most one in-flight request. The
//! lifecycle is strictly linear — Idle → Submitting → Succeeded/Failed —
//! and re-entry during `Submitting` is refused by the `begin` gate, so two
//! concurrent submissions from the same form are unreachable.

use geoproc_client::{AnalysisTransport, ApiFailure, MultipartPayload};
use serde_json::Value;
use tracing::{debug, warn};

use crate::builder;
use crate::validate;
use crate::workflow::{ParameterValue, Workflow, WorkflowDefinition};

/// A file selected for one upload role. Reselecting a role replaces the
/// attachment outright; nothing is cached across submissions.
#[derive(Debug, Clone, PartialEq)]
pub struct FileAttachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Lifecycle of exactly one submission attempt.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Submitting,
    /// Raw success body; normalization happens in [`crate::normalize`].
    Succeeded(Value),
    /// User-visible message only, per the error-surfacing policy.
    Failed(String),
}

impl RequestState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, RequestState::Submitting)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestState::Succeeded(_) | RequestState::Failed(_))
    }

    pub fn result(&self) -> Option<&Value> {
        match self {
            RequestState::Succeeded(body) => Some(body),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

pub struct AnalysisForm {
    definition: WorkflowDefinition,
    /// Slot per required role, in definition order.
    files: Vec<Option<FileAttachment>>,
    /// Value per parameter, in definition order, seeded with defaults.
    values: Vec<ParameterValue>,
    state: RequestState,
}

impl AnalysisForm {
    pub fn new(workflow: Workflow) -> Self {
        let definition = workflow.definition();
        let files = vec![None; definition.file_roles.len()];
        let values = definition
            .parameters
            .iter()
            .map(|spec| spec.default.clone())
            .collect();
        Self {
            definition,
            files,
            values,
            state: RequestState::Idle,
        }
    }

    pub fn workflow(&self) -> Workflow {
        self.definition.workflow
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Replace the attachment for a role. Clears any prior result or error.
    /// Unknown roles are ignored with a warning.
    pub fn set_file(&mut self, role: &str, attachment: FileAttachment) {
        let Some(index) = self.role_index(role) else {
            warn!(workflow = self.workflow().name(), role, "Unknown file role");
            return;
        };
        self.files[index] = Some(attachment);
        self.reset_terminal();
    }

    pub fn clear_file(&mut self, role: &str) {
        if let Some(index) = self.role_index(role) {
            self.files[index] = None;
            self.reset_terminal();
        }
    }

    pub fn file(&self, role: &str) -> Option<&FileAttachment> {
        self.role_index(role).and_then(|i| self.files[i].as_ref())
    }

    /// Set a parameter to an already-typed value.
    pub fn set_parameter(&mut self, name: &str, value: ParameterValue) {
        let Some(index) = self.parameter_index(name) else {
            warn!(workflow = self.workflow().name(), name, "Unknown parameter");
            return;
        };
        self.values[index] = value;
        self.reset_terminal();
    }

    /// Parse raw input by the parameter's declared kind. Numeric parse
    /// failures store a sentinel that fails validation rather than panicking.
    pub fn set_parameter_input(&mut self, name: &str, raw: &str) {
        let Some(index) = self.parameter_index(name) else {
            warn!(workflow = self.workflow().name(), name, "Unknown parameter");
            return;
        };
        self.values[index] = self.definition.parameters[index].kind.parse(raw);
        self.reset_terminal();
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterValue> {
        self.parameter_index(name).map(|i| &self.values[i])
    }

    /// Validator verdict over current files and parameters.
    pub fn can_submit(&self) -> bool {
        validate::can_submit(&self.definition, &self.files, &self.values)
    }

    /// The submit control's enabled state: valid input and nothing in flight.
    pub fn submit_enabled(&self) -> bool {
        self.can_submit() && !self.state.is_submitting()
    }

    /// Run one submission through the transport. A refused gate (invalid
    /// input or a request already in flight) leaves the state untouched;
    /// otherwise exactly one outbound call is made and the state lands in
    /// `Succeeded` or `Failed`.
    pub async fn submit<T: AnalysisTransport + ?Sized>(&mut self, transport: &T) -> &RequestState {
        let Some(payload) = self.begin() else {
            return &self.state;
        };
        let outcome = transport.submit(self.definition.endpoint, &payload).await;
        self.complete(outcome);
        &self.state
    }

    /// Gate + transition into `Submitting`, clearing any prior result or
    /// error. Returns the payload to send, or `None` when refused.
    fn begin(&mut self) -> Option<MultipartPayload> {
        if !self.submit_enabled() {
            debug!(
                workflow = self.workflow().name(),
                state = ?self.state,
                "Submit refused"
            );
            return None;
        }
        self.state = RequestState::Submitting;
        Some(builder::build(&self.definition, &self.files, &self.values))
    }

    fn complete(&mut self, outcome: Result<Value, ApiFailure>) {
        self.state = match outcome {
            Ok(body) => RequestState::Succeeded(body),
            Err(failure) => {
                warn!(workflow = self.workflow().name(), %failure, "Submission failed");
                let message = failure
                    .detail()
                    .map(str::to_string)
                    .unwrap_or_else(|| self.definition.failure_fallback.to_string());
                RequestState::Failed(message)
            }
        };
    }

    /// Any input change after a terminal state returns the form to Idle.
    fn reset_terminal(&mut self) {
        if self.state.is_terminal() {
            self.state = RequestState::Idle;
        }
    }

    fn role_index(&self, role: &str) -> Option<usize> {
        self.definition.file_roles.iter().position(|r| *r == role)
    }

    fn parameter_index(&self, name: &str) -> Option<usize> {
        self.definition.parameters.iter().position(|p| p.name == name)
    }
}
