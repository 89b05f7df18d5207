pub mod builder;
pub mod display;
pub mod form;
pub mod normalize;
pub mod validate;
pub mod workflow;

pub use display::ResultRenderer;
pub use form::{AnalysisForm, FileAttachment, RequestState};
pub use normalize::{normalize, AnalysisResult, NormalizeError};
pub use workflow::{ParameterValue, Workflow, WorkflowDefinition};
