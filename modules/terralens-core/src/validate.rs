//! Submit gating. Pure functions over current form state: no network, no
//! async. The form recomputes this on every mutation to drive the submit
//! gate, so an invalid form never reaches the request builder.

use crate::form::FileAttachment;
use crate::workflow::{Constraint, ParameterValue, WorkflowDefinition};

/// True when every required file role is populated with a non-empty file and
/// every parameter satisfies its declared constraint.
pub fn can_submit(
    def: &WorkflowDefinition,
    files: &[Option<FileAttachment>],
    values: &[ParameterValue],
) -> bool {
    if files.len() != def.file_roles.len() || values.len() != def.parameters.len() {
        return false;
    }
    let files_ready = files
        .iter()
        .all(|slot| slot.as_ref().is_some_and(|f| !f.bytes.is_empty()));
    files_ready
        && def
            .parameters
            .iter()
            .zip(values)
            .all(|(spec, value)| satisfies(spec.constraint, value))
}

fn satisfies(constraint: Constraint, value: &ParameterValue) -> bool {
    match (constraint, value) {
        (Constraint::Range { min, max }, ParameterValue::Float(v)) => {
            v.is_finite() && *v >= min && *v <= max
        }
        (Constraint::PositiveInt, ParameterValue::Int(v)) => *v > 0,
        (Constraint::NonEmpty, ParameterValue::Text(s)) => !s.trim().is_empty(),
        // Kind mismatch: the value cannot satisfy the constraint.
        _ => false,
    }
}
