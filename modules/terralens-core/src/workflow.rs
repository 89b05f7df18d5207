//! Static workflow definitions.
//!
//! One row per analysis type: endpoint path, required file roles in upload
//! order, parameter schema, and the generic failure message. Everything else
//! in this crate (validation, payload building, normalization) is
//! parameterized by this table; adding an analysis type means adding a row
//! here plus a normalization case.

/// The four analysis request types the service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Workflow {
    Ndvi,
    ChangeDetection,
    Metadata,
    Reprojection,
}

const FILES_FALLBACK: &str = "An error occurred while processing the files";
const FILE_FALLBACK: &str = "An error occurred while processing the file";

impl Workflow {
    pub const ALL: [Workflow; 4] = [
        Workflow::Ndvi,
        Workflow::ChangeDetection,
        Workflow::Metadata,
        Workflow::Reprojection,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Workflow::Ndvi => "ndvi",
            Workflow::ChangeDetection => "change-detection",
            Workflow::Metadata => "metadata",
            Workflow::Reprojection => "reprojection",
        }
    }

    pub fn definition(self) -> WorkflowDefinition {
        match self {
            Workflow::Ndvi => WorkflowDefinition {
                workflow: self,
                endpoint: "/api/v1/ndvi/from-bands",
                file_roles: &["red_file", "nir_file"],
                parameters: vec![],
                failure_fallback: FILES_FALLBACK,
            },
            Workflow::ChangeDetection => WorkflowDefinition {
                workflow: self,
                endpoint: "/api/v1/change-detection",
                file_roles: &["image1", "image2"],
                parameters: vec![
                    ParameterSpec {
                        name: "threshold",
                        kind: ParameterKind::Float,
                        default: ParameterValue::Float(0.1),
                        constraint: Constraint::Range { min: 0.0, max: 1.0 },
                    },
                    ParameterSpec {
                        name: "band",
                        kind: ParameterKind::Int,
                        default: ParameterValue::Int(1),
                        constraint: Constraint::PositiveInt,
                    },
                ],
                failure_fallback: FILES_FALLBACK,
            },
            Workflow::Metadata => WorkflowDefinition {
                workflow: self,
                endpoint: "/api/v1/geotiff/metadata",
                file_roles: &["file"],
                parameters: vec![],
                failure_fallback: FILE_FALLBACK,
            },
            Workflow::Reprojection => WorkflowDefinition {
                workflow: self,
                endpoint: "/api/v1/geotiff/reproject",
                file_roles: &["file"],
                parameters: vec![ParameterSpec {
                    name: "target_crs",
                    kind: ParameterKind::Text,
                    default: ParameterValue::Text("EPSG:4326".to_string()),
                    constraint: Constraint::NonEmpty,
                }],
                failure_fallback: FILE_FALLBACK,
            },
        }
    }
}

/// One workflow's configuration row.
#[derive(Debug, Clone)]
pub struct WorkflowDefinition {
    pub workflow: Workflow,
    pub endpoint: &'static str,
    /// Required upload roles, in the order parts are sent.
    pub file_roles: &'static [&'static str],
    pub parameters: Vec<ParameterSpec>,
    /// User-visible message when the service gives no detail.
    pub failure_fallback: &'static str,
}

/// One parameter row in a workflow definition.
#[derive(Debug, Clone)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub kind: ParameterKind,
    pub default: ParameterValue,
    pub constraint: Constraint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    Float,
    Int,
    Text,
}

impl ParameterKind {
    /// Parse raw user input. Numeric parse failures fall back to a sentinel
    /// value that fails validation instead of panicking.
    pub fn parse(self, raw: &str) -> ParameterValue {
        match self {
            ParameterKind::Float => ParameterValue::Float(raw.trim().parse().unwrap_or(-1.0)),
            ParameterKind::Int => ParameterValue::Int(raw.trim().parse().unwrap_or(0)),
            ParameterKind::Text => ParameterValue::Text(raw.trim().to_string()),
        }
    }
}

/// Declarative constraint checked by the validator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    Range { min: f64, max: f64 },
    PositiveInt,
    NonEmpty,
}

/// A scalar parameter value as held by a form.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Float(f64),
    Int(i64),
    Text(String),
}

impl ParameterValue {
    /// Decimal-string serialization used for multipart text parts.
    pub fn to_field(&self) -> String {
        match self {
            ParameterValue::Float(v) => v.to_string(),
            ParameterValue::Int(v) => v.to_string(),
            ParameterValue::Text(s) => s.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_workflow_has_roles_and_an_endpoint() {
        for workflow in Workflow::ALL {
            let def = workflow.definition();
            assert!(!def.file_roles.is_empty());
            assert!(def.endpoint.starts_with("/api/v1/"));
        }
    }

    #[test]
    fn numeric_parse_failures_fall_back_to_sentinels() {
        assert_eq!(ParameterKind::Int.parse("abc"), ParameterValue::Int(0));
        assert_eq!(
            ParameterKind::Float.parse("not a number"),
            ParameterValue::Float(-1.0)
        );
        assert_eq!(ParameterKind::Int.parse(" 3 "), ParameterValue::Int(3));
    }

    #[test]
    fn field_serialization_is_decimal() {
        assert_eq!(ParameterValue::Float(0.1).to_field(), "0.1");
        assert_eq!(ParameterValue::Int(1).to_field(), "1");
        assert_eq!(
            ParameterValue::Text("EPSG:4326".into()).to_field(),
            "EPSG:4326"
        );
    }
}
