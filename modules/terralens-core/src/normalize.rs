//! Result Normalizer: maps each endpoint's response schema into the
//! per-workflow display model.
//!
//! The mapping pattern-matches on the workflow, never on response shape.
//! Numeric values pass through unrounded — display rounding lives in
//! [`crate::display`]. Fields the service may omit on a success body
//! (`crs`, `bounds`, ...) come through as `None`; no defaults are invented.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::workflow::Workflow;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("Malformed {0} response: {1}")]
    Malformed(&'static str, #[source] serde_json::Error),
}

/// Normalized result, one variant per workflow.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResult {
    Ndvi(NdviStats),
    ChangeDetection(ChangeReport),
    Metadata(GeotiffMetadata),
    Reprojection(ReprojectionOutput),
}

/// NDVI statistics plus artifact references. Paths are server-relative and
/// opaque here; the presentation layer resolves them against the base URL.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NdviStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    #[serde(rename = "ndvi_png")]
    pub png: String,
    #[serde(rename = "ndvi_geotiff", default)]
    pub geotiff: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChangeReport {
    pub changed_area_pixels: u64,
    pub changed_area_percentage: f64,
    pub threshold_used: f64,
    /// E.g. "1024x768".
    pub dimensions: String,
    #[serde(rename = "output_tiff")]
    pub tiff: String,
    #[serde(rename = "output_png")]
    pub png: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeotiffMetadata {
    pub width: u64,
    pub height: u64,
    #[serde(rename = "count")]
    pub band_count: u64,
    pub dtype: String,
    #[serde(default)]
    pub crs: Option<String>,
    #[serde(default)]
    pub transform: Option<Vec<f64>>,
    #[serde(default)]
    pub bounds: Option<Bounds>,
    #[serde(default)]
    pub driver: Option<String>,
    #[serde(default)]
    pub nodata: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReprojectionOutput {
    pub output_path: String,
    #[serde(default)]
    pub message: Option<String>,
}

pub fn normalize(workflow: Workflow, raw: &Value) -> Result<AnalysisResult, NormalizeError> {
    fn parse<T: serde::de::DeserializeOwned>(
        workflow: Workflow,
        raw: &Value,
    ) -> Result<T, NormalizeError> {
        serde_json::from_value(raw.clone())
            .map_err(|e| NormalizeError::Malformed(workflow.name(), e))
    }

    Ok(match workflow {
        Workflow::Ndvi => AnalysisResult::Ndvi(parse(workflow, raw)?),
        Workflow::ChangeDetection => AnalysisResult::ChangeDetection(parse(workflow, raw)?),
        Workflow::Metadata => AnalysisResult::Metadata(parse(workflow, raw)?),
        Workflow::Reprojection => AnalysisResult::Reprojection(parse(workflow, raw)?),
    })
}
