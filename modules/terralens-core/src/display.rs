//! Display formatting for normalized results.
//!
//! Rounding happens here, never in the stored model: NDVI statistics to
//! 4 decimal places, percentages to 2. Artifact references stay
//! server-relative until this layer resolves them against the injected
//! service base URL.

use crate::normalize::AnalysisResult;

pub struct ResultRenderer {
    base_url: String,
}

impl ResultRenderer {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a server-relative artifact path to a fetchable URL.
    pub fn resolve(&self, artifact: &str) -> String {
        if artifact.starts_with('/') {
            format!("{}{}", self.base_url, artifact)
        } else {
            format!("{}/{}", self.base_url, artifact)
        }
    }

    /// Human-readable lines for one result, mirroring the result panels of
    /// the service's own UI.
    pub fn lines(&self, result: &AnalysisResult) -> Vec<String> {
        match result {
            AnalysisResult::Ndvi(stats) => {
                let mut lines = vec![
                    format!("Minimum: {:.4}", stats.min),
                    format!("Maximum: {:.4}", stats.max),
                    format!("Mean: {:.4}", stats.mean),
                    format!("Median: {:.4}", stats.median),
                    format!("Preview: {}", self.resolve(&stats.png)),
                ];
                if let Some(geotiff) = &stats.geotiff {
                    lines.push(format!("GeoTIFF: {}", self.resolve(geotiff)));
                }
                lines
            }
            AnalysisResult::ChangeDetection(report) => vec![
                format!("Changed Area: {} pixels", report.changed_area_pixels),
                format!("Change Percentage: {:.2}%", report.changed_area_percentage),
                format!("Threshold Used: {}", report.threshold_used),
                format!("Image Dimensions: {}", report.dimensions),
                format!("GeoTIFF: {}", self.resolve(&report.tiff)),
                format!("Preview: {}", self.resolve(&report.png)),
            ],
            AnalysisResult::Metadata(meta) => {
                let mut lines = vec![
                    format!("Width: {} pixels", meta.width),
                    format!("Height: {} pixels", meta.height),
                    format!("Bands: {}", meta.band_count),
                    format!("Data Type: {}", meta.dtype),
                ];
                if let Some(crs) = &meta.crs {
                    lines.push(format!("CRS: {crs}"));
                }
                if let Some(transform) = &meta.transform {
                    let joined = transform
                        .iter()
                        .map(f64::to_string)
                        .collect::<Vec<_>>()
                        .join(", ");
                    lines.push(format!("Transform: {joined}"));
                }
                if let Some(bounds) = &meta.bounds {
                    lines.push(format!("Left: {}", bounds.left));
                    lines.push(format!("Right: {}", bounds.right));
                    lines.push(format!("Bottom: {}", bounds.bottom));
                    lines.push(format!("Top: {}", bounds.top));
                }
                if let Some(driver) = &meta.driver {
                    lines.push(format!("Driver: {driver}"));
                }
                if let Some(nodata) = meta.nodata {
                    lines.push(format!("NoData: {nodata}"));
                }
                lines
            }
            AnalysisResult::Reprojection(out) => vec![
                format!("Output file: {}", out.output_path),
                format!("Download: {}", self.resolve(&out.output_path)),
            ],
        }
    }
}
