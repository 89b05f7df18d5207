//! Command-line client for the geospatial image-processing service.
//!
//! One subcommand per workflow: read the selected files into memory, fill
//! the form, submit once, print the rendered result lines. Failures exit
//! non-zero with the user-visible message from the submission lifecycle.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use geoproc_client::GeoProcClient;
use terralens_core::{
    normalize, AnalysisForm, FileAttachment, ParameterValue, RequestState, ResultRenderer,
    Workflow,
};

mod config;
use config::Config;

#[derive(Parser)]
#[command(name = "terralens")]
#[command(about = "Client for the geospatial image-processing service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate NDVI from red and near-infrared band images
    Ndvi {
        /// Red band GeoTIFF (e.g. Landsat B4)
        #[arg(long)]
        red: PathBuf,

        /// Near-infrared band GeoTIFF (e.g. Landsat B5)
        #[arg(long)]
        nir: PathBuf,
    },

    /// Detect changes between two images pixel by pixel
    ChangeDetection {
        #[arg(long)]
        image1: PathBuf,

        #[arg(long)]
        image2: PathBuf,

        /// Change threshold in [0,1]
        #[arg(long, default_value_t = 0.1)]
        threshold: f64,

        /// Band to compare (1-based)
        #[arg(long, default_value_t = 1)]
        band: i64,
    },

    /// Extract metadata from a GeoTIFF file
    Metadata {
        #[arg(long)]
        file: PathBuf,
    },

    /// Reproject a GeoTIFF to a different coordinate reference system
    Reproject {
        #[arg(long)]
        file: PathBuf,

        /// Target CRS, e.g. EPSG:4326
        #[arg(long, default_value = "EPSG:4326")]
        target_crs: String,
    },
}

fn attach(form: &mut AnalysisForm, role: &str, path: &Path) -> Result<()> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.tif")
        .to_string();
    form.set_file(role, FileAttachment { file_name, bytes });
    Ok(())
}

fn build_form(command: &Commands) -> Result<AnalysisForm> {
    Ok(match command {
        Commands::Ndvi { red, nir } => {
            let mut form = AnalysisForm::new(Workflow::Ndvi);
            attach(&mut form, "red_file", red)?;
            attach(&mut form, "nir_file", nir)?;
            form
        }
        Commands::ChangeDetection {
            image1,
            image2,
            threshold,
            band,
        } => {
            let mut form = AnalysisForm::new(Workflow::ChangeDetection);
            attach(&mut form, "image1", image1)?;
            attach(&mut form, "image2", image2)?;
            form.set_parameter("threshold", ParameterValue::Float(*threshold));
            form.set_parameter("band", ParameterValue::Int(*band));
            form
        }
        Commands::Metadata { file } => {
            let mut form = AnalysisForm::new(Workflow::Metadata);
            attach(&mut form, "file", file)?;
            form
        }
        Commands::Reproject { file, target_crs } => {
            let mut form = AnalysisForm::new(Workflow::Reprojection);
            attach(&mut form, "file", file)?;
            form.set_parameter("target_crs", ParameterValue::Text(target_crs.clone()));
            form
        }
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("terralens=info".parse()?))
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env();
    let cli = Cli::parse();

    let mut form = build_form(&cli.command)?;
    if !form.can_submit() {
        bail!("Missing or invalid input for {}", form.workflow().name());
    }

    info!(
        workflow = form.workflow().name(),
        base_url = config.base_url.as_str(),
        "Submitting analysis request"
    );

    let client = GeoProcClient::new(&config.base_url);
    let state = form.submit(&client).await.clone();

    match state {
        RequestState::Succeeded(body) => {
            let result = normalize(form.workflow(), &body)?;
            let renderer = ResultRenderer::new(&config.base_url);
            for line in renderer.lines(&result) {
                println!("{line}");
            }
            Ok(())
        }
        RequestState::Failed(message) => bail!("{message}"),
        RequestState::Idle | RequestState::Submitting => bail!("Submission did not run"),
    }
}
