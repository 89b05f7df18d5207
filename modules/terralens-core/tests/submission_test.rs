//! Submission lifecycle tests against the fixture transport.
//!
//! These verify the contract between the form state machine and the wire:
//! - A gated submit makes exactly one outbound call to the right endpoint
//! - Payload parts arrive in definition order with file names preserved
//! - Service `detail` messages win over the generic fallbacks
//! - An ungated submit never reaches the transport

use geoproc_client::fixtures::FixtureTransport;
use geoproc_client::{ApiFailure, Part};
use serde_json::json;
use terralens_core::{
    normalize, AnalysisForm, AnalysisResult, FileAttachment, RequestState, Workflow,
};

fn attach(form: &mut AnalysisForm, role: &str, file_name: &str) {
    form.set_file(
        role,
        FileAttachment {
            file_name: file_name.to_string(),
            bytes: file_name.as_bytes().to_vec(),
        },
    );
}

#[tokio::test]
async fn ndvi_submission_succeeds_and_normalizes() {
    let transport = FixtureTransport::new().respond(json!({
        "min": -0.12, "max": 0.87, "mean": 0.41, "median": 0.39,
        "ndvi_png": "/out/ndvi_1.png"
    }));

    let mut form = AnalysisForm::new(Workflow::Ndvi);
    attach(&mut form, "red_file", "r.tif");
    attach(&mut form, "nir_file", "n.tif");

    let state = form.submit(&transport).await.clone();
    let body = state.result().expect("submission should succeed");

    let AnalysisResult::Ndvi(stats) = normalize(Workflow::Ndvi, body).unwrap() else {
        panic!("wrong variant");
    };
    assert_eq!(stats.mean, 0.41);
    assert_eq!(stats.png, "/out/ndvi_1.png");

    // Exactly one call, to the NDVI endpoint, roles in order.
    assert_eq!(transport.call_count(), 1);
    let call = &transport.calls()[0];
    assert_eq!(call.path, "/api/v1/ndvi/from-bands");
    assert_eq!(call.payload.field_names(), vec!["red_file", "nir_file"]);
    match &call.payload.parts[1] {
        Part::File { file_name, .. } => assert_eq!(file_name, "n.tif"),
        other => panic!("expected file part, got {other:?}"),
    }
}

#[tokio::test]
async fn change_detection_sends_parameters_as_text_parts() {
    let transport = FixtureTransport::new().respond(json!({
        "changed_area_pixels": 245000,
        "changed_area_percentage": 12.345,
        "threshold_used": 0.1,
        "dimensions": "1024x768",
        "output_tiff": "/out/cd.tif",
        "output_png": "/out/cd.png"
    }));

    let mut form = AnalysisForm::new(Workflow::ChangeDetection);
    attach(&mut form, "image1", "before.tif");
    attach(&mut form, "image2", "after.tif");
    // Defaults: threshold 0.1, band 1. Override the band from raw input.
    form.set_parameter_input("band", "2");

    form.submit(&transport).await;

    let call = &transport.calls()[0];
    assert_eq!(call.path, "/api/v1/change-detection");
    assert_eq!(
        call.payload.field_names(),
        vec!["image1", "image2", "threshold", "band"]
    );
    let text_values: Vec<_> = call
        .payload
        .parts
        .iter()
        .filter_map(|p| match p {
            Part::Text { value, .. } => Some(value.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(text_values, vec!["0.1", "2"]);
}

#[tokio::test]
async fn service_detail_is_surfaced_verbatim() {
    let transport = FixtureTransport::new().fail(ApiFailure::Api {
        status: 422,
        detail: Some("bad band index".to_string()),
    });

    let mut form = AnalysisForm::new(Workflow::ChangeDetection);
    attach(&mut form, "image1", "a.tif");
    attach(&mut form, "image2", "b.tif");

    let state = form.submit(&transport).await;
    assert_eq!(state.error(), Some("bad band index"));
}

#[tokio::test]
async fn missing_detail_falls_back_to_generic_message() {
    let transport = FixtureTransport::new().fail(ApiFailure::Api {
        status: 500,
        detail: None,
    });

    let mut form = AnalysisForm::new(Workflow::Reprojection);
    attach(&mut form, "file", "scene.tif");

    let state = form.submit(&transport).await;
    assert_eq!(
        state.error(),
        Some("An error occurred while processing the file")
    );
}

#[tokio::test]
async fn connectivity_failure_uses_the_same_fallback() {
    let transport =
        FixtureTransport::new().fail(ApiFailure::Network("connection refused".to_string()));

    let mut form = AnalysisForm::new(Workflow::Ndvi);
    attach(&mut form, "red_file", "r.tif");
    attach(&mut form, "nir_file", "n.tif");

    let state = form.submit(&transport).await;
    assert_eq!(
        state.error(),
        Some("An error occurred while processing the files")
    );
}

#[tokio::test]
async fn ungated_submit_never_reaches_the_transport() {
    let transport = FixtureTransport::new().respond(json!({}));

    let mut form = AnalysisForm::new(Workflow::Ndvi);
    attach(&mut form, "red_file", "r.tif");
    // nir_file missing: the validator gate refuses.

    let state = form.submit(&transport).await;
    assert_eq!(*state, RequestState::Idle);
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn resubmission_after_failure_starts_a_fresh_request() {
    let transport = FixtureTransport::new()
        .fail(ApiFailure::Api {
            status: 500,
            detail: None,
        })
        .respond(json!({
            "message": "Reprojection successful",
            "output_path": "reprojected_scene.tif"
        }));

    let mut form = AnalysisForm::new(Workflow::Reprojection);
    attach(&mut form, "file", "scene.tif");

    assert!(form.submit(&transport).await.error().is_some());

    // Reselecting the file clears the error and re-arms the form.
    attach(&mut form, "file", "scene.tif");
    assert_eq!(*form.state(), RequestState::Idle);

    let state = form.submit(&transport).await;
    assert!(state.result().is_some());
    assert_eq!(transport.call_count(), 2);
}
