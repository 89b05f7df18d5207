//! Request Builder: converts validated form state into a multipart payload.
//!
//! Deterministic by construction — roles in definition order, then
//! parameters in definition order. Validation is not this module's job;
//! the submission gate runs [`crate::validate::can_submit`] first, so every
//! role slot is populated by the time a payload is built.

use geoproc_client::MultipartPayload;

use crate::form::FileAttachment;
use crate::workflow::{ParameterValue, WorkflowDefinition};

pub fn build(
    def: &WorkflowDefinition,
    files: &[Option<FileAttachment>],
    values: &[ParameterValue],
) -> MultipartPayload {
    let mut payload = MultipartPayload::new();
    for (role, slot) in def.file_roles.iter().zip(files) {
        if let Some(file) = slot {
            payload.push_file(role, &file.file_name, file.bytes.clone());
        }
    }
    for (spec, value) in def.parameters.iter().zip(values) {
        payload.push_text(spec.name, value.to_field());
    }
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::Workflow;
    use geoproc_client::Part;

    fn attachment(name: &str, bytes: &[u8]) -> Option<FileAttachment> {
        Some(FileAttachment {
            file_name: name.to_string(),
            bytes: bytes.to_vec(),
        })
    }

    #[test]
    fn roles_then_parameters_in_definition_order() {
        let def = Workflow::ChangeDetection.definition();
        let files = [attachment("before.tif", b"one"), attachment("after.tif", b"two")];
        let values = [ParameterValue::Float(0.1), ParameterValue::Int(1)];

        let payload = build(&def, &files, &values);
        assert_eq!(
            payload.field_names(),
            vec!["image1", "image2", "threshold", "band"]
        );
        match &payload.parts[2] {
            Part::Text { value, .. } => assert_eq!(value, "0.1"),
            other => panic!("expected text part, got {other:?}"),
        }
    }

    #[test]
    fn original_file_names_are_preserved() {
        let def = Workflow::Ndvi.definition();
        let files = [attachment("B4.tif", b"red"), attachment("B5.tif", b"nir")];
        let payload = build(&def, &files, &[]);

        match &payload.parts[0] {
            Part::File { name, file_name, bytes } => {
                assert_eq!(name, "red_file");
                assert_eq!(file_name, "B4.tif");
                assert_eq!(bytes, b"red");
            }
            other => panic!("expected file part, got {other:?}"),
        }
    }

    #[test]
    fn same_inputs_build_identical_payloads() {
        let def = Workflow::Reprojection.definition();
        let files = [attachment("in.tif", b"data")];
        let values = [ParameterValue::Text("EPSG:4326".into())];
        assert_eq!(build(&def, &files, &values), build(&def, &files, &values));
    }
}
