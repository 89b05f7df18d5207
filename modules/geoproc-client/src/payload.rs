/// A transport-agnostic multipart payload: ordered parts, one per uploaded
/// file role and one per form parameter. Building the payload never touches
/// the network; the same form state always yields the same parts in the
/// same order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartPayload {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    /// One uploaded file: the role name becomes the field name and the
    /// user's original file name is preserved.
    File {
        name: String,
        file_name: String,
        bytes: Vec<u8>,
    },
    /// One scalar parameter in its decimal-string form.
    Text { name: String, value: String },
}

impl MultipartPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_file(&mut self, name: &str, file_name: &str, bytes: Vec<u8>) {
        self.parts.push(Part::File {
            name: name.to_string(),
            file_name: file_name.to_string(),
            bytes,
        });
    }

    pub fn push_text(&mut self, name: &str, value: String) {
        self.parts.push(Part::Text {
            name: name.to_string(),
            value,
        });
    }

    /// Field names in part order.
    pub fn field_names(&self) -> Vec<&str> {
        self.parts
            .iter()
            .map(|p| match p {
                Part::File { name, .. } => name.as_str(),
                Part::Text { name, .. } => name.as_str(),
            })
            .collect()
    }
}
