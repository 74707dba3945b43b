use bytes::Bytes;

/// Multipart field name used for receipt uploads, both on the browser form
/// and on the classification backend request.
pub const RECEIPT_FIELD: &str = "receipt_image";

/// A receipt image the user has picked but not necessarily submitted yet.
///
/// The image bytes are reference-counted, so cloning a staged receipt (for
/// snapshots or resubmission) never copies the underlying buffer.
#[derive(Debug, Clone)]
pub struct StagedReceipt {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl StagedReceipt {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the declared content type looks like a supported receipt photo.
    /// Advisory only; the backend is the authority on what it can classify.
    pub fn is_image(&self) -> bool {
        matches!(self.content_type.as_str(), "image/png" | "image/jpeg")
    }
}
