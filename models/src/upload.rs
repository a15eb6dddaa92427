//! Client-side checks for image and PDF uploads.
//!
//! These mirror the backend's own limits so an oversized or mistyped file is
//! rejected before the multipart request is built. The backend still
//! validates independently.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use crate::entities::ResourceKind;

const MIB: u64 = 1024 * 1024;

/// Size and MIME limits for one upload slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UploadPolicy {
    /// Multipart form field name.
    pub field: &'static str,
    pub max_bytes: u64,
    pub allowed_mime: &'static [&'static str],
}

pub const IMAGE_POLICY: UploadPolicy = UploadPolicy {
    field: "image",
    max_bytes: 2 * MIB,
    allowed_mime: &["image/jpeg", "image/png", "image/webp", "image/gif"],
};

pub const DOCUMENT_POLICY: UploadPolicy = UploadPolicy {
    field: "resource",
    max_bytes: 10 * MIB,
    allowed_mime: &["application/pdf"],
};

/// Why a file was refused before upload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("{file} is empty")]
    Empty { file: String },
    #[error("{file} is larger than {limit}")]
    TooLarge { file: String, limit: String },
    #[error("{file} has unsupported type {mime}")]
    UnsupportedType { file: String, mime: String },
}

impl UploadPolicy {
    /// Upload slot offered by the admin table for `kind`, if any.
    #[must_use]
    pub fn for_kind(kind: ResourceKind) -> Option<Self> {
        match kind {
            ResourceKind::Formations => Some(IMAGE_POLICY),
            ResourceKind::Lessons => Some(DOCUMENT_POLICY),
            _ => None,
        }
    }

    /// Value for the file input's `accept` attribute.
    #[must_use]
    pub fn accept(&self) -> String {
        self.allowed_mime.join(",")
    }

    /// Check a selected file against this policy.
    ///
    /// # Errors
    ///
    /// Returns the first violated limit: empty file, size, then MIME type.
    pub fn check(&self, file_name: &str, mime: &str, size: u64) -> Result<(), UploadError> {
        if size == 0 {
            return Err(UploadError::Empty { file: file_name.to_owned() });
        }
        if size > self.max_bytes {
            return Err(UploadError::TooLarge { file: file_name.to_owned(), limit: format_bytes(self.max_bytes) });
        }
        let mime = mime.trim().to_ascii_lowercase();
        if !self.allowed_mime.contains(&mime.as_str()) {
            return Err(UploadError::UnsupportedType { file: file_name.to_owned(), mime });
        }
        Ok(())
    }
}

/// Render a byte count as `512 B`, `1.5 KB` or `2 MB`.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const KIB: u64 = 1024;
    if bytes >= MIB {
        format_scaled(bytes, MIB, "MB")
    } else if bytes >= KIB {
        format_scaled(bytes, KIB, "KB")
    } else {
        format!("{bytes} B")
    }
}

fn format_scaled(bytes: u64, unit: u64, suffix: &str) -> String {
    let whole = bytes / unit;
    let tenths = (bytes % unit) * 10 / unit;
    if tenths == 0 { format!("{whole} {suffix}") } else { format!("{whole}.{tenths} {suffix}") }
}
