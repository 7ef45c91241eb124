use std::fmt;

use crate::handle::EntryHandle;

/// Errors from carousel model operations.
///
/// Every operation that returns one of these has left the sequence untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarouselError {
    /// The handle no longer identifies a live entry (removed, or a stale
    /// upload callback). Callers treat this as a no-op.
    NotFound(EntryHandle),
    /// The transport failed, or answered without a usable `url`.
    UploadFailed(String),
}

impl CarouselError {
    /// Stable machine-readable code.
    pub const fn code(&self) -> &'static str {
        match self {
            CarouselError::NotFound(_) => "not_found",
            CarouselError::UploadFailed(_) => "upload_failed",
        }
    }

    /// NotFound is recovered locally and never shown to the user.
    pub fn is_benign(&self) -> bool {
        matches!(self, CarouselError::NotFound(_))
    }
}

impl fmt::Display for CarouselError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarouselError::NotFound(h) => write!(f, "{h} no longer exists"),
            CarouselError::UploadFailed(reason) => write!(f, "uploading failed: {reason}"),
        }
    }
}

impl std::error::Error for CarouselError {}
