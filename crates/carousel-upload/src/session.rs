use carousel_core::{CarouselError, CarouselModel, EntryHandle};
use carousel_messages::{MessageKey, Notification};

use crate::config::CarouselConfig;
use crate::request::{UploadRequest, UploadSource};
use crate::response::{TransportError, UploadResponse};

/// An upload in flight: the placeholder it will fill and what to send.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingUpload {
    pub handle: EntryHandle,
    pub request: UploadRequest,
}

/// Outcome of feeding a transport result back into the model.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadResolution {
    /// The placeholder now carries the uploaded file.
    Completed(EntryHandle),
    /// The entry was removed while the upload was in flight; nothing changed.
    Stale(EntryHandle),
    /// The placeholder (if still present) stays pending; show `notification`.
    Failed {
        handle: EntryHandle,
        reason: String,
        notification: Notification,
    },
}

impl UploadResolution {
    pub fn notification(&self) -> Option<Notification> {
        match self {
            UploadResolution::Failed { notification, .. } => Some(*notification),
            _ => None,
        }
    }
}

/// Start an upload: check the source against the config, then append a
/// placeholder. Nothing is appended when the source is rejected.
pub fn begin_upload(
    model: &mut CarouselModel,
    config: &CarouselConfig,
    source: UploadSource,
) -> Result<PendingUpload, CarouselError> {
    let request = UploadRequest::for_source(config, source)?;
    let handle = model.append_placeholder();
    tracing::debug!(%handle, endpoint = %request.endpoint, "upload started");
    Ok(PendingUpload { handle, request })
}

/// Apply what the transport answered for `handle`.
///
/// Never returns an error: a result for a removed entry is logged and ignored
/// whether it succeeded or not, a failed upload for a live entry becomes a
/// user notification.
pub fn resolve_upload(
    model: &mut CarouselModel,
    handle: EntryHandle,
    outcome: Result<UploadResponse, TransportError>,
) -> UploadResolution {
    if !model.contains(handle) {
        tracing::debug!(%handle, ok = outcome.is_ok(), "upload finished for a removed entry; ignoring");
        return UploadResolution::Stale(handle);
    }

    let descriptor = match outcome {
        Ok(resp) => resp.into_descriptor(),
        Err(e) => Err(CarouselError::UploadFailed(e.0)),
    };

    let result = descriptor.and_then(|d| model.complete_entry(handle, d.url, d.caption, d.extra));

    match result {
        Ok(()) => {
            tracing::debug!(%handle, "upload completed");
            UploadResolution::Completed(handle)
        }
        Err(CarouselError::NotFound(h)) => {
            tracing::debug!(handle = %h, "upload finished for a removed entry; ignoring");
            UploadResolution::Stale(h)
        }
        Err(CarouselError::UploadFailed(reason)) => report_failure(handle, reason),
    }
}

/// Turn a transport failure into the notification the host should show.
pub fn report_failure(handle: EntryHandle, reason: impl Into<String>) -> UploadResolution {
    let reason = reason.into();
    tracing::warn!(%handle, %reason, "uploading failed");
    UploadResolution::Failed {
        handle,
        reason,
        notification: Notification::error(MessageKey::UploadFailed),
    }
}
