//! `carousel-io` is the single supported public entrypoint for the carousel
//! block: the entry model, persisted-data IO, upload handling and edit
//! scripts.
//!
//! This crate contains **no** rendering or DOM logic and performs no network
//! I/O. Upload requests are described here and carried out by the host.

// -----------------------------------------------------------------------------
// Public API contract
// -----------------------------------------------------------------------------
//
// Consumers SHOULD import from `carousel_io::prelude::*`.
// Anything not re-exported via the prelude is considered internal and may change
// without notice.

#[doc(hidden)]
pub mod core {
    pub use carousel_core::{CarouselError, CarouselModel, EntryHandle, EntryState, ImageEntry};
}

/// Canonical (sorted-key) JSON output.
pub mod canonical_json;

/// Parsing and writing the block's persisted data.
pub mod data_json;

/// Wire format versions and the bundled JSON Schema.
pub mod version;

#[doc(hidden)]
pub mod messages {
    pub use carousel_messages::{
        IdentityTranslator, MessageKey, Notification, NotificationStyle, Translator,
    };
}

#[doc(hidden)]
pub mod upload {
    pub use carousel_upload::{
        begin_upload, report_failure, resolve_upload, CarouselConfig, Endpoints, FileDescriptor,
        PendingUpload, TransportError, UploadRequest, UploadResolution, UploadResponse,
        UploadSource,
    };
}

#[doc(hidden)]
pub mod edit {
    pub use carousel_edit::{
        apply_script, apply_script_with_options, validate_script, Applied, ApplyOptions,
        ApplyReport, DiagnosticCode, EditOpV1, EditScriptV1, OpEvent, OpOutcome, OpType,
        ReportedNotification, ScriptDiagnostic, ScriptError, Target,
    };
}

/// Convenience prelude for consumers.
///
/// This is the **only supported** import surface for external users.
pub mod prelude {
    pub use crate::core::{CarouselError, CarouselModel, EntryHandle, EntryState, ImageEntry};
    pub use crate::data_json::{parse_data_json_str, DataJsonError};
    pub use crate::edit::{apply_script, ApplyReport, EditScriptV1, ScriptError};
    pub use crate::messages::{IdentityTranslator, MessageKey, Notification, Translator};
    pub use crate::upload::{
        begin_upload, resolve_upload, CarouselConfig, TransportError, UploadResolution,
        UploadResponse, UploadSource,
    };
    pub use crate::{canonical_json, data_json};
}
