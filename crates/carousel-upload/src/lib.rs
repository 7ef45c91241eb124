#![doc = r#"
⚠️ INTERNAL CRATE – NOT A STABLE API

This crate is an internal implementation detail of the carousel block.

Do NOT depend on this crate directly.
Use `carousel-io` instead.
"#]

pub mod config;
pub mod request;
pub mod response;
pub mod session;

pub use config::{CarouselConfig, Endpoints};
pub use request::{UploadRequest, UploadSource};
pub use response::{FileDescriptor, TransportError, UploadResponse};
pub use session::{begin_upload, report_failure, resolve_upload, PendingUpload, UploadResolution};
