#![doc = r#"
⚠️ INTERNAL CRATE – NOT A STABLE API

This crate is an internal implementation detail of the carousel block.

Do NOT depend on this crate directly.
Use `carousel-io` instead.
"#]

pub mod entry;
pub mod error;
pub mod handle;
pub mod model;

pub use entry::{EntryState, ImageEntry};
pub use error::CarouselError;
pub use handle::EntryHandle;
pub use model::CarouselModel;
