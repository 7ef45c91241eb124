//! Wire format versions and schema bundle.

pub use carousel_edit::EDIT_SCRIPT_V;

/// JSON Schema for saved carousel data (`schemas/carousel-data.schema.json`).
///
/// Loading stays lenient; this schema describes what a conforming save looks
/// like and is what `carousel validate` checks against.
pub const DATA_SCHEMA: &str = include_str!("../../../schemas/carousel-data.schema.json");

/// Bump when the schema constraints change.
pub const SCHEMA_BUNDLE_V: u8 = 1;
