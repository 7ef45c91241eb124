pub mod apply;
pub mod diagnostics;
pub mod report;
pub mod schema;
pub mod validate;

pub use apply::{apply_script, apply_script_with_options, ApplyOptions, Applied};
pub use diagnostics::{DiagnosticCode, ScriptDiagnostic, ScriptError};
pub use report::{ApplyReport, OpEvent, OpOutcome, ReportedNotification};
pub use schema::{EditOpV1, EditScriptV1, OpType, Target, EDIT_SCRIPT_V};
pub use validate::validate_script;
