use crate::schema::OpType;

use serde::{Deserialize, Serialize};

/// Stable, machine-readable codes for edit script problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCode {
    UnsupportedScriptVersion,
    MissingField,
    UnexpectedField,
    /// `append` label is empty or already bound.
    DuplicateLabel,
    LabelEmpty,
    /// Target label was never bound by an earlier `append`.
    UnknownLabel,
    /// Target index is outside the loaded data.
    IndexOutOfRange,
    UrlEmpty,
    ReasonEmpty,
    /// Target entry was removed earlier in the script (only fatal with
    /// `fail_on_stale`).
    StaleTarget,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptDiagnostic {
    pub code: DiagnosticCode,
    /// JSON-ish path such as `v` or `ops[3].target`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub op_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub op: Option<OpType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub message: String,
}

impl ScriptDiagnostic {
    pub(crate) fn at_op(code: DiagnosticCode, i: usize, op: OpType, field: &str, message: String) -> Self {
        Self {
            code,
            path: Some(format!("ops[{i}].{field}")),
            op_index: Some(i),
            op: Some(op),
            target: None,
            message,
        }
    }

    pub(crate) fn with_target(mut self, target: impl ToString) -> Self {
        self.target = Some(target.to_string());
        self
    }
}

/// Edit script rejection. Validation is fail-fast, so there is currently one
/// diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptError {
    pub diagnostics: Vec<ScriptDiagnostic>,
}

impl ScriptError {
    pub fn single(diag: ScriptDiagnostic) -> Self {
        Self {
            diagnostics: vec![diag],
        }
    }

    pub fn code(&self) -> Option<DiagnosticCode> {
        self.diagnostics.first().map(|d| d.code)
    }

    pub fn message(&self) -> String {
        self.diagnostics
            .first()
            .map(|d| d.message.clone())
            .unwrap_or_else(|| "edit script rejected".to_string())
    }
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ScriptError {}
