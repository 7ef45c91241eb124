use std::collections::HashSet;

use crate::diagnostics::{DiagnosticCode, ScriptDiagnostic, ScriptError};
use crate::schema::{EditOpV1, EditScriptV1, OpType, Target, EDIT_SCRIPT_V};

/// Check an edit script against data holding `loaded` entries. Strict and
/// fail-fast; nothing is mutated.
///
/// Rules:
/// - script version must be [`EDIT_SCRIPT_V`]
/// - `append` takes an optional unique, non-empty `label` and no `target`
/// - every other op needs a `target` naming a loaded index or a label bound
///   by an earlier `append`
/// - `complete` needs a non-empty `url`, `fail` a non-empty `reason`,
///   `set_caption` a `caption`
///
/// Whether a target is still live when the op runs is a replay concern, not a
/// validation one.
pub fn validate_script(loaded: usize, script: &EditScriptV1) -> Result<(), ScriptError> {
    if script.v != EDIT_SCRIPT_V {
        return Err(ScriptError::single(ScriptDiagnostic {
            code: DiagnosticCode::UnsupportedScriptVersion,
            path: Some("v".to_string()),
            op_index: None,
            op: None,
            target: None,
            message: format!("unsupported edit script version {}", script.v),
        }));
    }

    let mut labels: HashSet<&str> = HashSet::new();

    for (i, op) in script.ops.iter().enumerate() {
        let name = op.op.as_str();

        if op.op == OpType::Append {
            if op.target.is_some() {
                return Err(unexpected(i, op, "target"));
            }
            if let Some(label) = op.label.as_deref() {
                if label.trim().is_empty() {
                    return Err(ScriptError::single(ScriptDiagnostic::at_op(
                        DiagnosticCode::LabelEmpty,
                        i,
                        op.op,
                        "label",
                        format!("ops[{i}] ({name}) label is empty"),
                    )));
                }
                if !labels.insert(label) {
                    return Err(ScriptError::single(
                        ScriptDiagnostic::at_op(
                            DiagnosticCode::DuplicateLabel,
                            i,
                            op.op,
                            "label",
                            format!("ops[{i}] ({name}) label '{label}' is already bound"),
                        )
                        .with_target(Target::Label(label.to_string())),
                    ));
                }
            }
            continue;
        }

        if op.label.is_some() {
            return Err(unexpected(i, op, "label"));
        }

        let target = op.target.as_ref().ok_or_else(|| missing(i, op, "target"))?;
        match target {
            Target::Index(n) if *n >= loaded => {
                return Err(ScriptError::single(
                    ScriptDiagnostic::at_op(
                        DiagnosticCode::IndexOutOfRange,
                        i,
                        op.op,
                        "target",
                        format!("ops[{i}] ({name}) target index {n} is out of range (data has {loaded} entries)"),
                    )
                    .with_target(target),
                ));
            }
            Target::Label(l) if !labels.contains(l.as_str()) => {
                return Err(ScriptError::single(
                    ScriptDiagnostic::at_op(
                        DiagnosticCode::UnknownLabel,
                        i,
                        op.op,
                        "target",
                        format!("ops[{i}] ({name}) references unknown label '{l}'"),
                    )
                    .with_target(target),
                ));
            }
            _ => {}
        }

        match op.op {
            OpType::Complete => {
                let url = op.url.as_deref().ok_or_else(|| missing(i, op, "url"))?;
                if url.trim().is_empty() {
                    return Err(ScriptError::single(ScriptDiagnostic::at_op(
                        DiagnosticCode::UrlEmpty,
                        i,
                        op.op,
                        "url",
                        format!("ops[{i}] ({name}) url is empty"),
                    )));
                }
                if op.reason.is_some() {
                    return Err(unexpected(i, op, "reason"));
                }
            }

            OpType::Fail => {
                let reason = op.reason.as_deref().ok_or_else(|| missing(i, op, "reason"))?;
                if reason.trim().is_empty() {
                    return Err(ScriptError::single(ScriptDiagnostic::at_op(
                        DiagnosticCode::ReasonEmpty,
                        i,
                        op.op,
                        "reason",
                        format!("ops[{i}] ({name}) reason is empty"),
                    )));
                }
                reject_upload_fields(i, op)?;
            }

            OpType::SetCaption => {
                op.caption.as_deref().ok_or_else(|| missing(i, op, "caption"))?;
                if op.url.is_some() {
                    return Err(unexpected(i, op, "url"));
                }
                if op.extra.is_some() {
                    return Err(unexpected(i, op, "extra"));
                }
            }

            OpType::MoveLeft | OpType::MoveRight | OpType::Remove => {
                reject_upload_fields(i, op)?;
                if op.caption.is_some() {
                    return Err(unexpected(i, op, "caption"));
                }
                if op.reason.is_some() {
                    return Err(unexpected(i, op, "reason"));
                }
            }

            OpType::Append => {}
        }
    }

    Ok(())
}

fn reject_upload_fields(i: usize, op: &EditOpV1) -> Result<(), ScriptError> {
    if op.url.is_some() {
        return Err(unexpected(i, op, "url"));
    }
    if op.extra.is_some() {
        return Err(unexpected(i, op, "extra"));
    }
    Ok(())
}

fn missing(i: usize, op: &EditOpV1, field: &str) -> ScriptError {
    ScriptError::single(ScriptDiagnostic::at_op(
        DiagnosticCode::MissingField,
        i,
        op.op,
        field,
        format!("ops[{i}] ({}) missing {field}", op.op.as_str()),
    ))
}

fn unexpected(i: usize, op: &EditOpV1, field: &str) -> ScriptError {
    ScriptError::single(ScriptDiagnostic::at_op(
        DiagnosticCode::UnexpectedField,
        i,
        op.op,
        field,
        format!("ops[{i}] ({}) unexpected {field}", op.op.as_str()),
    ))
}
