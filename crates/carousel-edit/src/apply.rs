use std::collections::HashMap;

use carousel_core::{CarouselError, CarouselModel, EntryHandle};
use carousel_upload::{resolve_upload, TransportError, UploadResolution, UploadResponse};
use serde_json::{json, Value};

use crate::diagnostics::{DiagnosticCode, ScriptDiagnostic, ScriptError};
use crate::report::{ApplyReport, OpEvent, OpOutcome, ReportedNotification};
use crate::schema::{EditOpV1, EditScriptV1, OpType, Target};
use crate::validate::validate_script;

/// Replay options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Reject the whole script when an op targets an entry removed earlier,
    /// instead of recording it as stale.
    pub fail_on_stale: bool,
}

/// Result of a successful replay.
#[derive(Debug, Clone)]
pub struct Applied {
    pub model: CarouselModel,
    pub report: ApplyReport,
}

/// Replay an edit script against a copy of `model`.
///
/// Semantics per op:
/// - append: appends a placeholder, binding `label` if given
/// - complete: feeds `{ success, file: { url, caption?, ...extra } }` to the
///   upload resolver
/// - fail: feeds a transport error to the upload resolver
/// - move_left / move_right / remove / set_caption: the model operation
///
/// The input model is never touched; on error nothing is returned.
pub fn apply_script(model: &CarouselModel, script: &EditScriptV1) -> Result<Applied, ScriptError> {
    apply_script_with_options(model, script, ApplyOptions::default())
}

pub fn apply_script_with_options(
    model: &CarouselModel,
    script: &EditScriptV1,
    opts: ApplyOptions,
) -> Result<Applied, ScriptError> {
    validate_script(model.len(), script)?;

    let mut out = model.clone();
    let loaded: Vec<EntryHandle> = model.handles().to_vec();
    let mut labels: HashMap<&str, EntryHandle> = HashMap::new();
    let mut events = Vec::with_capacity(script.ops.len());
    let mut notifications = Vec::new();

    for (i, op) in script.ops.iter().enumerate() {
        let outcome = match op.op {
            OpType::Append => {
                let handle = out.append_placeholder();
                if let Some(label) = op.label.as_deref() {
                    labels.insert(label, handle);
                }
                OpOutcome::Applied
            }

            OpType::Complete | OpType::Fail => {
                let handle = resolve_target(i, op, &loaded, &labels)?;
                let outcome = if op.op == OpType::Complete {
                    Ok(response_for(op))
                } else {
                    Err(TransportError(op.reason.clone().unwrap_or_default()))
                };

                match resolve_upload(&mut out, handle, outcome) {
                    UploadResolution::Completed(_) => OpOutcome::Applied,
                    UploadResolution::Stale(_) => OpOutcome::Stale,
                    UploadResolution::Failed {
                        reason,
                        notification,
                        ..
                    } => {
                        notifications.push(ReportedNotification {
                            op_index: i,
                            notification,
                            reason,
                        });
                        OpOutcome::Failed
                    }
                }
            }

            OpType::MoveLeft | OpType::MoveRight => {
                let handle = resolve_target(i, op, &loaded, &labels)?;
                let moved = if op.op == OpType::MoveLeft {
                    out.move_left(handle)
                } else {
                    out.move_right(handle)
                };
                match moved {
                    Ok(true) => OpOutcome::Applied,
                    Ok(false) => OpOutcome::Boundary,
                    Err(e) => stale_or_err(i, op, e)?,
                }
            }

            OpType::Remove => {
                let handle = resolve_target(i, op, &loaded, &labels)?;
                match out.remove(handle) {
                    Ok(_) => OpOutcome::Applied,
                    Err(e) => stale_or_err(i, op, e)?,
                }
            }

            OpType::SetCaption => {
                let handle = resolve_target(i, op, &loaded, &labels)?;
                let caption = op.caption.clone().unwrap_or_default();
                match out.set_caption(handle, caption) {
                    Ok(()) => OpOutcome::Applied,
                    Err(e) => stale_or_err(i, op, e)?,
                }
            }
        };

        if outcome == OpOutcome::Stale && opts.fail_on_stale {
            return Err(stale_error(i, op));
        }

        events.push(OpEvent {
            op_index: i,
            op: op.op,
            outcome,
        });
    }

    let report = ApplyReport::build(events, notifications, &out);
    Ok(Applied { model: out, report })
}

fn resolve_target(
    i: usize,
    op: &EditOpV1,
    loaded: &[EntryHandle],
    labels: &HashMap<&str, EntryHandle>,
) -> Result<EntryHandle, ScriptError> {
    let target = op.target.as_ref();
    let handle = match target {
        Some(Target::Index(n)) => loaded.get(*n).copied(),
        Some(Target::Label(l)) => labels.get(l.as_str()).copied(),
        None => None,
    };

    // Validation guarantees a binding; this only guards direct misuse.
    handle.ok_or_else(|| {
        ScriptError::single(ScriptDiagnostic::at_op(
            DiagnosticCode::UnknownLabel,
            i,
            op.op,
            "target",
            format!("ops[{i}] ({}) target does not resolve", op.op.as_str()),
        ))
    })
}

fn response_for(op: &EditOpV1) -> UploadResponse {
    let mut file = op.extra.clone().unwrap_or_default();
    file.insert("url".to_string(), Value::String(op.url.clone().unwrap_or_default()));
    if let Some(caption) = &op.caption {
        file.insert("caption".to_string(), Value::String(caption.clone()));
    }

    UploadResponse {
        success: json!(true),
        file: Some(Value::Object(file)),
    }
}

fn stale_or_err(i: usize, op: &EditOpV1, e: CarouselError) -> Result<OpOutcome, ScriptError> {
    match e {
        CarouselError::NotFound(h) => {
            tracing::debug!(op_index = i, op = op.op.as_str(), handle = %h, "target already removed");
            Ok(OpOutcome::Stale)
        }
        CarouselError::UploadFailed(reason) => Err(ScriptError::single(ScriptDiagnostic::at_op(
            DiagnosticCode::UrlEmpty,
            i,
            op.op,
            "url",
            format!("ops[{i}] ({}) {reason}", op.op.as_str()),
        ))),
    }
}

fn stale_error(i: usize, op: &EditOpV1) -> ScriptError {
    let mut diag = ScriptDiagnostic::at_op(
        DiagnosticCode::StaleTarget,
        i,
        op.op,
        "target",
        format!("ops[{i}] ({}) targets an entry that was already removed", op.op.as_str()),
    );
    if let Some(t) = &op.target {
        diag = diag.with_target(t);
    }
    ScriptError::single(diag)
}
