use std::collections::BTreeMap;

use carousel_core::{CarouselModel, EntryState, ImageEntry};
use carousel_messages::{Notification, Translator};
use serde::{Deserialize, Serialize};

use crate::schema::OpType;

/// What happened to a single op during replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpOutcome {
    Applied,
    /// Move at the first/last position; sequence unchanged.
    Boundary,
    /// Target was removed earlier; ignored.
    Stale,
    /// Upload failure; the user gets a notification.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpEvent {
    pub op_index: usize,
    pub op: OpType,
    pub outcome: OpOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportedNotification {
    pub op_index: usize,
    pub notification: Notification,
    /// Diagnostic reason, for logs only.
    pub reason: String,
}

/// Deterministic summary of a script replay.
///
/// Contains no timestamps, so equal inputs give byte-identical reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyReport {
    /// Ops total.
    pub ops: usize,
    /// Ops grouped by op type.
    pub ops_by_type: BTreeMap<String, usize>,
    pub stale: usize,
    pub boundary: usize,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub events: Vec<OpEvent>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub notifications: Vec<ReportedNotification>,
    /// Live entries after replay, pending ones included.
    pub entries: usize,
    pub pending: usize,
    /// What the host would persist.
    pub saved: Vec<ImageEntry>,
}

impl ApplyReport {
    pub(crate) fn build(
        events: Vec<OpEvent>,
        notifications: Vec<ReportedNotification>,
        model: &CarouselModel,
    ) -> Self {
        let mut ops_by_type: BTreeMap<String, usize> = BTreeMap::new();
        let mut stale = 0;
        let mut boundary = 0;
        for e in &events {
            *ops_by_type.entry(e.op.as_str().to_string()).or_insert(0) += 1;
            match e.outcome {
                OpOutcome::Stale => stale += 1,
                OpOutcome::Boundary => boundary += 1,
                OpOutcome::Applied | OpOutcome::Failed => {}
            }
        }

        let pending = model
            .iter()
            .filter(|(_, e)| e.state() == EntryState::Pending)
            .count();

        Self {
            ops: events.len(),
            ops_by_type,
            stale,
            boundary,
            events,
            notifications,
            entries: model.len(),
            pending,
            saved: model.serialize(),
        }
    }

    /// Notification texts as the host would show them.
    pub fn messages(&self, translator: &dyn Translator) -> Vec<String> {
        self.notifications
            .iter()
            .map(|n| n.notification.message(translator))
            .collect()
    }
}
