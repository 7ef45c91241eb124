use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Edit script wire format version.
pub const EDIT_SCRIPT_V: u8 = 1;

/// A recorded sequence of user actions against a carousel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditScriptV1 {
    pub v: u8,
    pub ops: Vec<EditOpV1>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpType {
    /// User started an upload; a placeholder is appended.
    Append,
    /// The transport answered with a file.
    Complete,
    /// The transport reported failure.
    Fail,
    MoveLeft,
    MoveRight,
    Remove,
    SetCaption,
}

impl OpType {
    pub const fn as_str(self) -> &'static str {
        match self {
            OpType::Append => "append",
            OpType::Complete => "complete",
            OpType::Fail => "fail",
            OpType::MoveLeft => "move_left",
            OpType::MoveRight => "move_right",
            OpType::Remove => "remove",
            OpType::SetCaption => "set_caption",
        }
    }
}

/// Which entry an op acts on.
///
/// - a number is the 0-based position of an entry in the data the script is
///   applied to; it keeps naming that entry after reorders
/// - a string is a label bound by an earlier `append`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Target {
    Index(usize),
    Label(String),
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Index(i) => write!(f, "{i}"),
            Target::Label(l) => write!(f, "'{l}'"),
        }
    }
}

/// One edit op in wire format. Which fields are required depends on `op`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditOpV1 {
    pub op: OpType,

    /// `append` only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,

    /// `complete` only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// `complete` (optional) and `set_caption`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    /// `complete` only: transport-defined descriptor fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Map<String, Value>>,

    /// `fail` only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl EditOpV1 {
    pub fn new(op: OpType) -> Self {
        Self {
            op,
            label: None,
            target: None,
            url: None,
            caption: None,
            extra: None,
            reason: None,
        }
    }
}
