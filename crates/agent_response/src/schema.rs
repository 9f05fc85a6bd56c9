use serde::Deserialize;
use serde_json::{Map, Value};

/// One decoded content block from an agent response payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Text(String),
    /// Image source reference (URL or data URI).
    Image(String),
    ToolUse(ToolInvocation),
    ToolResult(ToolOutcome),
}

/// A tool the agent invoked, with its raw input map.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolInvocation {
    pub name: String,
    pub input: Map<String, Value>,
}

/// The outcome a tool reported back to the agent.
///
/// Children are restricted to text/image by [`ToolResultBlock`]: the protocol
/// allows exactly one level of nesting inside a tool result.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutcome {
    pub tool_use_id: String,
    pub is_error: bool,
    pub blocks: Vec<ToolResultBlock>,
}

/// Block kinds permitted inside a tool result.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResultBlock {
    Text(String),
    Image(String),
}

/// Wire shape of one role-tagged turn inside the payload array.
///
/// Block bodies stay as raw [`Value`]s here; individual blocks are mapped
/// one at a time so an unrecognized block type is skipped instead of failing
/// the whole payload.
#[derive(Debug, Deserialize)]
pub(crate) struct TurnWire {
    pub role: String,
    #[serde(default)]
    pub content: Vec<Value>,
}
