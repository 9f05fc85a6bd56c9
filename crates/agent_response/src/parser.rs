use serde_json::Value;

use crate::schema::{ContentBlock, ToolInvocation, ToolOutcome, ToolResultBlock, TurnWire};

/// Opening delimiter for an embedded structured payload.
pub const START_TAG: &str = "<AutoAgentResponse>";
/// Closing delimiter for an embedded structured payload.
pub const END_TAG: &str = "</AutoAgentResponse>";

/// Decode the structured payload embedded in a raw message body.
///
/// Returns `None` when the body carries no delimiter pair or the payload
/// between them is not a valid turn array: the caller then treats the whole
/// body as plain text. The extracted span runs from the first opening tag to
/// the last closing tag, so generated text that itself mentions the closing
/// tag does not truncate the payload.
///
/// A single leading `user` turn is the echoed prompt, not agent output, and
/// is skipped. All remaining turns flatten into one block sequence in source
/// order; `tool_result` turns keep their children nested one level deep.
pub fn parse(raw: &str) -> Option<Vec<ContentBlock>> {
    let start = raw.find(START_TAG)?;
    let end = raw.rfind(END_TAG)?;
    let payload_start = start + START_TAG.len();
    if end < payload_start {
        return None;
    }

    let turns: Vec<TurnWire> = serde_json::from_str(&raw[payload_start..end]).ok()?;
    let skip = usize::from(turns.first().is_some_and(|turn| turn.role == "user"));

    let mut blocks = Vec::new();
    for turn in turns.iter().skip(skip) {
        for value in &turn.content {
            if let Some(block) = map_block(value) {
                blocks.push(block);
            }
        }
    }
    Some(blocks)
}

fn map_block(value: &Value) -> Option<ContentBlock> {
    let block_type = value.get("type")?.as_str()?;

    match block_type {
        "text" => {
            let text = value.get("text")?.as_str()?;
            Some(ContentBlock::Text(text.to_string()))
        }
        "image" => {
            let source = value.get("source")?.as_str()?;
            Some(ContentBlock::Image(source.to_string()))
        }
        "tool_use" => {
            let name = value.get("name")?.as_str()?;
            let input = value
                .get("input")
                .and_then(|input| input.as_object())
                .cloned()
                .unwrap_or_default();
            Some(ContentBlock::ToolUse(ToolInvocation {
                name: name.to_string(),
                input,
            }))
        }
        "tool_result" => {
            let tool_use_id = value.get("tool_use_id")?.as_str()?;
            let is_error = value
                .get("is_error")
                .and_then(|flag| flag.as_bool())
                .unwrap_or(false);
            let blocks = value
                .get("content")
                .and_then(|content| content.as_array())
                .map(|children| {
                    children.iter().filter_map(map_tool_result_block).collect()
                })
                .unwrap_or_default();
            Some(ContentBlock::ToolResult(ToolOutcome {
                tool_use_id: tool_use_id.to_string(),
                is_error,
                blocks,
            }))
        }
        _ => None,
    }
}

/// Only text and image blocks may appear inside a tool result; anything else
/// is dropped rather than nested further.
fn map_tool_result_block(value: &Value) -> Option<ToolResultBlock> {
    let block_type = value.get("type")?.as_str()?;
    match block_type {
        "text" => {
            let text = value.get("text")?.as_str()?;
            Some(ToolResultBlock::Text(text.to_string()))
        }
        "image" => {
            let source = value.get("source")?.as_str()?;
            Some(ToolResultBlock::Image(source.to_string()))
        }
        _ => None,
    }
}
