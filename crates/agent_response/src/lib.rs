//! Parser for the `<AutoAgentResponse>` structured-content protocol.
//!
//! Agent messages arrive as plain text that may embed an XML-delimited JSON
//! payload: an array of role-tagged turns, each holding an ordered list of
//! typed content blocks (text, image, tool use, tool result). This crate
//! decodes that payload into a flat [`ContentBlock`] sequence for rendering.
//!
//! The parser fails open: any body without the delimiter pair, or with a
//! malformed payload between them, yields `None` and the caller renders the
//! body verbatim. A rendering concern must never take down the conversation
//! view.

pub mod parser;
pub mod schema;

pub use parser::{parse, END_TAG, START_TAG};
pub use schema::{ContentBlock, ToolInvocation, ToolOutcome, ToolResultBlock};
