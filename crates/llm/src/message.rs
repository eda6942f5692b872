//! Chat messages exchanged with a model.

use crate::ToolCall;
use serde::{Deserialize, Serialize};

/// A single message in a conversation.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Message {
    /// The role of the message.
    pub role: Role,

    /// The text content of the message.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,

    /// The id of the tool call this message answers (tool role only).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tool_call_id: String,

    /// Tool calls requested by the model (assistant role only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
}

impl Message {
    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            ..Default::default()
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            ..Default::default()
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            ..Default::default()
        }
    }

    /// Create a new tool-result message answering `call`.
    pub fn tool(content: impl Into<String>, call: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: content.into(),
            tool_call_id: call.into(),
            ..Default::default()
        }
    }

    /// Whether this message requests at least one tool call.
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// The role of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
pub enum Role {
    /// The user role.
    #[serde(rename = "user")]
    #[default]
    User,
    /// The assistant role.
    #[serde(rename = "assistant")]
    Assistant,
    /// The system role.
    #[serde(rename = "system")]
    System,
    /// The tool role.
    #[serde(rename = "tool")]
    Tool,
}
