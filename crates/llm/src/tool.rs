//! Tool schemas and tool calls.

use schemars::Schema;
use serde::{Deserialize, Serialize};

/// A tool the model may call.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tool {
    /// The name of the tool.
    pub name: String,

    /// The description of the tool.
    pub description: String,

    /// JSON Schema for the tool's input.
    pub parameters: Schema,

    /// Whether the provider should strictly validate the parameters.
    pub strict: bool,
}

/// A tool call made by the model.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolCall {
    /// The id of the tool call.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// The type of tool (currently only "function").
    #[serde(default, rename = "type")]
    pub call_type: String,

    /// The function to call.
    pub function: FunctionCall,
}

/// A function call within a tool call.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FunctionCall {
    /// The name of the function to call.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// The arguments to pass to the function (JSON string).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub arguments: String,
}

impl ToolCall {
    /// Build a function call, mainly useful in tests.
    pub fn function(id: impl Into<String>, name: impl Into<String>, args: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            call_type: "function".into(),
            function: FunctionCall {
                name: name.into(),
                arguments: args.into(),
            },
        }
    }
}

/// Controls which tool is called by the model.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub enum ToolChoice {
    /// Model will not call any tool.
    #[serde(rename = "none")]
    None,

    /// Model can pick between generating a message or calling tools.
    #[serde(rename = "auto")]
    #[default]
    Auto,

    /// Model must call one or more tools.
    #[serde(rename = "required")]
    Required,
}
