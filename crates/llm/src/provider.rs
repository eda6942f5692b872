//! Provider seam for chat completion backends.

use crate::{GenerationParams, Message, Tool, ToolChoice};
use anyhow::Result;
use async_trait::async_trait;

/// One completion request: the full message list plus tools and parameters.
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    /// The conversation so far, system message first.
    pub messages: Vec<Message>,

    /// Tools offered to the model for this call.
    pub tools: Vec<Tool>,

    /// How the model may pick tools.
    pub tool_choice: ToolChoice,

    /// Sampling and budget parameters.
    pub params: GenerationParams,
}

impl CompletionRequest {
    /// Build a request from messages and parameters, with no tools.
    pub fn new(messages: Vec<Message>, params: GenerationParams) -> Self {
        Self {
            messages,
            params,
            ..Default::default()
        }
    }

    /// Offer the given tools to the model.
    pub fn with_tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools = tools;
        self
    }
}

/// The model's answer to one completion request.
#[derive(Debug, Clone)]
pub struct Completion {
    /// The assistant message produced by the model.
    pub message: Message,
}

impl Completion {
    /// The text content of the reply, if any.
    pub fn text(&self) -> &str {
        &self.message.content
    }
}

/// A chat-completion backend.
///
/// Implementations are black boxes from the runtime's point of view: they
/// may fail, hang, or return malformed output, and the caller owns the
/// timeout and the interpretation of the reply.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Human-readable model identifier, used in telemetry.
    fn model_name(&self) -> &str;

    /// Run one completion call.
    async fn complete(&self, request: CompletionRequest) -> Result<Completion>;
}
