//! Unified chat-completion interface for the encore runtime.
//!
//! The reply-generation capability is an opaque collaborator: it can fail,
//! be slow, or return malformed output. This crate pins down the message
//! and tool wire types, the [`ChatModel`] seam the runtime calls through,
//! an OpenAI-compatible HTTP provider, and deterministic mock providers
//! for tests.

mod message;
mod mock;
mod openai;
mod params;
mod provider;
mod tool;

pub use message::{Message, Role};
pub use mock::{EchoModel, ScriptedModel, ScriptedReply};
pub use openai::OpenAiModel;
pub use params::GenerationParams;
pub use provider::{ChatModel, Completion, CompletionRequest};
pub use tool::{FunctionCall, Tool, ToolCall, ToolChoice};
