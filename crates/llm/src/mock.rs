//! Deterministic mock providers for tests.
//!
//! [`ScriptedModel`] replays a fixed sequence of replies, tool calls and
//! failures included, so tests can exercise the executor loop without
//! network access. [`EchoModel`] answers with the last user message.

use crate::{ChatModel, Completion, CompletionRequest, Message, Role, ToolCall};
use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// One scripted model turn.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// A plain text reply.
    Text(String),
    /// A reply requesting the given tool calls.
    ToolCalls(Vec<ToolCall>),
    /// A provider-level failure.
    Fail(String),
}

impl ScriptedReply {
    /// Convenience for a single tool call.
    pub fn tool(id: impl Into<String>, name: impl Into<String>, args: impl Into<String>) -> Self {
        Self::ToolCalls(vec![ToolCall::function(id, name, args)])
    }
}

/// A pre-scripted provider. Each `complete` call pops the next reply from
/// the front of the queue and records the request it was given, so tests
/// can assert on exactly what the runtime sent.
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<ScriptedReply>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedModel {
    /// Build a provider from an ordered list of replies.
    pub fn new(replies: impl IntoIterator<Item = ScriptedReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Provider that answers every call with the same text.
    pub fn always_text(reply: impl Into<String>) -> Self {
        let text = reply.into();
        Self::new((0..64).map(|_| ScriptedReply::Text(text.clone())))
    }

    /// The requests seen so far, in call order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }

    /// Number of completion calls made so far.
    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    fn model_name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<Completion> {
        self.requests.lock().push(request);
        let reply = self
            .replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| ScriptedReply::Text("[script exhausted]".into()));

        let message = match reply {
            ScriptedReply::Text(text) => Message::assistant(text),
            ScriptedReply::ToolCalls(calls) => Message {
                role: Role::Assistant,
                tool_calls: calls,
                ..Default::default()
            },
            ScriptedReply::Fail(reason) => anyhow::bail!("{reason}"),
        };

        Ok(Completion { message })
    }
}

/// Echoes the last user message back as the reply.
#[derive(Default, Clone, Copy)]
pub struct EchoModel;

#[async_trait]
impl ChatModel for EchoModel {
    fn model_name(&self) -> &str {
        "echo"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<Completion> {
        let reply = request
            .messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.clone())
            .unwrap_or_default();
        Ok(Completion {
            message: Message::assistant(reply),
        })
    }
}
