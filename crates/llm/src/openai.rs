//! OpenAI-compatible chat completion provider.

use crate::{ChatModel, Completion, CompletionRequest, Message, Tool};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

/// A provider speaking the OpenAI `chat/completions` wire format.
///
/// Works against api.openai.com and any compatible gateway; the base URL
/// is injected so deployments can point at a proxy.
#[derive(Clone)]
pub struct OpenAiModel {
    /// Base URL, e.g. `https://api.openai.com/v1`.
    base_url: String,
    /// Bearer token.
    api_key: String,
    /// Model identifier sent with every request.
    model: String,
    /// HTTP client for API calls.
    client: Client,
}

impl OpenAiModel {
    /// Create a new provider for the given model.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            client: Client::new(),
        }
    }

    /// Replace the HTTP client, e.g. to set connection timeouts.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn body(&self, request: &CompletionRequest) -> serde_json::Value {
        let mut body = json!({
            "model": self.model,
            "messages": request.messages,
            "temperature": request.params.temperature,
            "top_p": request.params.top_p,
            "max_tokens": request.params.max_tokens,
        });

        if !request.tools.is_empty() {
            body["tools"] = request.tools.iter().map(wire_tool).collect();
            body["tool_choice"] = serde_json::to_value(&request.tool_choice).unwrap_or_default();
            body["parallel_tool_calls"] = json!(request.params.parallel_tool_calls);
        }

        body
    }
}

/// OpenAI tool wrapper: `{"type": "function", "function": {...}}`.
fn wire_tool(tool: &Tool) -> serde_json::Value {
    json!({
        "type": "function",
        "function": {
            "name": tool.name,
            "description": tool.description,
            "parameters": tool.parameters,
            "strict": tool.strict,
        },
    })
}

/// OpenAI chat completion response.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

/// A single completion choice.
#[derive(Debug, Deserialize)]
struct Choice {
    message: WireMessage,
}

/// Assistant message as OpenAI sends it: `content` is null on tool calls.
#[derive(Debug, Deserialize)]
struct WireMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<crate::ToolCall>,
}

impl From<WireMessage> for Message {
    fn from(wire: WireMessage) -> Self {
        Self {
            role: crate::Role::Assistant,
            content: wire.content.unwrap_or_default(),
            tool_calls: wire.tool_calls,
            ..Default::default()
        }
    }
}

#[async_trait]
impl ChatModel for OpenAiModel {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<Completion> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&self.body(&request))
            .send()
            .await
            .context("chat completion request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("chat completion returned {status}: {body}");
        }

        let mut parsed: ChatResponse = response
            .json()
            .await
            .context("chat completion response was not valid JSON")?;

        if parsed.choices.is_empty() {
            anyhow::bail!("chat completion response contained no choices");
        }

        Ok(Completion {
            message: parsed.choices.remove(0).message.into(),
        })
    }
}
