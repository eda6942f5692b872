//! The bounded tool-orchestration loop.

use crate::{AgentProfile, ExecuteError, ToolKind, Tools, Transcript};
use llm::{ChatModel, CompletionRequest, Message, ToolCall, ToolChoice};
use serde_json::{Value, json};
use std::time::Duration;
use tokio::time::timeout;

/// Most generation rounds one exchange may take.
///
/// The reference behavior never needed more than a handful; a model stuck
/// requesting tools past this cap fails the exchange instead of spinning.
pub const MAX_TOOL_ROUNDS: usize = 6;

/// Time budget for each generation call.
pub const GENERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Run one specialist over the transcript until it produces a reply.
///
/// Tool calls execute strictly one at a time, each result appended to the
/// transcript before the next call starts: several tools mutate the same
/// contact row, and interleaving them would race. A disallowed or unknown
/// tool becomes an error tool-turn and the loop continues.
pub async fn run(
    model: &dyn ChatModel,
    tools: &Tools,
    profile: &AgentProfile,
    transcript: &mut Transcript,
) -> Result<String, ExecuteError> {
    let specs = tools.specs(profile.tools);

    for _ in 0..MAX_TOOL_ROUNDS {
        let mut messages = vec![Message::system(profile.instructions.clone())];
        messages.extend_from_slice(transcript.turns());

        let request = CompletionRequest {
            messages,
            tools: specs.clone(),
            tool_choice: ToolChoice::Auto,
            params: profile.params,
        };

        let completion = timeout(GENERATION_TIMEOUT, model.complete(request))
            .await
            .map_err(|_| ExecuteError::Timeout)??;

        let message = completion.message;
        if !message.has_tool_calls() {
            if message.content.trim().is_empty() {
                return Err(ExecuteError::EmptyReply);
            }
            let reply = message.content.clone();
            transcript.push(message);
            return Ok(reply);
        }

        let calls = message.tool_calls.clone();
        transcript.push(message);

        for call in &calls {
            let output = execute_call(tools, profile, call).await;
            transcript.push(Message::tool(output.to_string(), call.id.clone()));
        }
    }

    Err(ExecuteError::TooManyRounds {
        cap: MAX_TOOL_ROUNDS,
    })
}

/// Gate one call on the profile's tool set, then dispatch it.
async fn execute_call(tools: &Tools, profile: &AgentProfile, call: &ToolCall) -> Value {
    let name = call.function.name.as_str();

    let Some(kind) = ToolKind::from_name(name) else {
        tracing::warn!(tool = name, agent = profile.name, "unknown tool requested");
        return json!({
            "success": false,
            "error": format!("unknown tool: {name}"),
        });
    };

    if !profile.tools.contains(&kind) {
        tracing::warn!(tool = name, agent = profile.name, "tool not permitted for agent");
        return json!({
            "success": false,
            "error": format!("tool {name} is not available to this agent"),
        });
    }

    tools.dispatch(kind, &call.function.arguments).await
}
