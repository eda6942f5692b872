//! The per-message lifecycle: classify, route, execute, persist.

use crate::{
    Business, Classification, Intent, Profiles, Tools, Transcript, WorkflowError, classify,
    executor, sink,
};
use chrono::Utc;
use llm::{ChatModel, Message};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use store::{ExchangeRecord, LinkIssuer, Store};

/// One inbound customer message.
#[derive(Debug, Clone, Deserialize)]
pub struct SmsRequest {
    /// The sender's phone number.
    pub phone_number: String,
    /// The message text.
    pub message: String,
    /// Opaque context the transport already knows about this customer.
    #[serde(default)]
    pub customer_context: Option<serde_json::Value>,
}

/// The reply returned to the transport.
#[derive(Debug, Clone, Serialize)]
pub struct SmsResponse {
    /// Whether the exchange completed through a specialist.
    pub success: bool,
    /// The text to send back. Never empty: failures carry the fallback.
    pub output_text: String,
    /// The selected intent, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<Intent>,
    /// The specialist that produced the reply, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_used: Option<String>,
    /// Classifier confidence, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    /// Internal error description, on failure. For telemetry, not customers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// What a successful exchange produced, before persistence.
struct Outcome {
    reply: String,
    classification: Classification,
    agent: &'static str,
}

/// The orchestrator: wires classifier, router, executor, and sink into
/// one request lifecycle and owns the top-level fallback.
pub struct Workflow {
    model: Arc<dyn ChatModel>,
    tools: Tools,
    profiles: Profiles,
    store: Arc<dyn Store>,
    business: Business,
}

impl Workflow {
    /// Wire a workflow to its collaborators.
    pub fn new(
        model: Arc<dyn ChatModel>,
        store: Arc<dyn Store>,
        links: Arc<dyn LinkIssuer>,
        business: Business,
    ) -> Self {
        Self {
            tools: Tools::new(store.clone(), links, business.clone()),
            profiles: Profiles::new(&business),
            model,
            store,
            business,
        }
    }

    /// Handle one inbound message end to end.
    ///
    /// Any classification or execution failure becomes the fixed fallback
    /// reply; the caller never sees a raw error. The audit write happens
    /// after the reply is finalized and cannot affect it.
    pub async fn handle(&self, request: SmsRequest) -> SmsResponse {
        match self.exchange(&request).await {
            Ok(outcome) => {
                sink::persist(
                    self.store.as_ref(),
                    ExchangeRecord {
                        phone_number: request.phone_number.clone(),
                        message: request.message.clone(),
                        response: outcome.reply.clone(),
                        agent_used: outcome.agent.to_owned(),
                        classification: outcome.classification.classification.as_str().to_owned(),
                        created_at: Utc::now(),
                    },
                )
                .await;

                SmsResponse {
                    success: true,
                    output_text: outcome.reply,
                    classification: Some(outcome.classification.classification),
                    agent_used: Some(outcome.agent.to_owned()),
                    confidence: outcome.classification.confidence,
                    error: None,
                }
            }
            Err(err) => {
                tracing::error!(
                    phone = %request.phone_number,
                    error = %err,
                    "exchange failed, returning fallback"
                );
                SmsResponse {
                    success: false,
                    output_text: self.business.fallback_reply(),
                    classification: None,
                    agent_used: None,
                    confidence: None,
                    error: Some(err.to_string()),
                }
            }
        }
    }

    async fn exchange(&self, request: &SmsRequest) -> Result<Outcome, WorkflowError> {
        let mut transcript = Transcript::new();
        if let Some(context) = &request.customer_context {
            transcript.push(Message::assistant(format!(
                "Known customer context: {context}"
            )));
        }
        transcript.push(Message::user(&request.message));

        let classification =
            classify(self.model.as_ref(), &self.business, &mut transcript).await?;
        let profile = self.profiles.for_intent(classification.classification);
        tracing::info!(
            phone = %request.phone_number,
            intent = classification.classification.as_str(),
            agent = profile.name,
            "routed inquiry"
        );

        let reply =
            executor::run(self.model.as_ref(), &self.tools, profile, &mut transcript).await?;

        Ok(Outcome {
            reply,
            classification,
            agent: profile.name,
        })
    }
}
