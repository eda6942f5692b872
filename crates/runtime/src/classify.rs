//! Intent classification over the transcript.

use crate::{Business, Classification, ClassifyError, Transcript};
use llm::{ChatModel, CompletionRequest, GenerationParams, Message};
use std::time::Duration;
use tokio::time::timeout;

/// Time budget for the classification call.
pub const CLASSIFY_TIMEOUT: Duration = Duration::from_secs(30);

/// Token budget for the classification reply.
const CLASSIFY_MAX_TOKENS: u32 = 150;

/// Classify the latest inquiry into exactly one intent.
///
/// Runs one low-variance completion over the transcript and parses the
/// reply as a JSON classification payload. On success the model's own
/// turn is appended to the transcript so the routed specialist sees the
/// classification step. There is no retry: any failure propagates as a
/// [`ClassifyError`] and the workflow falls back.
pub async fn classify(
    model: &dyn ChatModel,
    business: &Business,
    transcript: &mut Transcript,
) -> Result<Classification, ClassifyError> {
    let mut messages = vec![Message::system(instructions(business))];
    messages.extend_from_slice(transcript.turns());

    let request = CompletionRequest::new(
        messages,
        GenerationParams::deterministic(CLASSIFY_MAX_TOKENS),
    );

    let completion = timeout(CLASSIFY_TIMEOUT, model.complete(request))
        .await
        .map_err(|_| ClassifyError::Timeout)??;

    let raw = completion.text().trim().to_owned();
    let Some(classification) = parse_classification(&raw) else {
        return Err(ClassifyError::Unparseable { raw });
    };

    transcript.push(completion.message);
    Ok(classification)
}

/// The classification instructions, with one block per category.
fn instructions(business: &Business) -> String {
    format!(
        "You are a classification agent for {name}, a professional DJ service in {city}.\n\
         \n\
         Analyze the customer's message and classify their intent into ONE of these categories:\n\
         \n\
         1. check_availability: asking about specific dates or openings.\n\
            Examples: \"Are you available June 15?\", \"Do you have any openings in July?\"\n\
         2. get_pricing: asking for rates, package details, or cost estimates.\n\
            Examples: \"How much do you charge?\", \"Wedding DJ prices?\"\n\
         3. book_service: ready to book, wants the selection link, or finalizing details.\n\
            Examples: \"I want to book you\", \"How do I reserve my date?\"\n\
         4. general_question: questions about services, equipment, music, or process.\n\
            Examples: \"What equipment do you have?\", \"Do you take requests?\"\n\
         5. existing_customer: mentions an existing booking or a previous conversation.\n\
            Examples: \"Checking on my quote\", \"I talked to {owner} yesterday\"\n\
         \n\
         Reply with ONLY a JSON object of the form\n\
         {{\"classification\": \"<category>\", \"confidence\": <0..1>, \"detected_intent\": \"<short description>\"}}.",
        name = business.name,
        city = business.city,
        owner = business.owner,
    )
}

/// Parse a classification payload, tolerating a Markdown code fence.
fn parse_classification(raw: &str) -> Option<Classification> {
    if let Ok(parsed) = serde_json::from_str(strip_fences(raw)) {
        return Some(parsed);
    }

    // Last resort: the outermost object embedded in surrounding prose.
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    serde_json::from_str(&raw[start..=end]).ok()
}

fn strip_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    trimmed.strip_suffix("```").unwrap_or(trimmed).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Intent;
    use llm::{ScriptedModel, ScriptedReply};

    fn transcript_with(message: &str) -> Transcript {
        let mut transcript = Transcript::new();
        transcript.push(Message::user(message));
        transcript
    }

    #[tokio::test]
    async fn classifies_bare_json() {
        let model = ScriptedModel::new([ScriptedReply::Text(
            r#"{"classification":"check_availability","confidence":0.92,"detected_intent":"date availability"}"#.into(),
        )]);
        let mut transcript = transcript_with("Are you available June 15 for a wedding?");

        let result = classify(&model, &Business::default(), &mut transcript)
            .await
            .unwrap();
        assert_eq!(result.classification, Intent::CheckAvailability);
        assert_eq!(result.confidence, Some(0.92));
    }

    #[tokio::test]
    async fn classifies_fenced_json() {
        let model = ScriptedModel::new([ScriptedReply::Text(
            "```json\n{\"classification\":\"get_pricing\"}\n```".into(),
        )]);
        let mut transcript = transcript_with("how much for a corporate party?");

        let result = classify(&model, &Business::default(), &mut transcript)
            .await
            .unwrap();
        assert_eq!(result.classification, Intent::GetPricing);
    }

    #[tokio::test]
    async fn appends_classifier_turn_on_success() {
        let model = ScriptedModel::new([ScriptedReply::Text(
            r#"{"classification":"book_service"}"#.into(),
        )]);
        let mut transcript = transcript_with("let's book it");

        classify(&model, &Business::default(), &mut transcript)
            .await
            .unwrap();
        assert_eq!(transcript.len(), 2);
        assert!(transcript.last().unwrap().content.contains("book_service"));
    }

    #[tokio::test]
    async fn garbage_reply_is_unparseable() {
        let model = ScriptedModel::new([ScriptedReply::Text("I think pricing, maybe?".into())]);
        let mut transcript = transcript_with("hello");

        let err = classify(&model, &Business::default(), &mut transcript)
            .await
            .unwrap_err();
        assert!(matches!(err, ClassifyError::Unparseable { .. }));
        // The failed turn is not recorded.
        assert_eq!(transcript.len(), 1);
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let model = ScriptedModel::new([ScriptedReply::Fail("upstream 500".into())]);
        let mut transcript = transcript_with("hello");

        let err = classify(&model, &Business::default(), &mut transcript)
            .await
            .unwrap_err();
        assert!(matches!(err, ClassifyError::Model(_)));
    }

    #[tokio::test]
    async fn uses_deterministic_generation_settings() {
        let model = ScriptedModel::new([ScriptedReply::Text(
            r#"{"classification":"general_question"}"#.into(),
        )]);
        let mut transcript = transcript_with("do you take requests?");

        classify(&model, &Business::default(), &mut transcript)
            .await
            .unwrap();

        let request = &model.requests()[0];
        assert!(request.params.temperature <= 0.3);
        assert!(request.tools.is_empty());
        assert_eq!(request.params.max_tokens, CLASSIFY_MAX_TOKENS);
    }
}
