//! Inquiry intents and the classifier's output.

use serde::{Deserialize, Serialize};

/// The closed set of intents this core recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Asking whether a specific date is open.
    CheckAvailability,
    /// Asking about rates, packages, or cost.
    GetPricing,
    /// Ready to book or requesting the selection link.
    BookService,
    /// Questions about services, equipment, music, or process.
    GeneralQuestion,
    /// Follow-up on an existing booking or prior conversation.
    ExistingCustomer,
}

impl Intent {
    /// All intents, in routing order.
    pub const ALL: [Intent; 5] = [
        Intent::CheckAvailability,
        Intent::GetPricing,
        Intent::BookService,
        Intent::GeneralQuestion,
        Intent::ExistingCustomer,
    ];

    /// The wire name of this intent.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CheckAvailability => "check_availability",
            Self::GetPricing => "get_pricing",
            Self::BookService => "book_service",
            Self::GeneralQuestion => "general_question",
            Self::ExistingCustomer => "existing_customer",
        }
    }
}

/// The classifier's answer for one request.
///
/// Produced exactly once per request, before any profile is selected, and
/// immutable afterwards.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Classification {
    /// The selected intent.
    pub classification: Intent,

    /// Self-reported confidence in `[0, 1]`, when the model offers one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,

    /// Short free-text restatement of the detected intent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_intent: Option<String>,
}
