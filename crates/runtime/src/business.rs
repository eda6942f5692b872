//! Business identity woven into prompts and the fallback reply.

use serde::{Deserialize, Serialize};

/// The business this deployment answers for.
///
/// Loaded once from configuration; prompt texts and the fixed fallback
/// reply are derived from it so no copy is hard-coded in the core.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Business {
    /// Public business name.
    pub name: String,
    /// First name of the owner who handles personal follow-ups.
    pub owner: String,
    /// Phone number customers can call directly.
    pub phone: String,
    /// Home market, e.g. "Memphis, TN".
    pub city: String,
    /// Domain used to synthesize email addresses for SMS-only leads.
    pub email_domain: String,
}

impl Business {
    /// The fixed reply used whenever classification or execution fails.
    ///
    /// Non-technical on purpose: the caller never sees an error, only the
    /// business name, a bounded follow-up promise, and a phone number.
    pub fn fallback_reply(&self) -> String {
        format!(
            "Thanks for contacting {}! {} will personally respond within 30 minutes. \
             For immediate assistance, call {}.",
            self.name, self.owner, self.phone
        )
    }

    /// Synthesized email address for a lead known only by phone number.
    pub fn sms_email(&self, phone_digits: &str) -> String {
        format!("sms-{phone_digits}@{}", self.email_domain)
    }
}

impl Default for Business {
    fn default() -> Self {
        Self {
            name: "Encore DJ Company".into(),
            owner: "Marcus".into(),
            phone: "(901) 555-0142".into(),
            city: "Memphis, TN".into(),
            email_domain: "encoredj.example".into(),
        }
    }
}
