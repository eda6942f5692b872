//! Personalized service-selection link generation.

use crate::Business;
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use store::{ContactUpdate, EventType, LinkIssuer, LinkRequest, NewContact, Store, normalize_phone};

#[derive(Debug, Deserialize, JsonSchema)]
pub(super) struct Input {
    /// Customer's phone number.
    pub phone_number: String,
    /// Customer's email if available.
    #[serde(default)]
    pub email: Option<String>,
    /// Type of event.
    pub event_type: EventType,
    /// Event date if known (YYYY-MM-DD).
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    /// Customer's name if known.
    #[serde(default)]
    pub customer_name: Option<String>,
}

/// Find-or-create the contact, fold in what we learned, then mint a link.
///
/// Both the store round-trip and the link endpoint can fail; either way
/// the customer gets a structured error with a human follow-up promise.
pub(super) async fn run(
    store: &dyn Store,
    links: &dyn LinkIssuer,
    business: &Business,
    input: Input,
) -> Value {
    let digits = normalize_phone(&input.phone_number);
    if digits.is_empty() {
        return json!({
            "success": false,
            "error": "phone_number must contain at least one digit",
        });
    }

    let contact = match store.find_contact(&input.phone_number).await {
        Ok(Some(existing)) => {
            let update = ContactUpdate {
                email: input.email.clone(),
                event_type: Some(input.event_type),
                event_date: input.event_date,
                ..Default::default()
            };
            if let Err(err) = store.update_contact(&input.phone_number, &update).await {
                tracing::warn!(error = %err, "contact refresh before link failed");
            }
            existing
        }
        Ok(None) => {
            let mut new = NewContact::from_name(
                input.customer_name.as_deref(),
                input.phone_number.clone(),
            );
            new.email = input.email.clone();
            new.event_type = Some(input.event_type);
            new.event_date = input.event_date;

            match store.create_contact(new).await {
                Ok(created) => created,
                Err(err) => {
                    tracing::warn!(error = %err, "contact creation for link failed");
                    return unavailable(business);
                }
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "contact lookup for link failed");
            return unavailable(business);
        }
    };

    let request = LinkRequest {
        email: input
            .email
            .clone()
            .unwrap_or_else(|| business.sms_email(&digits)),
        contact_id: contact.id,
        event_type: input.event_type,
        event_date: input.event_date,
    };

    match links.issue(&request).await {
        Ok(link) => json!({
            "success": true,
            "link": link,
            "message": "I've created a personalized link for you to view packages and pricing!",
        }),
        Err(err) => {
            tracing::warn!(error = %err, "link endpoint failed");
            unavailable(business)
        }
    }
}

fn unavailable(business: &Business) -> Value {
    json!({
        "success": false,
        "error": format!(
            "Unable to generate link right now. {} will text you a personalized quote within 30 minutes!",
            business.owner
        ),
    })
}
