//! Sparse lead-information updates.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use store::{ContactUpdate, Store};

#[derive(Debug, Deserialize, JsonSchema)]
pub(super) struct Input {
    /// Customer's phone number.
    pub phone_number: String,
    /// Fields to update. Only the enumerated contact fields are accepted.
    pub updates: ContactUpdate,
}

pub(super) async fn run(store: &dyn Store, input: Input) -> Value {
    if input.updates.is_empty() {
        return json!({
            "success": false,
            "error": "updates must set at least one field",
        });
    }

    match store.update_contact(&input.phone_number, &input.updates).await {
        Ok(true) => json!({
            "success": true,
            "message": "Customer information updated successfully",
            "updated_fields": input.updates.field_names(),
        }),
        Ok(false) => json!({
            "success": false,
            "error": "no contact found for that phone number",
        }),
        Err(err) => {
            tracing::warn!(error = %err, "lead update failed");
            json!({
                "success": false,
                "error": "Unable to update information right now",
            })
        }
    }
}
