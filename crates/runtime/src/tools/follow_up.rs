//! Fire-and-forget follow-up tasks for staff.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use store::{FollowUpTask, Store, TaskPriority, TaskType};

#[derive(Debug, Deserialize, JsonSchema)]
pub(super) struct Input {
    /// Customer's phone number.
    pub phone_number: String,
    /// Type of follow-up needed.
    pub task_type: TaskType,
    /// Priority level.
    pub priority: TaskPriority,
    /// Details about what the customer needs.
    pub notes: String,
}

/// Persistence failure here is explicitly non-fatal to the exchange.
pub(super) async fn run(store: &dyn Store, input: Input) -> Value {
    let task = FollowUpTask::pending(
        input.phone_number,
        input.task_type,
        input.priority,
        input.notes,
    );

    match store.create_follow_up(task).await {
        Ok(()) => json!({
            "success": true,
            "message": "Follow-up task created successfully",
        }),
        Err(err) => {
            tracing::warn!(error = %err, "follow-up task write failed");
            json!({
                "success": false,
                "message": "Task logged in conversation history",
            })
        }
    }
}
