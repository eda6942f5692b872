//! Records held by the external contact store.

use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The kind of event a customer is planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Wedding,
    Corporate,
    PrivateParty,
    School,
    Other,
}

impl EventType {
    /// The wire name of this event type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wedding => "wedding",
            Self::Corporate => "corporate",
            Self::PrivateParty => "private_party",
            Self::School => "school",
            Self::Other => "other",
        }
    }
}

/// Lead statuses that count as a confirmed booking for a date.
pub const CONFIRMED_STATUSES: [&str; 3] = ["confirmed", "contracted", "deposit_paid"];

/// A customer record, keyed by phone number.
///
/// Owned by the external store; this core reads and sparsely updates it
/// through [`Store`](crate::Store) but never holds a long-lived reference.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Contact {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub event_type: Option<EventType>,
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    #[serde(default)]
    pub venue_name: Option<String>,
    #[serde(default)]
    pub guest_count: Option<u32>,
    #[serde(default)]
    pub budget_range: Option<String>,
    #[serde(default)]
    pub special_requests: Option<String>,
    #[serde(default)]
    pub lead_status: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub last_contacted_at: Option<DateTime<Utc>>,
}

impl Contact {
    /// Whether this contact blocks its event date for new bookings.
    pub fn is_confirmed_booking(&self) -> bool {
        CONFIRMED_STATUSES.contains(&self.lead_status.as_str())
    }
}

/// Fields for creating a contact that does not exist yet.
///
/// The store fills in `lead_status: "new"` and `source: "sms"`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
}

impl NewContact {
    /// Split a free-form customer name into first/last parts.
    ///
    /// Leads created from SMS often arrive without a name; those become
    /// "New Lead" so the record is still addressable by staff.
    pub fn from_name(name: Option<&str>, phone: impl Into<String>) -> Self {
        let mut parts = name.unwrap_or_default().split_whitespace();
        let first = parts.next().unwrap_or("New").to_owned();
        let rest = parts.collect::<Vec<_>>().join(" ");
        Self {
            first_name: first,
            last_name: if rest.is_empty() { "Lead".into() } else { rest },
            phone: phone.into(),
            ..Default::default()
        }
    }
}

/// The bounded set of contact fields an agent may update.
///
/// `deny_unknown_fields` keeps model-proposed updates inside this set; an
/// unknown key is a validation error, never a silent write.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ContactUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}

impl ContactUpdate {
    /// The wire names of the fields present in this update.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.first_name.is_some() {
            fields.push("first_name");
        }
        if self.last_name.is_some() {
            fields.push("last_name");
        }
        if self.email.is_some() {
            fields.push("email");
        }
        if self.event_type.is_some() {
            fields.push("event_type");
        }
        if self.event_date.is_some() {
            fields.push("event_date");
        }
        if self.venue_name.is_some() {
            fields.push("venue_name");
        }
        if self.guest_count.is_some() {
            fields.push("guest_count");
        }
        if self.budget_range.is_some() {
            fields.push("budget_range");
        }
        if self.special_requests.is_some() {
            fields.push("special_requests");
        }
        fields
    }

    /// Whether the update carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.field_names().is_empty()
    }

    /// Apply this update onto a contact in place.
    pub fn apply(&self, contact: &mut Contact) {
        if let Some(v) = &self.first_name {
            contact.first_name = v.clone();
        }
        if let Some(v) = &self.last_name {
            contact.last_name = v.clone();
        }
        if let Some(v) = &self.email {
            contact.email = Some(v.clone());
        }
        if let Some(v) = self.event_type {
            contact.event_type = Some(v);
        }
        if let Some(v) = self.event_date {
            contact.event_date = Some(v);
        }
        if let Some(v) = &self.venue_name {
            contact.venue_name = Some(v.clone());
        }
        if let Some(v) = self.guest_count {
            contact.guest_count = Some(v);
        }
        if let Some(v) = &self.budget_range {
            contact.budget_range = Some(v.clone());
        }
        if let Some(v) = &self.special_requests {
            contact.special_requests = Some(v.clone());
        }
    }
}

/// The kind of human follow-up a task asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    CallBack,
    SendQuote,
    AnswerQuestion,
    ScheduleMeeting,
}

/// Follow-up priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

/// A follow-up task for staff, created fire-and-forget.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FollowUpTask {
    pub phone_number: String,
    pub task_type: TaskType,
    pub priority: TaskPriority,
    pub notes: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl FollowUpTask {
    /// Create a pending task stamped with the current time.
    pub fn pending(
        phone_number: impl Into<String>,
        task_type: TaskType,
        priority: TaskPriority,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            phone_number: phone_number.into(),
            task_type,
            priority,
            notes: notes.into(),
            status: "pending".into(),
            created_at: Utc::now(),
        }
    }
}

/// One audit row summarizing a completed exchange.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExchangeRecord {
    pub phone_number: String,
    pub message: String,
    pub response: String,
    pub agent_used: String,
    pub classification: String,
    pub created_at: DateTime<Utc>,
}

/// Reduce a phone number to its digits for matching.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}
