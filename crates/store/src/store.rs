//! Data-access seam over the external contact store.

use crate::{Contact, ContactUpdate, ExchangeRecord, FollowUpTask, NewContact};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Data access to the external contact store.
///
/// Injected into the tool registry and the workflow at construction time;
/// per-row consistency is the store's concern (last write wins), this core
/// only guarantees it never runs two mutations of one exchange
/// concurrently.
#[async_trait]
pub trait Store: Send + Sync {
    /// Whether `date` already carries a confirmed booking.
    async fn confirmed_booking_on(&self, date: NaiveDate) -> Result<bool>;

    /// Look up a contact by phone number (matched on digits).
    async fn find_contact(&self, phone: &str) -> Result<Option<Contact>>;

    /// Insert a new contact and return the stored row.
    async fn create_contact(&self, new: NewContact) -> Result<Contact>;

    /// Sparse-update the contact matched by phone number.
    ///
    /// Returns `false` when no contact matched.
    async fn update_contact(&self, phone: &str, update: &ContactUpdate) -> Result<bool>;

    /// Insert a follow-up task for staff.
    async fn create_follow_up(&self, task: FollowUpTask) -> Result<()>;

    /// Append one audit row for a completed exchange.
    async fn record_exchange(&self, record: ExchangeRecord) -> Result<()>;
}
