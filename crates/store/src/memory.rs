//! In-memory store backend.

use crate::{
    Contact, ContactUpdate, ExchangeRecord, FollowUpTask, NewContact, Store, normalize_phone,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use parking_lot::RwLock;
use std::sync::Arc;

/// In-memory store backed by plain vectors.
///
/// Useful for tests and local runs; clones share the same state.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    contacts: Vec<Contact>,
    follow_ups: Vec<FollowUpTask>,
    exchanges: Vec<ExchangeRecord>,
    next_id: u64,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a contact row.
    pub fn with_contact(self, contact: Contact) -> Self {
        self.inner.write().contacts.push(contact);
        self
    }

    /// Seed a confirmed booking on `date`.
    pub fn with_confirmed_booking(self, date: NaiveDate) -> Self {
        let id = self.alloc_id();
        let phone = format!("90155501{:02}", self.inner.read().contacts.len());
        self.inner.write().contacts.push(Contact {
            id,
            first_name: "Booked".into(),
            last_name: "Client".into(),
            phone,
            email: None,
            event_type: None,
            event_date: Some(date),
            venue_name: None,
            guest_count: None,
            budget_range: None,
            special_requests: None,
            lead_status: "confirmed".into(),
            source: "seed".into(),
            last_contacted_at: None,
        });
        self
    }

    /// Snapshot of all contact rows.
    pub fn contacts(&self) -> Vec<Contact> {
        self.inner.read().contacts.clone()
    }

    /// Snapshot of all follow-up tasks.
    pub fn follow_ups(&self) -> Vec<FollowUpTask> {
        self.inner.read().follow_ups.clone()
    }

    /// Snapshot of all audit rows.
    pub fn exchanges(&self) -> Vec<ExchangeRecord> {
        self.inner.read().exchanges.clone()
    }

    fn alloc_id(&self) -> String {
        let mut inner = self.inner.write();
        inner.next_id += 1;
        inner.next_id.to_string()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn confirmed_booking_on(&self, date: NaiveDate) -> Result<bool> {
        let inner = self.inner.read();
        Ok(inner
            .contacts
            .iter()
            .any(|c| c.event_date == Some(date) && c.is_confirmed_booking()))
    }

    async fn find_contact(&self, phone: &str) -> Result<Option<Contact>> {
        let digits = normalize_phone(phone);
        let inner = self.inner.read();
        Ok(inner
            .contacts
            .iter()
            .find(|c| normalize_phone(&c.phone) == digits)
            .cloned())
    }

    async fn create_contact(&self, new: NewContact) -> Result<Contact> {
        let id = self.alloc_id();
        let contact = Contact {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            phone: new.phone,
            email: new.email,
            event_type: new.event_type,
            event_date: new.event_date,
            venue_name: None,
            guest_count: None,
            budget_range: None,
            special_requests: None,
            lead_status: "new".into(),
            source: "sms".into(),
            last_contacted_at: None,
        };
        self.inner.write().contacts.push(contact.clone());
        Ok(contact)
    }

    async fn update_contact(&self, phone: &str, update: &ContactUpdate) -> Result<bool> {
        let digits = normalize_phone(phone);
        let mut inner = self.inner.write();
        let Some(contact) = inner
            .contacts
            .iter_mut()
            .find(|c| normalize_phone(&c.phone) == digits)
        else {
            return Ok(false);
        };
        update.apply(contact);
        contact.last_contacted_at = Some(Utc::now());
        Ok(true)
    }

    async fn create_follow_up(&self, task: FollowUpTask) -> Result<()> {
        self.inner.write().follow_ups.push(task);
        Ok(())
    }

    async fn record_exchange(&self, record: ExchangeRecord) -> Result<()> {
        self.inner.write().exchanges.push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EventType;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn booking_lookup_honors_confirmed_statuses() {
        let store = InMemoryStore::new().with_confirmed_booking(date("2025-06-15"));
        assert!(store.confirmed_booking_on(date("2025-06-15")).await.unwrap());
        assert!(!store.confirmed_booking_on(date("2025-06-16")).await.unwrap());
    }

    #[tokio::test]
    async fn find_contact_matches_on_digits() {
        let store = InMemoryStore::new();
        store
            .create_contact(NewContact::from_name(Some("Avery Smith"), "(901) 555-0142"))
            .await
            .unwrap();

        let found = store.find_contact("901-555-0142").await.unwrap();
        assert_eq!(found.unwrap().first_name, "Avery");
        assert!(store.find_contact("901-555-9999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_applies_sparse_fields() {
        let store = InMemoryStore::new();
        store
            .create_contact(NewContact::from_name(None, "9015550142"))
            .await
            .unwrap();

        let update = ContactUpdate {
            event_type: Some(EventType::Wedding),
            guest_count: Some(150),
            ..Default::default()
        };
        assert!(store.update_contact("9015550142", &update).await.unwrap());

        let contact = store.find_contact("9015550142").await.unwrap().unwrap();
        assert_eq!(contact.event_type, Some(EventType::Wedding));
        assert_eq!(contact.guest_count, Some(150));
        assert_eq!(contact.first_name, "New");
        assert!(contact.last_contacted_at.is_some());
    }

    #[tokio::test]
    async fn update_without_match_reports_false() {
        let store = InMemoryStore::new();
        let updated = store
            .update_contact("0000000000", &ContactUpdate::default())
            .await
            .unwrap();
        assert!(!updated);
    }
}
