//! REST-backed store speaking a PostgREST-style API.

use crate::{
    Contact, ContactUpdate, ExchangeRecord, FollowUpTask, NewContact, Store,
    contact::CONFIRMED_STATUSES, normalize_phone,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use reqwest::Client;
use serde_json::json;

/// Store adapter over the hosted datastore's REST interface.
///
/// Row filters are PostgREST operators (`eq.`, `like.`, `in.(...)`);
/// soft-deleted rows are excluded everywhere.
#[derive(Clone)]
pub struct RestStore {
    /// Base URL of the REST endpoint, e.g. `https://db.example.com/rest/v1`.
    base_url: String,
    /// Service key sent as both `apikey` and bearer token.
    service_key: String,
    /// HTTP client for API calls.
    client: Client,
}

impl RestStore {
    /// Create a new REST store adapter.
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            service_key: service_key.into(),
            client: Client::new(),
        }
    }

    /// Replace the HTTP client, e.g. to set timeouts.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    fn table(&self, name: &str) -> String {
        format!("{}/{name}", self.base_url.trim_end_matches('/'))
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    async fn select(&self, table: &str, query: &[(&str, String)]) -> Result<Vec<serde_json::Value>> {
        let response = self
            .authed(self.client.get(self.table(table)).query(query))
            .send()
            .await
            .with_context(|| format!("select from {table} failed"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("select from {table} returned {status}: {body}");
        }
        response
            .json()
            .await
            .with_context(|| format!("select from {table} returned invalid JSON"))
    }

    async fn insert(&self, table: &str, row: serde_json::Value) -> Result<Vec<serde_json::Value>> {
        let response = self
            .authed(self.client.post(self.table(table)))
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await
            .with_context(|| format!("insert into {table} failed"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("insert into {table} returned {status}: {body}");
        }
        response
            .json()
            .await
            .with_context(|| format!("insert into {table} returned invalid JSON"))
    }

    fn confirmed_filter() -> String {
        format!("in.({})", CONFIRMED_STATUSES.join(","))
    }

    fn phone_filter(phone: &str) -> String {
        format!("like.*{}", normalize_phone(phone))
    }
}

#[async_trait]
impl Store for RestStore {
    async fn confirmed_booking_on(&self, date: NaiveDate) -> Result<bool> {
        let rows = self
            .select(
                "contacts",
                &[
                    ("select", "id".into()),
                    ("event_date", format!("eq.{date}")),
                    ("lead_status", Self::confirmed_filter()),
                    ("deleted_at", "is.null".into()),
                ],
            )
            .await?;
        Ok(!rows.is_empty())
    }

    async fn find_contact(&self, phone: &str) -> Result<Option<Contact>> {
        let rows = self
            .select(
                "contacts",
                &[
                    ("select", "*".into()),
                    ("phone", Self::phone_filter(phone)),
                    ("deleted_at", "is.null".into()),
                    ("limit", "1".into()),
                ],
            )
            .await?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(
                serde_json::from_value(row).context("contact row did not match expected shape")?,
            )),
            None => Ok(None),
        }
    }

    async fn create_contact(&self, new: NewContact) -> Result<Contact> {
        let mut row = serde_json::to_value(&new).context("serialize new contact")?;
        row["lead_status"] = json!("new");
        row["source"] = json!("sms");

        let rows = self.insert("contacts", json!([row])).await?;
        let created = rows
            .into_iter()
            .next()
            .context("insert into contacts returned no representation")?;
        serde_json::from_value(created).context("created contact did not match expected shape")
    }

    async fn update_contact(&self, phone: &str, update: &ContactUpdate) -> Result<bool> {
        let mut row = serde_json::to_value(update).context("serialize contact update")?;
        row["last_contacted_at"] = json!(Utc::now());

        let response = self
            .authed(
                self.client
                    .patch(self.table("contacts"))
                    .query(&[
                        ("phone", Self::phone_filter(phone)),
                        ("deleted_at", "is.null".into()),
                    ]),
            )
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await
            .context("update contacts failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("update contacts returned {status}: {body}");
        }
        let rows: Vec<serde_json::Value> = response
            .json()
            .await
            .context("update contacts returned invalid JSON")?;
        Ok(!rows.is_empty())
    }

    async fn create_follow_up(&self, task: FollowUpTask) -> Result<()> {
        self.insert("admin_tasks", json!([task])).await?;
        Ok(())
    }

    async fn record_exchange(&self, record: ExchangeRecord) -> Result<()> {
        self.insert("sms_conversations", json!([record])).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmed_filter_lists_blocking_statuses() {
        assert_eq!(
            RestStore::confirmed_filter(),
            "in.(confirmed,contracted,deposit_paid)"
        );
    }

    #[test]
    fn phone_filter_uses_digits_only() {
        assert_eq!(RestStore::phone_filter("(901) 555-0142"), "like.*9015550142");
    }

    #[test]
    fn table_url_tolerates_trailing_slash() {
        let store = RestStore::new("https://db.local/rest/v1/", "key");
        assert_eq!(store.table("contacts"), "https://db.local/rest/v1/contacts");
    }
}
