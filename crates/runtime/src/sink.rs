//! Best-effort audit persistence.

use std::time::Duration;
use store::{ExchangeRecord, Store};
use tokio::time::timeout;

/// Time budget for the audit write.
pub const PERSIST_TIMEOUT: Duration = Duration::from_secs(5);

/// Write one exchange record, swallowing any failure.
///
/// The reply is already finalized when this runs; nothing that happens
/// here may change what the caller receives.
pub async fn persist(store: &dyn Store, record: ExchangeRecord) {
    match timeout(PERSIST_TIMEOUT, store.record_exchange(record)).await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => tracing::warn!(error = %err, "exchange audit write failed"),
        Err(_) => tracing::warn!("exchange audit write timed out"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use store::InMemoryStore;

    fn record() -> ExchangeRecord {
        ExchangeRecord {
            phone_number: "9015550142".into(),
            message: "how much?".into(),
            response: "From $600.".into(),
            agent_used: "Pricing Specialist".into(),
            classification: "get_pricing".into(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn writes_one_audit_row() {
        let store = InMemoryStore::new();
        persist(&store, record()).await;

        let rows = store.exchanges();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].classification, "get_pricing");
    }
}
