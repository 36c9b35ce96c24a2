use crate::domain::payment::Payment;
use crate::domain::ports::{EventPublisher, PaymentCache, PaymentStore};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory payment store.
///
/// Uses `Arc<RwLock<HashMap<String, i64>>>` for shared concurrent access.
/// `Clone` shares the underlying map, so tests and the in-memory binary
/// mode can keep a handle for direct inspection and mutation.
#[derive(Default, Clone)]
pub struct InMemoryPaymentStore {
    payments: Arc<RwLock<HashMap<String, i64>>>,
}

impl InMemoryPaymentStore {
    /// Creates a new, empty in-memory payment store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn insert(&self, payment: &Payment) -> Result<()> {
        let mut payments = self.payments.write().await;
        if payments.contains_key(&payment.id) {
            return Err(PaymentError::AlreadyExists(payment.id.clone()));
        }
        payments.insert(payment.id.clone(), payment.amount);
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Payment>> {
        let payments = self.payments.read().await;
        Ok(payments.get(id).map(|amount| Payment::new(id, *amount)))
    }

    async fn list_all(&self) -> Result<Vec<Payment>> {
        let payments = self.payments.read().await;
        Ok(payments
            .iter()
            .map(|(id, amount)| Payment::new(id.clone(), *amount))
            .collect())
    }

    async fn update_amount(&self, id: &str, amount: i64) -> Result<()> {
        let mut payments = self.payments.write().await;
        // Absent ids are a no-op, matching affected-row semantics.
        if let Some(existing) = payments.get_mut(id) {
            *existing = amount;
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        let mut payments = self.payments.write().await;
        payments.remove(id);
        Ok(())
    }
}

/// A thread-safe in-memory payment cache with the same sharing semantics
/// as [`InMemoryPaymentStore`].
#[derive(Default, Clone)]
pub struct InMemoryPaymentCache {
    entries: Arc<RwLock<HashMap<String, i64>>>,
}

impl InMemoryPaymentCache {
    /// Creates a new, empty in-memory cache.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentCache for InMemoryPaymentCache {
    async fn put(&self, id: &str, amount: i64) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(id.to_string(), amount);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<i64>> {
        let entries = self.entries.read().await;
        Ok(entries.get(id).copied())
    }
}

/// A change notification captured by [`InMemoryEventLog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedEvent {
    pub topic: String,
    pub key: Vec<u8>,
    pub payload: Vec<u8>,
}

/// An in-memory append-only event log that records everything published,
/// in order. Used by tests and by the in-memory binary mode.
#[derive(Default, Clone)]
pub struct InMemoryEventLog {
    events: Arc<RwLock<Vec<PublishedEvent>>>,
}

impl InMemoryEventLog {
    /// Creates a new, empty event log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything published so far, oldest first.
    pub async fn published(&self) -> Vec<PublishedEvent> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventLog {
    async fn publish(&self, topic: &str, key: &[u8], payload: &[u8]) -> Result<()> {
        let mut events = self.events.write().await;
        events.push(PublishedEvent {
            topic: topic.to_string(),
            key: key.to_vec(),
            payload: payload.to_vec(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_store_roundtrip() {
        let store = InMemoryPaymentStore::new();
        let payment = Payment::new("p-1", 100);

        store.insert(&payment).await.unwrap();
        let retrieved = store.get_by_id("p-1").await.unwrap().unwrap();
        assert_eq!(retrieved, payment);

        assert!(store.get_by_id("p-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_in_memory_store_rejects_duplicate_ids() {
        let store = InMemoryPaymentStore::new();
        store.insert(&Payment::new("p-1", 1)).await.unwrap();

        let err = store.insert(&Payment::new("p-1", 2)).await.unwrap_err();
        assert!(matches!(err, PaymentError::AlreadyExists(_)));

        // The original value survives the rejected insert.
        assert_eq!(store.get_by_id("p-1").await.unwrap().unwrap().amount, 1);
    }

    #[tokio::test]
    async fn test_in_memory_store_update_absent_id_is_noop() {
        let store = InMemoryPaymentStore::new();

        store.update_amount("ghost", 5).await.unwrap();
        assert!(store.get_by_id("ghost").await.unwrap().is_none());

        store.insert(&Payment::new("p-1", 1)).await.unwrap();
        store.update_amount("p-1", 7).await.unwrap();
        assert_eq!(store.get_by_id("p-1").await.unwrap().unwrap().amount, 7);
    }

    #[tokio::test]
    async fn test_in_memory_store_delete_is_idempotent() {
        let store = InMemoryPaymentStore::new();
        store.insert(&Payment::new("p-1", 1)).await.unwrap();

        store.delete_by_id("p-1").await.unwrap();
        store.delete_by_id("p-1").await.unwrap();

        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_in_memory_cache_put_get() {
        let cache = InMemoryPaymentCache::new();

        assert_eq!(cache.get("p-1").await.unwrap(), None);

        cache.put("p-1", 42).await.unwrap();
        assert_eq!(cache.get("p-1").await.unwrap(), Some(42));

        cache.put("p-1", 43).await.unwrap();
        assert_eq!(cache.get("p-1").await.unwrap(), Some(43));
    }

    #[tokio::test]
    async fn test_event_log_records_in_order() {
        let log = InMemoryEventLog::new();

        log.publish("t", b"a", b"a:1").await.unwrap();
        log.publish("t", b"b", b"b:2").await.unwrap();

        let events = log.published().await;
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].key, b"a".to_vec());
        assert_eq!(events[1].payload, b"b:2".to_vec());
    }
}
