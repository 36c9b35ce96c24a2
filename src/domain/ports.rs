use super::payment::Payment;
use crate::error::Result;
use async_trait::async_trait;

/// The durable store. Source of truth for a payment's existence and value.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Inserts a new record. Fails with `AlreadyExists` if the id is taken.
    async fn insert(&self, payment: &Payment) -> Result<()>;
    async fn get_by_id(&self, id: &str) -> Result<Option<Payment>>;
    /// Full scan in the store's natural enumeration order.
    async fn list_all(&self) -> Result<Vec<Payment>>;
    /// Replaces the amount. Updating an absent id is accepted as a no-op;
    /// affected-row counts are not checked.
    async fn update_amount(&self, id: &str, amount: i64) -> Result<()>;
    async fn delete_by_id(&self, id: &str) -> Result<()>;
}

/// A best-effort mirror of recently touched records. Never authoritative;
/// absence and staleness are always tolerated by callers.
#[async_trait]
pub trait PaymentCache: Send + Sync {
    async fn put(&self, id: &str, amount: i64) -> Result<()>;
    async fn get(&self, id: &str) -> Result<Option<i64>>;
}

/// Fire-and-forget change notifications to an append-only log.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, topic: &str, key: &[u8], payload: &[u8]) -> Result<()>;
}

pub type PaymentStoreBox = Box<dyn PaymentStore>;
pub type PaymentCacheBox = Box<dyn PaymentCache>;
pub type EventPublisherBox = Box<dyn EventPublisher>;
