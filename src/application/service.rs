use tracing::warn;

use crate::domain::payment::Payment;
use crate::domain::ports::{EventPublisherBox, PaymentCacheBox, PaymentStoreBox};
use crate::error::{PaymentError, Result};

/// The outcome of a read, tagging where the value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRead {
    pub payment: Payment,
    /// True when the value was served from the cache without consulting
    /// the durable store.
    pub cached: bool,
}

/// Orchestrates the durable store, the cache, and the event log.
///
/// The store is authoritative: its failures fail the request. Cache writes
/// and event publishes are advisory; their failures are logged and the
/// request proceeds. A cached value is trusted without freshness
/// verification until it is overwritten, so staleness introduced outside
/// this service's own write paths persists. Deletes do not invalidate the
/// cache, and updates write the cache even when the store update was a
/// no-op on an absent id; both gaps are part of the consistency contract,
/// not accidents.
pub struct PaymentService {
    store: PaymentStoreBox,
    cache: PaymentCacheBox,
    publisher: EventPublisherBox,
    topic: String,
}

impl PaymentService {
    /// Creates a new `PaymentService` over the given adapters.
    ///
    /// Adapters are injected as trait objects so callers choose the
    /// backends; the service holds no other state.
    pub fn new(
        store: PaymentStoreBox,
        cache: PaymentCacheBox,
        publisher: EventPublisherBox,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            store,
            cache,
            publisher,
            topic: topic.into(),
        }
    }

    /// Inserts a new payment, then best-effort fills the cache and publishes
    /// a creation notification keyed by the id.
    pub async fn create(&self, id: &str, amount: i64) -> Result<()> {
        let payment = Payment::new(id, amount);
        self.store.insert(&payment).await?;

        advisory("cache fill", id, self.cache.put(id, amount).await);
        advisory(
            "event publish",
            id,
            self.publisher
                .publish(&self.topic, id.as_bytes(), payment.event_payload().as_bytes())
                .await,
        );
        Ok(())
    }

    /// Reads a payment, serving from the cache when it holds a non-zero
    /// amount and falling through to the store otherwise.
    ///
    /// A cached zero is indistinguishable from a miss, so a legitimately
    /// zero amount always reads through to the store. Store hits are
    /// best-effort written back to the cache.
    pub async fn read(&self, id: &str) -> Result<PaymentRead> {
        match self.cache.get(id).await {
            Ok(Some(amount)) if amount != 0 => {
                return Ok(PaymentRead {
                    payment: Payment::new(id, amount),
                    cached: true,
                });
            }
            Ok(_) => {}
            Err(e) => advisory("cache read", id, Err(e)),
        }

        let payment = self
            .store
            .get_by_id(id)
            .await?
            .ok_or_else(|| PaymentError::NotFound(id.to_string()))?;
        advisory("cache fill", id, self.cache.put(&payment.id, payment.amount).await);
        Ok(PaymentRead {
            payment,
            cached: false,
        })
    }

    /// Lists every payment straight from the store. The cache is never
    /// consulted here.
    pub async fn list(&self) -> Result<Vec<Payment>> {
        self.store.list_all().await
    }

    /// Replaces the amount for an id and writes the cache unconditionally.
    /// No event is published for updates.
    pub async fn update(&self, id: &str, amount: i64) -> Result<()> {
        self.store.update_amount(id, amount).await?;
        advisory("cache update", id, self.cache.put(id, amount).await);
        Ok(())
    }

    /// Removes the payment from the store. Cached copies are left in place
    /// and remain servable until overwritten.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete_by_id(id).await
    }
}

/// Single funnel for best-effort outcomes: log at WARN and move on.
fn advisory(op: &str, id: &str, result: Result<()>) {
    if let Err(e) = result {
        warn!(payment_id = %id, error = %e, "{op} failed, continuing");
    }
}
