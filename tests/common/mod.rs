use payvault::application::service::PaymentService;
use payvault::infrastructure::in_memory::{
    InMemoryEventLog, InMemoryPaymentCache, InMemoryPaymentStore,
};

pub const TOPIC: &str = "payments.commands";

/// A service wired over in-memory adapters, with handles that share state
/// with the service for direct inspection and mutation.
pub struct TestHarness {
    pub service: PaymentService,
    pub store: InMemoryPaymentStore,
    pub cache: InMemoryPaymentCache,
    pub events: InMemoryEventLog,
}

pub fn harness() -> TestHarness {
    let store = InMemoryPaymentStore::new();
    let cache = InMemoryPaymentCache::new();
    let events = InMemoryEventLog::new();
    let service = PaymentService::new(
        Box::new(store.clone()),
        Box::new(cache.clone()),
        Box::new(events.clone()),
        TOPIC,
    );
    TestHarness {
        service,
        store,
        cache,
        events,
    }
}
