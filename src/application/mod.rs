//! Application layer containing the core orchestration.
//!
//! This module defines the `PaymentService`, which implements the
//! cache-aside and notification policy over the durable store, the cache,
//! and the event log. Adapters are dependency-injected at construction.

pub mod service;
