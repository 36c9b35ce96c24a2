use crate::domain::ports::{EventPublisher, PaymentCache};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::time::Duration;
use tokio::time::timeout;

/// Redis-backed payment cache, keyed by the raw payment id.
///
/// `ConnectionManager` multiplexes and reconnects internally, so `Clone` is
/// cheap and the adapter is shared across requests. Calls are bounded by
/// the configured operation timeout; expiry surfaces as `CacheUnavailable`.
/// Entries carry no TTL.
#[derive(Clone)]
pub struct RedisPaymentCache {
    conn: ConnectionManager,
    op_timeout: Duration,
}

impl RedisPaymentCache {
    pub fn new(conn: ConnectionManager, op_timeout: Duration) -> Self {
        Self { conn, op_timeout }
    }
}

#[async_trait]
impl PaymentCache for RedisPaymentCache {
    async fn put(&self, id: &str, amount: i64) -> Result<()> {
        let mut conn = self.conn.clone();
        match timeout(self.op_timeout, conn.set::<_, _, ()>(id, amount)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(PaymentError::CacheUnavailable(e.to_string())),
            Err(_) => Err(PaymentError::CacheUnavailable(timed_out(self.op_timeout))),
        }
    }

    async fn get(&self, id: &str) -> Result<Option<i64>> {
        let mut conn = self.conn.clone();
        match timeout(self.op_timeout, conn.get::<_, Option<i64>>(id)).await {
            Ok(Ok(amount)) => Ok(amount),
            Ok(Err(e)) => Err(PaymentError::CacheUnavailable(e.to_string())),
            Err(_) => Err(PaymentError::CacheUnavailable(timed_out(self.op_timeout))),
        }
    }
}

/// Appends change notifications to a Redis stream named after the topic,
/// with `key` and `payload` entry fields.
#[derive(Clone)]
pub struct RedisStreamPublisher {
    conn: ConnectionManager,
    op_timeout: Duration,
}

impl RedisStreamPublisher {
    pub fn new(conn: ConnectionManager, op_timeout: Duration) -> Self {
        Self { conn, op_timeout }
    }
}

#[async_trait]
impl EventPublisher for RedisStreamPublisher {
    async fn publish(&self, topic: &str, key: &[u8], payload: &[u8]) -> Result<()> {
        let mut conn = self.conn.clone();
        let mut cmd = redis::cmd("XADD");
        cmd.arg(topic)
            .arg("*")
            .arg("key")
            .arg(key)
            .arg("payload")
            .arg(payload);
        match timeout(self.op_timeout, cmd.exec_async(&mut conn)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(PaymentError::PublishFailed(e.to_string())),
            Err(_) => Err(PaymentError::PublishFailed(timed_out(self.op_timeout))),
        }
    }
}

fn timed_out(after: Duration) -> String {
    format!("operation timed out after {}ms", after.as_millis())
}
