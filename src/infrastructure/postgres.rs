use crate::domain::payment::Payment;
use crate::domain::ports::PaymentStore;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use std::time::Duration;
use tokio::time::timeout;

/// PostgreSQL-backed payment store.
///
/// Every operation is a single statement against the pool, bounded by the
/// configured operation timeout; expiry and connectivity failures surface
/// as `StoreUnavailable`. No multi-statement transactions are used.
/// `Clone` shares the underlying pool.
#[derive(Clone)]
pub struct PostgresPaymentStore {
    pool: PgPool,
    table: String,
    op_timeout: Duration,
}

impl PostgresPaymentStore {
    pub fn new(pool: PgPool, table: impl Into<String>, op_timeout: Duration) -> Self {
        Self {
            pool,
            table: table.into(),
            op_timeout,
        }
    }

    /// Provisions the payments table if it does not exist yet. Called once
    /// at startup, before the server starts accepting requests.
    pub async fn ensure_schema(&self) -> Result<()> {
        let stmt = format!(
            "CREATE TABLE IF NOT EXISTS {} (id TEXT PRIMARY KEY, amount BIGINT NOT NULL)",
            self.table
        );
        let fut = sqlx::query(&stmt).execute(&self.pool);
        match timeout(self.op_timeout, fut).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(unavailable(e)),
            Err(_) => Err(self.timed_out()),
        }
    }

    fn timed_out(&self) -> PaymentError {
        PaymentError::StoreUnavailable(format!(
            "statement timed out after {}ms",
            self.op_timeout.as_millis()
        ))
    }
}

fn unavailable(e: sqlx::Error) -> PaymentError {
    PaymentError::StoreUnavailable(e.to_string())
}

#[async_trait]
impl PaymentStore for PostgresPaymentStore {
    async fn insert(&self, payment: &Payment) -> Result<()> {
        let stmt = format!("INSERT INTO {} (id, amount) VALUES ($1, $2)", self.table);
        let fut = sqlx::query(&stmt)
            .bind(&payment.id)
            .bind(payment.amount)
            .execute(&self.pool);
        match timeout(self.op_timeout, fut).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(sqlx::Error::Database(db))) if db.is_unique_violation() => {
                Err(PaymentError::AlreadyExists(payment.id.clone()))
            }
            Ok(Err(e)) => Err(unavailable(e)),
            Err(_) => Err(self.timed_out()),
        }
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Payment>> {
        let stmt = format!("SELECT id, amount FROM {} WHERE id = $1", self.table);
        let fut = sqlx::query_as::<_, (String, i64)>(&stmt)
            .bind(id)
            .fetch_optional(&self.pool);
        match timeout(self.op_timeout, fut).await {
            Ok(Ok(row)) => Ok(row.map(|(id, amount)| Payment { id, amount })),
            Ok(Err(e)) => Err(unavailable(e)),
            Err(_) => Err(self.timed_out()),
        }
    }

    async fn list_all(&self) -> Result<Vec<Payment>> {
        let stmt = format!("SELECT id, amount FROM {}", self.table);
        let fut = sqlx::query_as::<_, (String, i64)>(&stmt).fetch_all(&self.pool);
        match timeout(self.op_timeout, fut).await {
            Ok(Ok(rows)) => Ok(rows
                .into_iter()
                .map(|(id, amount)| Payment { id, amount })
                .collect()),
            Ok(Err(e)) => Err(unavailable(e)),
            Err(_) => Err(self.timed_out()),
        }
    }

    async fn update_amount(&self, id: &str, amount: i64) -> Result<()> {
        let stmt = format!("UPDATE {} SET amount = $1 WHERE id = $2", self.table);
        let fut = sqlx::query(&stmt).bind(amount).bind(id).execute(&self.pool);
        match timeout(self.op_timeout, fut).await {
            // Zero rows affected is success: updating an absent id is a no-op.
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(unavailable(e)),
            Err(_) => Err(self.timed_out()),
        }
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        let stmt = format!("DELETE FROM {} WHERE id = $1", self.table);
        let fut = sqlx::query(&stmt).bind(id).execute(&self.pool);
        match timeout(self.op_timeout, fut).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(unavailable(e)),
            Err(_) => Err(self.timed_out()),
        }
    }
}
