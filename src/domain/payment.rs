use serde::{Deserialize, Serialize};

/// A payment record.
///
/// The `id` is opaque and immutable once created; it is the primary key in
/// the durable store and the sole cache key. The `amount` is the only
/// mutable field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub amount: i64,
}

impl Payment {
    pub fn new(id: impl Into<String>, amount: i64) -> Self {
        Self {
            id: id.into(),
            amount,
        }
    }

    /// The change-notification payload: id and amount joined by a colon.
    pub fn event_payload(&self) -> String {
        format!("{}:{}", self.id, self.amount)
    }
}
