//! Order aggregate implementation.

use chrono::{DateTime, Utc};
use common::{Money, OrderId};
use serde::{Deserialize, Serialize};

use super::{OrderError, OrderLine};

/// A placed order.
///
/// Immutable once built: fields are private and `total` is computed a single
/// time from the lines. A stored `total` is ignored on deserialization and
/// recomputed instead; a stored order whose total overflows fails to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "OrderRecord")]
pub struct Order {
    id: OrderId,
    created_at: DateTime<Utc>,
    lines: Vec<OrderLine>,
    total: Money,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderRecord {
    id: OrderId,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
    #[serde(default)]
    lines: Vec<OrderLine>,
}

impl TryFrom<OrderRecord> for Order {
    type Error = OrderError;

    fn try_from(record: OrderRecord) -> Result<Self, Self::Error> {
        Order::new(record.id, record.created_at, record.lines)
    }
}

impl Order {
    /// Builds an order and computes its total.
    ///
    /// Fails with [`OrderError::AmountOverflow`] if a line total or the
    /// order total does not fit in a `Money`.
    pub fn new(
        id: OrderId,
        created_at: DateTime<Utc>,
        lines: Vec<OrderLine>,
    ) -> Result<Self, OrderError> {
        let total = lines
            .iter()
            .try_fold(Money::zero(), |acc, line| acc.checked_add(line.line_total()?))
            .ok_or(OrderError::AmountOverflow)?;
        Ok(Self {
            id,
            created_at,
            lines,
            total,
        })
    }

    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Sum of line totals, fixed at construction.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Returns the total quantity of all lines.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}
