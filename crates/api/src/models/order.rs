//! Order domain types.
//!
//! An order ties one customer to one cake and carries its own quantity and
//! delivery flag.

use chrono::{DateTime, Utc};
use confectionery_core::{CakeId, CustomerId, OrderId, Quantity};

/// An order (domain type).
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub cake_id: CakeId,
    pub qtd: Quantity,
    /// Settable in either direction at any time.
    pub delivered: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Values for inserting a new order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: CustomerId,
    pub cake_id: CakeId,
    pub qtd: Quantity,
    pub delivered: bool,
}

/// Partial update for an order.
#[derive(Debug, Clone, Default)]
pub struct OrderChanges {
    pub customer_id: Option<CustomerId>,
    pub cake_id: Option<CakeId>,
    pub qtd: Option<Quantity>,
    pub delivered: Option<bool>,
}

impl OrderChanges {
    /// Returns `true` if the patch re-points the order at a customer or cake.
    #[must_use]
    pub const fn touches_references(&self) -> bool {
        self.customer_id.is_some() || self.cake_id.is_some()
    }

    /// Apply present fields to an order in place and bump `updated_at`.
    pub fn apply(self, order: &mut Order, now: DateTime<Utc>) {
        if let Some(customer_id) = self.customer_id {
            order.customer_id = customer_id;
        }
        if let Some(cake_id) = self.cake_id {
            order.cake_id = cake_id;
        }
        if let Some(qtd) = self.qtd {
            order.qtd = qtd;
        }
        if let Some(delivered) = self.delivered {
            order.delivered = delivered;
        }
        order.updated_at = now;
    }
}
