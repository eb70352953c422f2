//! Order request and response shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use confectionery_core::{CakeId, CustomerId, OrderId, Quantity};

use crate::models::{NewOrder, Order, OrderChanges};

/// Body of `POST /orders/`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderInput {
    pub customer_id: Option<CustomerId>,
    pub cake_id: Option<CakeId>,
    pub qtd: u32,
    pub delivered: bool,
}

impl OrderInput {
    /// Check every field rule. Whether the ids exist is checked against the store.
    ///
    /// # Errors
    ///
    /// Returns one message per violated rule.
    pub fn validate(self) -> Result<NewOrder, Vec<String>> {
        let mut errors = Vec::new();

        if self.customer_id.is_none() {
            errors.push("customerId is required".to_string());
        }
        if self.cake_id.is_none() {
            errors.push("cakeId is required".to_string());
        }
        let qtd = parse_qtd(&mut errors, self.qtd);

        match (self.customer_id, self.cake_id, qtd) {
            (Some(customer_id), Some(cake_id), Some(qtd)) if errors.is_empty() => Ok(NewOrder {
                customer_id,
                cake_id,
                qtd,
                delivered: self.delivered,
            }),
            _ => Err(errors),
        }
    }
}

/// Body of `PATCH /orders/{id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderPatch {
    pub customer_id: Option<CustomerId>,
    pub cake_id: Option<CakeId>,
    pub qtd: Option<u32>,
    pub delivered: Option<bool>,
}

impl OrderPatch {
    /// Check the rules of every present field.
    ///
    /// # Errors
    ///
    /// Returns one message per violated rule.
    pub fn validate(self) -> Result<OrderChanges, Vec<String>> {
        let mut errors = Vec::new();
        let qtd = self.qtd.and_then(|q| parse_qtd(&mut errors, q));

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(OrderChanges {
            customer_id: self.customer_id,
            cake_id: self.cake_id,
            qtd,
            delivered: self.delivered,
        })
    }
}

fn parse_qtd(errors: &mut Vec<String>, qtd: u32) -> Option<Quantity> {
    Quantity::new(qtd)
        .map_err(|e| errors.push(format!("qtd is invalid: {e}")))
        .ok()
}

/// Order as returned by the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderOutput {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub cake_id: CakeId,
    pub qtd: Quantity,
    pub delivered: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderOutput {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            customer_id: order.customer_id,
            cake_id: order.cake_id,
            qtd: order.qtd,
            delivered: order.delivered,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}
