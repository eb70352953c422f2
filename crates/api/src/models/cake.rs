//! Cake domain types.

use confectionery_core::{CakeId, Price};

/// A cake on the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Cake {
    pub id: CakeId,
    /// Unique display name.
    pub name: String,
    pub price: Price,
}

/// Values for inserting a new cake.
#[derive(Debug, Clone)]
pub struct NewCake {
    pub name: String,
    pub price: Price,
}

/// Partial update for a cake.
#[derive(Debug, Clone, Default)]
pub struct CakeChanges {
    pub name: Option<String>,
    pub price: Option<Price>,
}

impl CakeChanges {
    pub fn apply(self, cake: &mut Cake) {
        if let Some(name) = self.name {
            cake.name = name;
        }
        if let Some(price) = self.price {
            cake.price = price;
        }
    }
}
