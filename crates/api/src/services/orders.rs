//! Order service.
//!
//! An order may only point at an active customer and an existing cake.

use confectionery_core::{CakeId, CustomerId, OrderId};

use crate::db::{RepositoryError, Store};
use crate::error::AppError;
use crate::models::{CustomerScope, NewOrder, Order, OrderChanges};

const MISSING_REFERENCE: &str = "Customer or Cake not found";
const NOT_FOUND: &str = "Order not found";

/// Order operations over the injected store.
pub struct OrderService<'a> {
    store: &'a dyn Store,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// List every order.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if the store fails.
    pub async fn list(&self) -> Result<Vec<Order>, AppError> {
        Ok(self.store.list_orders().await?)
    }

    /// Get an order.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no order has this ID.
    pub async fn get(&self, id: OrderId) -> Result<Order, AppError> {
        self.store
            .find_order(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
    }

    /// Place an order.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ReferenceNotFound` if the customer or cake is missing.
    pub async fn create(&self, order: NewOrder) -> Result<Order, AppError> {
        self.ensure_references(order.customer_id, order.cake_id)
            .await?;

        let order = self.store.insert_order(order).await.map_err(write_error)?;

        tracing::info!(
            order_id = %order.id,
            customer_id = %order.customer_id,
            cake_id = %order.cake_id,
            "Order created"
        );
        Ok(order)
    }

    /// Apply a partial update.
    ///
    /// References are only checked when the patch touches one of them; the
    /// other keeps its current value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no order has this ID.
    /// Returns `AppError::ReferenceNotFound` if the resulting customer or cake is missing.
    pub async fn update(&self, id: OrderId, changes: OrderChanges) -> Result<Order, AppError> {
        let current = self.get(id).await?;

        if changes.touches_references() {
            self.ensure_references(
                changes.customer_id.unwrap_or(current.customer_id),
                changes.cake_id.unwrap_or(current.cake_id),
            )
            .await?;
        }

        self.store
            .update_order(id, changes)
            .await
            .map_err(write_error)
    }

    /// Remove an order.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no order has this ID.
    pub async fn delete(&self, id: OrderId) -> Result<(), AppError> {
        self.store.delete_order(id).await.map_err(write_error)?;

        tracing::info!(order_id = %id, "Order deleted");
        Ok(())
    }

    async fn ensure_references(
        &self,
        customer_id: CustomerId,
        cake_id: CakeId,
    ) -> Result<(), AppError> {
        let customer = self
            .store
            .find_customer(customer_id, CustomerScope::Active)
            .await?;
        let cake = self.store.find_cake(cake_id).await?;

        if customer.is_none() || cake.is_none() {
            return Err(AppError::ReferenceNotFound(MISSING_REFERENCE.to_string()));
        }
        Ok(())
    }
}

fn write_error(e: RepositoryError) -> AppError {
    match e {
        RepositoryError::ReferenceViolation(_) => {
            AppError::ReferenceNotFound(MISSING_REFERENCE.to_string())
        }
        RepositoryError::NotFound => AppError::NotFound(NOT_FOUND.to_string()),
        other => AppError::Database(other),
    }
}
