//! Order persistence.

use async_trait::async_trait;

use confectionery_core::OrderId;

use super::{PgStore, RepositoryError};
use crate::models::{NewOrder, Order, OrderChanges};

/// Order capability of the store.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// List all orders, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn list_orders(&self) -> Result<Vec<Order>, RepositoryError>;

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn find_order(&self, id: OrderId) -> Result<Option<Order>, RepositoryError>;

    /// Insert a new order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::ReferenceViolation` if the customer or cake does not exist.
    async fn insert_order(&self, order: NewOrder) -> Result<Order, RepositoryError>;

    /// Apply a partial update, bump `updated_at`, and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order has this ID.
    /// Returns `RepositoryError::ReferenceViolation` if a new reference does not exist.
    async fn update_order(
        &self,
        id: OrderId,
        changes: OrderChanges,
    ) -> Result<Order, RepositoryError>;

    /// Remove an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order has this ID.
    async fn delete_order(&self, id: OrderId) -> Result<(), RepositoryError>;
}

const ORDER_COLUMNS: &str = "id, customer_id, cake_id, qtd, delivered, created_at, updated_at";

#[async_trait]
impl OrderStore for PgStore {
    async fn list_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY id"
        ))
        .fetch_all(self.pool())
        .await?;

        Ok(orders)
    }

    async fn find_order(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(order)
    }

    async fn insert_order(&self, order: NewOrder) -> Result<Order, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "INSERT INTO orders (customer_id, cake_id, qtd, delivered)
             VALUES ($1, $2, $3, $4)
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(order.customer_id)
        .bind(order.cake_id)
        .bind(order.qtd)
        .bind(order.delivered)
        .fetch_one(self.pool())
        .await
        .map_err(RepositoryError::from_write)?;

        Ok(order)
    }

    async fn update_order(
        &self,
        id: OrderId,
        changes: OrderChanges,
    ) -> Result<Order, RepositoryError> {
        sqlx::query_as::<_, Order>(&format!(
            "UPDATE orders SET
                 customer_id = COALESCE($2, customer_id),
                 cake_id = COALESCE($3, cake_id),
                 qtd = COALESCE($4, qtd),
                 delivered = COALESCE($5, delivered),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.customer_id)
        .bind(changes.cake_id)
        .bind(changes.qtd)
        .bind(changes.delivered)
        .fetch_optional(self.pool())
        .await
        .map_err(RepositoryError::from_write)?
        .ok_or(RepositoryError::NotFound)
    }

    async fn delete_order(&self, id: OrderId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
