//! Cake persistence.

use async_trait::async_trait;

use confectionery_core::CakeId;

use super::{PgStore, RepositoryError};
use crate::models::{Cake, CakeChanges, NewCake};

/// Cake capability of the store.
#[async_trait]
pub trait CakeStore: Send + Sync {
    /// List all cakes, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn list_cakes(&self) -> Result<Vec<Cake>, RepositoryError>;

    /// Get a cake by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn find_cake(&self, id: CakeId) -> Result<Option<Cake>, RepositoryError>;

    /// Get a cake by exact name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn find_cake_by_name(&self, name: &str) -> Result<Option<Cake>, RepositoryError>;

    /// Insert a new cake.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name already exists.
    async fn insert_cake(&self, cake: NewCake) -> Result<Cake, RepositoryError>;

    /// Apply a partial update and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no cake has this ID.
    /// Returns `RepositoryError::Conflict` if the new name already exists.
    async fn update_cake(&self, id: CakeId, changes: CakeChanges) -> Result<Cake, RepositoryError>;

    /// Remove a cake.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no cake has this ID.
    /// Returns `RepositoryError::ReferenceViolation` if orders still reference it.
    async fn delete_cake(&self, id: CakeId) -> Result<(), RepositoryError>;
}

#[async_trait]
impl CakeStore for PgStore {
    async fn list_cakes(&self) -> Result<Vec<Cake>, RepositoryError> {
        let cakes = sqlx::query_as::<_, Cake>("SELECT id, name, price FROM cakes ORDER BY id")
            .fetch_all(self.pool())
            .await?;

        Ok(cakes)
    }

    async fn find_cake(&self, id: CakeId) -> Result<Option<Cake>, RepositoryError> {
        let cake = sqlx::query_as::<_, Cake>("SELECT id, name, price FROM cakes WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;

        Ok(cake)
    }

    async fn find_cake_by_name(&self, name: &str) -> Result<Option<Cake>, RepositoryError> {
        let cake = sqlx::query_as::<_, Cake>("SELECT id, name, price FROM cakes WHERE name = $1")
            .bind(name)
            .fetch_optional(self.pool())
            .await?;

        Ok(cake)
    }

    async fn insert_cake(&self, cake: NewCake) -> Result<Cake, RepositoryError> {
        let cake = sqlx::query_as::<_, Cake>(
            r"
            INSERT INTO cakes (name, price)
            VALUES ($1, $2)
            RETURNING id, name, price
            ",
        )
        .bind(&cake.name)
        .bind(cake.price)
        .fetch_one(self.pool())
        .await
        .map_err(RepositoryError::from_write)?;

        Ok(cake)
    }

    async fn update_cake(&self, id: CakeId, changes: CakeChanges) -> Result<Cake, RepositoryError> {
        sqlx::query_as::<_, Cake>(
            r"
            UPDATE cakes SET
                name = COALESCE($2, name),
                price = COALESCE($3, price)
            WHERE id = $1
            RETURNING id, name, price
            ",
        )
        .bind(id)
        .bind(changes.name.as_deref())
        .bind(changes.price)
        .fetch_optional(self.pool())
        .await
        .map_err(RepositoryError::from_write)?
        .ok_or(RepositoryError::NotFound)
    }

    async fn delete_cake(&self, id: CakeId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM cakes WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(RepositoryError::from_write)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
