//! Cake service.

use confectionery_core::CakeId;

use crate::db::{RepositoryError, Store};
use crate::error::AppError;
use crate::models::{Cake, CakeChanges, NewCake};

const NAME_EXISTS: &str = "Cake already exists";
const NOT_FOUND: &str = "Cake not found";
const STILL_ORDERED: &str = "Cake is referenced by existing orders";

/// Cake operations over the injected store.
pub struct CakeService<'a> {
    store: &'a dyn Store,
}

impl<'a> CakeService<'a> {
    /// Create a new cake service.
    #[must_use]
    pub const fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// List every cake.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if the store fails.
    pub async fn list(&self) -> Result<Vec<Cake>, AppError> {
        Ok(self.store.list_cakes().await?)
    }

    /// Get a cake.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no cake has this ID.
    pub async fn get(&self, id: CakeId) -> Result<Cake, AppError> {
        self.store
            .find_cake(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
    }

    /// Add a cake to the catalogue.
    ///
    /// # Errors
    ///
    /// Returns `AppError::DuplicateName` if a cake with this name exists.
    pub async fn create(&self, cake: NewCake) -> Result<Cake, AppError> {
        if self.store.find_cake_by_name(&cake.name).await?.is_some() {
            return Err(AppError::DuplicateName(NAME_EXISTS.to_string()));
        }

        let cake = self.store.insert_cake(cake).await.map_err(write_error)?;

        tracing::info!(cake_id = %cake.id, "Cake created");
        Ok(cake)
    }

    /// Apply a partial update. Keeping the cake's own name is not a duplicate.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no cake has this ID.
    /// Returns `AppError::DuplicateName` if another cake has the new name.
    pub async fn update(&self, id: CakeId, changes: CakeChanges) -> Result<Cake, AppError> {
        self.get(id).await?;

        if let Some(name) = &changes.name
            && let Some(other) = self.store.find_cake_by_name(name).await?
            && other.id != id
        {
            return Err(AppError::DuplicateName(NAME_EXISTS.to_string()));
        }

        self.store
            .update_cake(id, changes)
            .await
            .map_err(write_error)
    }

    /// Remove a cake.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no cake has this ID.
    /// Returns `AppError::Conflict` if orders still reference the cake.
    pub async fn delete(&self, id: CakeId) -> Result<(), AppError> {
        self.store.delete_cake(id).await.map_err(write_error)?;

        tracing::info!(cake_id = %id, "Cake deleted");
        Ok(())
    }
}

fn write_error(e: RepositoryError) -> AppError {
    match e {
        RepositoryError::Conflict(_) => AppError::DuplicateName(NAME_EXISTS.to_string()),
        RepositoryError::ReferenceViolation(_) => AppError::Conflict(STILL_ORDERED.to_string()),
        RepositoryError::NotFound => AppError::NotFound(NOT_FOUND.to_string()),
        other => AppError::Database(other),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use confectionery_core::Price;

    use super::*;
    use crate::db::{CakeStore, MemoryStore};

    fn cake(name: &str, price: u64) -> NewCake {
        NewCake {
            name: name.to_string(),
            price: Price::from_minor_units(price).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_name_keeps_one_row() {
        let store = MemoryStore::new();
        let service = CakeService::new(&store);

        service.create(cake("Brigadeiro", 500)).await.unwrap();
        let err = service.create(cake("Brigadeiro", 900)).await.unwrap_err();

        assert!(matches!(err, AppError::DuplicateName(_)));
        assert_eq!(store.list_cakes().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rename_checks_other_rows_only() {
        let store = MemoryStore::new();
        let service = CakeService::new(&store);

        let quindim = service.create(cake("Quindim", 700)).await.unwrap();
        service.create(cake("Pudim", 800)).await.unwrap();

        let same = service
            .update(
                quindim.id,
                CakeChanges {
                    name: Some("Quindim".to_string()),
                    price: Some(Price::from_minor_units(750).unwrap()),
                },
            )
            .await
            .unwrap();
        assert_eq!(same.price.minor_units(), 750);

        let err = service
            .update(
                quindim.id,
                CakeChanges {
                    name: Some("Pudim".to_string()),
                    price: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateName(_)));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_cake() {
        let store = MemoryStore::new();
        let service = CakeService::new(&store);

        assert!(matches!(
            service.update(CakeId::new(9), CakeChanges::default()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(CakeId::new(9)).await,
            Err(AppError::NotFound(_))
        ));
    }
}
