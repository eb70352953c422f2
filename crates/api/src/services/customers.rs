//! Customer service.
//!
//! Only active customers are visible. Deleting a customer clears its
//! `active` flag; the row and its email stay in the store.

use confectionery_core::CustomerId;

use super::password::hash_password;
use crate::db::{RepositoryError, Store};
use crate::error::AppError;
use crate::models::{Customer, CustomerChanges, CustomerScope, NewCustomer};
use crate::schemas::{CustomerDraft, CustomerPatchDraft};

const EMAIL_EXISTS: &str = "Email already exists";
const NOT_FOUND: &str = "Customer not found";

/// Customer operations over the injected store.
pub struct CustomerService<'a> {
    store: &'a dyn Store,
}

impl<'a> CustomerService<'a> {
    /// Create a new customer service.
    #[must_use]
    pub const fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// List active customers.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if the store fails.
    pub async fn list(&self) -> Result<Vec<Customer>, AppError> {
        Ok(self.store.list_customers(CustomerScope::Active).await?)
    }

    /// Get an active customer.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no active customer has this ID.
    pub async fn get(&self, id: CustomerId) -> Result<Customer, AppError> {
        self.store
            .find_customer(id, CustomerScope::Active)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
    }

    /// Register a customer, hashing the password if one was given.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Conflict` if any customer, active or not, has the email.
    pub async fn create(&self, draft: CustomerDraft) -> Result<Customer, AppError> {
        if self.store.find_customer_by_email(&draft.email).await?.is_some() {
            return Err(AppError::Conflict(EMAIL_EXISTS.to_string()));
        }

        let password_hash = draft.password.as_deref().map(hash_password).transpose()?;

        let customer = self
            .store
            .insert_customer(NewCustomer {
                first_name: draft.first_name,
                last_name: draft.last_name,
                email: draft.email,
                password_hash,
            })
            .await
            .map_err(write_error)?;

        tracing::info!(customer_id = %customer.id, "Customer created");
        Ok(customer)
    }

    /// Apply a partial update to an active customer.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no active customer has this ID.
    /// Returns `AppError::Conflict` if another customer has the new email.
    pub async fn update(
        &self,
        id: CustomerId,
        patch: CustomerPatchDraft,
    ) -> Result<Customer, AppError> {
        let current = self.get(id).await?;

        if let Some(email) = &patch.email
            && *email != current.email
            && let Some(other) = self.store.find_customer_by_email(email).await?
            && other.id != id
        {
            return Err(AppError::Conflict(EMAIL_EXISTS.to_string()));
        }

        let password_hash = patch.password.as_deref().map(hash_password).transpose()?;

        let changes = CustomerChanges {
            first_name: patch.first_name,
            last_name: patch.last_name,
            email: patch.email,
            password_hash,
            active: None,
        };

        self.store
            .update_customer(id, changes)
            .await
            .map_err(write_error)
    }

    /// Deactivate an active customer.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no active customer has this ID.
    pub async fn deactivate(&self, id: CustomerId) -> Result<(), AppError> {
        self.get(id).await?;
        self.store
            .update_customer(id, CustomerChanges::deactivate())
            .await
            .map_err(write_error)?;

        tracing::info!(customer_id = %id, "Customer deactivated");
        Ok(())
    }
}

fn write_error(e: RepositoryError) -> AppError {
    match e {
        RepositoryError::Conflict(_) => AppError::Conflict(EMAIL_EXISTS.to_string()),
        RepositoryError::NotFound => AppError::NotFound(NOT_FOUND.to_string()),
        other => AppError::Database(other),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use confectionery_core::Email;

    use super::*;
    use crate::db::{CustomerStore, MemoryStore};

    fn draft(email: &str) -> CustomerDraft {
        CustomerDraft {
            first_name: "Ana".to_string(),
            last_name: "Souza".to_string(),
            email: Email::parse(email).unwrap(),
            password: None,
        }
    }

    #[tokio::test]
    async fn test_create_hashes_password() {
        let store = MemoryStore::new();
        let service = CustomerService::new(&store);

        let customer = service
            .create(CustomerDraft {
                password: Some("Passw0rd!".to_string()),
                ..draft("ana@example.com")
            })
            .await
            .unwrap();

        let hash = customer.password_hash.unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("Passw0rd!"));
    }

    #[tokio::test]
    async fn test_email_stays_taken_after_deactivation() {
        let store = MemoryStore::new();
        let service = CustomerService::new(&store);

        let customer = service.create(draft("ana@example.com")).await.unwrap();
        service.deactivate(customer.id).await.unwrap();

        let err = service.create(draft("ana@example.com")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(
            store.list_customers(CustomerScope::Any).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_inactive_customer_is_not_found() {
        let store = MemoryStore::new();
        let service = CustomerService::new(&store);

        let customer = service.create(draft("ana@example.com")).await.unwrap();
        service.deactivate(customer.id).await.unwrap();

        assert!(matches!(
            service.get(customer.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.deactivate(customer.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service
                .update(customer.id, CustomerPatchDraft::default())
                .await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_email_conflicts_with_other_customer() {
        let store = MemoryStore::new();
        let service = CustomerService::new(&store);

        let ana = service.create(draft("ana@example.com")).await.unwrap();
        service.create(draft("bia@example.com")).await.unwrap();

        let err = service
            .update(
                ana.id,
                CustomerPatchDraft {
                    email: Some(Email::parse("bia@example.com").unwrap()),
                    ..CustomerPatchDraft::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let same = service
            .update(
                ana.id,
                CustomerPatchDraft {
                    email: Some(Email::parse("ana@example.com").unwrap()),
                    last_name: Some("Lima".to_string()),
                    ..CustomerPatchDraft::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(same.last_name, "Lima");
    }
}
