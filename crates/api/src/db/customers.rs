//! Customer persistence.

use async_trait::async_trait;

use confectionery_core::{CustomerId, Email};

use super::{PgStore, RepositoryError};
use crate::models::{Customer, CustomerChanges, CustomerScope, NewCustomer};

/// Customer capability of the store.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// List customers visible in `scope`, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn list_customers(&self, scope: CustomerScope) -> Result<Vec<Customer>, RepositoryError>;

    /// Get a customer by ID, if visible in `scope`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn find_customer(
        &self,
        id: CustomerId,
        scope: CustomerScope,
    ) -> Result<Option<Customer>, RepositoryError>;

    /// Get a customer by exact email, active or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn find_customer_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<Customer>, RepositoryError>;

    /// Insert a new, active customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    async fn insert_customer(&self, customer: NewCustomer) -> Result<Customer, RepositoryError>;

    /// Apply a partial update to an active customer and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no active customer has this ID.
    /// Returns `RepositoryError::Conflict` if the new email already exists.
    async fn update_customer(
        &self,
        id: CustomerId,
        changes: CustomerChanges,
    ) -> Result<Customer, RepositoryError>;
}

/// Internal row type for database queries.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: CustomerId,
    first_name: String,
    last_name: String,
    email: String,
    active: bool,
    password_hash: Option<String>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = RepositoryError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email,
            active: row.active,
            password_hash: row.password_hash,
        })
    }
}

const CUSTOMER_COLUMNS: &str = "id, first_name, last_name, email, active, password_hash";

#[async_trait]
impl CustomerStore for PgStore {
    async fn list_customers(&self, scope: CustomerScope) -> Result<Vec<Customer>, RepositoryError> {
        let rows = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers
             WHERE active OR NOT $1
             ORDER BY id"
        ))
        .bind(matches!(scope, CustomerScope::Active))
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn find_customer(
        &self,
        id: CustomerId,
        scope: CustomerScope,
    ) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers
             WHERE id = $1 AND (active OR NOT $2)"
        ))
        .bind(id)
        .bind(matches!(scope, CustomerScope::Active))
        .fetch_optional(self.pool())
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn find_customer_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(self.pool())
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn insert_customer(&self, customer: NewCustomer) -> Result<Customer, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "INSERT INTO customers (first_name, last_name, email, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING {CUSTOMER_COLUMNS}"
        ))
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(customer.email.as_str())
        .bind(customer.password_hash.as_deref())
        .fetch_one(self.pool())
        .await
        .map_err(RepositoryError::from_write)?;

        row.try_into()
    }

    async fn update_customer(
        &self,
        id: CustomerId,
        changes: CustomerChanges,
    ) -> Result<Customer, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "UPDATE customers SET
                 first_name = COALESCE($2, first_name),
                 last_name = COALESCE($3, last_name),
                 email = COALESCE($4, email),
                 password_hash = COALESCE($5, password_hash),
                 active = COALESCE($6, active)
             WHERE id = $1 AND active
             RETURNING {CUSTOMER_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.first_name.as_deref())
        .bind(changes.last_name.as_deref())
        .bind(changes.email.as_ref().map(Email::as_str))
        .bind(changes.password_hash.as_deref())
        .bind(changes.active)
        .fetch_optional(self.pool())
        .await
        .map_err(RepositoryError::from_write)?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }
}
