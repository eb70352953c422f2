//! Customer domain types.

use confectionery_core::{CustomerId, Email};

/// A customer (domain type).
///
/// Customers are never physically removed; deleting one clears `active`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Unique customer ID.
    pub id: CustomerId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address, unique across active and inactive customers.
    pub email: Email,
    /// Soft-delete marker.
    pub active: bool,
    /// Argon2id PHC string, if the customer set a password.
    pub password_hash: Option<String>,
}

/// Which customers a lookup may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerScope {
    /// Only customers with `active = true`.
    Active,
    /// Every stored customer, including deactivated ones.
    Any,
}

impl CustomerScope {
    /// Returns `true` if a customer with the given flag is visible in this scope.
    #[must_use]
    pub const fn admits(self, active: bool) -> bool {
        match self {
            Self::Active => active,
            Self::Any => true,
        }
    }
}

/// Values for inserting a new customer.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub password_hash: Option<String>,
}

/// Partial update for a customer.
#[derive(Debug, Clone, Default)]
pub struct CustomerChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<Email>,
    pub password_hash: Option<String>,
    pub active: Option<bool>,
}

impl CustomerChanges {
    /// Changes that only deactivate the customer.
    #[must_use]
    pub fn deactivate() -> Self {
        Self {
            active: Some(false),
            ..Self::default()
        }
    }

    /// Apply present fields to a customer in place.
    pub fn apply(self, customer: &mut Customer) {
        if let Some(first_name) = self.first_name {
            customer.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            customer.last_name = last_name;
        }
        if let Some(email) = self.email {
            customer.email = email;
        }
        if let Some(hash) = self.password_hash {
            customer.password_hash = Some(hash);
        }
        if let Some(active) = self.active {
            customer.active = active;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn customer() -> Customer {
        Customer {
            id: CustomerId::new(1),
            first_name: "Ana".to_string(),
            last_name: "Souza".to_string(),
            email: Email::parse("ana@example.com").unwrap(),
            active: true,
            password_hash: None,
        }
    }

    #[test]
    fn test_scope_admits() {
        assert!(CustomerScope::Active.admits(true));
        assert!(!CustomerScope::Active.admits(false));
        assert!(CustomerScope::Any.admits(false));
    }

    #[test]
    fn test_apply_leaves_absent_fields() {
        let mut c = customer();
        CustomerChanges {
            last_name: Some("Lima".to_string()),
            ..CustomerChanges::default()
        }
        .apply(&mut c);

        assert_eq!(c.first_name, "Ana");
        assert_eq!(c.last_name, "Lima");
        assert!(c.active);
    }

    #[test]
    fn test_deactivate_only_touches_flag() {
        let mut c = customer();
        CustomerChanges::deactivate().apply(&mut c);

        assert!(!c.active);
        assert_eq!(c.email.as_str(), "ana@example.com");
    }
}
