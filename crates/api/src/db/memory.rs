//! In-memory store engine.
//!
//! Holds every table behind one async mutex, so each operation (including
//! its constraint checks) runs atomically. Constraint names match the SQL
//! schema so callers see the same errors from either engine.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use confectionery_core::{CakeId, CustomerId, Email, OrderId};

use super::{CakeStore, CustomerStore, OrderStore, RepositoryError, Store};
use crate::models::{
    Cake, CakeChanges, Customer, CustomerChanges, CustomerScope, NewCake, NewCustomer, NewOrder,
    Order, OrderChanges,
};

const CUSTOMER_EMAIL_KEY: &str = "customers_email_key";
const CAKE_NAME_KEY: &str = "cakes_name_key";
const ORDER_CUSTOMER_FKEY: &str = "orders_customer_id_fkey";
const ORDER_CAKE_FKEY: &str = "orders_cake_id_fkey";

#[derive(Debug, Default)]
struct Tables {
    customers: BTreeMap<CustomerId, Customer>,
    cakes: BTreeMap<CakeId, Cake>,
    orders: BTreeMap<OrderId, Order>,
    next_customer: i32,
    next_cake: i32,
    next_order: i32,
}

impl Tables {
    fn email_taken(&self, email: &Email, except: Option<CustomerId>) -> bool {
        self.customers
            .values()
            .any(|c| &c.email == email && Some(c.id) != except)
    }

    fn name_taken(&self, name: &str, except: Option<CakeId>) -> bool {
        self.cakes
            .values()
            .any(|c| c.name == name && Some(c.id) != except)
    }

    fn check_references(
        &self,
        customer_id: CustomerId,
        cake_id: CakeId,
    ) -> Result<(), RepositoryError> {
        if !self.customers.contains_key(&customer_id) {
            return Err(RepositoryError::ReferenceViolation(
                ORDER_CUSTOMER_FKEY.to_owned(),
            ));
        }
        if !self.cakes.contains_key(&cake_id) {
            return Err(RepositoryError::ReferenceViolation(ORDER_CAKE_FKEY.to_owned()));
        }
        Ok(())
    }
}

fn next_id(counter: &mut i32) -> Result<i32, RepositoryError> {
    *counter = counter
        .checked_add(1)
        .ok_or_else(|| RepositoryError::DataCorruption("id sequence exhausted".to_owned()))?;
    Ok(*counter)
}

/// Store engine keeping all rows in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[async_trait]
impl CustomerStore for MemoryStore {
    async fn list_customers(&self, scope: CustomerScope) -> Result<Vec<Customer>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .customers
            .values()
            .filter(|c| scope.admits(c.active))
            .cloned()
            .collect())
    }

    async fn find_customer(
        &self,
        id: CustomerId,
        scope: CustomerScope,
    ) -> Result<Option<Customer>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .customers
            .get(&id)
            .filter(|c| scope.admits(c.active))
            .cloned())
    }

    async fn find_customer_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<Customer>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .customers
            .values()
            .find(|c| &c.email == email)
            .cloned())
    }

    async fn insert_customer(&self, customer: NewCustomer) -> Result<Customer, RepositoryError> {
        let mut tables = self.tables.lock().await;
        if tables.email_taken(&customer.email, None) {
            return Err(RepositoryError::Conflict(CUSTOMER_EMAIL_KEY.to_owned()));
        }

        let id = CustomerId::new(next_id(&mut tables.next_customer)?);
        let stored = Customer {
            id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
            active: true,
            password_hash: customer.password_hash,
        };
        tables.customers.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_customer(
        &self,
        id: CustomerId,
        changes: CustomerChanges,
    ) -> Result<Customer, RepositoryError> {
        let mut tables = self.tables.lock().await;
        if let Some(email) = &changes.email
            && tables.email_taken(email, Some(id))
        {
            return Err(RepositoryError::Conflict(CUSTOMER_EMAIL_KEY.to_owned()));
        }

        let customer = tables
            .customers
            .get_mut(&id)
            .filter(|c| c.active)
            .ok_or(RepositoryError::NotFound)?;
        changes.apply(customer);
        Ok(customer.clone())
    }
}

#[async_trait]
impl CakeStore for MemoryStore {
    async fn list_cakes(&self) -> Result<Vec<Cake>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables.cakes.values().cloned().collect())
    }

    async fn find_cake(&self, id: CakeId) -> Result<Option<Cake>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables.cakes.get(&id).cloned())
    }

    async fn find_cake_by_name(&self, name: &str) -> Result<Option<Cake>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables.cakes.values().find(|c| c.name == name).cloned())
    }

    async fn insert_cake(&self, cake: NewCake) -> Result<Cake, RepositoryError> {
        let mut tables = self.tables.lock().await;
        if tables.name_taken(&cake.name, None) {
            return Err(RepositoryError::Conflict(CAKE_NAME_KEY.to_owned()));
        }

        let id = CakeId::new(next_id(&mut tables.next_cake)?);
        let stored = Cake {
            id,
            name: cake.name,
            price: cake.price,
        };
        tables.cakes.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_cake(&self, id: CakeId, changes: CakeChanges) -> Result<Cake, RepositoryError> {
        let mut tables = self.tables.lock().await;
        if let Some(name) = &changes.name
            && tables.name_taken(name, Some(id))
        {
            return Err(RepositoryError::Conflict(CAKE_NAME_KEY.to_owned()));
        }

        let cake = tables.cakes.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        changes.apply(cake);
        Ok(cake.clone())
    }

    async fn delete_cake(&self, id: CakeId) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().await;
        if !tables.cakes.contains_key(&id) {
            return Err(RepositoryError::NotFound);
        }
        if tables.orders.values().any(|o| o.cake_id == id) {
            return Err(RepositoryError::ReferenceViolation(ORDER_CAKE_FKEY.to_owned()));
        }

        tables.cakes.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn list_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables.orders.values().cloned().collect())
    }

    async fn find_order(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables.orders.get(&id).cloned())
    }

    async fn insert_order(&self, order: NewOrder) -> Result<Order, RepositoryError> {
        let mut tables = self.tables.lock().await;
        tables.check_references(order.customer_id, order.cake_id)?;

        let id = OrderId::new(next_id(&mut tables.next_order)?);
        let now = Utc::now();
        let stored = Order {
            id,
            customer_id: order.customer_id,
            cake_id: order.cake_id,
            qtd: order.qtd,
            delivered: order.delivered,
            created_at: now,
            updated_at: now,
        };
        tables.orders.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_order(
        &self,
        id: OrderId,
        changes: OrderChanges,
    ) -> Result<Order, RepositoryError> {
        let mut tables = self.tables.lock().await;
        let current = tables.orders.get(&id).ok_or(RepositoryError::NotFound)?;
        tables.check_references(
            changes.customer_id.unwrap_or(current.customer_id),
            changes.cake_id.unwrap_or(current.cake_id),
        )?;

        let order = tables.orders.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        changes.apply(order, Utc::now());
        Ok(order.clone())
    }

    async fn delete_order(&self, id: OrderId) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().await;
        tables
            .orders
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use confectionery_core::{Price, Quantity};

    use super::*;

    fn new_customer(email: &str) -> NewCustomer {
        NewCustomer {
            first_name: "Ana".to_string(),
            last_name: "Souza".to_string(),
            email: Email::parse(email).unwrap(),
            password_hash: None,
        }
    }

    fn new_cake(name: &str) -> NewCake {
        NewCake {
            name: name.to_string(),
            price: Price::from_minor_units(1500).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential_per_table() {
        let store = MemoryStore::new();
        let a = store.insert_customer(new_customer("a@example.com")).await.unwrap();
        let b = store.insert_customer(new_customer("b@example.com")).await.unwrap();
        let cake = store.insert_cake(new_cake("Bolo de Rolo")).await.unwrap();

        assert_eq!(a.id.as_i32(), 1);
        assert_eq!(b.id.as_i32(), 2);
        assert_eq!(cake.id.as_i32(), 1);
    }

    #[tokio::test]
    async fn test_unique_email_includes_inactive() {
        let store = MemoryStore::new();
        let c = store.insert_customer(new_customer("a@example.com")).await.unwrap();
        store
            .update_customer(c.id, CustomerChanges::deactivate())
            .await
            .unwrap();

        let err = store
            .insert_customer(new_customer("a@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(ref key) if key == CUSTOMER_EMAIL_KEY));
    }

    #[tokio::test]
    async fn test_scope_filters_inactive() {
        let store = MemoryStore::new();
        let c = store.insert_customer(new_customer("a@example.com")).await.unwrap();
        store
            .update_customer(c.id, CustomerChanges::deactivate())
            .await
            .unwrap();

        assert!(store.list_customers(CustomerScope::Active).await.unwrap().is_empty());
        assert_eq!(store.list_customers(CustomerScope::Any).await.unwrap().len(), 1);
        assert!(
            store
                .find_customer(c.id, CustomerScope::Active)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_update_skips_inactive_customer() {
        let store = MemoryStore::new();
        let c = store.insert_customer(new_customer("a@example.com")).await.unwrap();
        store
            .update_customer(c.id, CustomerChanges::deactivate())
            .await
            .unwrap();

        let err = store
            .update_customer(
                c.id,
                CustomerChanges {
                    last_name: Some("Lima".to_string()),
                    ..CustomerChanges::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));

        let stored = store
            .find_customer(c.id, CustomerScope::Any)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.last_name, "Souza");
    }

    #[tokio::test]
    async fn test_cake_rename_to_own_name_is_allowed() {
        let store = MemoryStore::new();
        let cake = store.insert_cake(new_cake("Brigadeiro")).await.unwrap();

        let updated = store
            .update_cake(
                cake.id,
                CakeChanges {
                    name: Some("Brigadeiro".to_string()),
                    price: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Brigadeiro");
    }

    #[tokio::test]
    async fn test_order_requires_existing_rows() {
        let store = MemoryStore::new();
        let customer = store.insert_customer(new_customer("a@example.com")).await.unwrap();

        let err = store
            .insert_order(NewOrder {
                customer_id: customer.id,
                cake_id: CakeId::new(99),
                qtd: Quantity::new(1).unwrap(),
                delivered: false,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::ReferenceViolation(ref key) if key == ORDER_CAKE_FKEY));
        assert!(store.list_orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cake_delete_restricted_by_orders() {
        let store = MemoryStore::new();
        let customer = store.insert_customer(new_customer("a@example.com")).await.unwrap();
        let cake = store.insert_cake(new_cake("Quindim")).await.unwrap();
        let order = store
            .insert_order(NewOrder {
                customer_id: customer.id,
                cake_id: cake.id,
                qtd: Quantity::new(3).unwrap(),
                delivered: false,
            })
            .await
            .unwrap();

        let err = store.delete_cake(cake.id).await.unwrap_err();
        assert!(matches!(err, RepositoryError::ReferenceViolation(_)));

        store.delete_order(order.id).await.unwrap();
        store.delete_cake(cake.id).await.unwrap();
        assert!(store.find_cake(cake.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_rows() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.delete_cake(CakeId::new(1)).await,
            Err(RepositoryError::NotFound)
        ));
        assert!(matches!(
            store.delete_order(OrderId::new(1)).await,
            Err(RepositoryError::NotFound)
        ));
    }
}
