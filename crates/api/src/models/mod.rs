//! Domain models for the confectionery API.
//!
//! These are validated domain objects as they exist in the store. Request
//! and response shapes live in [`crate::schemas`].
//!
//! Each resource has three types:
//! - the stored row (`Customer`, `Cake`, `Order`)
//! - a `New*` value for inserts
//! - a `*Changes` value for partial updates, where `None` leaves a column untouched

pub mod cake;
pub mod customer;
pub mod order;

pub use cake::{Cake, CakeChanges, NewCake};
pub use customer::{Customer, CustomerChanges, CustomerScope, NewCustomer};
pub use order::{NewOrder, Order, OrderChanges};
