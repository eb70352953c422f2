//! Business logic services.
//!
//! Each service borrows the injected [`Store`](crate::db::Store) and applies
//! the consistency rules of one resource before writing:
//!
//! - `customers` - unique email, active-only visibility, password hashing
//! - `cakes` - unique name
//! - `orders` - customer and cake must exist
//!
//! Pre-checks give early, descriptive errors. Store constraint violations
//! raised at write time are mapped to the same errors.

pub mod cakes;
pub mod customers;
pub mod orders;
pub mod password;

pub use cakes::CakeService;
pub use customers::CustomerService;
pub use orders::OrderService;
