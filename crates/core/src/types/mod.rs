//! Core types for the confectionery backend.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod password;
pub mod price;
pub mod quantity;

pub use email::{Email, EmailError};
pub use id::*;
pub use password::{MIN_PASSWORD_LENGTH, PasswordViolation, is_valid_password, password_violations};
pub use price::{Price, PriceError};
pub use quantity::{Quantity, QuantityError};
