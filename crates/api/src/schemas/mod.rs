//! Request and response shapes.
//!
//! Each resource has three JSON shapes:
//! - an input schema for `POST`, where missing fields decode to empty values
//!   and are reported by `validate()`
//! - a patch schema for `PATCH`, where every field is `Option` and `None`
//!   means "leave untouched"
//! - an output schema for responses
//!
//! `validate()` collects one message per violated rule and turns the
//! request into the matching domain value from [`crate::models`].

pub mod cake;
pub mod customer;
pub mod order;

pub use cake::{CakeInput, CakeOutput, CakePatch};
pub use customer::{CustomerDraft, CustomerInput, CustomerOutput, CustomerPatch, CustomerPatchDraft};
pub use order::{OrderInput, OrderOutput, OrderPatch};

/// Push `"{field} is required"` when a string is empty or only whitespace.
fn require_text(errors: &mut Vec<String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{field} is required"));
    }
}

/// Like [`require_text`], for a patch field that is only checked when present.
fn require_text_if_present(errors: &mut Vec<String>, field: &str, value: Option<&str>) {
    if let Some(value) = value {
        require_text(errors, field, value);
    }
}
