//! Cake request and response shapes.

use serde::{Deserialize, Serialize};

use confectionery_core::{CakeId, Price};

use super::{require_text, require_text_if_present};
use crate::models::{Cake, CakeChanges, NewCake};

/// Maximum length of a cake name, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// Body of `POST /cakes/`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CakeInput {
    pub name: String,
    /// Minor currency units. Zero counts as missing.
    pub price: u64,
}

impl CakeInput {
    /// Check every field rule.
    ///
    /// # Errors
    ///
    /// Returns one message per violated rule.
    pub fn validate(self) -> Result<NewCake, Vec<String>> {
        let mut errors = Vec::new();

        require_text(&mut errors, "name", &self.name);
        check_name_length(&mut errors, &self.name);
        let price = if self.price == 0 {
            errors.push("price is required".to_string());
            None
        } else {
            parse_price(&mut errors, self.price)
        };

        match price {
            Some(price) if errors.is_empty() => Ok(NewCake {
                name: self.name,
                price,
            }),
            _ => Err(errors),
        }
    }
}

/// Body of `PATCH /cakes/{id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CakePatch {
    pub name: Option<String>,
    pub price: Option<u64>,
}

impl CakePatch {
    /// Check the rules of every present field. A present price of zero is allowed.
    ///
    /// # Errors
    ///
    /// Returns one message per violated rule.
    pub fn validate(self) -> Result<CakeChanges, Vec<String>> {
        let mut errors = Vec::new();

        require_text_if_present(&mut errors, "name", self.name.as_deref());
        if let Some(name) = &self.name {
            check_name_length(&mut errors, name);
        }
        let price = self.price.and_then(|p| parse_price(&mut errors, p));

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(CakeChanges {
            name: self.name,
            price,
        })
    }
}

fn check_name_length(errors: &mut Vec<String>, name: &str) {
    if name.chars().count() > MAX_NAME_LENGTH {
        errors.push(format!("name must be at most {MAX_NAME_LENGTH} characters"));
    }
}

fn parse_price(errors: &mut Vec<String>, amount: u64) -> Option<Price> {
    Price::from_minor_units(amount)
        .map_err(|e| errors.push(e.to_string()))
        .ok()
}

/// Cake as returned by the API.
#[derive(Debug, Serialize)]
pub struct CakeOutput {
    pub id: CakeId,
    pub name: String,
    pub price: Price,
}

impl From<Cake> for CakeOutput {
    fn from(cake: Cake) -> Self {
        Self {
            id: cake.id,
            name: cake.name,
            price: cake.price,
        }
    }
}
