use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body of `GET /health`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Health {
    pub status: String,
}

impl Health {
    pub const UP: &'static str = "up";

    pub fn up() -> Self {
        Self { status: Self::UP.to_string() }
    }

    pub fn is_up(&self) -> bool {
        self.status == Self::UP
    }
}

/// A stored catalog record. The identifier is assigned by the store.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
}

/// The mutable fields of a product, as sent to `POST /products` and
/// `PUT /products/{id}`.
///
/// Deserializing does not validate; use [`ProductInput::new`] when the values
/// come from a user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
    Description,
}

impl fmt::Display for ProductField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProductField::Name => "name",
            ProductField::Description => "description",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProductFieldError {
    #[error("Product {0} cannot be empty")]
    Empty(ProductField),
    #[error("Price must be a finite number")]
    NonFinitePrice,
    #[error("Price cannot be negative")]
    NegativePrice,
}

/// Trim `raw` and reject it when nothing is left.
pub fn required_text(field: ProductField, raw: &str) -> Result<String, ProductFieldError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ProductFieldError::Empty(field));
    }
    Ok(value.to_string())
}

pub fn checked_price(price: f64) -> Result<f64, ProductFieldError> {
    if !price.is_finite() {
        return Err(ProductFieldError::NonFinitePrice);
    }
    if price < 0.0 {
        return Err(ProductFieldError::NegativePrice);
    }
    Ok(price)
}

impl ProductInput {
    pub fn new(name: &str, description: &str, price: f64) -> Result<Self, ProductFieldError> {
        Ok(Self {
            name: required_text(ProductField::Name, name)?,
            description: required_text(ProductField::Description, description)?,
            price: checked_price(price)?,
        })
    }
}

impl Product {
    /// The record after its mutable fields were overwritten by `input`.
    pub fn with_input(&self, input: &ProductInput) -> Self {
        Self {
            id: self.id,
            name: input.name.clone(),
            description: input.description.clone(),
            price: input.price,
        }
    }
}
