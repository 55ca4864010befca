//! Pieces shared by the catalog service and its interactive client:
//! wire types, field validation, logging setup and runtime checks.

pub mod types;
pub mod utils;
pub mod env;

pub use types::{checked_price, required_text, Health, Product, ProductField, ProductFieldError, ProductInput};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_up() {
        let h = Health::up();
        assert_eq!(h.status, "up");
        assert!(h.is_up());
    }
}
