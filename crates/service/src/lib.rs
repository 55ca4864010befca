//! Service layer providing the catalog's product operations on top of models.
//! - Separates business logic from data access.
//! - Reuses entity definitions in the `models` crate.
//! - Exposes a repository trait so HTTP handlers do not depend on sea-orm.

pub mod errors;
pub mod runtime;
pub mod product_service;
pub mod repository;
#[cfg(test)]
pub mod test_support;
