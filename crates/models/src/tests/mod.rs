
/// CRUD operations on the product entity
pub mod crud_tests;
