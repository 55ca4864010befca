//! Interactive catalog client.
//!
//! The client checks that the service answers (`availability`), then runs a
//! menu loop (`session`) that turns console input into calls on a
//! [`ProductApi`]. Failures never end the loop: transport errors are written
//! to the [`ErrorLog`] and reported, bad input cancels the current operation.

pub mod api;
pub mod app;
pub mod availability;
pub mod error_log;
pub mod errors;
pub mod input;
pub mod render;
pub mod session;

#[cfg(test)]
mod test_support;

pub use api::{HttpProductApi, ProductApi};
pub use app::Outcome;
pub use availability::{wait_until_available, RetryPolicy, Unavailable};
pub use error_log::ErrorLog;
pub use errors::{ClientError, TransportError, ValidationError};
pub use session::{MenuState, Session};
