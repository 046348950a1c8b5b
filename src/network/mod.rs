//! Network layer - vocabulary API calls
//!
//! The Network actor receives API commands and sends back responses.

pub mod actor;
pub mod client;
pub mod error;

#[cfg(test)]
pub(crate) mod test_server;

pub use actor::NetworkActor;
pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
