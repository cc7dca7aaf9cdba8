//! Console client for the TCP broadcast server.
//!
//! Sends each input line as raw bytes and prints every chunk the server relays.

pub mod error;
pub mod runner;
pub mod session;
pub mod ui;

pub use error::ClientError;
pub use runner::{ReconnectPolicy, run_client};
