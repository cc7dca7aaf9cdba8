//! TCP broadcast server library.
//!
//! Every byte chunk read from one connected peer is relayed to all currently
//! connected peers, the sender included.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
