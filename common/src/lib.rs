//! Shared building blocks for the netdiag engine.
//!
//! Everything that crosses the boundary to the UI (results, options, errors)
//! is defined here so the core and the binary agree on a single data model.

pub mod config;
pub mod error;
pub mod models;
pub mod network;
pub mod options;
pub mod platform;
pub mod validate;
