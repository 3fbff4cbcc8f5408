//! Scan2Order command-line client library.
//!
//! Exposes the pieces behind the `s2o` binary so they can be exercised from
//! integration tests: configuration, the backend API client, the cart file
//! store and the subcommands.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod commands;
pub mod config;
pub mod store;

pub use client::{ApiClient, ApiError};
pub use commands::CommandError;
pub use config::{ClientConfig, ConfigError};
pub use store::{CartStore, StoreError};
