//! Core types for Scan2Order.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod menu;
pub mod price;
pub mod status;

pub use id::*;
pub use menu::MenuItem;
pub use price::Money;
pub use status::OrderStatus;
