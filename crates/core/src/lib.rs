//! Scan2Order Core - Cart and order types shared by every client.
//!
//! This crate provides the pieces the guest web app, the customer mobile app
//! and the command-line client all need:
//! - [`cart`] - The order cart manager (add, update, merge by note, total)
//! - [`order`] - Wire payload for the order-creation endpoint and the
//!   checkout guard that prevents double submission
//! - [`types`] - Newtype IDs, money, menu items and order statuses
//!
//! # Architecture
//!
//! The core crate contains only types and pure state - no I/O, no HTTP
//! clients. Each screen owns its own [`Cart`] and passes it by reference;
//! persistence happens through [`Cart::to_json`] and [`Cart::from_json`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod order;
pub mod types;

pub use cart::{Cart, CartError, CartLine, LineId, LineUpdate, QuantityInput};
pub use order::{
    Checkout, CheckoutError, CheckoutState, OrderContext, OrderItemPayload, OrderPayload,
    PlacedOrder, PlacedOrderItem,
};
pub use types::*;
