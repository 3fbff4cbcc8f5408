//! Subcommand implementations.

pub mod cart;
pub mod menu;
pub mod order;

use scan2order_core::{CheckoutError, MenuItemId, OrderId};
use thiserror::Error;

use crate::client::ApiError;
use crate::store::StoreError;

/// Errors surfaced to the user by a subcommand.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("No menu item with id {0}")]
    UnknownMenuItem(MenuItemId),

    #[error("{0} is not available right now")]
    Unavailable(String),

    #[error("No cart line {0}")]
    UnknownLine(String),

    #[error("Order {0} not found")]
    UnknownOrder(OrderId),

    #[error("S2O_DEVICE_TOKEN is required for order history")]
    MissingDeviceToken,
}
