//! Guard around a cart while its order is being submitted.
//!
//! The cart has no notion of "sent". A screen wraps it in a [`Checkout`],
//! which hands out the payload once, refuses edits and a second submission
//! while the request is outstanding, and clears the cart only when the
//! caller reports success.

use thiserror::Error;
use tracing::{debug, info, warn};

use super::{OrderContext, OrderPayload};
use crate::cart::Cart;

/// Checkout errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("Cart is empty")]
    EmptyCart,

    /// A submission is already outstanding.
    #[error("An order submission is already in progress")]
    SubmissionInProgress,

    /// `succeed` or `fail` was called without a pending submission.
    #[error("No order submission is in progress")]
    NotSubmitting,
}

/// Submission state of a [`Checkout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutState {
    #[default]
    Idle,
    Submitting,
}

/// A cart plus the submission state of the screen that owns it.
#[derive(Debug, Clone, Default)]
pub struct Checkout {
    cart: Cart,
    state: CheckoutState,
}

impl Checkout {
    #[must_use]
    pub const fn new(cart: Cart) -> Self {
        Self {
            cart,
            state: CheckoutState::Idle,
        }
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Mutable access to the cart, unless a submission is outstanding.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::SubmissionInProgress` while submitting.
    pub fn cart_mut(&mut self) -> Result<&mut Cart, CheckoutError> {
        match self.state {
            CheckoutState::Idle => Ok(&mut self.cart),
            CheckoutState::Submitting => Err(CheckoutError::SubmissionInProgress),
        }
    }

    #[must_use]
    pub const fn state(&self) -> CheckoutState {
        self.state
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.state == CheckoutState::Submitting
    }

    /// Lock the cart and build the payload to send.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` for an empty cart and
    /// `CheckoutError::SubmissionInProgress` if already submitting.
    pub fn begin(&mut self, context: &OrderContext) -> Result<OrderPayload, CheckoutError> {
        if self.is_submitting() {
            warn!("Rejected duplicate order submission");
            return Err(CheckoutError::SubmissionInProgress);
        }
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        self.state = CheckoutState::Submitting;
        debug!(lines = self.cart.len(), "Order submission started");
        Ok(self.cart.to_order_payload(context))
    }

    /// The order service confirmed the order: clear the cart and unlock.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::NotSubmitting` if no submission is pending.
    pub fn succeed(&mut self) -> Result<(), CheckoutError> {
        self.finish()?;
        self.cart.clear();
        info!("Order submitted, cart cleared");
        Ok(())
    }

    /// The submission failed: unlock and keep the cart for a retry.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::NotSubmitting` if no submission is pending.
    pub fn fail(&mut self) -> Result<(), CheckoutError> {
        self.finish()?;
        debug!(lines = self.cart.len(), "Order submission failed, cart kept");
        Ok(())
    }

    #[must_use]
    pub fn into_cart(self) -> Cart {
        self.cart
    }

    fn finish(&mut self) -> Result<(), CheckoutError> {
        if !self.is_submitting() {
            return Err(CheckoutError::NotSubmitting);
        }
        self.state = CheckoutState::Idle;
        Ok(())
    }
}

impl From<Cart> for Checkout {
    fn from(cart: Cart) -> Self {
        Self::new(cart)
    }
}
