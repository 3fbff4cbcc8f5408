//! Order submission: wire payloads and the checkout guard.

mod checkout;
mod payload;

pub use checkout::{Checkout, CheckoutError, CheckoutState};
pub use payload::{OrderContext, OrderItemPayload, OrderPayload, PlacedOrder, PlacedOrderItem};
