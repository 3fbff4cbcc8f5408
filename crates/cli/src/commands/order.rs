//! Order submission, history and status tracking.

use std::fmt::Write as _;
use std::time::Duration;

use scan2order_core::{Checkout, Money, OrderId, OrderPayload, OrderStatus, PlacedOrder};
use secrecy::ExposeSecret;
use tracing::{debug, info, warn};

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::store::CartStore;

use super::CommandError;

/// Render a list of orders, newest first as the service returns them.
#[must_use]
pub fn render(orders: &[PlacedOrder]) -> String {
    if orders.is_empty() {
        return "No orders yet\n".to_string();
    }

    let mut out = String::new();
    for order in orders {
        let _ = write!(out, "#{} [{}] {}", order.id, order.status, order.total_amount);
        if let Some(created_at) = order.created_at {
            let _ = write!(out, " at {}", created_at.format("%Y-%m-%d %H:%M"));
        }
        out.push('\n');
        for item in &order.items {
            let _ = write!(out, "    {}x {}", item.quantity, item.menu_item_name);
            if let Some(note) = item.note.as_deref().filter(|n| !n.trim().is_empty()) {
                let _ = write!(out, " ({note})");
            }
            out.push('\n');
        }
    }
    out
}

/// Send the stored cart to the order service.
///
/// The cart is cleared and saved only after the service accepts the order;
/// on failure it is left untouched for a retry. Once the service has accepted
/// the order this returns it even if the emptied cart cannot be written, so
/// the caller never mistakes a placed order for a failed one.
///
/// # Errors
///
/// Returns an error if the cart is empty or cannot be loaded, or the service
/// rejects the order.
pub async fn submit(
    config: &ClientConfig,
    client: &ApiClient,
    store: &CartStore,
) -> Result<PlacedOrder, CommandError> {
    let mut checkout = Checkout::new(store.load().await?);
    let payload = checkout.begin(&config.order_context())?;

    match client.create_order(&payload).await {
        Ok(placed) => {
            checkout.succeed()?;
            info!(order_id = %placed.id, status = %placed.status, "Order placed");
            println!("Order #{} sent to the kitchen ({})", placed.id, payload_total(&placed, &payload));
            if let Err(e) = store.save(checkout.cart()).await {
                warn!(
                    order_id = %placed.id,
                    error = %e,
                    "Order was placed but the cart could not be cleared; run `s2o cart clear` before ordering again"
                );
            }
            Ok(placed)
        }
        Err(e) => {
            checkout.fail()?;
            warn!(error = %e, "Order submission failed, cart kept for retry");
            Err(e.into())
        }
    }
}

/// The service echoes the total; fall back to ours if it sent none.
fn payload_total(placed: &PlacedOrder, payload: &OrderPayload) -> String {
    if placed.total_amount.is_zero() {
        Money::new(payload.total_amount).to_string()
    } else {
        placed.total_amount.to_string()
    }
}

/// Print the orders placed from this device.
///
/// # Errors
///
/// Returns an error if no device token is configured or the request fails.
pub async fn history(config: &ClientConfig, client: &ApiClient) -> Result<(), CommandError> {
    let token = config
        .device_token
        .as_ref()
        .ok_or(CommandError::MissingDeviceToken)?;

    let orders = client.order_history(token.expose_secret()).await?;
    print!("{}", render(&orders));
    Ok(())
}

/// Poll the order service until an order is no longer active.
///
/// Prints every status change. Gives up after `max_polls` polls and returns
/// the last status seen.
///
/// # Errors
///
/// Returns an error if the order does not exist or a poll fails.
pub async fn watch(
    config: &ClientConfig,
    client: &ApiClient,
    order_id: OrderId,
    every: Duration,
    max_polls: u32,
) -> Result<OrderStatus, CommandError> {
    let mut ticker = tokio::time::interval(every);
    let mut last: Option<OrderStatus> = None;

    for poll in 0..max_polls {
        ticker.tick().await;

        let orders = client.orders(config.tenant_id).await?;
        let status = orders
            .iter()
            .find(|order| order.id == order_id)
            .map(|order| order.status.clone())
            .ok_or(CommandError::UnknownOrder(order_id))?;
        debug!(%order_id, %status, poll, "Polled order status");

        let active = status.is_active();
        if last.as_ref() != Some(&status) {
            println!("Order #{order_id}: {status}");
            last = Some(status);
        }
        if !active {
            break;
        }
    }

    last.ok_or(CommandError::UnknownOrder(order_id))
}

#[cfg(test)]
mod tests {
    use scan2order_core::PlacedOrderItem;

    use super::*;

    #[test]
    fn test_render_orders() {
        let orders = vec![PlacedOrder {
            id: OrderId::new(17),
            status: OrderStatus::Cooking,
            table_name: Some("Bàn 5".to_string()),
            total_amount: Money::from_major(130_000),
            created_at: None,
            items: vec![
                PlacedOrderItem {
                    menu_item_name: "Phở bò".to_string(),
                    price: Money::from_major(50_000),
                    quantity: 2,
                    note: Some(String::new()),
                },
                PlacedOrderItem {
                    menu_item_name: "Cà phê sữa".to_string(),
                    price: Money::from_major(30_000),
                    quantity: 1,
                    note: Some("ít đá".to_string()),
                },
            ],
        }];

        assert_eq!(
            render(&orders),
            "#17 [Cooking] 130,000đ\n    2x Phở bò\n    1x Cà phê sữa (ít đá)\n"
        );
        assert_eq!(render(&[]), "No orders yet\n");
    }
}
