//! Request and response bodies of the order service.
//!
//! The order service binds PascalCase JSON on `POST /api/orders` and answers
//! in camelCase. These structs are the only place where the cart's field
//! names are mapped onto the service contract.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::cart::{Cart, CartLine};
use crate::types::{Money, OrderId, OrderStatus, TableId, TenantId};

/// Where an order is going and who placed it.
///
/// Supplied by the calling screen; the cart itself knows nothing about
/// tables or tenants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderContext {
    pub tenant_id: TenantId,
    pub table_id: Option<TableId>,
    pub table_name: String,
    /// Push token of the ordering device, used for "order ready" notifications.
    pub device_token: Option<String>,
}

impl OrderContext {
    #[must_use]
    pub fn new(tenant_id: TenantId, table_name: impl Into<String>) -> Self {
        Self {
            tenant_id,
            table_id: None,
            table_name: table_name.into(),
            device_token: None,
        }
    }

    #[must_use]
    pub const fn with_table_id(mut self, table_id: TableId) -> Self {
        self.table_id = Some(table_id);
        self
    }

    #[must_use]
    pub fn with_device_token(mut self, token: impl Into<String>) -> Self {
        self.device_token = Some(token.into());
        self
    }
}

/// Body of `POST /api/orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderPayload {
    pub tenant_id: TenantId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<TableId>,
    pub table_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_token: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub items: Vec<OrderItemPayload>,
}

/// One line of an order payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderItemPayload {
    pub menu_item_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
    pub note: String,
}

impl OrderPayload {
    /// Snapshot `cart` into a request body. The cart is not modified.
    #[must_use]
    pub fn from_cart(cart: &Cart, context: &OrderContext) -> Self {
        Self {
            tenant_id: context.tenant_id,
            table_id: context.table_id,
            table_name: context.table_name.clone(),
            device_token: context.device_token.clone(),
            total_amount: cart.total().amount(),
            items: cart.lines().iter().map(OrderItemPayload::from).collect(),
        }
    }
}

impl From<&CartLine> for OrderItemPayload {
    fn from(line: &CartLine) -> Self {
        Self {
            menu_item_name: line.name().to_string(),
            price: line.unit_price().amount(),
            quantity: line.quantity(),
            note: line.note().trim().to_string(),
        }
    }
}

/// An order as returned by the order service.
///
/// Returned from order creation and from the order history endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    #[serde(alias = "Id")]
    pub id: OrderId,
    #[serde(default, alias = "Status")]
    pub status: OrderStatus,
    #[serde(default, alias = "TableName")]
    pub table_name: Option<String>,
    #[serde(default, alias = "TotalAmount")]
    pub total_amount: Money,
    #[serde(default, alias = "CreatedAt", deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "Items")]
    pub items: Vec<PlacedOrderItem>,
}

/// A line of a [`PlacedOrder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrderItem {
    #[serde(alias = "MenuItemName")]
    pub menu_item_name: String,
    #[serde(default, alias = "Price")]
    pub price: Money,
    #[serde(alias = "Quantity")]
    pub quantity: u32,
    #[serde(default, alias = "Note")]
    pub note: Option<String>,
}

/// Timestamps read back from the database come without an offset; treat
/// those as UTC.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }

    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    use super::*;
    use crate::types::{MenuItem, MenuItemId};

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(
            &MenuItem::new(MenuItemId::new(1), "Phở bò", Money::from_major(50_000)),
            2,
            "",
        );
        cart.add(
            &MenuItem::new(MenuItemId::new(2), "Cà phê sữa", Money::from_major(30_000)),
            1,
            "ít đá",
        );
        cart
    }

    #[test]
    fn test_payload_wire_field_names() {
        let context = OrderContext::new(TenantId::new(4), "Bàn 5")
            .with_table_id(TableId::new(5))
            .with_device_token("device-abc");
        let value = serde_json::to_value(sample_cart().to_order_payload(&context)).unwrap();

        assert_eq!(value["TenantId"], json!(4));
        assert_eq!(value["TableId"], json!(5));
        assert_eq!(value["TableName"], json!("Bàn 5"));
        assert_eq!(value["DeviceToken"], json!("device-abc"));
        assert_eq!(value["TotalAmount"].as_f64(), Some(130_000.0));

        let items = value["Items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["MenuItemName"], json!("Phở bò"));
        assert_eq!(items[0]["Price"].as_f64(), Some(50_000.0));
        assert_eq!(items[0]["Quantity"], json!(2));
        assert_eq!(items[0]["Note"], json!(""));
        assert_eq!(items[1]["Note"], json!("ít đá"));
    }

    #[test]
    fn test_payload_omits_missing_routing_fields() {
        let context = OrderContext::new(TenantId::new(1), "Bàn 1");
        let value = serde_json::to_value(sample_cart().to_order_payload(&context)).unwrap();

        assert!(value.get("TableId").is_none());
        assert!(value.get("DeviceToken").is_none());
    }

    #[test]
    fn test_payload_does_not_mutate_cart() {
        let cart = sample_cart();
        let before = cart.clone();
        let _ = cart.to_order_payload(&OrderContext::new(TenantId::new(1), "Bàn 1"));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_payload_trims_notes() {
        let mut cart = sample_cart();
        let line_id = cart.lines()[0].line_id();
        cart.update_note(line_id, "  không hành  ");

        let payload = cart.to_order_payload(&OrderContext::new(TenantId::new(1), "Bàn 1"));
        assert_eq!(payload.items[0].note, "không hành");
    }

    #[test]
    fn test_empty_cart_payload() {
        let payload = Cart::new().to_order_payload(&OrderContext::new(TenantId::new(1), "Bàn 1"));
        assert!(payload.items.is_empty());
        assert!(payload.total_amount.is_zero());
    }

    #[test]
    fn test_placed_order_from_camel_case() {
        let json = r#"{
            "id": 17,
            "tableName": "Bàn 5",
            "totalAmount": 130000,
            "status": "Pending",
            "createdAt": "2025-03-01T12:30:05.123Z",
            "tenantId": 4,
            "items": [
                {"id": 1, "menuItemName": "Phở bò", "price": 50000, "quantity": 2, "note": null, "orderId": 17}
            ]
        }"#;

        let order: PlacedOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, OrderId::new(17));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount, Money::from_major(130_000));
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.created_at.unwrap().minute(), 30);
    }

    #[test]
    fn test_placed_order_from_pascal_case_without_offset() {
        let json = r#"{"Id": 3, "Status": "Cooking", "CreatedAt": "2025-03-01T08:00:00.5"}"#;

        let order: PlacedOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, OrderId::new(3));
        assert_eq!(order.status, OrderStatus::Cooking);
        assert_eq!(order.created_at.unwrap().day(), 1);
        assert!(order.items.is_empty());
    }

    #[test]
    fn test_order_list_with_unlisted_status() {
        let json = r#"[{"id": 16, "status": "Rejected"}, {"id": 17, "status": "Cooking"}, {"id": 18, "status": "Served"}]"#;

        let orders: Vec<PlacedOrder> = serde_json::from_str(json).unwrap();
        assert_eq!(orders.len(), 3);
        assert_eq!(orders[0].status, OrderStatus::Rejected);
        assert!(!orders[0].status.is_active());
        assert_eq!(orders[1].status, OrderStatus::Cooking);
        assert_eq!(orders[2].status, OrderStatus::Other("Served".to_string()));
    }
}
