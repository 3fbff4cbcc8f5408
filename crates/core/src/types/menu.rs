//! Menu records as served by the menu service.

use serde::{Deserialize, Serialize};

use super::id::{CategoryId, MenuItemId};
use super::price::Money;

/// A menu item from `GET /api/menu?tenantId=N`.
///
/// Only `id`, `name` and `price` are required; the cart never looks at the
/// rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(default = "default_available")]
    pub is_available: bool,
    /// Free-form stock status set by the restaurant (`"Available"` by default).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

const AVAILABLE_STATUS: &str = "Available";

const fn default_available() -> bool {
    true
}

impl MenuItem {
    /// Create an available item with only the required fields set.
    #[must_use]
    pub fn new(id: MenuItemId, name: impl Into<String>, price: Money) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            description: None,
            image_url: None,
            category_id: None,
            is_available: true,
            status: None,
        }
    }

    /// Whether guests may add this item to a cart.
    #[must_use]
    pub fn is_orderable(&self) -> bool {
        self.is_available
            && self
                .status
                .as_deref()
                .is_none_or(|status| status.eq_ignore_ascii_case(AVAILABLE_STATUS))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_menu_service_item() {
        let json = r#"{
            "id": 3,
            "name": "Phở bò",
            "price": 50000,
            "description": "Beef noodle soup",
            "imageUrl": "https://cdn.example.com/pho.jpg",
            "categoryId": 1,
            "isAvailable": false
        }"#;

        let item: MenuItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, MenuItemId::new(3));
        assert_eq!(item.price, Money::from_major(50_000));
        assert_eq!(item.category_id, Some(CategoryId::new(1)));
        assert!(!item.is_available);
    }

    #[test]
    fn test_deserialize_required_fields_only() {
        let item: MenuItem =
            serde_json::from_str(r#"{"id": 1, "name": "Trà đá", "price": 5000}"#).unwrap();
        assert_eq!(item, MenuItem::new(MenuItemId::new(1), "Trà đá", Money::from_major(5_000)));
    }

    #[test]
    fn test_is_orderable() {
        let mut item = MenuItem::new(MenuItemId::new(1), "Trà đá", Money::from_major(5_000));
        assert!(item.is_orderable());

        item.status = Some("Available".to_string());
        assert!(item.is_orderable());

        item.status = Some("SoldOut".to_string());
        assert!(!item.is_orderable());

        item.status = None;
        item.is_available = false;
        assert!(!item.is_orderable());
    }

    #[test]
    fn test_missing_price_is_rejected() {
        assert!(serde_json::from_str::<MenuItem>(r#"{"id": 1, "name": "Trà đá"}"#).is_err());
    }
}
