//! Cart lines and their identifiers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{MenuItem, MenuItemId, Money};

/// Opaque identifier of a cart line.
///
/// Generated when the line is inserted. Two lines for the same menu item
/// with different notes have different `LineId`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(Uuid);

impl LineId {
    /// Generate a fresh random line ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for LineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for LineId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// One entry in the cart.
///
/// `name` and `unit_price` are copied from the menu item when the line is
/// created; later price changes on the menu do not reach the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub(crate) line_id: LineId,
    pub(crate) item_id: MenuItemId,
    pub(crate) name: String,
    pub(crate) unit_price: Money,
    pub(crate) quantity: u32,
    #[serde(default)]
    pub(crate) note: String,
}

impl CartLine {
    pub(crate) fn new(item: &MenuItem, quantity: u32, note: &str) -> Self {
        Self {
            line_id: LineId::generate(),
            item_id: item.id,
            name: item.name.clone(),
            unit_price: item.price,
            quantity,
            note: note.trim().to_string(),
        }
    }

    #[must_use]
    pub const fn line_id(&self) -> LineId {
        self.line_id
    }

    #[must_use]
    pub const fn item_id(&self) -> MenuItemId {
        self.item_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// The note as last entered, untrimmed if it came from `update_note`.
    #[must_use]
    pub fn note(&self) -> &str {
        &self.note
    }

    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }

    /// Whether an addition of `item_id` with `note` merges into this line.
    pub(crate) fn matches(&self, item_id: MenuItemId, note: &str) -> bool {
        self.item_id == item_id && self.note.trim() == note.trim()
    }
}
