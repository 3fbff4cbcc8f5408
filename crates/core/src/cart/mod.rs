//! The order cart manager.
//!
//! A [`Cart`] collects the menu items a guest picks before the order is sent
//! to the order service. Lines are keyed by `(menu item, trimmed note)`:
//! adding the same item with the same note bumps the existing line, a
//! different note starts a new one.
//!
//! # Invariant
//!
//! No line with quantity zero is ever kept. Every operation that would take
//! a quantity to zero or below removes the line instead.
//!
//! # Example
//!
//! ```rust
//! use scan2order_core::{Cart, MenuItem, MenuItemId, Money};
//!
//! let pho = MenuItem::new(MenuItemId::new(1), "Phở bò", Money::from_major(50_000));
//! let mut cart = Cart::new();
//!
//! cart.add(&pho, 1, "");
//! cart.add(&pho, 1, "  ");
//! cart.add(&pho, 1, "no onions");
//!
//! assert_eq!(cart.len(), 2);
//! assert_eq!(cart.total(), Money::from_major(150_000));
//! ```

mod error;
mod line;
mod quantity;

pub use error::CartError;
pub use line::{CartLine, LineId};
pub use quantity::QuantityInput;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::order::{OrderContext, OrderPayload};
use crate::types::{MenuItem, Money};

/// Outcome of a quantity change on a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineUpdate {
    /// The line now has this quantity.
    Updated(u32),
    /// The quantity dropped to zero or below and the line was removed.
    Removed,
    /// No line with that ID exists; nothing changed.
    NotFound,
}

/// An in-progress order.
///
/// Owned by the screen that created it. Serializes as the plain list of
/// lines; deserializing re-checks the quantity and line ID invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add `quantity` of `item` with `note`.
    ///
    /// Merges into an existing line with the same item and trimmed note,
    /// otherwise appends a new line. A quantity of zero does nothing.
    ///
    /// Returns the ID of the line that received the quantity.
    pub fn add(&mut self, item: &MenuItem, quantity: u32, note: &str) -> Option<LineId> {
        if quantity == 0 {
            return None;
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.matches(item.id, note)) {
            line.quantity = line.quantity.saturating_add(quantity);
            debug!(line_id = %line.line_id, item_id = %item.id, quantity = line.quantity, "Merged into cart line");
            return Some(line.line_id);
        }

        let line = CartLine::new(item, quantity, note);
        let line_id = line.line_id;
        debug!(%line_id, item_id = %item.id, quantity, "Added cart line");
        self.lines.push(line);
        Some(line_id)
    }

    /// Change a line's quantity by `delta`, removing it at zero or below.
    pub fn update_quantity(&mut self, line_id: LineId, delta: i64) -> LineUpdate {
        let Some(line) = self.line(line_id) else {
            return LineUpdate::NotFound;
        };
        let next = i64::from(line.quantity).saturating_add(delta);
        self.apply_quantity(line_id, next)
    }

    /// Set a line's quantity to `value`, removing it at zero or below.
    pub fn set_quantity(&mut self, line_id: LineId, value: i64) -> LineUpdate {
        if self.line(line_id).is_none() {
            return LineUpdate::NotFound;
        }
        self.apply_quantity(line_id, value)
    }

    /// Apply the committed text of a quantity field.
    ///
    /// Call this when the field loses focus. Empty, non-numeric and
    /// non-positive text removes the line.
    pub fn commit_quantity_input(&mut self, line_id: LineId, text: &str) -> LineUpdate {
        match QuantityInput::parse(text).quantity() {
            Some(value) => self.set_quantity(line_id, i64::from(value)),
            None => self.set_quantity(line_id, 0),
        }
    }

    /// Replace a line's note.
    ///
    /// The line keeps its identity even if the new note now equals another
    /// line's note; only [`add`](Self::add) merges.
    ///
    /// Returns `false` if no such line exists.
    pub fn update_note(&mut self, line_id: LineId, text: &str) -> bool {
        match self.lines.iter_mut().find(|l| l.line_id == line_id) {
            Some(line) => {
                text.clone_into(&mut line.note);
                true
            }
            None => false,
        }
    }

    /// Remove a line, returning it if it existed.
    pub fn remove(&mut self, line_id: LineId) -> Option<CartLine> {
        let index = self.lines.iter().position(|l| l.line_id == line_id)?;
        debug!(%line_id, "Removed cart line");
        Some(self.lines.remove(index))
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of `unit_price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Build the request body for the order-creation endpoint.
    #[must_use]
    pub fn to_order_payload(&self, context: &OrderContext) -> OrderPayload {
        OrderPayload::from_cart(self, context)
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, line_id: LineId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.line_id == line_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Serialize the cart for storage between sessions.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Malformed` if serialization fails.
    pub fn to_json(&self) -> Result<String, CartError> {
        Ok(serde_json::to_string_pretty(&self.lines)?)
    }

    /// Restore a cart written by [`to_json`](Self::to_json).
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the JSON is malformed or a line breaks the
    /// cart invariants.
    pub fn from_json(json: &str) -> Result<Self, CartError> {
        let lines: Vec<CartLine> = serde_json::from_str(json)?;
        Self::try_from(lines)
    }

    fn apply_quantity(&mut self, line_id: LineId, value: i64) -> LineUpdate {
        if value <= 0 {
            self.remove(line_id);
            return LineUpdate::Removed;
        }

        let quantity = u32::try_from(value).unwrap_or(u32::MAX);
        match self.lines.iter_mut().find(|l| l.line_id == line_id) {
            Some(line) => {
                line.quantity = quantity;
                debug!(%line_id, quantity, "Updated cart line quantity");
                LineUpdate::Updated(quantity)
            }
            None => LineUpdate::NotFound,
        }
    }
}

impl TryFrom<Vec<CartLine>> for Cart {
    type Error = CartError;

    fn try_from(lines: Vec<CartLine>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(lines.len());
        for line in &lines {
            if line.quantity == 0 {
                return Err(CartError::ZeroQuantity(line.line_id));
            }
            if !seen.insert(line.line_id) {
                return Err(CartError::DuplicateLine(line.line_id));
            }
        }
        Ok(Self { lines })
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}
