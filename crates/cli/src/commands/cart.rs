//! Cart subcommands.
//!
//! Every command loads the stored cart, applies one operation and saves it
//! back.

use std::fmt::Write as _;
use std::str::FromStr;

use scan2order_core::{Cart, LineId, LineUpdate, MenuItemId, QuantityInput};
use tracing::{info, warn};

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::store::CartStore;

use super::CommandError;

/// A line as named on the command line: its 1-based position in
/// `s2o cart show`, or its full line ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRef {
    Position(usize),
    Id(LineId),
}

impl FromStr for LineRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(position) = s.trim().parse::<usize>() {
            return if position == 0 {
                Err("line positions start at 1".to_string())
            } else {
                Ok(Self::Position(position))
            };
        }
        s.parse::<LineId>()
            .map(Self::Id)
            .map_err(|_| format!("not a line position or line ID: {s}"))
    }
}

impl LineRef {
    /// Resolve against the cart's current lines.
    fn resolve(self, cart: &Cart) -> Result<LineId, CommandError> {
        let found = match self {
            Self::Position(position) => position
                .checked_sub(1)
                .and_then(|i| cart.lines().get(i))
                .map(|l| l.line_id()),
            Self::Id(id) => cart.line(id).map(|l| l.line_id()),
        };
        found.ok_or_else(|| CommandError::UnknownLine(self.to_string()))
    }
}

impl std::fmt::Display for LineRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Position(position) => write!(f, "#{position}"),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

/// Render the cart as a numbered table with its total.
#[must_use]
pub fn render(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Cart is empty\n".to_string();
    }

    let mut out = String::new();
    for (i, line) in cart.lines().iter().enumerate() {
        let _ = write!(
            out,
            "{:>2}. {}x {} @ {} = {}",
            i + 1,
            line.quantity(),
            line.name(),
            line.unit_price(),
            line.line_total()
        );
        if !line.note().trim().is_empty() {
            let _ = write!(out, " ({})", line.note().trim());
        }
        out.push('\n');
    }
    let _ = writeln!(out, "Items: {}  Total: {}", cart.item_count(), cart.total());
    out
}

/// Print the stored cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be loaded.
pub async fn show(store: &CartStore) -> Result<(), CommandError> {
    let cart = store.load().await?;
    print!("{}", render(&cart));
    Ok(())
}

/// Add a menu item, looked up on the tenant's current menu.
///
/// # Errors
///
/// Returns an error if the menu cannot be fetched, the item is unknown or
/// not orderable, or the cart cannot be saved.
pub async fn add(
    config: &ClientConfig,
    client: &ApiClient,
    store: &CartStore,
    item_id: MenuItemId,
    quantity: u32,
    note: &str,
) -> Result<(), CommandError> {
    let menu = client.menu(config.tenant_id).await?;
    let item = menu
        .into_iter()
        .find(|item| item.id == item_id)
        .ok_or(CommandError::UnknownMenuItem(item_id))?;
    if !item.is_orderable() {
        return Err(CommandError::Unavailable(item.name));
    }

    let mut cart = store.load().await?;
    match cart.add(&item, quantity, note) {
        Some(line_id) => info!(%line_id, item = %item.name, quantity, "Added to cart"),
        None => warn!(quantity, "Quantity must be positive, nothing added"),
    }
    store.save(&cart).await?;

    print!("{}", render(&cart));
    Ok(())
}

/// Change a line's quantity by a signed amount.
///
/// # Errors
///
/// Returns an error if the line does not exist or the cart cannot be saved.
pub async fn change(store: &CartStore, line: LineRef, delta: i64) -> Result<(), CommandError> {
    edit(store, line, |cart, line_id| cart.update_quantity(line_id, delta)).await
}

/// Set a line's quantity from raw text, as a quantity field would on commit.
///
/// # Errors
///
/// Returns an error if the line does not exist or the cart cannot be saved.
pub async fn set(store: &CartStore, line: LineRef, text: &str) -> Result<(), CommandError> {
    if !QuantityInput::parse(text).is_valid() {
        warn!(input = %text, "Quantity is not a positive number, removing line");
    }
    edit(store, line, |cart, line_id| cart.commit_quantity_input(line_id, text)).await
}

/// Replace a line's note.
///
/// # Errors
///
/// Returns an error if the line does not exist or the cart cannot be saved.
pub async fn note(store: &CartStore, line: LineRef, text: &str) -> Result<(), CommandError> {
    let mut cart = store.load().await?;
    let line_id = line.resolve(&cart)?;
    cart.update_note(line_id, text);
    store.save(&cart).await?;

    print!("{}", render(&cart));
    Ok(())
}

/// Remove a line.
///
/// # Errors
///
/// Returns an error if the line does not exist or the cart cannot be saved.
pub async fn remove(store: &CartStore, line: LineRef) -> Result<(), CommandError> {
    let mut cart = store.load().await?;
    let line_id = line.resolve(&cart)?;
    cart.remove(line_id);
    store.save(&cart).await?;

    print!("{}", render(&cart));
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub async fn clear(store: &CartStore) -> Result<(), CommandError> {
    let mut cart = store.load().await?;
    cart.clear();
    store.save(&cart).await?;
    info!("Cart cleared");
    Ok(())
}

async fn edit<F>(store: &CartStore, line: LineRef, op: F) -> Result<(), CommandError>
where
    F: FnOnce(&mut Cart, LineId) -> LineUpdate,
{
    let mut cart = store.load().await?;
    let line_id = line.resolve(&cart)?;
    match op(&mut cart, line_id) {
        LineUpdate::Updated(quantity) => info!(%line_id, quantity, "Quantity updated"),
        LineUpdate::Removed => info!(%line_id, "Line removed"),
        LineUpdate::NotFound => return Err(CommandError::UnknownLine(line.to_string())),
    }
    store.save(&cart).await?;

    print!("{}", render(&cart));
    Ok(())
}
