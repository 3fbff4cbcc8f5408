//! Menu listing and filtering.

use std::fmt::Write as _;

use scan2order_core::{CategoryId, MenuItem};
use tracing::info;

use crate::client::ApiClient;
use crate::config::ClientConfig;

use super::CommandError;

/// Which menu items to show.
///
/// The default shows every orderable item in every category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuFilter {
    /// Case-insensitive substring of the item name.
    pub search: Option<String>,
    pub category: Option<CategoryId>,
    /// Also show items that cannot be ordered right now.
    pub include_unavailable: bool,
}

impl MenuFilter {
    #[must_use]
    pub fn matches(&self, item: &MenuItem) -> bool {
        if !self.include_unavailable && !item.is_orderable() {
            return false;
        }
        if self.category.is_some() && item.category_id != self.category {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => item
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            _ => true,
        }
    }

    /// Keep the items that match, in menu order.
    #[must_use]
    pub fn apply(&self, menu: Vec<MenuItem>) -> Vec<MenuItem> {
        menu.into_iter().filter(|item| self.matches(item)).collect()
    }
}

/// Render menu items, one per line, flagging those that cannot be ordered.
#[must_use]
pub fn render(menu: &[MenuItem]) -> String {
    let mut out = String::new();
    for item in menu {
        let _ = write!(out, "{:>4}  {}  {}", item.id.as_i32(), item.name, item.price);
        if !item.is_orderable() {
            out.push_str("  [unavailable]");
        }
        out.push('\n');
    }
    out
}

/// Print the tenant's menu, narrowed by `filter`.
///
/// # Errors
///
/// Returns an error if the menu service request fails.
pub async fn list(
    config: &ClientConfig,
    client: &ApiClient,
    filter: &MenuFilter,
) -> Result<(), CommandError> {
    let menu = client.menu(config.tenant_id).await?;
    info!(tenant_id = %config.tenant_id, items = menu.len(), "Fetched menu");

    let shown = filter.apply(menu);
    if shown.is_empty() {
        println!("No matching menu items");
    } else {
        print!("{}", render(&shown));
    }
    Ok(())
}
