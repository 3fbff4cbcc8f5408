//! Integration tests for Scan2Order.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p scan2order-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Cart behaviour through the public API
//! - `order_flow` - Menu lookup and order submission against a mock backend
//!
//! The helpers below build a client configuration that points both the
//! menu and order service at one mock server.

use std::path::Path;
use std::time::Duration;

use scan2order_cli::ClientConfig;
use scan2order_core::TenantId;
use url::Url;

/// Configuration for a client talking to `server_uri`, storing its cart
/// under `dir`.
///
/// # Panics
///
/// Panics if `server_uri` is not a valid URL.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn test_config(server_uri: &str, dir: &Path) -> ClientConfig {
    let url = Url::parse(server_uri).unwrap();
    ClientConfig {
        order_service_url: url.clone(),
        menu_service_url: url,
        tenant_id: TenantId::new(4),
        table_name: "Bàn 5".to_string(),
        table_id: None,
        device_token: None,
        cart_path: dir.join("cart.json"),
        http_timeout: Duration::from_secs(5),
    }
}
