//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `S2O_ORDER_SERVICE_URL` - Base URL of the order service (e.g., http://localhost:7003)
//! - `S2O_MENU_SERVICE_URL` - Base URL of the menu service (e.g., http://localhost:7002)
//! - `S2O_TENANT_ID` - Restaurant the orders are routed to
//! - `S2O_TABLE_NAME` - Table label printed on the kitchen ticket
//!
//! ## Optional
//! - `S2O_TABLE_ID` - Numeric table ID
//! - `S2O_DEVICE_TOKEN` - Push token for order notifications and history
//! - `S2O_CART_PATH` - Where the cart is kept between runs (default: .s2o-cart.json)
//! - `S2O_HTTP_TIMEOUT_SECS` - HTTP request timeout (default: 10)

use std::path::PathBuf;
use std::time::Duration;

use scan2order_core::{OrderContext, TableId, TenantId};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const DEFAULT_CART_PATH: &str = ".s2o-cart.json";
const DEFAULT_HTTP_TIMEOUT_SECS: &str = "10";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Ordering client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Order service base URL
    pub order_service_url: Url,
    /// Menu service base URL
    pub menu_service_url: Url,
    /// Restaurant the orders belong to
    pub tenant_id: TenantId,
    /// Table label sent with each order
    pub table_name: String,
    /// Numeric table ID, if the QR code carried one
    pub table_id: Option<TableId>,
    /// Push token of this device (kept out of logs)
    pub device_token: Option<SecretString>,
    /// Cart file location
    pub cart_path: PathBuf,
    /// Per-request HTTP timeout
    pub http_timeout: Duration,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let order_service_url = env.required_url("S2O_ORDER_SERVICE_URL")?;
        let menu_service_url = env.required_url("S2O_MENU_SERVICE_URL")?;
        let tenant_id = env
            .required("S2O_TENANT_ID")?
            .parse::<TenantId>()
            .map_err(|e| ConfigError::InvalidEnvVar("S2O_TENANT_ID".to_string(), e.to_string()))?;
        if tenant_id.as_i32() <= 0 {
            return Err(ConfigError::InvalidEnvVar(
                "S2O_TENANT_ID".to_string(),
                "must be a positive integer".to_string(),
            ));
        }
        let table_name = env.required("S2O_TABLE_NAME")?;
        let table_id = env
            .optional("S2O_TABLE_ID")
            .map(|raw| raw.parse::<TableId>())
            .transpose()
            .map_err(|e| ConfigError::InvalidEnvVar("S2O_TABLE_ID".to_string(), e.to_string()))?;
        let device_token = env.optional("S2O_DEVICE_TOKEN").map(SecretString::from);
        let cart_path = PathBuf::from(env.or_default("S2O_CART_PATH", DEFAULT_CART_PATH));
        let http_timeout = env
            .or_default("S2O_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| {
                ConfigError::InvalidEnvVar("S2O_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            order_service_url,
            menu_service_url,
            tenant_id,
            table_name,
            table_id,
            device_token,
            cart_path,
            http_timeout,
        })
    }

    /// Routing context attached to every order this client submits.
    #[must_use]
    pub fn order_context(&self) -> OrderContext {
        let mut context = OrderContext::new(self.tenant_id, self.table_name.clone());
        if let Some(table_id) = self.table_id {
            context = context.with_table_id(table_id);
        }
        if let Some(token) = &self.device_token {
            context = context.with_device_token(token.expose_secret());
        }
        context
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get a variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    fn required_url(&self, key: &str) -> Result<Url, ConfigError> {
        Url::parse(&self.required(key)?)
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn base_vars() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("S2O_ORDER_SERVICE_URL", "http://localhost:7003"),
            ("S2O_MENU_SERVICE_URL", "http://localhost:7002"),
            ("S2O_TENANT_ID", "4"),
            ("S2O_TABLE_NAME", "Bàn 5"),
        ])
    }

    fn load(vars: &HashMap<&'static str, &'static str>) -> Result<ClientConfig, ConfigError> {
        ClientConfig::from_lookup(|key| vars.get(key).map(ToString::to_string))
    }

    #[test]
    fn test_defaults() {
        let config = load(&base_vars()).unwrap();

        assert_eq!(config.tenant_id, TenantId::new(4));
        assert_eq!(config.table_name, "Bàn 5");
        assert_eq!(config.table_id, None);
        assert!(config.device_token.is_none());
        assert_eq!(config.cart_path, PathBuf::from(".s2o-cart.json"));
        assert_eq!(config.http_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_missing_required() {
        let mut vars = base_vars();
        vars.remove("S2O_TABLE_NAME");

        assert!(matches!(
            load(&vars),
            Err(ConfigError::MissingEnvVar(key)) if key == "S2O_TABLE_NAME"
        ));
    }

    #[test]
    fn test_blank_is_missing() {
        let mut vars = base_vars();
        vars.insert("S2O_TENANT_ID", "  ");

        assert!(matches!(load(&vars), Err(ConfigError::MissingEnvVar(_))));
    }

    #[test]
    fn test_invalid_values() {
        let mut vars = base_vars();
        vars.insert("S2O_TENANT_ID", "0");
        assert!(matches!(load(&vars), Err(ConfigError::InvalidEnvVar(_, _))));

        let mut vars = base_vars();
        vars.insert("S2O_ORDER_SERVICE_URL", "not a url");
        assert!(matches!(load(&vars), Err(ConfigError::InvalidEnvVar(_, _))));

        let mut vars = base_vars();
        vars.insert("S2O_TABLE_ID", "five");
        assert!(matches!(load(&vars), Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_order_context() {
        let mut vars = base_vars();
        vars.insert("S2O_TABLE_ID", "5");
        vars.insert("S2O_DEVICE_TOKEN", "fcm-token");
        let context = load(&vars).unwrap().order_context();

        assert_eq!(context.tenant_id, TenantId::new(4));
        assert_eq!(context.table_id, Some(TableId::new(5)));
        assert_eq!(context.device_token.as_deref(), Some("fcm-token"));
    }
}
