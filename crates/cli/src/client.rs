//! HTTP client for the menu and order services.
//!
//! # Example
//!
//! ```rust,ignore
//! let client = ApiClient::new(&config)?;
//!
//! let menu = client.menu(config.tenant_id).await?;
//! let placed = client.create_order(&payload).await?;
//! ```

use std::sync::Arc;

use scan2order_core::{MenuItem, OrderPayload, PlacedOrder, TenantId};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::ClientConfig;

/// Errors from the backend services.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Could not build the request URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Client for the Scan2Order backend.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    menu_base: Url,
    order_base: Url,
}

impl ApiClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                menu_base: config.menu_service_url.clone(),
                order_base: config.order_service_url.clone(),
            }),
        })
    }

    /// Fetch a restaurant's menu.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the body is not a menu.
    #[instrument(skip(self))]
    pub async fn menu(&self, tenant_id: TenantId) -> Result<Vec<MenuItem>, ApiError> {
        let mut url = endpoint(&self.inner.menu_base, &["api", "menu"])?;
        url.query_pairs_mut()
            .append_pair("tenantId", &tenant_id.to_string());

        let response = self.inner.client.get(url).send().await?;
        read_json(response).await
    }

    /// Submit an order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the order is rejected.
    #[instrument(skip(self, payload), fields(items = payload.items.len(), tenant_id = %payload.tenant_id))]
    pub async fn create_order(&self, payload: &OrderPayload) -> Result<PlacedOrder, ApiError> {
        let url = endpoint(&self.inner.order_base, &["api", "orders"])?;

        let response = self.inner.client.post(url).json(payload).send().await?;
        read_json(response).await
    }

    /// List all orders of a restaurant.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn orders(&self, tenant_id: TenantId) -> Result<Vec<PlacedOrder>, ApiError> {
        let mut url = endpoint(&self.inner.order_base, &["api", "orders"])?;
        url.query_pairs_mut()
            .append_pair("tenantId", &tenant_id.to_string());

        let response = self
            .inner
            .client
            .get(url)
            .header("Cache-Control", "no-cache")
            .send()
            .await?;
        read_json(response).await
    }

    /// List the orders placed from one device.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip_all)]
    pub async fn order_history(&self, device_token: &str) -> Result<Vec<PlacedOrder>, ApiError> {
        let mut url = endpoint(&self.inner.order_base, &["api", "orders", "my-orders"])?;
        url.query_pairs_mut().append_pair("deviceToken", device_token);

        let response = self.inner.client.get(url).send().await?;
        read_json(response).await
    }
}

/// Append `segments` to the base URL, keeping any path prefix it carries
/// (e.g. a gateway route such as `/order-service`).
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Check the status and decode the body, keeping the raw text for errors.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        tracing::error!(
            status = %status,
            body = %text.chars().take(500).collect::<String>(),
            "Service returned non-success status"
        );
        return Err(ApiError::Status {
            status: status.as_u16(),
            body: text.chars().take(200).collect(),
        });
    }

    serde_json::from_str(&text).map_err(|e| {
        debug!(error = %e, body = %text.chars().take(500).collect::<String>(), "Failed to parse response");
        ApiError::Parse(e)
    })
}
