//! Cart persistence between CLI invocations.
//!
//! Each `s2o` run is one session boundary: the cart is loaded from disk at
//! the start and written back at the end.

use std::path::{Path, PathBuf};

use scan2order_core::{Cart, CartError};
use thiserror::Error;
use tracing::debug;

/// Cart file errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Cart file I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Stored cart is invalid: {0}")]
    Cart(#[from] CartError),
}

/// A cart stored as JSON in a single file.
#[derive(Debug, Clone)]
pub struct CartStore {
    path: PathBuf,
}

impl CartStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored cart, or an empty one if nothing is stored yet.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file cannot be read or is not a valid cart.
    pub async fn load(&self) -> Result<Cart, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => {
                let cart = Cart::from_json(&json)?;
                debug!(path = %self.path.display(), lines = cart.len(), "Loaded cart");
                Ok(cart)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Cart::new()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    /// Write the cart, replacing what was stored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file cannot be written.
    pub async fn save(&self, cart: &Cart) -> Result<(), StoreError> {
        let json = cart.to_json()?;

        // Write next to the target and rename so a crash never leaves half a cart
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_error(e))?;

        debug!(path = %self.path.display(), lines = cart.len(), "Saved cart");
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
