//! Errors raised when restoring a persisted cart.

use thiserror::Error;

use super::LineId;

/// A cart snapshot could not be restored.
///
/// Cart mutations themselves never fail; only snapshots read back from
/// storage are checked.
#[derive(Debug, Error)]
pub enum CartError {
    /// The snapshot is not valid JSON or has the wrong shape.
    #[error("Malformed cart snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A line was stored with quantity zero.
    #[error("Cart line {0} has zero quantity")]
    ZeroQuantity(LineId),

    /// Two lines share the same line ID.
    #[error("Duplicate cart line {0}")]
    DuplicateLine(LineId),
}
