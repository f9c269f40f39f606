//! Error taxonomy for the order book.
//!
//! Every mutating operation checks its preconditions before touching any
//! structure, so an `Err` always means the book is exactly as it was before
//! the call.

use thiserror::Error;

use crate::types::Side;

/// Errors returned by [`OrderBook`](crate::orderbook::OrderBook) and the
/// command layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    /// Cancel of an id that never existed or already reached a terminal state
    #[error("order {order_id} not found")]
    OrderNotFound { order_id: u64 },

    /// Market order arrived while the opposing side had no resting volume
    #[error("no resting {side} liquidity")]
    EmptyBook { side: Side },

    /// Non-positive price or quantity, malformed or unrecognized command
    #[error("invalid command: {reason}")]
    InvalidCommand { reason: String },

    /// State root encoding failed
    #[error("state encoding failed: {0}")]
    Encoding(String),
}

impl BookError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        BookError::InvalidCommand {
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BookError>;
