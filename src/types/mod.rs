//! Core data types for the limit book
//!
//! ## Types
//!
//! - [`Order`]: A resting limit order
//! - [`Side`]: Buy or Sell
//! - [`OrderStatus`]: Resting, PartiallyFilled, Filled or Cancelled
//! - [`Trade`]: One maker consumption by a market order
//! - [`ExecutionReceipt`]: Summary of one market order
//!
//! Prices are integer ticks; see [`price`] for decimal conversion.

mod order;
mod trade;
mod receipt;
pub mod price;

pub use order::{Order, OrderStatus, Side};
pub use trade::Trade;
pub use receipt::ExecutionReceipt;
