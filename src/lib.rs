//! # limit-book
//!
//! Single-instrument limit order book with price-time priority.
//!
//! ## Architecture
//!
//! - **Types**: Core data structures (Order, Trade, ExecutionReceipt)
//! - **OrderBook**: Slab-backed price levels with lazy best-price tracking
//! - **Engine**: Text commands, sequential application and script replay
//!
//! ## Rules
//!
//! 1. **Limit orders rest**: they never cross the opposite side, even at a
//!    marketable price
//! 2. **Market orders take**: best price first, oldest order first within a
//!    price, across as many levels as needed
//! 3. **Integer prices**: the book works in ticks; decimal prices exist only
//!    at the command and display edges
//! 4. **Atomic errors**: a rejected command leaves the book untouched
//!
//! ## Example
//!
//! ```
//! use limit_book::{OrderBook, Side};
//!
//! let mut book = OrderBook::new();
//! book.submit_limit(Side::Buy, 99, 7).unwrap();
//! book.submit_limit(Side::Buy, 100, 5).unwrap();
//!
//! assert_eq!(book.best_bid(), Some(100));
//! assert_eq!(book.volume_at_price(Side::Buy, 99), 7);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Book configuration: capacity and tick size
pub mod config;

/// Error type shared by every fallible operation
pub mod error;

/// Core data types: Order, Trade, ExecutionReceipt
pub mod types;

/// Order book: slab-based price levels and book sides
pub mod orderbook;

/// Command parsing and the sequential engine
pub mod engine;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::BookConfig;
pub use error::{BookError, Result};
pub use types::{ExecutionReceipt, Order, OrderStatus, Side, Trade};
pub use orderbook::{BookSide, BookSnapshot, OrderBook, PriceLevel};
pub use engine::{Command, CommandOutcome, MatchingEngine, ReplaySummary};
