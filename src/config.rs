//! Book configuration.
//!
//! `order_capacity` pre-sizes the order slab and the id index so that a warm
//! book never reallocates on the hot path. `tick_size` is the decimal value of
//! one integer price tick; it is only used at the edges (command parsing and
//! snapshot rendering), the book itself works purely in ticks.

use rust_decimal::Decimal;

use crate::error::{BookError, Result};

/// Default number of pre-allocated order slots
pub const DEFAULT_ORDER_CAPACITY: usize = 1024;

/// Configuration for an [`OrderBook`](crate::orderbook::OrderBook).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookConfig {
    /// Number of order slots to pre-allocate
    pub order_capacity: usize,

    /// Decimal value of one price tick (always positive)
    pub tick_size: Decimal,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            order_capacity: DEFAULT_ORDER_CAPACITY,
            tick_size: Decimal::ONE,
        }
    }
}

impl BookConfig {
    /// Create a validated configuration.
    ///
    /// # Errors
    ///
    /// `InvalidCommand` if `tick_size` is zero or negative.
    ///
    /// # Example
    ///
    /// ```
    /// use limit_book::BookConfig;
    /// use rust_decimal::Decimal;
    ///
    /// let config = BookConfig::new(10_000, Decimal::new(1, 2)).unwrap();
    /// assert_eq!(config.tick_size.to_string(), "0.01");
    /// ```
    pub fn new(order_capacity: usize, tick_size: Decimal) -> Result<Self> {
        Self::default()
            .with_order_capacity(order_capacity)
            .with_tick_size(tick_size)
    }

    /// Override the pre-allocated order capacity
    pub fn with_order_capacity(mut self, order_capacity: usize) -> Self {
        self.order_capacity = order_capacity;
        self
    }

    /// Override the tick size.
    ///
    /// # Errors
    ///
    /// `InvalidCommand` if `tick_size` is not strictly positive.
    pub fn with_tick_size(mut self, tick_size: Decimal) -> Result<Self> {
        if tick_size <= Decimal::ZERO {
            return Err(BookError::invalid(format!(
                "tick size must be positive, got {tick_size}"
            )));
        }
        self.tick_size = tick_size;
        Ok(self)
    }
}
