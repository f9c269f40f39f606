//! Order types for the limit book.
//!
//! ## SSZ Serialization
//!
//! `Order` derives `SimpleSerialize` from ssz_rs so that the book state can be
//! hashed deterministically. Enums are stored as raw `u8` fields for SSZ
//! compatibility and exposed through typed accessors.
//!
//! ## Prices
//!
//! Prices are integer ticks (`u64`). Converting to human-readable decimals is
//! the job of [`crate::types::price`].

use std::fmt;
use std::str::FromStr;

use ssz_rs::prelude::*;

use crate::error::BookError;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
///
/// Represented as u8 for SSZ compatibility:
/// - Buy = 0
/// - Sell = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Buy order (bid)
    #[default]
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Side::Buy),
            1 => Some(Side::Sell),
            _ => None,
        }
    }

    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("buy"),
            Side::Sell => f.write_str("sell"),
        }
    }
}

impl FromStr for Side {
    type Err = BookError;

    /// Accepts `buy`/`bid` and `sell`/`ask`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "buy" | "bid" => Ok(Side::Buy),
            "sell" | "ask" => Ok(Side::Sell),
            other => Err(BookError::invalid(format!("unknown side '{other}'"))),
        }
    }
}

// ============================================================================
// OrderStatus enum
// ============================================================================

/// Lifecycle state of an order.
///
/// ```text
/// Resting -> PartiallyFilled -> Filled
///    \             \
///     +-------------+---------> Cancelled
/// ```
///
/// `Filled` and `Cancelled` are terminal: the order has left the book and its
/// id no longer resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    #[default]
    Resting,
    PartiallyFilled,
    Filled,
    Cancelled,
}

impl OrderStatus {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            OrderStatus::Resting => 0,
            OrderStatus::PartiallyFilled => 1,
            OrderStatus::Filled => 2,
            OrderStatus::Cancelled => 3,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(OrderStatus::Resting),
            1 => Some(OrderStatus::PartiallyFilled),
            2 => Some(OrderStatus::Filled),
            3 => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    /// True for `Filled` and `Cancelled`
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Filled | OrderStatus::Cancelled)
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A resting limit order.
///
/// ## SSZ Layout
///
/// Fixed-size container of 42 bytes:
/// `id(8) + side_raw(1) + price(8) + quantity(8) + remaining(8) + sequence(8) + status_raw(1)`
///
/// ## Example
///
/// ```
/// use limit_book::types::{Order, OrderStatus, Side};
///
/// let order = Order::new(1, Side::Buy, 99, 5, 1);
/// assert_eq!(order.side(), Side::Buy);
/// assert_eq!(order.remaining, 5);
/// assert_eq!(order.status(), OrderStatus::Resting);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Order {
    /// Unique order identifier (assigned by the book, starts at 1)
    pub id: u64,

    /// Order side as u8 (0=Buy, 1=Sell)
    pub side_raw: u8,

    /// Limit price in ticks
    pub price: u64,

    /// Quantity at submission
    pub quantity: u64,

    /// Quantity still resting; decremented as the order is matched
    pub remaining: u64,

    /// Arrival sequence; lower matches first within a price
    pub sequence: u64,

    /// Lifecycle state as u8
    pub status_raw: u8,
}

impl Order {
    /// Create a new resting order
    pub fn new(id: u64, side: Side, price: u64, quantity: u64, sequence: u64) -> Self {
        Self {
            id,
            side_raw: side.to_u8(),
            price,
            quantity,
            remaining: quantity,
            sequence,
            status_raw: OrderStatus::Resting.to_u8(),
        }
    }

    /// Get the order side
    pub fn side(&self) -> Side {
        Side::from_u8(self.side_raw).unwrap_or(Side::Buy)
    }

    /// Get the lifecycle state
    pub fn status(&self) -> OrderStatus {
        OrderStatus::from_u8(self.status_raw).unwrap_or(OrderStatus::Resting)
    }

    /// Set the lifecycle state
    pub fn set_status(&mut self, status: OrderStatus) {
        self.status_raw = status.to_u8();
    }

    /// Check if the order is fully filled
    pub fn is_filled(&self) -> bool {
        self.remaining == 0
    }

    /// Get the filled quantity
    pub fn filled_quantity(&self) -> u64 {
        self.quantity.saturating_sub(self.remaining)
    }

    /// Fill up to `fill_qty` and advance the status accordingly.
    ///
    /// # Returns
    ///
    /// The quantity actually filled (capped at `remaining`)
    pub fn fill(&mut self, fill_qty: u64) -> u64 {
        let actual_fill = fill_qty.min(self.remaining);
        self.remaining -= actual_fill;
        if actual_fill > 0 {
            let status = if self.remaining == 0 {
                OrderStatus::Filled
            } else {
                OrderStatus::PartiallyFilled
            };
            self.set_status(status);
        }
        actual_fill
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_conversion() {
        assert_eq!(Side::Buy.to_u8(), 0);
        assert_eq!(Side::Sell.to_u8(), 1);
        assert_eq!(Side::from_u8(0), Some(Side::Buy));
        assert_eq!(Side::from_u8(1), Some(Side::Sell));
        assert_eq!(Side::from_u8(2), None);
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn test_side_parse() {
        assert_eq!("buy".parse::<Side>(), Ok(Side::Buy));
        assert_eq!("BID".parse::<Side>(), Ok(Side::Buy));
        assert_eq!("Sell".parse::<Side>(), Ok(Side::Sell));
        assert_eq!("ask".parse::<Side>(), Ok(Side::Sell));
        assert!("hold".parse::<Side>().is_err());
    }

    #[test]
    fn test_status_terminal() {
        assert!(!OrderStatus::Resting.is_terminal());
        assert!(!OrderStatus::PartiallyFilled.is_terminal());
        assert!(OrderStatus::Filled.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert_eq!(OrderStatus::from_u8(4), None);
    }

    #[test]
    fn test_order_new() {
        let order = Order::new(7, Side::Sell, 101, 5, 3);

        assert_eq!(order.id, 7);
        assert_eq!(order.side(), Side::Sell);
        assert_eq!(order.price, 101);
        assert_eq!(order.quantity, 5);
        assert_eq!(order.remaining, 5);
        assert_eq!(order.sequence, 3);
        assert_eq!(order.status(), OrderStatus::Resting);
        assert!(!order.is_filled());
    }

    #[test]
    fn test_order_fill_transitions() {
        let mut order = Order::new(1, Side::Buy, 99, 10, 1);

        assert_eq!(order.fill(4), 4);
        assert_eq!(order.remaining, 6);
        assert_eq!(order.filled_quantity(), 4);
        assert_eq!(order.status(), OrderStatus::PartiallyFilled);

        assert_eq!(order.fill(6), 6);
        assert!(order.is_filled());
        assert_eq!(order.status(), OrderStatus::Filled);
    }

    #[test]
    fn test_order_overfill() {
        let mut order = Order::new(1, Side::Buy, 99, 10, 1);

        assert_eq!(order.fill(25), 10);
        assert_eq!(order.remaining, 0);
        assert_eq!(order.status(), OrderStatus::Filled);
    }

    #[test]
    fn test_order_ssz_roundtrip() {
        let mut order = Order::new(1, Side::Sell, 101, 5, 1);
        order.fill(2);

        let serialized = ssz_rs::serialize(&order).expect("Failed to serialize");
        let deserialized: Order = ssz_rs::deserialize(&serialized).expect("Failed to deserialize");

        assert_eq!(order, deserialized);
        assert_eq!(serialized.len(), 42, "Order should serialize to 42 bytes");
    }
}
