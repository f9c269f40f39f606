//! Execution receipt for a market order.
//!
//! A receipt summarizes what a single `execute_market` call did: what was
//! asked for, what was filled and the trades produced, in execution order.
//! A receipt with `filled_quantity < requested_quantity` is a legitimate
//! partial result (the opposing side ran dry), not an error.

use rust_decimal::Decimal;

use crate::types::{Side, Trade};

/// Result of one market order.
///
/// ## Example
///
/// ```
/// use limit_book::types::{ExecutionReceipt, Side};
///
/// let receipt = ExecutionReceipt::new(Side::Buy, 10);
/// assert_eq!(receipt.unfilled_quantity(), 10);
/// assert!(!receipt.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionReceipt {
    /// Side of the market order (the taker)
    pub taker_side: Side,

    /// Quantity the caller asked for
    pub requested_quantity: u64,

    /// Quantity actually executed
    pub filled_quantity: u64,

    /// One trade per maker consumption
    pub trades: Vec<Trade>,
}

impl ExecutionReceipt {
    /// Create an empty receipt
    pub fn new(taker_side: Side, requested_quantity: u64) -> Self {
        Self {
            taker_side,
            requested_quantity,
            filled_quantity: 0,
            trades: Vec::new(),
        }
    }

    /// Record a trade and add its quantity to the filled total
    pub(crate) fn record(&mut self, trade: Trade) {
        self.filled_quantity += trade.quantity;
        self.trades.push(trade);
    }

    /// True when the whole requested quantity was executed
    pub fn is_complete(&self) -> bool {
        self.filled_quantity == self.requested_quantity
    }

    /// Quantity that could not be executed
    pub fn unfilled_quantity(&self) -> u64 {
        self.requested_quantity - self.filled_quantity
    }

    /// Sum of `price * quantity` over all trades, in ticks
    pub fn notional(&self) -> u128 {
        self.trades.iter().map(Trade::notional).sum()
    }

    /// Volume-weighted average execution price in decimal units.
    ///
    /// Returns `None` when nothing was filled, or when the notional or the
    /// resulting price does not fit in a `Decimal`.
    pub fn average_price(&self, tick_size: Decimal) -> Option<Decimal> {
        if self.filled_quantity == 0 {
            return None;
        }
        let notional = i128::try_from(self.notional()).ok()?;
        let notional = Decimal::try_from_i128_with_scale(notional, 0).ok()?;
        let average_ticks = notional.checked_div(Decimal::from(self.filled_quantity))?;
        average_ticks.checked_mul(tick_size)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
