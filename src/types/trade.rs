//! Trade record produced by a market order consuming a resting order.
//!
//! Trades are appended to the book's log in execution order and are
//! SSZ-serializable so that the log participates in the state root.

use ssz_rs::prelude::*;

use crate::types::Side;

/// One consumption of a resting (maker) order by a market (taker) order.
///
/// The trade always executes at the maker's price.
///
/// ## Example
///
/// ```
/// use limit_book::types::{Side, Trade};
///
/// let trade = Trade::new(1, Side::Buy, 101, 5, 4);
/// assert_eq!(trade.taker_side(), Side::Buy);
/// assert_eq!(trade.maker_order_id, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Trade {
    /// Trade sequence number (starts at 1)
    pub id: u64,

    /// Taker side as u8 (0=Buy, 1=Sell)
    pub taker_side_raw: u8,

    /// Execution price in ticks
    pub price: u64,

    /// Executed quantity
    pub quantity: u64,

    /// Resting order that supplied the liquidity
    pub maker_order_id: u64,
}

impl Trade {
    /// Create a new trade record
    pub fn new(id: u64, taker_side: Side, price: u64, quantity: u64, maker_order_id: u64) -> Self {
        Self {
            id,
            taker_side_raw: taker_side.to_u8(),
            price,
            quantity,
            maker_order_id,
        }
    }

    /// Side of the market order that triggered this trade
    pub fn taker_side(&self) -> Side {
        Side::from_u8(self.taker_side_raw).unwrap_or(Side::Buy)
    }

    /// `price * quantity` in tick units
    pub fn notional(&self) -> u128 {
        (self.price as u128) * (self.quantity as u128)
    }
}
