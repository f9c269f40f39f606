//! Diagnostic view of the book.
//!
//! A snapshot copies the aggregated ladder and the trade log out of the book
//! at call time. It is for inspection and printing only; nothing reads it
//! back into the book.

use std::fmt;

use rust_decimal::Decimal;

use crate::types::{price, Side, Trade};

/// Aggregated state of one price level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSummary {
    pub price: u64,
    pub volume: u64,
    pub order_count: usize,
}

/// Point-in-time copy of both ladders and the trade log.
///
/// `bids` and `asks` are ordered best price first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSnapshot {
    pub bids: Vec<LevelSummary>,
    pub asks: Vec<LevelSummary>,
    pub trades: Vec<Trade>,
    /// Used only to render prices
    pub tick_size: Decimal,
}

impl BookSnapshot {
    /// Levels for one side, best first
    pub fn levels(&self, side: Side) -> &[LevelSummary] {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    /// `(price, volume)` pairs for one side, best first
    pub fn depth(&self, side: Side) -> Vec<(u64, u64)> {
        self.levels(side)
            .iter()
            .map(|level| (level.price, level.volume))
            .collect()
    }

    /// Sum of level volumes on one side, saturating at `u64::MAX`
    pub fn total_volume(&self, side: Side) -> u64 {
        self.levels(side)
            .iter()
            .fold(0u64, |acc, level| acc.saturating_add(level.volume))
    }
}

impl fmt::Display for BookSnapshot {
    /// Renders a price ladder with asks on top (highest first) and bids below,
    /// followed by the trade log.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let px = |ticks: u64| price::format_ticks(ticks, self.tick_size);

        writeln!(f, "asks:")?;
        for level in self.asks.iter().rev() {
            write_level(f, level, px(level.price))?;
        }
        writeln!(f, "bids:")?;
        for level in &self.bids {
            write_level(f, level, px(level.price))?;
        }
        writeln!(f, "trades:")?;
        for trade in &self.trades {
            writeln!(
                f,
                "  #{} {} {} @ {} (maker {})",
                trade.id,
                trade.taker_side(),
                trade.quantity,
                px(trade.price),
                trade.maker_order_id
            )?;
        }
        Ok(())
    }
}

fn write_level(f: &mut fmt::Formatter<'_>, level: &LevelSummary, price: String) -> fmt::Result {
    writeln!(f, "  {:>12} x {:<10} ({} orders)", price, level.volume, level.order_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BookSnapshot {
        BookSnapshot {
            bids: vec![LevelSummary {
                price: 99,
                volume: 5,
                order_count: 1,
            }],
            asks: vec![
                LevelSummary {
                    price: 101,
                    volume: 5,
                    order_count: 1,
                },
                LevelSummary {
                    price: 102,
                    volume: 9,
                    order_count: 2,
                },
            ],
            trades: vec![Trade::new(1, Side::Buy, 101, 2, 1)],
            tick_size: Decimal::ONE,
        }
    }

    #[test]
    fn test_depth_and_totals() {
        let snapshot = sample();

        assert_eq!(snapshot.depth(Side::Sell), vec![(101, 5), (102, 9)]);
        assert_eq!(snapshot.depth(Side::Buy), vec![(99, 5)]);
        assert_eq!(snapshot.total_volume(Side::Sell), 14);
    }

    #[test]
    fn test_display_ladder_order() {
        let text = sample().to_string();

        let ask_102 = text.find("102").unwrap();
        let ask_101 = text.find("101 x").unwrap();
        let bid_99 = text.find("99 x").unwrap();
        assert!(ask_102 < ask_101 && ask_101 < bid_99);
        assert!(text.contains("#1 buy 2 @ 101 (maker 1)"));
    }

    #[test]
    fn test_display_uses_tick_size() {
        let mut snapshot = sample();
        snapshot.tick_size = Decimal::new(1, 2);

        assert!(snapshot.to_string().contains("0.99 x"));
    }

    #[test]
    fn test_display_out_of_range_price() {
        let mut snapshot = sample();
        snapshot.tick_size = Decimal::from(1_000_000_000_000_000u64);
        snapshot.asks[0].price = 1_000_000_000_000_000;

        let text = snapshot.to_string();
        assert!(text.contains("1000000000000000 ticks x 5"));
        assert!(text.contains("99000000000000000 x 5"));
    }
}
