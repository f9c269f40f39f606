//! Book commands and their line-oriented text form.
//!
//! ```text
//! limit  <buy|sell|bid|ask> <price> <qty>
//! cancel <order_id>
//! market <buy|sell|bid|ask> <qty>
//! ```
//!
//! Keywords are case-insensitive. Prices are decimal strings and must be a
//! whole number of ticks for the configured tick size.

use rust_decimal::Decimal;

use crate::error::{BookError, Result};
use crate::types::{price, Side};

/// One instruction for the book. Prices are in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Rest a limit order
    Limit { side: Side, price: u64, quantity: u64 },

    /// Cancel a resting order
    Cancel { order_id: u64 },

    /// Execute a market order against the opposite side
    Market { side: Side, quantity: u64 },
}

impl Command {
    /// Parse one command line.
    ///
    /// Only the shape of the line is checked here; value rules (positive
    /// price and quantity) are enforced by the book.
    ///
    /// # Errors
    ///
    /// `InvalidCommand` for an unknown kind, a missing or extra field, or a
    /// field that does not parse.
    ///
    /// # Example
    ///
    /// ```
    /// use limit_book::engine::Command;
    /// use limit_book::types::Side;
    /// use rust_decimal::Decimal;
    ///
    /// let cmd = Command::parse("limit bid 99.5 10", Decimal::new(1, 1)).unwrap();
    /// assert_eq!(
    ///     cmd,
    ///     Command::Limit {
    ///         side: Side::Buy,
    ///         price: 995,
    ///         quantity: 10,
    ///     }
    /// );
    /// ```
    pub fn parse(line: &str, tick_size: Decimal) -> Result<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let Some((kind, args)) = fields.split_first() else {
            return Err(BookError::invalid("empty command"));
        };

        match (kind.to_ascii_lowercase().as_str(), args) {
            ("limit", [side, px, qty]) => Ok(Command::Limit {
                side: side.parse()?,
                price: parse_price(px, tick_size)?,
                quantity: parse_u64("quantity", qty)?,
            }),
            ("cancel", [id]) => Ok(Command::Cancel {
                order_id: parse_u64("order id", id)?,
            }),
            ("market", [side, qty]) => Ok(Command::Market {
                side: side.parse()?,
                quantity: parse_u64("quantity", qty)?,
            }),
            ("limit", _) => Err(BookError::invalid("usage: limit <side> <price> <qty>")),
            ("cancel", _) => Err(BookError::invalid("usage: cancel <order_id>")),
            ("market", _) => Err(BookError::invalid("usage: market <side> <qty>")),
            (other, _) => Err(BookError::invalid(format!("unknown command '{other}'"))),
        }
    }

    /// Render back to the text form.
    ///
    /// A limit price too large to write in decimal units comes out as
    /// `<n> ticks` and fails to parse back.
    pub fn to_line(&self, tick_size: Decimal) -> String {
        match *self {
            Command::Limit { side, price: px, quantity } => {
                format!("limit {side} {} {quantity}", price::format_ticks(px, tick_size))
            }
            Command::Cancel { order_id } => format!("cancel {order_id}"),
            Command::Market { side, quantity } => format!("market {side} {quantity}"),
        }
    }
}

fn parse_price(field: &str, tick_size: Decimal) -> Result<u64> {
    price::parse_ticks(field, tick_size).ok_or_else(|| {
        BookError::invalid(format!(
            "price '{field}' is not a non-negative multiple of tick size {tick_size}"
        ))
    })
}

fn parse_u64(what: &str, field: &str) -> Result<u64> {
    field
        .parse()
        .map_err(|_| BookError::invalid(format!("{what} '{field}' is not an unsigned integer")))
}
