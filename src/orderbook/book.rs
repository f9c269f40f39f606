//! Limit order book for a single instrument.
//!
//! ## Architecture
//!
//! - **Slab**: arena owning every resting order, O(1) insert/remove/lookup
//! - **BookSide** x2: price levels per side with a lazily reconciled
//!   best-price heap
//! - **HashMap**: order id -> (side, price, slab key) for O(1) cancel
//! - **Vec<Trade>**: append-only trade log
//!
//! ## Operations
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Submit limit at an existing price | O(1) |
//! | Submit limit at a new price | O(log n) |
//! | Cancel by id | O(1) amortized |
//! | Best bid/ask | O(log n) amortized |
//! | Market order touching k levels | O(k log n) |
//!
//! Limit orders never cross the opposite side: they only add resting
//! liquidity. Market orders are the only source of trades.
//!
//! Every operation validates its preconditions before mutating anything, so a
//! returned error leaves the book unchanged. Mutations take `&mut self`; a
//! book shared between threads must be driven by a single writer.
//!
//! ## Example
//!
//! ```
//! use limit_book::orderbook::OrderBook;
//! use limit_book::types::Side;
//!
//! let mut book = OrderBook::new();
//!
//! let ask = book.submit_limit(Side::Sell, 101, 5).unwrap();
//! book.submit_limit(Side::Buy, 99, 4).unwrap();
//!
//! assert_eq!(book.best_ask(), Some(101));
//! assert_eq!(book.best_bid(), Some(99));
//!
//! let receipt = book.execute_market(Side::Buy, 3).unwrap();
//! assert_eq!(receipt.filled_quantity, 3);
//! assert_eq!(receipt.trades[0].maker_order_id, ask);
//! assert_eq!(book.volume_at_price(Side::Sell, 101), 2);
//! ```

use std::collections::HashMap;

use sha2::{Digest, Sha256};
use slab::Slab;
use tracing::{debug, trace};

use crate::config::BookConfig;
use crate::error::{BookError, Result};
use crate::orderbook::{BookSide, BookSnapshot, LevelSummary, OrderNode};
use crate::types::{ExecutionReceipt, Order, OrderStatus, Side, Trade};

/// Where a live order sits in the book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    pub side: Side,
    pub price: u64,
    key: usize,
}

/// Single-instrument limit order book.
#[derive(Debug)]
pub struct OrderBook {
    /// Arena of resting orders, linked into their levels by slab key
    orders: Slab<OrderNode>,

    bids: BookSide,
    asks: BookSide,

    /// Live order id -> location, for O(1) cancel
    index: HashMap<u64, IndexEntry>,

    /// Every trade, in execution order
    trades: Vec<Trade>,

    next_order_id: u64,
    next_sequence: u64,
    next_trade_id: u64,

    config: BookConfig,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    /// Create an empty book with the default configuration
    pub fn new() -> Self {
        Self::with_config(BookConfig::default())
    }

    /// Create an empty book with pre-allocated capacity
    ///
    /// # Example
    ///
    /// ```
    /// use limit_book::orderbook::OrderBook;
    ///
    /// let book = OrderBook::with_capacity(100_000);
    /// assert!(book.capacity() >= 100_000);
    /// ```
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self::with_config(BookConfig::default().with_order_capacity(order_capacity))
    }

    /// Create an empty book from a configuration
    pub fn with_config(config: BookConfig) -> Self {
        Self {
            orders: Slab::with_capacity(config.order_capacity),
            bids: BookSide::new(Side::Buy),
            asks: BookSide::new(Side::Sell),
            index: HashMap::with_capacity(config.order_capacity),
            trades: Vec::new(),
            next_order_id: 1,
            next_sequence: 1,
            next_trade_id: 1,
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Rest a new limit order on its side of the book.
    ///
    /// Never matches against the opposite side, even when the price crosses.
    ///
    /// # Returns
    ///
    /// The newly assigned order id (1, 2, 3, ...)
    ///
    /// # Errors
    ///
    /// `InvalidCommand` if `price` or `quantity` is zero, or if the quantity
    /// would overflow the aggregate volume of its price level.
    pub fn submit_limit(&mut self, side: Side, price: u64, quantity: u64) -> Result<u64> {
        if price == 0 {
            return Err(BookError::invalid("limit price must be positive"));
        }
        if quantity == 0 {
            return Err(BookError::invalid("limit quantity must be positive"));
        }
        if self.book_side(side).volume_at(price).checked_add(quantity).is_none() {
            return Err(BookError::invalid(format!(
                "quantity {quantity} overflows {side} volume at {price}"
            )));
        }

        let order_id = self.next_order_id;
        self.next_order_id += 1;
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let order = Order::new(order_id, side, price, quantity, sequence);
        let key = self.orders.insert(OrderNode::new(order));
        self.index.insert(order_id, IndexEntry { side, price, key });

        let (book, orders) = self.side_and_orders(side);
        book.insert(key, orders);

        debug!(order_id, %side, price, quantity, "limit order resting");
        Ok(order_id)
    }

    /// Cancel a resting order by id.
    ///
    /// # Returns
    ///
    /// The removed order, with status `Cancelled` and its unfilled remainder
    ///
    /// # Errors
    ///
    /// `OrderNotFound` if the id was never issued, or the order was already
    /// cancelled or fully filled.
    pub fn cancel(&mut self, order_id: u64) -> Result<Order> {
        let entry = *self
            .index
            .get(&order_id)
            .ok_or(BookError::OrderNotFound { order_id })?;

        let (book, orders) = self.side_and_orders(entry.side);
        let remaining = book.cancel(entry.key, orders);
        let node = self.orders.remove(entry.key);
        self.index.remove(&order_id);

        debug!(order_id, side = %entry.side, price = entry.price, remaining, "order cancelled");
        Ok(node.into_order(OrderStatus::Cancelled))
    }

    /// Execute a market order against the opposite side.
    ///
    /// A buy consumes asks from the lowest price up, a sell consumes bids
    /// from the highest price down; within a price, oldest order first. The
    /// walk stops when `quantity` is filled or the opposite side runs out,
    /// in which case the receipt reports a partial fill.
    ///
    /// # Errors
    ///
    /// - `InvalidCommand` if `quantity` is zero
    /// - `EmptyBook` if the opposite side has no resting volume at all
    pub fn execute_market(&mut self, side: Side, quantity: u64) -> Result<ExecutionReceipt> {
        if quantity == 0 {
            return Err(BookError::invalid("market quantity must be positive"));
        }
        let maker_side = side.opposite();
        if self.book_side(maker_side).is_empty() {
            return Err(BookError::EmptyBook { side: maker_side });
        }

        let mut receipt = ExecutionReceipt::new(side, quantity);
        while receipt.filled_quantity < quantity {
            let wanted = quantity - receipt.filled_quantity;
            let (book, orders) = self.side_and_orders(maker_side);
            let Some(fill) = book.match_head(wanted, orders) else {
                break;
            };

            if let Some(key) = fill.exhausted_key {
                self.orders.remove(key);
                self.index.remove(&fill.maker_order_id);
            }

            let trade = Trade::new(
                self.next_trade_id,
                side,
                fill.price,
                fill.quantity,
                fill.maker_order_id,
            );
            self.next_trade_id += 1;
            trace!(
                trade_id = trade.id,
                price = trade.price,
                quantity = trade.quantity,
                maker = trade.maker_order_id,
                maker_done = fill.exhausted_key.is_some(),
                "fill"
            );
            self.trades.push(trade.clone());
            receipt.record(trade);
        }

        debug!(
            %side,
            requested = quantity,
            filled = receipt.filled_quantity,
            trades = receipt.trades.len(),
            "market order executed"
        );
        Ok(receipt)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Highest buy price with resting volume
    pub fn best_bid(&self) -> Option<u64> {
        self.bids.best_price()
    }

    /// Lowest sell price with resting volume
    pub fn best_ask(&self) -> Option<u64> {
        self.asks.best_price()
    }

    /// `best_ask - best_bid`, or None if either side is empty or the book is
    /// crossed (bid >= ask is allowed and left unresolved)
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) if ask > bid => Some(ask - bid),
            _ => None,
        }
    }

    /// Aggregate resting volume at a price, 0 when the level does not exist
    pub fn volume_at_price(&self, side: Side, price: u64) -> u64 {
        self.book_side(side).volume_at(price)
    }

    /// Look up a live order by id
    pub fn order(&self, order_id: u64) -> Option<&Order> {
        let entry = self.index.get(&order_id)?;
        self.orders.get(entry.key).map(|node| &node.order)
    }

    /// Location of a live order
    pub fn locate(&self, order_id: u64) -> Option<IndexEntry> {
        self.index.get(&order_id).copied()
    }

    /// Check if an order is live
    #[inline]
    pub fn contains_order(&self, order_id: u64) -> bool {
        self.index.contains_key(&order_id)
    }

    /// Order ids at one level, in matching (FIFO) order
    pub fn level_order_ids(&self, side: Side, price: u64) -> Vec<u64> {
        self.book_side(side)
            .level(price)
            .map(|level| level.iter(&self.orders).map(OrderNode::order_id).collect())
            .unwrap_or_default()
    }

    /// The order that would match next at one level
    pub fn head_order_id(&self, side: Side, price: u64) -> Option<u64> {
        let key = self.book_side(side).level(price)?.peek_head()?;
        Some(self.orders[key].order_id())
    }

    /// Every trade executed so far, oldest first
    #[inline]
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Bid side (read-only)
    #[inline]
    pub fn bids(&self) -> &BookSide {
        &self.bids
    }

    /// Ask side (read-only)
    #[inline]
    pub fn asks(&self) -> &BookSide {
        &self.asks
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Number of pre-allocated order slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }

    /// Number of resting orders on both sides
    #[inline]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.bids.level_count()
    }

    #[inline]
    pub fn ask_levels(&self) -> usize {
        self.asks.level_count()
    }

    /// Id the next accepted limit order will receive
    #[inline]
    pub fn peek_next_order_id(&self) -> u64 {
        self.next_order_id
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Copy the aggregated ladders and the trade log
    pub fn snapshot(&self) -> BookSnapshot {
        let summarize = |book: &BookSide| -> Vec<LevelSummary> {
            book.levels()
                .map(|level| LevelSummary {
                    price: level.price,
                    volume: level.total_volume,
                    order_count: level.order_count,
                })
                .collect()
        };

        BookSnapshot {
            bids: summarize(&self.bids),
            asks: summarize(&self.asks),
            trades: self.trades.clone(),
            tick_size: self.config.tick_size,
        }
    }

    /// SHA-256 over the SSZ encoding of every resting order (bids then asks,
    /// each in priority order) followed by the trade log.
    ///
    /// Two books that received the same command sequence have the same root.
    pub fn compute_state_root(&self) -> Result<[u8; 32]> {
        let mut hasher = Sha256::new();

        for book in [&self.bids, &self.asks] {
            hasher.update([book.side().to_u8()]);
            for level in book.levels() {
                for node in level.iter(&self.orders) {
                    hasher.update(encode(&node.order)?);
                }
            }
        }

        hasher.update(b"trades");
        for trade in &self.trades {
            hasher.update(encode(trade)?);
        }

        let mut root = [0u8; 32];
        root.copy_from_slice(&hasher.finalize());
        Ok(root)
    }

    // ========================================================================
    // Internal
    // ========================================================================

    fn book_side(&self, side: Side) -> &BookSide {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    /// Split borrow of one side and the order arena
    fn side_and_orders(&mut self, side: Side) -> (&mut BookSide, &mut Slab<OrderNode>) {
        let book = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        (book, &mut self.orders)
    }
}

fn encode<T: ssz_rs::SimpleSerialize>(value: &T) -> Result<Vec<u8>> {
    ssz_rs::serialize(value).map_err(|err| BookError::Encoding(format!("{err:?}")))
}

// ============================================================================
// Unit Tests
// ============================================================================
