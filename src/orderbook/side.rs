//! One side (bids or asks) of the order book.
//!
//! ## Structure
//!
//! - **BTreeMap** `price -> PriceLevel`: the authoritative set of live levels
//! - **BinaryHeap** of prices: O(log n) access to the best price
//!
//! The heap is ranked so that its top is always the best price for the side:
//! the highest price for bids, the lowest for asks.
//!
//! ## Stale entries
//!
//! Removing an arbitrary element from a binary heap is O(n), so when a level
//! empties (cancel or full consumption) only the map entry is erased. The
//! heap keeps a *stale* entry for that price. Every path that erases a level
//! then pops heap tops whose price has no live level, stopping at the first
//! live one. Stale entries buried below a live top stay until they surface,
//! and each is popped at most once. The top is therefore always live, and
//! `best_price` is a plain peek. A price that comes back to life before its
//! stale entry is popped simply has two heap entries; both name a live
//! level, so neither is wrong.
//!
//! To keep memory bounded under churn the heap is rebuilt from the map keys
//! once it holds more than twice as many entries as there are live levels.
//! That check runs only when a new level is created, so the rebuild cost is
//! amortized over the insertions that produced the stale entries.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BinaryHeap};

use slab::Slab;
use tracing::trace;

use crate::orderbook::{OrderNode, PriceLevel};
use crate::types::Side;

/// Heap size below which compaction never runs
const COMPACTION_FLOOR: usize = 64;

/// Heap entry ordered by `rank`, which is the price for bids and the
/// complement of the price for asks, so the max-heap top is the best price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct RankedPrice {
    rank: u64,
    price: u64,
}

impl RankedPrice {
    fn new(side: Side, price: u64) -> Self {
        let rank = match side {
            Side::Buy => price,
            Side::Sell => u64::MAX - price,
        };
        Self { rank, price }
    }
}

/// Result of consuming from the head of the best level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fill {
    /// Price of the level that supplied the liquidity
    pub price: u64,

    /// Quantity taken from the maker
    pub quantity: u64,

    /// Maker order id
    pub maker_order_id: u64,

    /// Slab key of the maker, already unlinked, when it was fully consumed.
    /// The caller owns removing it from the slab and the id index.
    pub exhausted_key: Option<usize>,
}

/// Price-indexed collection of levels for one side of the book.
#[derive(Debug, Clone)]
pub struct BookSide {
    side: Side,
    levels: BTreeMap<u64, PriceLevel>,
    best: BinaryHeap<RankedPrice>,
    order_count: usize,
}

impl BookSide {
    /// Create an empty side
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
            best: BinaryHeap::new(),
            order_count: 0,
        }
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Number of live price levels
    #[inline]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Number of resting orders
    #[inline]
    pub fn order_count(&self) -> usize {
        self.order_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of entries in the best-price heap, stale ones included
    #[inline]
    pub fn heap_len(&self) -> usize {
        self.best.len()
    }

    /// Link a slab order into the level for its price, creating the level
    /// when the price is new.
    ///
    /// O(1) for an existing price, O(log n) for a new one.
    pub fn insert(&mut self, key: usize, orders: &mut Slab<OrderNode>) {
        let price = orders[key].price();
        debug_assert_eq!(orders[key].side(), self.side);

        let level = match self.levels.entry(price) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.best.push(RankedPrice::new(self.side, price));
                entry.insert(PriceLevel::new(price))
            }
        };
        level.push_back(key, orders);
        self.order_count += 1;

        self.maybe_compact();
    }

    /// Unlink a resting order; erase its level when that leaves it empty.
    ///
    /// The heap entry for an erased level is left stale.
    ///
    /// # Returns
    ///
    /// The remaining quantity of the unlinked order
    ///
    /// # Panics
    ///
    /// Panics if `key` is not a live order on this side.
    pub fn cancel(&mut self, key: usize, orders: &mut Slab<OrderNode>) -> u64 {
        let price = orders[key].price();
        let Some(level) = self.levels.get_mut(&price) else {
            panic!("order at slab key {key} has no {} level at {price}", self.side);
        };

        let remaining = level.remove(key, orders);
        self.order_count -= 1;
        if level.is_empty() {
            self.levels.remove(&price);
            self.prune_stale_top();
        }
        remaining
    }

    /// Best live price. O(1): the heap top is never stale.
    pub fn best_price(&self) -> Option<u64> {
        let top = self.best.peek()?;
        debug_assert!(self.levels.contains_key(&top.price));
        Some(top.price)
    }

    /// Aggregate resting volume at `price`, 0 when no level exists
    pub fn volume_at(&self, price: u64) -> u64 {
        self.levels.get(&price).map_or(0, |level| level.total_volume)
    }

    /// Total resting volume on this side, saturating at `u64::MAX`
    pub fn total_volume(&self) -> u64 {
        self.levels
            .values()
            .fold(0u64, |acc, level| acc.saturating_add(level.total_volume))
    }

    /// Level at `price`, if live
    pub fn level(&self, price: u64) -> Option<&PriceLevel> {
        self.levels.get(&price)
    }

    /// Take up to `max_quantity` from the oldest order at the best price.
    ///
    /// A fully consumed maker is unlinked (its slab key is reported in the
    /// fill) and a level left empty is erased. A partially consumed maker
    /// stays at the head with reduced `remaining`.
    ///
    /// Returns `None` when the side has no live level or `max_quantity` is 0.
    pub fn match_head(&mut self, max_quantity: u64, orders: &mut Slab<OrderNode>) -> Option<Fill> {
        if max_quantity == 0 {
            return None;
        }
        let price = self.best_price()?;
        let level = self.levels.get_mut(&price)?;
        let key = level.peek_head()?;

        let node = &mut orders[key];
        let quantity = node.fill(max_quantity);
        let maker_order_id = node.order_id();
        let exhausted = node.is_filled();
        level.reduce_volume(quantity);

        let exhausted_key = if exhausted {
            level.pop_head(orders);
            self.order_count -= 1;
            Some(key)
        } else {
            None
        };
        if level.is_empty() {
            self.levels.remove(&price);
            self.prune_stale_top();
        }

        Some(Fill {
            price,
            quantity,
            maker_order_id,
            exhausted_key,
        })
    }

    /// Iterate live levels from best to worst price
    pub fn levels(&self) -> Box<dyn Iterator<Item = &PriceLevel> + '_> {
        match self.side {
            Side::Buy => Box::new(self.levels.values().rev()),
            Side::Sell => Box::new(self.levels.values()),
        }
    }

    /// Pop heap tops whose level has been erased.
    ///
    /// Each stale entry is popped at most once, so the cost is amortized
    /// against the insertion that pushed it.
    fn prune_stale_top(&mut self) {
        while let Some(top) = self.best.peek() {
            if self.levels.contains_key(&top.price) {
                return;
            }
            trace!(side = %self.side, price = top.price, "dropping stale best-price entry");
            self.best.pop();
        }
    }

    /// Rebuild the heap from live levels when stale entries dominate
    fn maybe_compact(&mut self) {
        let heap_len = self.best.len();
        if heap_len <= COMPACTION_FLOOR || heap_len <= 2 * self.levels.len() {
            return;
        }

        let side = self.side;
        let live: Vec<RankedPrice> = self
            .levels
            .keys()
            .map(|&price| RankedPrice::new(side, price))
            .collect();
        trace!(side = %side, before = heap_len, after = live.len(), "compacting best-price heap");
        self.best = BinaryHeap::from(live);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
