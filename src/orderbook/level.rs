//! Price level management for orders at the same price.
//!
//! ## Design
//!
//! A `PriceLevel` represents all orders at a single price. Orders form a
//! doubly-linked list threaded through the slab, giving FIFO (time priority)
//! order:
//!
//! ```text
//! head (oldest) <-> order2 <-> order3 <-> tail (newest)
//! ```
//!
//! - New orders are appended at the tail
//! - Matching consumes orders from the head
//! - Any order can be unlinked in O(1) using its slab key
//!
//! `total_volume` always equals the sum of `remaining` over the linked orders.
//! Every method that changes a member's remaining quantity or membership
//! adjusts it in the same step.
//!
//! ## Panics
//!
//! Methods taking a slab key panic if the key is not live in the slab. Keys
//! only reach a level through the book, which keeps slab and index in sync.

use slab::Slab;

use crate::orderbook::OrderNode;

/// A price level containing orders at a single price.
///
/// The order data lives in the slab; this struct only holds queue metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLevel {
    /// Price for this level, in ticks
    pub price: u64,

    /// Sum of remaining quantity over all orders at this level
    pub total_volume: u64,

    /// Head of the queue (oldest order, slab key), next to match
    pub head: Option<usize>,

    /// Tail of the queue (newest order, slab key)
    pub tail: Option<usize>,

    /// Number of orders at this price level
    pub order_count: usize,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new(price: u64) -> Self {
        Self {
            price,
            total_volume: 0,
            head: None,
            tail: None,
            order_count: 0,
        }
    }

    /// A level is empty once no volume rests on it
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total_volume == 0
    }

    /// Append an order at the tail of the queue
    pub fn push_back(&mut self, key: usize, slab: &mut Slab<OrderNode>) {
        let node = &mut slab[key];
        let quantity = node.remaining();

        node.prev = self.tail;
        node.next = None;

        match self.tail {
            Some(tail_key) => slab[tail_key].next = Some(key),
            None => self.head = Some(key),
        }

        self.tail = Some(key);
        self.order_count += 1;
        self.total_volume += quantity;
    }

    /// Unlink an order from anywhere in the queue
    ///
    /// # Returns
    ///
    /// The remaining quantity of the unlinked order
    pub fn remove(&mut self, key: usize, slab: &mut Slab<OrderNode>) -> u64 {
        let node = &slab[key];
        let quantity = node.remaining();
        let prev_key = node.prev;
        let next_key = node.next;

        match prev_key {
            Some(prev) => slab[prev].next = next_key,
            None => self.head = next_key,
        }

        match next_key {
            Some(next) => slab[next].prev = prev_key,
            None => self.tail = prev_key,
        }

        let node = &mut slab[key];
        node.prev = None;
        node.next = None;

        self.order_count -= 1;
        self.total_volume -= quantity;

        quantity
    }

    /// Slab key of the oldest order, the next one to match
    #[inline]
    pub fn peek_head(&self) -> Option<usize> {
        self.head
    }

    /// Unlink the oldest order and return its slab key
    pub fn pop_head(&mut self, slab: &mut Slab<OrderNode>) -> Option<usize> {
        let key = self.head?;
        self.remove(key, slab);
        Some(key)
    }

    /// Account for a partial fill of a member order
    pub fn reduce_volume(&mut self, filled_quantity: u64) {
        debug_assert!(filled_quantity <= self.total_volume);
        self.total_volume -= filled_quantity;
    }

    /// Iterate the queue from head (oldest) to tail (newest)
    pub fn iter<'a>(&self, slab: &'a Slab<OrderNode>) -> LevelIter<'a> {
        LevelIter {
            slab,
            cursor: self.head,
        }
    }
}

/// Head-to-tail iterator over the orders of a level
pub struct LevelIter<'a> {
    slab: &'a Slab<OrderNode>,
    cursor: Option<usize>,
}

impl<'a> Iterator for LevelIter<'a> {
    type Item = &'a OrderNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.slab[self.cursor?];
        self.cursor = node.next;
        Some(node)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Order, Side};

    fn create_test_node(slab: &mut Slab<OrderNode>, id: u64, quantity: u64) -> usize {
        let order = Order::new(id, Side::Buy, 99, quantity, id);
        slab.insert(OrderNode::new(order))
    }

    fn ids(level: &PriceLevel, slab: &Slab<OrderNode>) -> Vec<u64> {
        level.iter(slab).map(OrderNode::order_id).collect()
    }

    /// Level with orders 1, 2, 3 of quantity 1, 2, 5
    fn three_order_level(slab: &mut Slab<OrderNode>) -> (PriceLevel, [usize; 3]) {
        let mut level = PriceLevel::new(99);
        let key1 = create_test_node(slab, 1, 1);
        let key2 = create_test_node(slab, 2, 2);
        let key3 = create_test_node(slab, 3, 5);
        level.push_back(key1, slab);
        level.push_back(key2, slab);
        level.push_back(key3, slab);
        (level, [key1, key2, key3])
    }

    #[test]
    fn test_price_level_new() {
        let level = PriceLevel::new(99);

        assert_eq!(level.price, 99);
        assert_eq!(level.total_volume, 0);
        assert!(level.head.is_none());
        assert!(level.tail.is_none());
        assert_eq!(level.order_count, 0);
        assert!(level.is_empty());
    }

    #[test]
    fn test_price_level_push_single() {
        let mut slab = Slab::with_capacity(10);
        let mut level = PriceLevel::new(99);

        let key = create_test_node(&mut slab, 1, 10);
        level.push_back(key, &mut slab);

        assert_eq!(level.order_count, 1);
        assert_eq!(level.total_volume, 10);
        assert_eq!(level.head, Some(key));
        assert_eq!(level.tail, Some(key));
        assert!(slab[key].is_unlinked());
    }

    #[test]
    fn test_price_level_push_multiple() {
        let mut slab = Slab::with_capacity(10);
        let (level, [key1, key2, key3]) = three_order_level(&mut slab);

        assert_eq!(level.order_count, 3);
        assert_eq!(level.total_volume, 8);
        assert_eq!(level.head, Some(key1));
        assert_eq!(level.tail, Some(key3));
        assert_eq!(slab[key2].prev, Some(key1));
        assert_eq!(slab[key2].next, Some(key3));
        assert_eq!(ids(&level, &slab), vec![1, 2, 3]);
    }

    #[test]
    fn test_price_level_remove_head() {
        let mut slab = Slab::with_capacity(10);
        let (mut level, [key1, key2, key3]) = three_order_level(&mut slab);

        assert_eq!(level.remove(key1, &mut slab), 1);

        assert_eq!(level.head, Some(key2));
        assert_eq!(level.tail, Some(key3));
        assert!(slab[key2].prev.is_none());
        assert_eq!(level.total_volume, 7);
        assert_eq!(ids(&level, &slab), vec![2, 3]);
    }

    #[test]
    fn test_price_level_remove_middle() {
        let mut slab = Slab::with_capacity(10);
        let (mut level, [key1, key2, key3]) = three_order_level(&mut slab);

        assert_eq!(level.remove(key2, &mut slab), 2);

        assert_eq!(slab[key1].next, Some(key3));
        assert_eq!(slab[key3].prev, Some(key1));
        assert_eq!(level.total_volume, 6);
        assert_eq!(level.order_count, 2);
        assert!(slab[key2].is_unlinked());
    }

    #[test]
    fn test_price_level_remove_tail() {
        let mut slab = Slab::with_capacity(10);
        let (mut level, [key1, key2, key3]) = three_order_level(&mut slab);

        assert_eq!(level.remove(key3, &mut slab), 5);

        assert_eq!(level.head, Some(key1));
        assert_eq!(level.tail, Some(key2));
        assert!(slab[key2].next.is_none());
        assert_eq!(level.total_volume, 3);
    }

    #[test]
    fn test_price_level_remove_only() {
        let mut slab = Slab::with_capacity(10);
        let mut level = PriceLevel::new(99);

        let key = create_test_node(&mut slab, 1, 10);
        level.push_back(key, &mut slab);
        level.remove(key, &mut slab);

        assert!(level.is_empty());
        assert_eq!(level.order_count, 0);
        assert!(level.head.is_none());
        assert!(level.tail.is_none());
    }

    #[test]
    fn test_price_level_pop_head_fifo() {
        let mut slab = Slab::with_capacity(10);
        let (mut level, [key1, key2, key3]) = three_order_level(&mut slab);

        assert_eq!(level.pop_head(&mut slab), Some(key1));
        assert_eq!(level.pop_head(&mut slab), Some(key2));
        assert_eq!(level.pop_head(&mut slab), Some(key3));
        assert_eq!(level.pop_head(&mut slab), None);
        assert!(level.is_empty());
    }

    #[test]
    fn test_price_level_partial_fill_bookkeeping() {
        let mut slab = Slab::with_capacity(10);
        let (mut level, [key1, _, _]) = three_order_level(&mut slab);

        // The volume leaves the level at fill time, before the unlink
        let filled = slab[key1].fill(1);
        level.reduce_volume(filled);

        assert_eq!(level.total_volume, 7);
        assert_eq!(level.peek_head(), Some(key1));

        assert!(slab[key1].is_filled());
        assert_eq!(level.remove(key1, &mut slab), 0);
        assert_eq!(level.total_volume, 7);
    }
}
