//! Order node for slab-based storage.
//!
//! ## Design
//!
//! `OrderNode` wraps an `Order` with doubly-linked list pointers so that an
//! order can be unlinked from its price level in O(1) given its slab key.
//! The pointers are slab keys (`usize`), never references, so the arena owns
//! every order and the links cannot alias.
//!
//! ## Slab Integration
//!
//! Per the slab docs (https://docs.rs/slab/0.4.11):
//! - Keys are `usize` values returned by `slab.insert()`
//! - Keys may be reused after `slab.remove()`
//! - O(1) insert, remove, and lookup
//!
//! Key reuse is safe because the id index is updated in the same call that
//! removes a node from the slab.

use crate::types::{Order, OrderStatus, Side};

/// Order node stored in the slab.
///
/// - `next`: the order that arrived after this one at the same price
/// - `prev`: the order that arrived before this one at the same price
#[derive(Debug, Clone)]
pub struct OrderNode {
    /// The actual order data
    pub order: Order,

    /// Next (newer) order in the price level queue; None at the tail
    pub next: Option<usize>,

    /// Previous (older) order in the price level queue; None at the head
    pub prev: Option<usize>,
}

impl OrderNode {
    /// Create a new, unlinked order node
    ///
    /// # Example
    ///
    /// ```
    /// use limit_book::orderbook::OrderNode;
    /// use limit_book::types::{Order, Side};
    ///
    /// let node = OrderNode::new(Order::new(1, Side::Buy, 99, 5, 1));
    ///
    /// assert!(node.next.is_none());
    /// assert!(node.prev.is_none());
    /// ```
    #[inline]
    pub fn new(order: Order) -> Self {
        Self {
            order,
            next: None,
            prev: None,
        }
    }

    /// Check if this node has no neighbours
    #[inline]
    pub fn is_unlinked(&self) -> bool {
        self.next.is_none() && self.prev.is_none()
    }

    #[inline]
    pub fn order_id(&self) -> u64 {
        self.order.id
    }

    #[inline]
    pub fn price(&self) -> u64 {
        self.order.price
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.order.side()
    }

    #[inline]
    pub fn remaining(&self) -> u64 {
        self.order.remaining
    }

    /// Fill a portion of this order
    ///
    /// # Returns
    ///
    /// The quantity actually filled (capped at the remaining quantity)
    #[inline]
    pub fn fill(&mut self, quantity: u64) -> u64 {
        self.order.fill(quantity)
    }

    #[inline]
    pub fn is_filled(&self) -> bool {
        self.order.is_filled()
    }

    /// Consume the node, marking the order with its terminal state
    pub fn into_order(self, status: OrderStatus) -> Order {
        let mut order = self.order;
        order.set_status(status);
        order
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
