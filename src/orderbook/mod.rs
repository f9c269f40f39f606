//! Order book for a single instrument.
//!
//! ## Architecture
//!
//! - **Slab-based storage**: every resting order lives in one arena
//! - **Price levels**: FIFO queues threaded through the arena by slab key
//! - **Book sides**: `BTreeMap` of levels plus a lazily reconciled heap for
//!   the best price
//!
//! ## Components
//!
//! - [`OrderNode`]: Wrapper around `Order` with linked-list pointers
//! - [`PriceLevel`]: Queue of orders at a single price point
//! - [`BookSide`]: All levels of one side and its best price
//! - [`OrderBook`]: Both sides, the id index and the trade log
//! - [`BookSnapshot`]: Read-only ladder copy for printing
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Submit limit order | O(1) existing price, O(log n) new price |
//! | Cancel order by ID | O(1) amortized |
//! | Best bid/ask | O(log n) amortized |
//! | Market order | O(k log n) for k makers consumed |

pub mod node;
pub mod level;
pub mod side;
pub mod book;
pub mod snapshot;

pub use node::OrderNode;
pub use level::{LevelIter, PriceLevel};
pub use side::{BookSide, Fill};
pub use book::{IndexEntry, OrderBook};
pub use snapshot::{BookSnapshot, LevelSummary};
