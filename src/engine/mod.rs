//! Command-driven front end for the order book.
//!
//! ## Design
//!
//! The [`MatchingEngine`] owns one [`OrderBook`] and applies [`Command`]s to
//! it strictly one at a time. It adds nothing to the matching rules; it only
//! routes commands, keeps counters and replays scripts.
//!
//! A rejected command is reported and counted but never stops a replay: the
//! book is unchanged by a failed command, so the next one sees the same state
//! it would have seen had the bad line been absent.
//!
//! ## Example
//!
//! ```
//! use limit_book::engine::{CommandOutcome, MatchingEngine};
//! use limit_book::BookConfig;
//!
//! let mut engine = MatchingEngine::new(BookConfig::default());
//!
//! let script = "\
//! ## two asks, then take one and a half
//! limit ask 101 5
//! limit ask 102 5
//! market buy 7
//! cancel 99
//! ";
//! let summary = engine.replay(script.as_bytes()).unwrap();
//!
//! assert_eq!(summary.applied, 3);
//! assert_eq!(summary.rejected, 1);
//! assert_eq!(engine.book().best_ask(), Some(102));
//! ```

mod command;

pub use command::Command;

use std::io::{self, BufRead};

use tracing::{debug, info, warn};

use crate::config::BookConfig;
use crate::error::Result;
use crate::orderbook::OrderBook;
use crate::types::{ExecutionReceipt, Order};

/// What an accepted command did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A limit order now rests under this id
    Placed { order_id: u64 },

    /// The order that was removed
    Cancelled(Order),

    /// Fills of a market order
    Executed(ExecutionReceipt),
}

/// Counters for one replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Lines read, comments and blanks included
    pub lines: usize,

    /// Commands the book accepted
    pub applied: usize,

    /// Commands that failed to parse or were refused by the book
    pub rejected: usize,
}

/// Sequential command processor around a single book
#[derive(Debug)]
pub struct MatchingEngine {
    book: OrderBook,
    applied: u64,
    rejected: u64,
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new(BookConfig::default())
    }
}

impl MatchingEngine {
    /// Create an engine with an empty book
    pub fn new(config: BookConfig) -> Self {
        Self::with_book(OrderBook::with_config(config))
    }

    /// Take ownership of an existing book
    pub fn with_book(book: OrderBook) -> Self {
        Self {
            book,
            applied: 0,
            rejected: 0,
        }
    }

    #[inline]
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    #[inline]
    pub fn book_mut(&mut self) -> &mut OrderBook {
        &mut self.book
    }

    pub fn into_book(self) -> OrderBook {
        self.book
    }

    /// Commands accepted over the engine's lifetime
    #[inline]
    pub fn applied_count(&self) -> u64 {
        self.applied
    }

    /// Commands rejected over the engine's lifetime
    #[inline]
    pub fn rejected_count(&self) -> u64 {
        self.rejected
    }

    /// Apply one command to the book.
    ///
    /// # Errors
    ///
    /// Whatever the book returns; the book is unchanged on error.
    pub fn apply(&mut self, command: Command) -> Result<CommandOutcome> {
        let result = match command {
            Command::Limit { side, price, quantity } => self
                .book
                .submit_limit(side, price, quantity)
                .map(|order_id| CommandOutcome::Placed { order_id }),
            Command::Cancel { order_id } => {
                self.book.cancel(order_id).map(CommandOutcome::Cancelled)
            }
            Command::Market { side, quantity } => self
                .book
                .execute_market(side, quantity)
                .map(CommandOutcome::Executed),
        };

        match &result {
            Ok(_) => self.applied += 1,
            Err(_) => self.rejected += 1,
        }
        result
    }

    /// Parse and apply one script line.
    ///
    /// # Returns
    ///
    /// `Ok(None)` for a blank or `#` comment line
    pub fn apply_line(&mut self, line: &str) -> Result<Option<CommandOutcome>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let command = match Command::parse(line, self.book.config().tick_size) {
            Ok(command) => command,
            Err(err) => {
                self.rejected += 1;
                return Err(err);
            }
        };
        self.apply(command).map(Some)
    }

    /// Apply every line of a script, continuing past rejected commands.
    ///
    /// # Errors
    ///
    /// Only IO errors from `reader`. Command errors are logged at `warn` and
    /// counted in the summary.
    pub fn replay<R: BufRead>(&mut self, reader: R) -> io::Result<ReplaySummary> {
        self.replay_with(reader, |_, _| {})
    }

    /// Like [`replay`](Self::replay), calling `on_outcome` with the line
    /// number and outcome of every accepted command.
    pub fn replay_with<R, F>(&mut self, reader: R, mut on_outcome: F) -> io::Result<ReplaySummary>
    where
        R: BufRead,
        F: FnMut(usize, &CommandOutcome),
    {
        let mut summary = ReplaySummary::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;
            summary.lines += 1;

            match self.apply_line(&line) {
                Ok(Some(outcome)) => {
                    summary.applied += 1;
                    debug!(line = line_no, ?outcome, "applied");
                    on_outcome(line_no, &outcome);
                }
                Ok(None) => {}
                Err(err) => {
                    summary.rejected += 1;
                    warn!(line = line_no, command = line.trim(), %err, "command rejected");
                }
            }
        }

        info!(
            lines = summary.lines,
            applied = summary.applied,
            rejected = summary.rejected,
            "replay finished"
        );
        Ok(summary)
    }
}
