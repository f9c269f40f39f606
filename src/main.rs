//! limit-book - command replay binary
//!
//! Reads book commands from a script file (or stdin), applies them in order
//! and prints the resulting ladder, the trade log and the state root.
//!
//! ```text
//! $ printf 'limit ask 101 5\nlimit bid 99 3\nmarket buy 2\n' | limit-book
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use limit_book::engine::{CommandOutcome, MatchingEngine};
use limit_book::types::price;
use limit_book::BookConfig;

/// Replay limit order book commands
#[derive(Parser, Debug)]
#[command(name = "limit-book", version)]
#[command(about = "Replay limit order book commands and print the final book")]
struct Cli {
    /// Command script; reads stdin when omitted
    script: Option<PathBuf>,

    /// Decimal value of one price tick
    #[arg(long, default_value = "1")]
    tick_size: Decimal,

    /// Order slots to pre-allocate
    #[arg(long, default_value_t = limit_book::config::DEFAULT_ORDER_CAPACITY)]
    capacity: usize,

    /// Print the outcome of every accepted command
    #[arg(long)]
    show_each: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("limit_book=info"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config =
        BookConfig::new(cli.capacity, cli.tick_size).context("invalid book configuration")?;
    let tick_size = config.tick_size;
    let mut engine = MatchingEngine::new(config);

    let reader: Box<dyn BufRead> = match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    let show_each = cli.show_each;
    let summary = engine
        .replay_with(reader, |line, outcome| {
            if show_each {
                println!("{line:>5}: {}", describe(outcome, tick_size));
            }
        })
        .context("failed to read commands")?;

    let book = engine.book();
    let spread = book.spread();
    let root = book.compute_state_root().context("failed to compute state root")?;

    print!("{}", book.snapshot());
    println!();
    println!(
        "commands: {} applied, {} rejected ({} lines)",
        summary.applied, summary.rejected, summary.lines
    );
    println!("resting orders: {}", book.order_count());
    if let Some(spread) = spread {
        println!("spread: {}", price::format_ticks(spread, tick_size));
    }
    println!("state root: {}", hex::encode(root));

    Ok(())
}

fn describe(outcome: &CommandOutcome, tick_size: Decimal) -> String {
    match outcome {
        CommandOutcome::Placed { order_id } => format!("placed order {order_id}"),
        CommandOutcome::Cancelled(order) => format!(
            "cancelled order {} ({} unfilled at {})",
            order.id,
            order.remaining,
            price::format_ticks(order.price, tick_size)
        ),
        CommandOutcome::Executed(receipt) => {
            let average = receipt
                .average_price(tick_size)
                .map(|px| px.normalize().to_string())
                .unwrap_or_else(|| "-".to_string());
            format!(
                "{} {}/{} in {} trades, avg {}",
                receipt.taker_side,
                receipt.filled_quantity,
                receipt.requested_quantity,
                receipt.trades.len(),
                average
            )
        }
    }
}
