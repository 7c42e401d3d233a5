//! Sample run: build a ledger, submit a few signed actions, print the chain.
//!
//! ```text
//! ACTCHAIN_DIFFICULTY=3 RUST_LOG=debug actchain-demo [--json]
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use actchain::{Block, IdentityKeyPair, Ledger, SubmitOutcome};

const DEFAULT_DIFFICULTY: u32 = 4;

/// `ctime(3)` layout, e.g. `Tue Nov 14 22:13:20 2023`.
const CTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

const ACTIONS: &[&str] = &[
    "Plant 100 trees in the city park",
    "Recycle 50kg of plastic waste",
    "Organize community clean-up event",
    "This data is longer than 15 chars and will fail Proof of Action",
];

#[derive(Serialize)]
struct BlockView {
    index: u64,
    timestamp: i64,
    payload: String,
    prev_hash: String,
    hash: String,
    nonce: u64,
}

impl From<&Block> for BlockView {
    fn from(block: &Block) -> Self {
        Self {
            index: block.index,
            timestamp: block.timestamp,
            payload: String::from_utf8_lossy(&block.payload).into_owned(),
            prev_hash: block.prev_hash_text(),
            hash: block.hash.to_hex(),
            nonce: block.nonce,
        }
    }
}

/// Render Unix seconds in `tz`, falling back to the raw number when out of range.
fn format_timestamp<Tz: TimeZone>(secs: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match DateTime::from_timestamp(secs, 0) {
        Some(utc) => utc.with_timezone(tz).format(CTIME_FORMAT).to_string(),
        None => secs.to_string(),
    }
}

fn difficulty_from_env() -> Result<u32> {
    match std::env::var("ACTCHAIN_DIFFICULTY") {
        Ok(value) => value
            .parse()
            .with_context(|| format!("ACTCHAIN_DIFFICULTY must be an integer, got {value:?}")),
        Err(_) => Ok(DEFAULT_DIFFICULTY),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let json = std::env::args().any(|arg| arg == "--json");
    let difficulty = difficulty_from_env()?;

    let identity = IdentityKeyPair::generate().context("generating demo identity")?;
    tracing::info!(address = %identity.address(), difficulty, "starting demo");

    let mut ledger = Ledger::new(difficulty);

    for action in ACTIONS {
        let signature = identity.sign(action.as_bytes())?;
        let verified =
            IdentityKeyPair::verify(action.as_bytes(), &signature, &identity.public_key_hex());
        tracing::debug!(%signature, verified, "signed action");

        match ledger.submit(*action)? {
            SubmitOutcome::Accepted { index, report, .. } => {
                tracing::info!(index, attempts = report.attempts, "action recorded");
            }
            SubmitOutcome::Rejected { index, policy, .. } => {
                tracing::warn!(index, %policy, "action rejected");
            }
        }
    }

    ledger.validate().context("chain failed validation")?;

    let views: Vec<BlockView> = ledger.blocks().iter().map(BlockView::from).collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    println!("------- actchain -------");
    for view in &views {
        println!("Block #{}", view.index);
        println!("Timestamp: {}", format_timestamp(view.timestamp, &Local));
        println!("Data: {}", view.payload);
        println!("PrevHash: {}", view.prev_hash);
        println!("Hash: {}", view.hash);
        println!("Nonce: {}", view.nonce);
        println!("------------------------");
    }

    Ok(())
}
