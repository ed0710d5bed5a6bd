//! # Chain Economics - Exact Ethereum Issuance, Burn and Fee Accounting
//!
//! This crate turns raw block, uncle and explorer transaction payloads into
//! typed records and derives the money figures from them: base issuance per
//! fork era, depth-decayed uncle rewards, base-fee burn, and transaction fees.
//!
//! ## What It Covers
//! - **Hex Quantities**: `0x` node quantities parsed into arbitrary-precision integers
//! - **Fork Schedule**: A configurable height-to-era mapping with base rewards
//! - **Block and Uncle Records**: Immutable views with issuance, burn and reward derivations
//! - **Explorer Events**: Plain, internal, ERC-20, ERC-721 and ERC-1155 shapes
//! - **Denominations**: Exact rational wei/gwei/ether conversion, no floating point
//!
//! ## How the Code Is Organized
//! - `core/`: Records, fork schedule, monetary conversion, summaries
//! - `utils/`: Raw record access, JSON decoding, UTC time buckets
//! - `config/`: TOML configuration for the fork schedule and log level
//! - `error/`: The error taxonomy shared by every constructor
//! - `cli/`: Command-line interface for the report binary
//!
//! Network retrieval is left to the caller: records are built from
//! already-decoded string maps and keep that map for `to_raw()`.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;

// Re-export commonly used types for convenience
pub use cli::{Command, Opt};
pub use config::Config;
pub use core::{
    BlockRecord, ChainEvent, Denomination, Era, EventKind, ForkSchedule, HexQuantity,
    IssuanceSummary, Transaction, UncleRecord,
};
pub use error::{EconomicsError, Result};
pub use utils::{RawRecord, UtcTimestamp};
