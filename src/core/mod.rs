//! Core economics model
//!
//! This module contains the typed records and the reward, burn and fee
//! derivations: hex quantity parsing, the fork schedule, block and uncle
//! records, explorer transaction events, and exact denomination conversion.

pub mod block;
pub mod fork_schedule;
pub mod monetary;
pub mod quantity;
pub mod summary;
pub mod transaction;
pub mod uncle;

pub use block::{BlockHeader, BlockRecord};
pub use fork_schedule::{Era, ForkSchedule, BYZANTIUM_BLOCK, CONSTANTINOPLE_BLOCK};
pub use monetary::{convert, format_amount, format_units, Denomination, WEI_PER_ETHER, WEI_PER_GWEI};
pub use quantity::{parse_decimal, HexQuantity};
pub use summary::{burned_by_day, total_fees_wei, IssuanceSummary};
pub use transaction::{
    ChainEvent, Erc1155Transfer, Erc20Transfer, Erc721Transfer, EventBase, EventDetails,
    EventKind, InternalTransaction, ReceiptStatus, TokenInfo, Transaction,
};
pub use uncle::{UncleRecord, MAX_UNCLE_DEPTH};
