//! Explorer transaction and transfer events
//!
//! Explorer APIs report account activity in five shapes that share a common
//! field set:
//! - Plain transactions: base + detailed fields, value and status
//! - Internal transactions: base fields, value and error flag, no gas price
//! - ERC-20 / ERC-721 / ERC-1155 transfers: base + detailed + token fields
//!
//! Each shape is its own struct composed of `EventBase` and, where the explorer
//! sends block-inclusion metadata, `EventDetails`. `ChainEvent` is the sum type
//! for callers that handle mixed streams.

pub mod internal;
pub mod normal;
pub mod token;

pub use internal::InternalTransaction;
pub use normal::{ReceiptStatus, Transaction};
pub use token::{Erc1155Transfer, Erc20Transfer, Erc721Transfer, TokenInfo, DEPRECATED_INPUT};

use crate::core::monetary::{convert, Denomination};
use crate::error::{EconomicsError, Result};
use crate::utils::{RawFields, RawRecord, UtcTimestamp};
use num_bigint::BigUint;
use num_rational::BigRational;
use std::fmt;
use std::str::FromStr;

/// Fields every event shape carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBase {
    hash: String,
    block_number: u64,
    from_address: String,
    to_address: Option<String>, // none for contract creation
    gas: u64,
    gas_used: u64,
    input: String,
    timestamp: UtcTimestamp,
    contract_address: Option<String>,
}

impl EventBase {
    pub(crate) fn from_fields(fields: &RawFields<'_>) -> Result<EventBase> {
        Ok(EventBase {
            hash: fields.required_string("hash")?,
            block_number: fields.decimal_u64("blockNumber")?,
            from_address: fields.required_string("from")?,
            to_address: fields.optional_string("to"),
            gas: fields.decimal_u64("gas")?,
            gas_used: fields.decimal_u64("gasUsed")?,
            input: fields.required_string("input")?,
            timestamp: UtcTimestamp::from_secs(fields.decimal_u64("timeStamp")?)?,
            contract_address: fields.optional_string("contractAddress"),
        })
    }

    pub fn get_hash(&self) -> &str {
        &self.hash
    }

    pub fn get_block_number(&self) -> u64 {
        self.block_number
    }

    pub fn get_from_address(&self) -> &str {
        &self.from_address
    }

    pub fn get_to_address(&self) -> Option<&str> {
        self.to_address.as_deref()
    }

    pub fn get_gas(&self) -> u64 {
        self.gas
    }

    pub fn get_gas_used(&self) -> u64 {
        self.gas_used
    }

    pub fn get_input(&self) -> &str {
        &self.input
    }

    pub fn get_timestamp(&self) -> &UtcTimestamp {
        &self.timestamp
    }

    pub fn get_contract_address(&self) -> Option<&str> {
        self.contract_address.as_deref()
    }

    pub fn is_contract_creation(&self) -> bool {
        self.to_address.is_none() && self.contract_address.is_some()
    }
}

/// Block-inclusion metadata of the detailed event shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetails {
    block_hash: String,
    confirmations: u64,
    cumulative_gas_used: u64,
    gas_price: BigUint, // wei per gas
    nonce: u64,
    transaction_index: u64,
}

impl EventDetails {
    pub(crate) fn from_fields(fields: &RawFields<'_>) -> Result<EventDetails> {
        Ok(EventDetails {
            block_hash: fields.required_string("blockHash")?,
            confirmations: fields.decimal_u64("confirmations")?,
            cumulative_gas_used: fields.decimal_u64("cumulativeGasUsed")?,
            gas_price: fields.decimal("gasPrice")?,
            nonce: fields.decimal_u64("nonce")?,
            transaction_index: fields.decimal_u64("transactionIndex")?,
        })
    }

    pub fn get_block_hash(&self) -> &str {
        &self.block_hash
    }

    pub fn get_confirmations(&self) -> u64 {
        self.confirmations
    }

    pub fn get_cumulative_gas_used(&self) -> u64 {
        self.cumulative_gas_used
    }

    pub fn get_gas_price(&self) -> &BigUint {
        &self.gas_price
    }

    pub fn get_nonce(&self) -> u64 {
        self.nonce
    }

    pub fn get_transaction_index(&self) -> u64 {
        self.transaction_index
    }

    /// `gas_used × gas_price` in wei
    pub(crate) fn fee_wei(&self, base: &EventBase) -> BigUint {
        BigUint::from(base.gas_used) * &self.gas_price
    }
}

/// Which explorer listing a raw record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Normal,
    Internal,
    Erc20,
    Erc721,
    Erc1155,
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" | "tx" | "txlist" => Ok(EventKind::Normal),
            "internal" | "txlistinternal" => Ok(EventKind::Internal),
            "erc20" | "tokentx" => Ok(EventKind::Erc20),
            "erc721" | "tokennfttx" => Ok(EventKind::Erc721),
            "erc1155" | "token1155tx" => Ok(EventKind::Erc1155),
            _ => Err(format!(
                "Invalid event kind: {s}. Valid options: normal, internal, erc20, erc721, erc1155"
            )),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Normal => write!(f, "normal"),
            EventKind::Internal => write!(f, "internal"),
            EventKind::Erc20 => write!(f, "erc20"),
            EventKind::Erc721 => write!(f, "erc721"),
            EventKind::Erc1155 => write!(f, "erc1155"),
        }
    }
}

/// Any explorer event, tagged by shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainEvent {
    Transaction(Transaction),
    Internal(InternalTransaction),
    Erc20(Erc20Transfer),
    Erc721(Erc721Transfer),
    Erc1155(Erc1155Transfer),
}

impl ChainEvent {
    pub fn from_raw(kind: EventKind, raw: &RawRecord) -> Result<ChainEvent> {
        Ok(match kind {
            EventKind::Normal => ChainEvent::Transaction(Transaction::from_raw(raw)?),
            EventKind::Internal => ChainEvent::Internal(InternalTransaction::from_raw(raw)?),
            EventKind::Erc20 => ChainEvent::Erc20(Erc20Transfer::from_raw(raw)?),
            EventKind::Erc721 => ChainEvent::Erc721(Erc721Transfer::from_raw(raw)?),
            EventKind::Erc1155 => ChainEvent::Erc1155(Erc1155Transfer::from_raw(raw)?),
        })
    }

    pub fn kind(&self) -> EventKind {
        match self {
            ChainEvent::Transaction(_) => EventKind::Normal,
            ChainEvent::Internal(_) => EventKind::Internal,
            ChainEvent::Erc20(_) => EventKind::Erc20,
            ChainEvent::Erc721(_) => EventKind::Erc721,
            ChainEvent::Erc1155(_) => EventKind::Erc1155,
        }
    }

    pub fn base(&self) -> &EventBase {
        match self {
            ChainEvent::Transaction(tx) => tx.base(),
            ChainEvent::Internal(tx) => tx.base(),
            ChainEvent::Erc20(transfer) => transfer.base(),
            ChainEvent::Erc721(transfer) => transfer.base(),
            ChainEvent::Erc1155(transfer) => transfer.base(),
        }
    }

    /// `None` for shapes without block-inclusion metadata
    pub fn details(&self) -> Option<&EventDetails> {
        match self {
            ChainEvent::Transaction(tx) => Some(tx.details()),
            ChainEvent::Internal(_) => None,
            ChainEvent::Erc20(transfer) => Some(transfer.details()),
            ChainEvent::Erc721(transfer) => Some(transfer.details()),
            ChainEvent::Erc1155(transfer) => Some(transfer.details()),
        }
    }

    pub fn token(&self) -> Option<&TokenInfo> {
        match self {
            ChainEvent::Erc20(transfer) => Some(transfer.token()),
            ChainEvent::Erc721(transfer) => Some(transfer.token()),
            ChainEvent::Erc1155(transfer) => Some(transfer.token()),
            ChainEvent::Transaction(_) | ChainEvent::Internal(_) => None,
        }
    }

    /// Fee in wei, or `None` when the shape carries no gas price
    pub fn fee_wei(&self) -> Option<BigUint> {
        let base = self.base();
        self.details().map(|details| details.fee_wei(base))
    }

    pub fn fee_ether(&self) -> Option<BigRational> {
        self.fee_wei()
            .map(|fee| convert(&fee, Denomination::Ether))
    }

    /// Native-currency value in wei, for shapes that move ether
    pub fn value_wei(&self) -> Option<&BigUint> {
        match self {
            ChainEvent::Transaction(tx) => Some(tx.get_value()),
            ChainEvent::Internal(tx) => Some(tx.get_value()),
            _ => None,
        }
    }

    pub fn to_raw(&self) -> &RawRecord {
        match self {
            ChainEvent::Transaction(tx) => tx.to_raw(),
            ChainEvent::Internal(tx) => tx.to_raw(),
            ChainEvent::Erc20(transfer) => transfer.to_raw(),
            ChainEvent::Erc721(transfer) => transfer.to_raw(),
            ChainEvent::Erc1155(transfer) => transfer.to_raw(),
        }
    }
}

/// Parse an explorer `isError` flag ("0" success, anything else failed)
pub(crate) fn error_flag(fields: &RawFields<'_>) -> Result<u64> {
    fields.decimal_u64("isError")
}

/// Token transfers always report `input` as the literal "deprecated"
pub(crate) fn require_deprecated_input(base: &EventBase) -> Result<()> {
    if base.get_input() != DEPRECATED_INPUT {
        return Err(EconomicsError::MalformedPayload(format!(
            "Expected '{DEPRECATED_INPUT}' value for 'input' in token transfer {}, got: '{}'",
            base.get_hash(),
            base.get_input()
        )));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::utils::raw_record;
    use num_bigint::BigInt;

    /// Base and detailed fields of a plain 21000-gas transfer at 50 gwei
    pub(crate) fn detailed_event() -> RawRecord {
        raw_record([
            ("blockNumber", "14923678"),
            ("timeStamp", "1654646411"),
            (
                "hash",
                "0xc52783ad354aecc04c670047754f062e3d6d04e8f5b24774472651f9c3882c60",
            ),
            ("nonce", "1"),
            (
                "blockHash",
                "0x7e1638fd2c6bdd05ffd83c1cf06c63e2f67d0f802084bef076d06bdcf86d1bb0",
            ),
            ("transactionIndex", "61"),
            ("from", "0x9aa99c23f67c81701c772b106b4f83f6e858dd2e"),
            ("to", "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
            ("gas", "21000"),
            ("gasPrice", "50000000000"),
            ("input", "0x"),
            ("contractAddress", ""),
            ("cumulativeGasUsed", "4729013"),
            ("gasUsed", "21000"),
            ("confirmations", "122"),
        ])
    }

    pub(crate) fn with(mut raw: RawRecord, pairs: &[(&str, &str)]) -> RawRecord {
        for (k, v) in pairs {
            raw.insert(k.to_string(), v.to_string());
        }
        raw
    }

    #[test]
    fn test_base_and_details() {
        let raw = detailed_event();
        let fields = RawFields::new(&raw);
        let base = EventBase::from_fields(&fields).unwrap();
        let details = EventDetails::from_fields(&fields).unwrap();

        assert_eq!(base.get_block_number(), 14_923_678);
        assert_eq!(base.get_contract_address(), None);
        assert!(!base.is_contract_creation());
        assert_eq!(details.get_transaction_index(), 61);
        assert_eq!(details.get_gas_price(), &BigUint::from(50_000_000_000u64));
    }

    #[test]
    fn test_fee_computation() {
        let raw = with(detailed_event(), &[("value", "0"), ("isError", "0"), ("txreceipt_status", "1")]);
        let event = ChainEvent::from_raw(EventKind::Normal, &raw).unwrap();

        assert_eq!(event.fee_wei(), Some(BigUint::from(1_050_000_000_000_000u64)));
        assert_eq!(
            event.fee_ether(),
            Some(BigRational::new(BigInt::from(105), BigInt::from(100_000)))
        );
    }

    #[test]
    fn test_internal_fee_is_not_applicable() {
        let raw = raw_record([
            ("blockNumber", "14923678"),
            ("timeStamp", "1654646411"),
            ("hash", "0xc52783ad354aecc04c670047754f062e3d6d04e8f5b24774472651f9c3882c60"),
            ("from", "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
            ("to", "0x9aa99c23f67c81701c772b106b4f83f6e858dd2e"),
            ("value", "1000000000000000000"),
            ("contractAddress", ""),
            ("input", ""),
            ("type", "call"),
            ("gas", "2300"),
            ("gasUsed", "0"),
            ("traceId", "0_1"),
            ("isError", "0"),
            ("errCode", ""),
        ]);
        let event = ChainEvent::from_raw(EventKind::Internal, &raw).unwrap();

        assert_eq!(event.kind(), EventKind::Internal);
        assert_eq!(event.fee_wei(), None);
        assert_eq!(event.fee_ether(), None);
        assert!(event.details().is_none());
        assert_eq!(event.value_wei(), Some(&BigUint::from(1_000_000_000_000_000_000u64)));
    }

    #[test]
    fn test_event_kind_parsing() {
        assert_eq!("erc20".parse::<EventKind>().unwrap(), EventKind::Erc20);
        assert_eq!("TokenNftTx".parse::<EventKind>().unwrap(), EventKind::Erc721);
        assert_eq!("txlistinternal".parse::<EventKind>().unwrap(), EventKind::Internal);
        assert!("erc777".parse::<EventKind>().is_err());
        assert_eq!(EventKind::Erc1155.to_string(), "erc1155");
    }

    #[test]
    fn test_sum_type_dispatch() {
        let raw = with(
            detailed_event(),
            &[
                ("input", "deprecated"),
                ("tokenName", "Wrapped Ether"),
                ("tokenSymbol", "WETH"),
                ("tokenDecimal", "18"),
                ("value", "2500000000000000000"),
            ],
        );
        let event = ChainEvent::from_raw(EventKind::Erc20, &raw).unwrap();

        assert_eq!(event.kind(), EventKind::Erc20);
        assert_eq!(event.token().map(TokenInfo::get_symbol), Some("WETH"));
        assert_eq!(event.value_wei(), None);
        assert!(event.fee_wei().is_some());
        assert_eq!(event.to_raw(), &raw);
    }

    #[test]
    fn test_malformed_decimal_field() {
        let raw = with(detailed_event(), &[("gasUsed", "0x5208"), ("value", "0"), ("isError", "0")]);
        assert!(matches!(
            Transaction::from_raw(&raw),
            Err(EconomicsError::MalformedDecimal { ref field, .. }) if field == "gasUsed"
        ));
    }
}
