use super::{error_flag, EventBase, EventDetails};
use crate::core::monetary::{convert, Denomination};
use crate::error::{EconomicsError, Result};
use crate::utils::{RawFields, RawRecord};
use log::debug;
use num_bigint::BigUint;
use num_rational::BigRational;

/// Receipt status of a plain transaction; only reported after Byzantium
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceiptStatus {
    Failed,
    Success,
    /// The explorer sent no status (pre-Byzantium transactions)
    Unknown,
}

impl ReceiptStatus {
    fn from_fields(fields: &RawFields<'_>) -> Result<ReceiptStatus> {
        match fields.optional("txreceipt_status") {
            None => Ok(ReceiptStatus::Unknown),
            Some("0") => Ok(ReceiptStatus::Failed),
            Some("1") => Ok(ReceiptStatus::Success),
            Some(other) => Err(EconomicsError::MalformedDecimal {
                field: "txreceipt_status".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// A plain (external) transaction from an account's transaction list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    base: EventBase,
    details: EventDetails,
    value: BigUint,
    is_error: u64,
    txreceipt_status: ReceiptStatus,
    raw: RawRecord,
}

impl Transaction {
    pub fn from_raw(raw: &RawRecord) -> Result<Transaction> {
        let fields = RawFields::new(raw);
        let tx = Transaction {
            base: EventBase::from_fields(&fields)?,
            details: EventDetails::from_fields(&fields)?,
            value: fields.decimal("value")?,
            is_error: error_flag(&fields)?,
            txreceipt_status: ReceiptStatus::from_fields(&fields)?,
            raw: raw.clone(),
        };

        debug!("Parsed transaction {}", tx.base.get_hash());
        Ok(tx)
    }

    pub fn base(&self) -> &EventBase {
        &self.base
    }

    pub fn details(&self) -> &EventDetails {
        &self.details
    }

    pub fn get_value(&self) -> &BigUint {
        &self.value
    }

    /// Raw `isError` flag: 0 for success, nonzero when the call reverted
    pub fn get_error_flag(&self) -> u64 {
        self.is_error
    }

    pub fn is_error(&self) -> bool {
        self.is_error != 0
    }

    pub fn get_txreceipt_status(&self) -> ReceiptStatus {
        self.txreceipt_status
    }

    pub fn fee_wei(&self) -> BigUint {
        self.details.fee_wei(&self.base)
    }

    pub fn fee_ether(&self) -> BigRational {
        convert(&self.fee_wei(), Denomination::Ether)
    }

    pub fn value_gwei(&self) -> BigRational {
        convert(&self.value, Denomination::Gwei)
    }

    pub fn value_ether(&self) -> BigRational {
        convert(&self.value, Denomination::Ether)
    }

    pub fn to_raw(&self) -> &RawRecord {
        &self.raw
    }
}
