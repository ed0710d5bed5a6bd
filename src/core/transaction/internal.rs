use super::{error_flag, EventBase};
use crate::core::monetary::{convert, Denomination};
use crate::error::Result;
use crate::utils::{RawFields, RawRecord};
use log::debug;
use num_bigint::BigUint;
use num_rational::BigRational;

/// A value transfer made by contract code during another transaction.
///
/// Internal calls inherit the gas price of the outer transaction, so there is
/// no fee to derive here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalTransaction {
    base: EventBase,
    value: BigUint,
    is_error: u64,
    call_type: Option<String>,
    trace_id: Option<String>,
    err_code: Option<String>,
    raw: RawRecord,
}

impl InternalTransaction {
    pub fn from_raw(raw: &RawRecord) -> Result<InternalTransaction> {
        let fields = RawFields::new(raw);
        let tx = InternalTransaction {
            base: EventBase::from_fields(&fields)?,
            value: fields.decimal("value")?,
            is_error: error_flag(&fields)?,
            call_type: fields.optional_string("type"),
            trace_id: fields.optional_string("traceId"),
            err_code: fields.optional_string("errCode"),
            raw: raw.clone(),
        };

        debug!("Parsed internal transaction {}", tx.base.get_hash());
        Ok(tx)
    }

    pub fn base(&self) -> &EventBase {
        &self.base
    }

    pub fn get_value(&self) -> &BigUint {
        &self.value
    }

    pub fn get_error_flag(&self) -> u64 {
        self.is_error
    }

    pub fn is_error(&self) -> bool {
        self.is_error != 0
    }

    /// Call type reported by the tracer, e.g. "call", "create", "suicide"
    pub fn get_call_type(&self) -> Option<&str> {
        self.call_type.as_deref()
    }

    pub fn get_trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    pub fn get_err_code(&self) -> Option<&str> {
        self.err_code.as_deref()
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
