//! Typed access to raw string-to-string records
//!
//! Upstream collaborators hand over decoded JSON objects as flat string maps.
//! `RawFields` turns missing keys into `MissingField` and delegates number
//! parsing to `core::quantity`, so every record constructor reads the same way.

use crate::core::quantity::{parse_decimal, HexQuantity};
use crate::error::{EconomicsError, Result};
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use std::collections::HashMap;

/// Field name to string value, exactly as decoded from the upstream payload
pub type RawRecord = HashMap<String, String>;

/// Read-only accessor over a `RawRecord`
#[derive(Debug, Clone, Copy)]
pub struct RawFields<'a> {
    raw: &'a RawRecord,
}

impl<'a> RawFields<'a> {
    pub fn new(raw: &'a RawRecord) -> Self {
        RawFields { raw }
    }

    pub fn required(&self, key: &str) -> Result<&'a str> {
        self.raw
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| EconomicsError::MissingField(key.to_string()))
    }

    pub fn required_string(&self, key: &str) -> Result<String> {
        self.required(key).map(str::to_string)
    }

    /// Absent keys and empty strings both read as `None`
    pub fn optional(&self, key: &str) -> Option<&'a str> {
        self.raw
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn optional_string(&self, key: &str) -> Option<String> {
        self.optional(key).map(str::to_string)
    }

    pub fn hex(&self, key: &str) -> Result<BigUint> {
        Ok(HexQuantity::parse(self.required(key)?)?.into_inner())
    }

    pub fn optional_hex(&self, key: &str) -> Result<Option<BigUint>> {
        self.optional(key)
            .map(|value| HexQuantity::parse(value).map(HexQuantity::into_inner))
            .transpose()
    }

    pub fn hex_u64(&self, key: &str) -> Result<u64> {
        let value = self.hex(key)?;
        fit_u64(key, &value)
    }

    pub fn decimal(&self, key: &str) -> Result<BigUint> {
        parse_decimal(key, self.required(key)?)
    }

    pub fn decimal_u64(&self, key: &str) -> Result<u64> {
        let value = self.decimal(key)?;
        fit_u64(key, &value)
    }

    pub fn optional_decimal_u64(&self, key: &str) -> Result<Option<u64>> {
        self.optional(key)
            .map(|value| parse_decimal(key, value).and_then(|v| fit_u64(key, &v)))
            .transpose()
    }
}

fn fit_u64(key: &str, value: &BigUint) -> Result<u64> {
    value.to_u64().ok_or_else(|| {
        EconomicsError::MalformedPayload(format!("Field '{key}' exceeds 64-bit range: {value}"))
    })
}

/// Build a `RawRecord` from literal pairs
pub fn raw_record<K, V, I>(pairs: I) -> RawRecord
where
    K: Into<String>,
    V: Into<String>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
