//! Protocol integer parsing
//!
//! Node JSON-RPC encodes block quantities as `0x`-prefixed hex strings while explorer
//! APIs send transaction fields as plain decimal strings. Both parse into `BigUint`
//! so wei amounts never lose precision.

use crate::error::{EconomicsError, Result};
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use std::fmt;
use std::str::FromStr;

/// A non-negative integer parsed from a `0x`-prefixed hex string
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HexQuantity(BigUint);

impl HexQuantity {
    /// Parse `0x` (or `0X`) followed by at least one hex digit.
    ///
    /// # Examples
    /// ```
    /// use chain_economics::core::HexQuantity;
    /// assert_eq!(HexQuantity::parse("0x1a").unwrap().to_u64(), Some(26));
    /// assert!(HexQuantity::parse("1a").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<HexQuantity> {
        let digits = raw
            .strip_prefix("0x")
            .or_else(|| raw.strip_prefix("0X"))
            .ok_or_else(|| EconomicsError::MalformedHex(raw.to_string()))?;

        // from_str_radix tolerates '_' and a leading '+', the wire format does not
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(EconomicsError::MalformedHex(raw.to_string()));
        }

        BigUint::parse_bytes(digits.as_bytes(), 16)
            .map(HexQuantity)
            .ok_or_else(|| EconomicsError::MalformedHex(raw.to_string()))
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }

    pub fn into_inner(self) -> BigUint {
        self.0
    }

    /// Returns `None` when the quantity does not fit in 64 bits
    pub fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }
}

impl FromStr for HexQuantity {
    type Err = EconomicsError;

    fn from_str(s: &str) -> Result<Self> {
        HexQuantity::parse(s)
    }
}

impl fmt::Display for HexQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<HexQuantity> for BigUint {
    fn from(q: HexQuantity) -> Self {
        q.0
    }
}

/// Parse an explorer decimal-in-string field (ASCII digits only, no sign)
pub fn parse_decimal(field: &str, raw: &str) -> Result<BigUint> {
    let malformed = || EconomicsError::MalformedDecimal {
        field: field.to_string(),
        value: raw.to_string(),
    };

    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }

    BigUint::parse_bytes(raw.as_bytes(), 10).ok_or_else(malformed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_quantity() {
        assert_eq!(HexQuantity::parse("0x1a").unwrap().to_u64(), Some(26));
        assert_eq!(HexQuantity::parse("0X1A").unwrap().to_u64(), Some(26));
        assert_eq!(HexQuantity::parse("0x0").unwrap().to_u64(), Some(0));
        assert_eq!("0xff".parse::<HexQuantity>().unwrap().to_u64(), Some(255));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        // Missing prefix
        assert_eq!(
            HexQuantity::parse("1a"),
            Err(EconomicsError::MalformedHex("1a".to_string()))
        );
        // No digits after the prefix
        assert!(HexQuantity::parse("0x").is_err());
        assert!(HexQuantity::parse("").is_err());
        assert!(HexQuantity::parse("0xg1").is_err());
        assert!(HexQuantity::parse("0x1_0").is_err());
        assert!(HexQuantity::parse("0x+1").is_err());
        assert!(HexQuantity::parse(" 0x1").is_err());
    }

    #[test]
    fn test_parse_beyond_u128() {
        // 2^160, wider than any primitive integer
        let raw = format!("0x1{}", "0".repeat(40));
        let quantity = HexQuantity::parse(&raw).unwrap();
        assert_eq!(quantity.to_u64(), None);
        assert_eq!(quantity.value(), &(BigUint::from(1u8) << 160));
        assert_eq!(quantity.to_string(), raw);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("gas", "21000").unwrap(), BigUint::from(21_000u32));
        assert_eq!(
            parse_decimal("value", "123456789012345678901234567890").unwrap(),
            BigUint::parse_bytes(b"123456789012345678901234567890", 10).unwrap()
        );

        for bad in ["", "-1", "0x10", "1.5", "1e3", " 1"] {
            assert!(matches!(
                parse_decimal("gas", bad),
                Err(EconomicsError::MalformedDecimal { .. })
            ));
        }
    }
}
