use super::{require_deprecated_input, EventBase, EventDetails};
use crate::core::monetary::scale_down;
use crate::error::{EconomicsError, Result};
use crate::utils::{RawFields, RawRecord};
use log::debug;
use num_bigint::BigUint;
use num_rational::BigRational;

/// Sentinel the explorer puts in `input` for every token transfer event
pub const DEPRECATED_INPUT: &str = "deprecated";

/// Name and symbol of the token contract
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenInfo {
    name: String,
    symbol: String,
}

impl TokenInfo {
    fn from_fields(fields: &RawFields<'_>) -> Result<TokenInfo> {
        Ok(TokenInfo {
            name: fields.required_string("tokenName")?,
            symbol: fields.required_string("tokenSymbol")?,
        })
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_symbol(&self) -> &str {
        &self.symbol
    }
}

fn token_decimal(fields: &RawFields<'_>) -> Result<u32> {
    let decimals = fields.decimal_u64("tokenDecimal")?;
    u32::try_from(decimals).map_err(|_| {
        EconomicsError::MalformedPayload(format!("Token decimals out of range: {decimals}"))
    })
}

/// Parse the parts every token transfer shares, enforcing the input sentinel first
fn parse_common(fields: &RawFields<'_>) -> Result<(EventBase, EventDetails, TokenInfo)> {
    let base = EventBase::from_fields(fields)?;
    require_deprecated_input(&base)?;
    let details = EventDetails::from_fields(fields)?;
    let token = TokenInfo::from_fields(fields)?;
    Ok((base, details, token))
}

/// A fungible (ERC-20) token transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Erc20Transfer {
    base: EventBase,
    details: EventDetails,
    token: TokenInfo,
    token_decimal: u32,
    value: BigUint,
    raw: RawRecord,
}

impl Erc20Transfer {
    pub fn from_raw(raw: &RawRecord) -> Result<Erc20Transfer> {
        let fields = RawFields::new(raw);
        let (base, details, token) = parse_common(&fields)?;
        let transfer = Erc20Transfer {
            base,
            details,
            token,
            token_decimal: token_decimal(&fields)?,
            value: fields.decimal("value")?,
            raw: raw.clone(),
        };

        debug!(
            "Parsed ERC-20 transfer of {} in {}",
            transfer.token.symbol,
            transfer.base.get_hash()
        );
        Ok(transfer)
    }

    pub fn base(&self) -> &EventBase {
        &self.base
    }

    pub fn details(&self) -> &EventDetails {
        &self.details
    }

    pub fn token(&self) -> &TokenInfo {
        &self.token
    }

    pub fn get_token_decimal(&self) -> u32 {
        self.token_decimal
    }

    /// Amount in the token's smallest unit
    pub fn get_value(&self) -> &BigUint {
        &self.value
    }

    /// Human-scaled amount: `value / 10^token_decimal`
    pub fn value_scaled(&self) -> BigRational {
        scale_down(&self.value, self.token_decimal)
    }

    pub fn fee_wei(&self) -> BigUint {
        self.details.fee_wei(&self.base)
    }

    pub fn to_raw(&self) -> &RawRecord {
        &self.raw
    }
}

/// A non-fungible (ERC-721) token transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Erc721Transfer {
    base: EventBase,
    details: EventDetails,
    token: TokenInfo,
    token_id: BigUint,
    token_decimal: Option<u32>,
    raw: RawRecord,
}

impl Erc721Transfer {
    pub fn from_raw(raw: &RawRecord) -> Result<Erc721Transfer> {
        let fields = RawFields::new(raw);
        let (base, details, token) = parse_common(&fields)?;
        let token_decimal = match fields.optional("tokenDecimal") {
            Some(_) => Some(token_decimal(&fields)?),
            None => None,
        };

        let transfer = Erc721Transfer {
            base,
            details,
            token,
            token_id: fields.decimal("tokenID")?,
            token_decimal,
            raw: raw.clone(),
        };

        debug!(
            "Parsed ERC-721 transfer of {} #{} in {}",
            transfer.token.symbol,
            transfer.token_id,
            transfer.base.get_hash()
        );
        Ok(transfer)
    }

    pub fn base(&self) -> &EventBase {
        &self.base
    }

    pub fn details(&self) -> &EventDetails {
        &self.details
    }

    pub fn token(&self) -> &TokenInfo {
        &self.token
    }

    pub fn get_token_id(&self) -> &BigUint {
        &self.token_id
    }

    pub fn get_token_decimal(&self) -> Option<u32> {
        self.token_decimal
    }

    pub fn fee_wei(&self) -> BigUint {
        self.details.fee_wei(&self.base)
    }

    pub fn to_raw(&self) -> &RawRecord {
        &self.raw
    }
}

/// A multi-token (ERC-1155) transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Erc1155Transfer {
    base: EventBase,
    details: EventDetails,
    token: TokenInfo,
    token_id: BigUint,
    token_value: BigUint,
    raw: RawRecord,
}

impl Erc1155Transfer {
    pub fn from_raw(raw: &RawRecord) -> Result<Erc1155Transfer> {
        let fields = RawFields::new(raw);
        let (base, details, token) = parse_common(&fields)?;
        let transfer = Erc1155Transfer {
            base,
            details,
            token,
            token_id: fields.decimal("tokenID")?,
            token_value: fields.decimal("tokenValue")?,
            raw: raw.clone(),
        };

        debug!(
            "Parsed ERC-1155 transfer of {} x{} in {}",
            transfer.token.symbol,
            transfer.token_value,
            transfer.base.get_hash()
        );
        Ok(transfer)
    }

    pub fn base(&self) -> &EventBase {
        &self.base
    }

    pub fn details(&self) -> &EventDetails {
        &self.details
    }

    pub fn token(&self) -> &TokenInfo {
        &self.token
    }

    pub fn get_token_id(&self) -> &BigUint {
        &self.token_id
    }

    pub fn get_token_value(&self) -> &BigUint {
        &self.token_value
    }

    pub fn fee_wei(&self) -> BigUint {
        self.details.fee_wei(&self.base)
    }

    pub fn to_raw(&self) -> &RawRecord {
        &self.raw
    }
}
