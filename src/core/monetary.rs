//! Ether denominations and exact unit conversion
//!
//! Amounts are carried in wei as `BigUint` and converted to larger units as
//! `BigRational`, so sums over thousands of blocks never drift.
//!
//! ## Monetary Units
//! - **Wei**: The smallest indivisible unit
//! - **Gwei**: 10^9 wei, the customary unit for gas prices
//! - **Ether**: 10^18 wei
use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::{One, Zero};
use std::fmt;

/// Number of wei in one gwei
pub const WEI_PER_GWEI: u64 = 1_000_000_000;

/// Number of wei in one ether
pub const WEI_PER_ETHER: u64 = 1_000_000_000_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Denomination {
    Wei,
    Gwei,
    Ether,
}

impl Denomination {
    /// Number of decimal places between wei and this unit
    pub fn decimals(self) -> u32 {
        match self {
            Denomination::Wei => 0,
            Denomination::Gwei => 9,
            Denomination::Ether => 18,
        }
    }

    pub fn wei_factor(self) -> BigUint {
        pow10(self.decimals())
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Denomination::Wei => write!(f, "wei"),
            Denomination::Gwei => write!(f, "gwei"),
            Denomination::Ether => write!(f, "ether"),
        }
    }
}

pub(crate) fn pow10(exp: u32) -> BigUint {
    num_traits::pow(BigUint::from(10u8), exp as usize)
}

/// Convert a wei amount into `to` as an exact rational
///
/// # Examples
/// ```
/// use chain_economics::core::monetary::{convert, Denomination};
/// use num_bigint::BigUint;
/// use num_rational::BigRational;
///
/// let ether = convert(&BigUint::from(500_000_000_000_000_000u64), Denomination::Ether);
/// assert_eq!(ether, BigRational::new(1.into(), 2.into()));
/// ```
pub fn convert(wei: &BigUint, to: Denomination) -> BigRational {
    scale_down(wei, to.decimals())
}

/// Convert an amount expressed in `from` back to wei
pub fn to_wei(amount: &BigRational, from: Denomination) -> BigRational {
    amount * BigRational::from_integer(BigInt::from(from.wei_factor()))
}

/// Divide an integer amount by `10^decimals`, exactly
pub fn scale_down(amount: &BigUint, decimals: u32) -> BigRational {
    BigRational::new(BigInt::from(amount.clone()), BigInt::from(pow10(decimals)))
}

/// Render `amount / 10^decimals` as an exact decimal string with trailing zeros trimmed
///
/// # Examples
/// ```
/// use chain_economics::core::monetary::format_units;
/// use num_bigint::BigUint;
/// assert_eq!(format_units(&BigUint::from(1_050_000_000_000_000u64), 18), "0.00105");
/// assert_eq!(format_units(&BigUint::from(2_000_000_000u64), 9), "2");
/// ```
pub fn format_units(amount: &BigUint, decimals: u32) -> String {
    if decimals == 0 {
        return amount.to_string();
    }

    let factor = pow10(decimals);
    let whole = amount / &factor;
    let fraction = amount % &factor;
    if fraction.is_zero() {
        return whole.to_string();
    }

    let padded = format!("{:0>width$}", fraction.to_string(), width = decimals as usize);
    format!("{whole}.{}", padded.trim_end_matches('0'))
}

/// Render a wei amount in `denomination` with its unit suffix, e.g. `"0.02 ether"`
pub fn format_amount(wei: &BigUint, denomination: Denomination) -> String {
    format!("{} {denomination}", format_units(wei, denomination.decimals()))
}

/// True when the rational is a whole number (no fractional wei remain)
pub fn is_whole(value: &BigRational) -> bool {
    value.denom().is_one()
}
