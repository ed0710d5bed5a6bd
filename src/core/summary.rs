use crate::core::block::BlockRecord;
use crate::core::fork_schedule::ForkSchedule;
use crate::core::monetary::{convert, format_amount, Denomination};
use crate::core::transaction::ChainEvent;
use crate::core::uncle::UncleRecord;
use chrono::{DateTime, Utc};
use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::Zero;
use std::collections::BTreeMap;
use std::fmt;

/// Supply totals over a set of blocks and the uncles they include
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuanceSummary {
    pub block_count: usize,
    pub uncle_count: usize,
    pub base_issuance_wei: BigUint,
    pub uncle_rewards_wei: BigUint,
    pub burned_wei: BigUint,
}

impl IssuanceSummary {
    pub fn from_records(
        blocks: &[BlockRecord],
        uncles: &[UncleRecord],
        schedule: &ForkSchedule,
    ) -> IssuanceSummary {
        let base_issuance_wei = blocks
            .iter()
            .map(|block| block.base_issuance(schedule))
            .sum();
        let uncle_rewards_wei = uncles
            .iter()
            .map(|uncle| uncle.uncle_reward(schedule))
            .sum();
        let burned_wei = blocks.iter().map(BlockRecord::burned_wei).sum();

        IssuanceSummary {
            block_count: blocks.len(),
            uncle_count: uncles.len(),
            base_issuance_wei,
            uncle_rewards_wei,
            burned_wei,
        }
    }

    /// Newly minted wei: block rewards plus uncle rewards
    pub fn total_issuance_wei(&self) -> BigUint {
        &self.base_issuance_wei + &self.uncle_rewards_wei
    }

    /// Issuance minus burn; negative when more was burned than minted
    pub fn net_issuance_wei(&self) -> BigInt {
        BigInt::from(self.total_issuance_wei()) - BigInt::from(self.burned_wei.clone())
    }

    pub fn total_issuance_ether(&self) -> BigRational {
        convert(&self.total_issuance_wei(), Denomination::Ether)
    }

    pub fn burned_ether(&self) -> BigRational {
        convert(&self.burned_wei, Denomination::Ether)
    }

    pub fn net_issuance_ether(&self) -> BigRational {
        let factor = BigInt::from(Denomination::Ether.wei_factor());
        BigRational::new(self.net_issuance_wei(), factor)
    }
}

impl fmt::Display for IssuanceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let net = self.net_issuance_wei();
        let sign = if net < BigInt::zero() { "-" } else { "" };

        writeln!(f, "Issuance Summary:")?;
        writeln!(f, "  Blocks: {}", self.block_count)?;
        writeln!(f, "  Uncles: {}", self.uncle_count)?;
        writeln!(
            f,
            "  Base issuance: {}",
            format_amount(&self.base_issuance_wei, Denomination::Ether)
        )?;
        writeln!(
            f,
            "  Uncle rewards: {}",
            format_amount(&self.uncle_rewards_wei, Denomination::Ether)
        )?;
        writeln!(
            f,
            "  Burned: {}",
            format_amount(&self.burned_wei, Denomination::Ether)
        )?;
        writeln!(
            f,
            "  Net issuance: {sign}{}",
            format_amount(net.magnitude(), Denomination::Ether)
        )
    }
}

/// Wei burned per UTC day
pub fn burned_by_day(blocks: &[BlockRecord]) -> BTreeMap<DateTime<Utc>, BigUint> {
    let mut buckets: BTreeMap<DateTime<Utc>, BigUint> = BTreeMap::new();
    for block in blocks {
        *buckets.entry(block.day()).or_default() += block.burned_wei();
    }
    buckets
}

/// Sum of fees over events that carry a gas price; internal transactions are skipped
pub fn total_fees_wei(events: &[ChainEvent]) -> BigUint {
    events.iter().filter_map(ChainEvent::fee_wei).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::block::tests::{sample_block, sample_header};
    use crate::core::monetary::WEI_PER_ETHER;

    fn block_at(number: u64, timestamp: u64) -> BlockRecord {
        let mut raw = sample_block(number);
        raw.insert("timestamp".to_string(), format!("{timestamp:#x}"));
        BlockRecord::from_raw(&raw).unwrap()
    }

    #[test]
    fn test_summary_totals() {
        let schedule = ForkSchedule::mainnet();
        let blocks = vec![block_at(12_965_000, 1_628_166_821), block_at(12_965_001, 1_628_166_835)];
        let uncles =
            vec![UncleRecord::from_raw(&sample_header(12_964_999), 12_965_001, 0).unwrap()];

        let summary = IssuanceSummary::from_records(&blocks, &uncles, &schedule);

        assert_eq!(summary.block_count, 2);
        assert_eq!(summary.uncle_count, 1);
        assert_eq!(summary.base_issuance_wei, BigUint::from(4 * WEI_PER_ETHER));
        // Depth 2 uncle: 2 ether * 6 / 8
        assert_eq!(summary.uncle_rewards_wei, BigUint::from(1_500_000_000_000_000_000u64));
        assert_eq!(summary.burned_wei, BigUint::from(40_000_000_000_000_000u64));
        assert_eq!(
            summary.net_issuance_wei(),
            BigInt::from(5_460_000_000_000_000_000u64)
        );
        assert_eq!(
            summary.total_issuance_ether(),
            BigRational::new(BigInt::from(11), BigInt::from(2))
        );
    }

    #[test]
    fn test_net_issuance_can_go_negative() {
        let summary = IssuanceSummary {
            block_count: 1,
            uncle_count: 0,
            base_issuance_wei: BigUint::zero(),
            uncle_rewards_wei: BigUint::zero(),
            burned_wei: BigUint::from(WEI_PER_ETHER / 4),
        };

        assert_eq!(summary.net_issuance_wei(), BigInt::from(-250_000_000_000_000_000i64));
        assert_eq!(
            summary.net_issuance_ether(),
            BigRational::new(BigInt::from(-1), BigInt::from(4))
        );
        assert!(summary.to_string().contains("Net issuance: -0.25 ether"));
    }

    #[test]
    fn test_burned_by_day() {
        // Two blocks on 2021-08-05 and one on 2021-08-06 (UTC)
        let blocks = vec![
            block_at(12_965_000, 1_628_166_821),
            block_at(12_965_001, 1_628_207_999),
            block_at(12_971_000, 1_628_208_000),
        ];

        let buckets = burned_by_day(&blocks);
        let keys: Vec<i64> = buckets.keys().map(|d| d.timestamp()).collect();

        assert_eq!(keys, vec![1_628_121_600, 1_628_208_000]);
        assert_eq!(
            buckets.values().next(),
            Some(&BigUint::from(40_000_000_000_000_000u64))
        );
    }

    #[test]
    fn test_empty_summary() {
        let summary = IssuanceSummary::from_records(&[], &[], &ForkSchedule::mainnet());
        assert!(summary.total_issuance_wei().is_zero());
        assert!(summary.net_issuance_wei().is_zero());
        assert!(total_fees_wei(&[]).is_zero());
    }
}
