use crate::core::block::BlockHeader;
use crate::core::fork_schedule::ForkSchedule;
use crate::core::monetary::{convert, Denomination};
use crate::error::{EconomicsError, Result};
use crate::utils::{RawFields, RawRecord};
use log::debug;
use num_bigint::BigUint;
use num_rational::BigRational;
use num_traits::Zero;

/// Uncles older than this many blocks behind the including block earn nothing
pub const MAX_UNCLE_DEPTH: u64 = 8;

/// A stale block referenced by a later canonical block for a partial reward
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UncleRecord {
    header: BlockHeader,
    included_in_block_number: u64,
    uncle_index: usize,
    raw: RawRecord,
}

impl UncleRecord {
    pub fn from_raw(
        raw: &RawRecord,
        included_in_block_number: u64,
        uncle_index: usize,
    ) -> Result<UncleRecord> {
        let header = BlockHeader::from_fields(&RawFields::new(raw))?;

        if header.get_number() >= included_in_block_number {
            return Err(EconomicsError::MalformedPayload(format!(
                "Uncle {} at height {} is not older than its including block {}",
                header.get_hash(),
                header.get_number(),
                included_in_block_number
            )));
        }

        debug!(
            "Parsed uncle {} at height {} (included in {included_in_block_number}, index {uncle_index})",
            header.get_hash(),
            header.get_number()
        );
        Ok(UncleRecord {
            header,
            included_in_block_number,
            uncle_index,
            raw: raw.clone(),
        })
    }

    pub fn header(&self) -> &BlockHeader {
        &self.header
    }

    pub fn get_hash(&self) -> &str {
        self.header.get_hash()
    }

    pub fn get_number(&self) -> u64 {
        self.header.get_number()
    }

    pub fn get_included_in_block_number(&self) -> u64 {
        self.included_in_block_number
    }

    pub fn get_uncle_index(&self) -> usize {
        self.uncle_index
    }

    /// How many blocks the including block sits above the uncle (always >= 1)
    pub fn depth(&self) -> u64 {
        self.included_in_block_number - self.header.get_number()
    }

    /// Reward in wei: `(base_reward(included) / 8) × (number + 8 − included)`.
    ///
    /// The base reward comes from the era of the *including* block, not the uncle's.
    pub fn uncle_reward(&self, schedule: &ForkSchedule) -> BigUint {
        let depth = self.depth();
        if depth > MAX_UNCLE_DEPTH {
            return BigUint::zero();
        }

        let base_reward = schedule.base_reward_wei(self.included_in_block_number);
        // Divide first; the remainder of base_reward / 8 is never paid out
        base_reward / MAX_UNCLE_DEPTH * (MAX_UNCLE_DEPTH - depth)
    }

    pub fn uncle_reward_ether(&self, schedule: &ForkSchedule) -> BigRational {
        convert(&self.uncle_reward(schedule), Denomination::Ether)
    }

    pub fn burned_wei(&self) -> BigUint {
        self.header.burned_wei()
    }

    pub fn to_raw(&self) -> &RawRecord {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::block::tests::sample_header;
    use crate::core::fork_schedule::{BYZANTIUM_BLOCK, CONSTANTINOPLE_BLOCK};
    use crate::core::monetary::WEI_PER_ETHER;

    fn uncle(number: u64, included_in: u64) -> UncleRecord {
        UncleRecord::from_raw(&sample_header(number), included_in, 0).unwrap()
    }

    #[test]
    fn test_reward_decays_with_depth() {
        let schedule = ForkSchedule::mainnet();
        let n = 10_000_000;

        // One block behind earns 7/8 of the base reward
        assert_eq!(
            uncle(n - 1, n).uncle_reward(&schedule),
            schedule.base_reward_wei(n) / 8u8 * 7u8
        );
        assert_eq!(
            uncle(n - 1, n).uncle_reward(&schedule),
            BigUint::from(1_750_000_000_000_000_000u64)
        );
        assert_eq!(
            uncle(n - 7, n).uncle_reward(&schedule),
            BigUint::from(2 * WEI_PER_ETHER / 8)
        );
        assert!(uncle(n - 8, n).uncle_reward(&schedule).is_zero());
    }

    #[test]
    fn test_stale_uncles_earn_exactly_zero() {
        let schedule = ForkSchedule::mainnet();
        let n = 10_000_000;

        assert!(uncle(n - 9, n).uncle_reward(&schedule).is_zero());
        assert!(uncle(n - 1_000, n).uncle_reward(&schedule).is_zero());
        assert!(uncle(0, n).uncle_reward_ether(&schedule).is_zero());
    }

    #[test]
    fn test_reward_uses_including_block_era() {
        let schedule = ForkSchedule::mainnet();

        // Uncle mined in the 5-ether era, included in the 3-ether era
        let record = uncle(BYZANTIUM_BLOCK, BYZANTIUM_BLOCK + 2);
        assert_eq!(
            record.uncle_reward(&schedule),
            BigUint::from(3 * WEI_PER_ETHER / 8 * 6)
        );

        let record = uncle(CONSTANTINOPLE_BLOCK - 1, CONSTANTINOPLE_BLOCK + 1);
        assert_eq!(
            record.uncle_reward(&schedule),
            BigUint::from(2 * WEI_PER_ETHER / 8 * 6)
        );
    }

    #[test]
    fn test_reward_truncates_eighth_before_scaling() {
        // Rewards that are not a multiple of 8 lose the remainder first
        let schedule = ForkSchedule::new(10, 20, [7u8.into(), 7u8.into(), 7u8.into()]).unwrap();
        let record = uncle(99, 100);
        assert_eq!(
            record.uncle_reward(&schedule),
            schedule.base_reward_wei(100) / 8u8 * 7u8
        );
        assert!(record.uncle_reward(&schedule).is_zero());

        let schedule =
            ForkSchedule::new(10, 20, [100u8.into(), 100u8.into(), 100u8.into()]).unwrap();
        // 100 / 8 = 12, so one block behind pays 84 rather than 87
        assert_eq!(uncle(99, 100).uncle_reward(&schedule), BigUint::from(84u8));
        assert_eq!(uncle(95, 100).uncle_reward(&schedule), BigUint::from(36u8));
    }

    #[test]
    fn test_uncle_must_be_older_than_including_block() {
        assert!(matches!(
            UncleRecord::from_raw(&sample_header(100), 100, 0),
            Err(EconomicsError::MalformedPayload(_))
        ));
        assert!(UncleRecord::from_raw(&sample_header(101), 100, 0).is_err());
    }

    #[test]
    fn test_uncle_identity_and_passthrough() {
        let raw = sample_header(99);
        let record = UncleRecord::from_raw(&raw, 100, 1).unwrap();

        assert_eq!(record.get_number(), 99);
        assert_eq!(record.get_included_in_block_number(), 100);
        assert_eq!(record.get_uncle_index(), 1);
        assert_eq!(record.depth(), 1);
        assert_eq!(record.to_raw(), &raw);
    }

    #[test]
    fn test_missing_uncle_field() {
        let mut raw = sample_header(99);
        raw.remove("miner");
        assert_eq!(
            UncleRecord::from_raw(&raw, 100, 0),
            Err(EconomicsError::MissingField("miner".to_string()))
        );
    }
}
