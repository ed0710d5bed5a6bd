use crate::core::monetary::WEI_PER_ETHER;
use crate::error::{EconomicsError, Result};
use num_bigint::BigUint;
use std::fmt;

// Mainnet fork heights
pub const BYZANTIUM_BLOCK: u64 = 4_370_000;
pub const CONSTANTINOPLE_BLOCK: u64 = 7_280_000;

// Base block rewards in wei
pub const FRONTIER_REWARD_WEI: u64 = 5 * WEI_PER_ETHER;
pub const BYZANTIUM_REWARD_WEI: u64 = 3 * WEI_PER_ETHER;
pub const CONSTANTINOPLE_REWARD_WEI: u64 = 2 * WEI_PER_ETHER;

/// Protocol eras with a fixed base issuance, in chain order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Era {
    /// Frontier up to and including the Byzantium boundary block
    FrontierToByzantium,
    /// After Byzantium, up to and including the Constantinople boundary block
    ByzantiumToConstantinople,
    /// Everything after the Constantinople boundary
    PostConstantinople,
}

impl Era {
    pub const ALL: [Era; 3] = [
        Era::FrontierToByzantium,
        Era::ByzantiumToConstantinople,
        Era::PostConstantinople,
    ];
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Era::FrontierToByzantium => "frontier-byzantium",
            Era::ByzantiumToConstantinople => "byzantium-constantinople",
            Era::PostConstantinople => "post-constantinople",
        })
    }
}

/// Height-to-era mapping with the base reward of each era.
///
/// Boundaries are inclusive upper bounds: the boundary block itself still
/// belongs to the earlier era. Build one with [`ForkSchedule::new`] for a
/// testnet or alternate chain; [`ForkSchedule::mainnet`] carries the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForkSchedule {
    byzantium_block: u64,
    constantinople_block: u64,
    frontier_reward_wei: BigUint,
    byzantium_reward_wei: BigUint,
    constantinople_reward_wei: BigUint,
}

impl ForkSchedule {
    /// Create a schedule; boundaries must be strictly increasing
    pub fn new(
        byzantium_block: u64,
        constantinople_block: u64,
        rewards_wei: [BigUint; 3],
    ) -> Result<ForkSchedule> {
        if byzantium_block >= constantinople_block {
            return Err(EconomicsError::Config(format!(
                "Fork boundaries must increase: byzantium {byzantium_block} >= constantinople {constantinople_block}"
            )));
        }

        let [frontier_reward_wei, byzantium_reward_wei, constantinople_reward_wei] = rewards_wei;
        Ok(ForkSchedule {
            byzantium_block,
            constantinople_block,
            frontier_reward_wei,
            byzantium_reward_wei,
            constantinople_reward_wei,
        })
    }

    pub fn mainnet() -> ForkSchedule {
        ForkSchedule {
            byzantium_block: BYZANTIUM_BLOCK,
            constantinople_block: CONSTANTINOPLE_BLOCK,
            frontier_reward_wei: BigUint::from(FRONTIER_REWARD_WEI),
            byzantium_reward_wei: BigUint::from(BYZANTIUM_REWARD_WEI),
            constantinople_reward_wei: BigUint::from(CONSTANTINOPLE_REWARD_WEI),
        }
    }

    pub fn era_for(&self, height: u64) -> Era {
        if height <= self.byzantium_block {
            Era::FrontierToByzantium
        } else if height <= self.constantinople_block {
            Era::ByzantiumToConstantinople
        } else {
            Era::PostConstantinople
        }
    }

    pub fn base_reward_wei(&self, height: u64) -> BigUint {
        self.reward_for_era(self.era_for(height))
    }

    pub fn reward_for_era(&self, era: Era) -> BigUint {
        match era {
            Era::FrontierToByzantium => self.frontier_reward_wei.clone(),
            Era::ByzantiumToConstantinople => self.byzantium_reward_wei.clone(),
            Era::PostConstantinople => self.constantinople_reward_wei.clone(),
        }
    }

    /// Last block height of `era`, or `None` for the open-ended final era
    pub fn upper_bound(&self, era: Era) -> Option<u64> {
        match era {
            Era::FrontierToByzantium => Some(self.byzantium_block),
            Era::ByzantiumToConstantinople => Some(self.constantinople_block),
            Era::PostConstantinople => None,
        }
    }
}

impl Default for ForkSchedule {
    fn default() -> Self {
        Self::mainnet()
    }
}

impl fmt::Display for ForkSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lower = 0u64;
        for era in Era::ALL {
            let reward = crate::core::monetary::format_units(&self.reward_for_era(era), 18);
            match self.upper_bound(era) {
                Some(upper) => {
                    writeln!(f, "{era:<26} blocks {lower}..={upper}  reward {reward} ether")?;
                    lower = upper.saturating_add(1);
                }
                None => writeln!(f, "{era:<26} blocks {lower}..  reward {reward} ether")?,
            }
        }
        Ok(())
    }
}
