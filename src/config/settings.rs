use crate::core::fork_schedule::{
    ForkSchedule, BYZANTIUM_BLOCK, BYZANTIUM_REWARD_WEI, CONSTANTINOPLE_BLOCK,
    CONSTANTINOPLE_REWARD_WEI, FRONTIER_REWARD_WEI,
};
use crate::core::quantity::parse_decimal;
use crate::error::{EconomicsError, Result};
use log::{info, LevelFilter};
use num_bigint::BigUint;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Environment variable naming the TOML config file
pub const CONFIG_PATH_ENV: &str = "CHAIN_ECONOMICS_CONFIG";

static DEFAULT_LOG_LEVEL: &str = "info";

/// A reward in wei: a TOML integer, or a decimal string for values past `i64`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RewardSetting {
    Integer(u64),
    Decimal(String),
}

impl RewardSetting {
    pub fn to_wei(&self, field: &str) -> Result<BigUint> {
        match self {
            RewardSetting::Integer(wei) => Ok(BigUint::from(*wei)),
            RewardSetting::Decimal(raw) => parse_decimal(field, raw),
        }
    }
}

/// Fork boundaries and rewards as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForkScheduleSettings {
    #[serde(default = "ForkScheduleSettings::default_byzantium_block")]
    pub byzantium_block: u64,
    #[serde(default = "ForkScheduleSettings::default_constantinople_block")]
    pub constantinople_block: u64,
    #[serde(default = "ForkScheduleSettings::default_frontier_reward")]
    pub frontier_reward_wei: RewardSetting,
    #[serde(default = "ForkScheduleSettings::default_byzantium_reward")]
    pub byzantium_reward_wei: RewardSetting,
    #[serde(default = "ForkScheduleSettings::default_constantinople_reward")]
    pub constantinople_reward_wei: RewardSetting,
}

impl ForkScheduleSettings {
    fn default_byzantium_block() -> u64 {
        BYZANTIUM_BLOCK
    }
    fn default_constantinople_block() -> u64 {
        CONSTANTINOPLE_BLOCK
    }
    fn default_frontier_reward() -> RewardSetting {
        RewardSetting::Integer(FRONTIER_REWARD_WEI)
    }
    fn default_byzantium_reward() -> RewardSetting {
        RewardSetting::Integer(BYZANTIUM_REWARD_WEI)
    }
    fn default_constantinople_reward() -> RewardSetting {
        RewardSetting::Integer(CONSTANTINOPLE_REWARD_WEI)
    }
}

impl Default for ForkScheduleSettings {
    fn default() -> Self {
        ForkScheduleSettings {
            byzantium_block: BYZANTIUM_BLOCK,
            constantinople_block: CONSTANTINOPLE_BLOCK,
            frontier_reward_wei: Self::default_frontier_reward(),
            byzantium_reward_wei: Self::default_byzantium_reward(),
            constantinople_reward_wei: Self::default_constantinople_reward(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "Config::default_log_level")]
    log_level: String,
    #[serde(default)]
    fork_schedule: ForkScheduleSettings,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: Config::default_log_level(),
            fork_schedule: ForkScheduleSettings::default(),
        }
    }
}

impl Config {
    fn default_log_level() -> String {
        DEFAULT_LOG_LEVEL.to_string()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Config> {
        let config: Config = toml::from_str(contents)?;
        // Validate eagerly
        config.fork_schedule()?;
        config.log_level_filter()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config = Config::from_toml_str(&contents)?;
        info!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load from the file named by `CHAIN_ECONOMICS_CONFIG`, or defaults when unset
    pub fn from_env() -> Result<Config> {
        match env::var(CONFIG_PATH_ENV) {
            Ok(path) => Config::load(path),
            Err(_) => Ok(Config::default()),
        }
    }

    pub fn fork_schedule(&self) -> Result<ForkSchedule> {
        let s = &self.fork_schedule;
        ForkSchedule::new(
            s.byzantium_block,
            s.constantinople_block,
            [
                s.frontier_reward_wei.to_wei("frontier_reward_wei")?,
                s.byzantium_reward_wei.to_wei("byzantium_reward_wei")?,
                s.constantinople_reward_wei.to_wei("constantinople_reward_wei")?,
            ],
        )
    }

    pub fn log_level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| EconomicsError::Config(format!("Invalid log level: {}", self.log_level)))
    }
}
