//! Configuration management
//!
//! This module loads the fork schedule and logging level from an optional
//! TOML file. Every value falls back to the mainnet defaults.

pub mod settings;

pub use settings::{Config, ForkScheduleSettings, RewardSetting, CONFIG_PATH_ENV};
