// src/config.rs

use crate::types::{AddOnBasis, AddOnCapPolicy, Side};
use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SizingConfig {
    pub side: Side,
    pub unit_multiplier: Decimal,
    pub add_on_cap: AddOnCapPolicy,
    pub add_on_basis: AddOnBasis,
    pub crash_shock: Decimal,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            side: Side::Long,
            unit_multiplier: Decimal::ONE,
            add_on_cap: AddOnCapPolicy::MatchOriginal,
            add_on_basis: AddOnBasis::Original,
            crash_shock: dec!(0.20),
        }
    }
}

/// Values the interactive form starts with.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FormConfig {
    pub entry_price: Decimal,
    pub initial_stop: Decimal,
    pub total_shares: u64,
    pub current_price: Decimal,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            entry_price: dec!(680),
            initial_stop: dec!(650),
            total_shares: 350,
            current_price: dec!(1350),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    /// Daily-rotating log files go here. Without it the TUI logs nowhere.
    pub dir: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub sizing: SizingConfig,
    pub form: FormConfig,
    pub logging: LogConfig,
}

impl AppConfig {
    /// Optional `Settings` file, then `APP_`-prefixed environment variables
    /// (`APP_SIZING__UNIT_MULTIPLIER=1000`).
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_builder(Config::builder().add_source(File::with_name("Settings").required(false)))
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let builder = builder.add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
