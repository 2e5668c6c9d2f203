//! Application configuration

use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;

use domain_claims::{ClaimError, ClaimRules, QuorumPolicy, SavingsMultipleCap};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Address of the identity returned by a wallet connect
    pub mock_address: String,
    /// Display name of that identity
    pub mock_name: String,
    /// Simulated wallet connect latency
    pub connect_delay_ms: u64,
    /// Claim cap as a multiple of the requester's personal saving
    pub claim_cap_multiplier: Decimal,
    /// Share of eligible voters whose yes vote approves a request
    pub quorum_ratio: Decimal,
    /// Log level: trace, debug, info, warn, error
    pub log_level: String,
    pub log_format: LogFormat,
    /// Load the demo pool on startup
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mock_address: "0x1234567890AbCdEf1234567890AbCdEf12345678".to_string(),
            mock_name: "Alice".to_string(),
            connect_delay_ms: 500,
            claim_cap_multiplier: SavingsMultipleCap::DEFAULT_MULTIPLIER,
            quorum_ratio: QuorumPolicy::DEFAULT_RATIO,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            seed_demo_data: true,
        }
    }
}

impl AppConfig {
    /// Loads configuration from `BREADFUND_*` environment variables over the defaults
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::load(config::Environment::with_prefix("BREADFUND"))
    }

    /// Loads configuration from the given environment source over the defaults
    pub fn load(environment: config::Environment) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("mock_address", defaults.mock_address)?
            .set_default("mock_name", defaults.mock_name)?
            .set_default("connect_delay_ms", defaults.connect_delay_ms.to_string())?
            .set_default("claim_cap_multiplier", defaults.claim_cap_multiplier.to_string())?
            .set_default("quorum_ratio", defaults.quorum_ratio.to_string())?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_format", "pretty")?
            .set_default("seed_demo_data", defaults.seed_demo_data)?
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    /// Claim rules built from the configured quorum ratio and cap multiplier
    pub fn claim_rules(&self) -> Result<ClaimRules, ClaimError> {
        Ok(ClaimRules::new(
            QuorumPolicy::new(self.quorum_ratio)?,
            Arc::new(SavingsMultipleCap::new(self.claim_cap_multiplier)?),
        ))
    }
}
