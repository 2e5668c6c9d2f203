//! Pool configuration
//!
//! The settings a creator chooses when starting a pool. Validated with
//! `validator` before any pool is built.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use core_kernel::Token;

/// Settings for a new pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_member_bounds", skip_on_field_errors = false))]
pub struct PoolConfig {
    /// Display name
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    /// Contract address of the settlement token
    #[validate(custom(function = "validate_token_address"))]
    pub token_address: String,
    /// One-time service fee paid by the creator, seeds the pool balance
    #[validate(custom(function = "validate_non_negative"))]
    pub initial_deposit: Decimal,
    /// Per-period admin fee every member pays on top of their saving
    #[validate(custom(function = "validate_non_negative"))]
    pub fixed_monthly_deposit: Decimal,
    /// The creator's own per-period personal saving
    #[validate(custom(function = "validate_personal_saving"))]
    pub personal_saving: Decimal,
    /// Days a premium stays current
    #[validate(range(min = 1))]
    pub deposit_interval_days: u32,
    #[validate(range(min = 1))]
    pub max_withdrawals_per_member: u32,
    #[validate(range(min = 2))]
    pub min_members: u32,
    pub max_members: u32,
}

impl PoolConfig {
    /// Creates a configuration with the defaults offered by the create form
    pub fn new(name: impl Into<String>, token: Token) -> Self {
        Self {
            name: name.into(),
            token_address: token.address().to_string(),
            initial_deposit: dec!(50),
            fixed_monthly_deposit: dec!(10),
            personal_saving: dec!(100),
            deposit_interval_days: 30,
            max_withdrawals_per_member: 24,
            min_members: 3,
            max_members: 50,
        }
    }

    pub fn with_initial_deposit(mut self, amount: Decimal) -> Self {
        self.initial_deposit = amount;
        self
    }

    pub fn with_fixed_monthly_deposit(mut self, amount: Decimal) -> Self {
        self.fixed_monthly_deposit = amount;
        self
    }

    pub fn with_personal_saving(mut self, amount: Decimal) -> Self {
        self.personal_saving = amount;
        self
    }

    pub fn with_deposit_interval_days(mut self, days: u32) -> Self {
        self.deposit_interval_days = days;
        self
    }

    pub fn with_max_withdrawals_per_member(mut self, max: u32) -> Self {
        self.max_withdrawals_per_member = max;
        self
    }

    pub fn with_member_bounds(mut self, min: u32, max: u32) -> Self {
        self.min_members = min;
        self.max_members = max;
        self
    }

    pub fn with_token_address(mut self, address: impl Into<String>) -> Self {
        self.token_address = address.into();
        self
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn validate_token_address(value: &str) -> Result<(), ValidationError> {
    Token::from_address(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("unknown_token"))
}

fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("negative"));
    }
    Ok(())
}

fn validate_personal_saving(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ONE {
        return Err(ValidationError::new("personal_saving_below_one"));
    }
    Ok(())
}

fn validate_member_bounds(config: &PoolConfig) -> Result<(), ValidationError> {
    if config.max_members < config.min_members {
        return Err(ValidationError::new("max_members_below_min_members"));
    }
    Ok(())
}
