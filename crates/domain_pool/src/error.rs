//! Pool domain errors

use thiserror::Error;

use core_kernel::MoneyError;
use domain_claims::ClaimError;

/// Errors that can occur in the pool domain
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("{0} is not a member of this pool")]
    NotMember(String),

    #[error("{0} is already a member of this pool")]
    AlreadyMember(String),

    #[error("Pool is full ({max} members)")]
    PoolFull { max: u32 },

    #[error("Minimum premium is {required} (offered {offered})")]
    InsufficientAmount { required: String, offered: String },

    #[error("Pool has insufficient balance: {available} available, {requested} requested")]
    InsufficientLiquidity { available: String, requested: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid pool configuration: {0}")]
    InvalidConfig(String),

    #[error("Withdrawal request not found: {0}")]
    RequestNotFound(String),

    #[error(transparent)]
    Claim(#[from] ClaimError),

    #[error(transparent)]
    Money(#[from] MoneyError),
}
