//! Application error taxonomy
//!
//! Every layer has its own error enum. This is the single public one: each
//! variant carries a human-readable message and a stable [`AppError::code`]
//! a UI can switch on.

use thiserror::Error;

use domain_claims::ClaimError;
use domain_pool::PoolError;
use infra_store::StoreError;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Connect a wallet first")]
    NotAuthenticated,

    #[error("Minimum premium is {required} (offered {offered})")]
    InsufficientAmount { required: String, offered: String },

    #[error("Pool has insufficient balance: {available} available, {requested} requested")]
    InsufficientLiquidity { available: String, requested: String },

    #[error("Requested {requested} exceeds the claim cap ({cap})")]
    ClaimTooLarge { requested: String, cap: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0} has already voted on this request")]
    AlreadyVoted(String),

    #[error("Not eligible to vote: {0}")]
    NotEligibleVoter(String),

    #[error("{0} is not a member of this pool")]
    NotMember(String),

    #[error("Request is {status}, voting is closed")]
    RequestNotPending { status: String },

    #[error("Request is {status}, only approved requests can be paid out")]
    RequestNotApproved { status: String },

    #[error("Pool not found: {0}")]
    PoolNotFound(String),

    #[error("Withdrawal request not found: {0}")]
    RequestNotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AppError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotAuthenticated => "not_authenticated",
            AppError::InsufficientAmount { .. } => "insufficient_amount",
            AppError::InsufficientLiquidity { .. } => "insufficient_liquidity",
            AppError::ClaimTooLarge { .. } => "claim_too_large",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::AlreadyVoted(_) => "already_voted",
            AppError::NotEligibleVoter(_) => "not_eligible_voter",
            AppError::NotMember(_) => "not_member",
            AppError::RequestNotPending { .. } => "request_not_pending",
            AppError::RequestNotApproved { .. } => "request_not_approved",
            AppError::PoolNotFound(_) => "pool_not_found",
            AppError::RequestNotFound(_) => "request_not_found",
            AppError::Configuration(_) => "configuration",
        }
    }
}

impl From<ClaimError> for AppError {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::ClaimTooLarge { requested, cap } => AppError::ClaimTooLarge { requested, cap },
            ClaimError::NotPending { status } => AppError::RequestNotPending { status },
            ClaimError::NotApproved { status } => AppError::RequestNotApproved { status },
            ClaimError::AlreadyVoted(voter) => AppError::AlreadyVoted(voter),
            ClaimError::NotEligibleVoter(voter) => AppError::NotEligibleVoter(voter),
            ClaimError::RequesterCannotVote => {
                AppError::NotEligibleVoter("the requester cannot vote on their own request".to_string())
            }
            ClaimError::InvalidPolicy(msg) => AppError::Configuration(msg),
            ClaimError::InvalidAmount(msg) => AppError::InvalidInput(msg),
            other @ (ClaimError::EmptyReason
            | ClaimError::InvalidStatusTransition { .. }
            | ClaimError::Money(_)) => AppError::InvalidInput(other.to_string()),
        }
    }
}

impl From<PoolError> for AppError {
    fn from(err: PoolError) -> Self {
        match err {
            PoolError::NotMember(member) => AppError::NotMember(member),
            PoolError::InsufficientAmount { required, offered } => {
                AppError::InsufficientAmount { required, offered }
            }
            PoolError::InsufficientLiquidity { available, requested } => {
                AppError::InsufficientLiquidity { available, requested }
            }
            PoolError::RequestNotFound(id) => AppError::RequestNotFound(id),
            PoolError::InvalidInput(msg) | PoolError::InvalidConfig(msg) => AppError::InvalidInput(msg),
            PoolError::Claim(e) => e.into(),
            other @ (PoolError::AlreadyMember(_) | PoolError::PoolFull { .. } | PoolError::Money(_)) => {
                AppError::InvalidInput(other.to_string())
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::PoolNotFound(id) => AppError::PoolNotFound(id.to_string()),
            StoreError::Pool(e) => e.into(),
            StoreError::DuplicatePool(id) => AppError::InvalidInput(format!("pool {} already exists", id)),
            StoreError::Seed(e) => AppError::Configuration(e.to_string()),
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}
