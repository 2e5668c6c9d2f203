//! Claims domain errors

use thiserror::Error;

use core_kernel::MoneyError;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Invalid claim amount: {0}")]
    InvalidAmount(String),

    #[error("A reason is required for every claim")]
    EmptyReason,

    #[error("Requested {requested} exceeds the claim cap for this member ({cap})")]
    ClaimTooLarge { requested: String, cap: String },

    #[error("Request is {status}, voting is closed")]
    NotPending { status: String },

    #[error("Request is {status}, only approved requests can be paid out")]
    NotApproved { status: String },

    #[error("The requester cannot vote on their own request")]
    RequesterCannotVote,

    #[error("{0} is not eligible to vote on this request")]
    NotEligibleVoter(String),

    #[error("{0} has already voted on this request")]
    AlreadyVoted(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Invalid claim policy: {0}")]
    InvalidPolicy(String),

    #[error(transparent)]
    Money(#[from] MoneyError),
}
