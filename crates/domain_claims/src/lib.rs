//! Claims Domain
//!
//! This crate implements the lifecycle of a single withdrawal request (claim)
//! inside a Breadfund pool: opening it, collecting peer votes, resolving the
//! vote, and settling the payout.
//!
//! # Request Lifecycle
//!
//! ```text
//! Pending -> Approved -> Withdrawn
//!        \-> Rejected
//!            Approved -> Rejected   (payout attempted without enough liquidity)
//! ```
//!
//! A request resolves only after every eligible member (everyone except the
//! requester) has voted. Pool-level concerns such as membership and balance
//! live in `domain_pool`; this crate only knows about the request itself.

pub mod request;
pub mod vote;
pub mod quorum;
pub mod cap;
pub mod error;

pub use request::{WithdrawalRequest, RequestStatus};
pub use vote::{Vote, VoteReceipt};
pub use quorum::QuorumPolicy;
pub use cap::{ClaimCapPolicy, SavingsMultipleCap, ClaimRules};
pub use error::ClaimError;
