//! Pool Domain
//!
//! This crate implements the Breadfund pool aggregate: a group of members who
//! pay recurring premiums into a shared balance and fund each other's claims
//! by peer vote.
//!
//! # Key Concepts
//!
//! - **Pool**: the aggregate root; owns members, savings, balance and requests
//! - **Premium**: fixed monthly deposit plus the member's personal saving
//! - **Standing**: whether a member's premium is current or overdue
//! - **Lifecycle**: opening claims, casting votes and paying out, with the
//!   pool balance and request status changing together
//!
//! # Balance Equation
//!
//! After any sequence of operations:
//!
//! ```text
//! total_balance = initial_deposit + sum(deposits) - sum(completed payouts)
//! ```

pub mod config;
pub mod pool;
pub mod premium;
pub mod lifecycle;
pub mod actions;
pub mod error;

pub use config::PoolConfig;
pub use pool::{Pool, ContributionStatus};
pub use premium::{PremiumStatus, PremiumStanding, DepositReceipt};
pub use lifecycle::PayoutOutcome;
pub use actions::{PendingAction, ActionKind, pending_actions};
pub use error::PoolError;
