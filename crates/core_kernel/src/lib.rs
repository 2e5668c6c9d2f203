//! Core Kernel - Foundational types for Breadfund mutual aid pools
//!
//! This crate provides the building blocks shared by every other crate:
//! - Token amounts with precise decimal arithmetic
//! - Clocks, so premium accounting can be driven by a controllable "now"
//! - Strongly-typed identifiers and member addresses

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod error;

pub use money::{Money, Token, MoneyError};
pub use temporal::{Clock, SystemClock, ManualClock, whole_days_between};
pub use identifiers::{PoolId, RequestId, Address, AddressError};
pub use error::CoreError;
