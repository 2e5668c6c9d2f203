//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! Breadfund test suite.
//!
//! # Modules
//!
//! - `fixtures`: Fixed addresses and dates
//! - `builders`: Builder for pools with members, deposits and claims
//! - `assertions`: Assertion helpers for pool invariants
//! - `generators`: Property-based and fake data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
