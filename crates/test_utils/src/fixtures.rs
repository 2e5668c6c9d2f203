//! Pre-built Test Fixtures
//!
//! Fixed members and dates shared by the Breadfund test suites.

use chrono::{DateTime, TimeZone, Utc};
use core_kernel::Address;

/// Fixture for member addresses
pub struct AddressFixtures;

impl AddressFixtures {
    /// Pool creator in most scenarios
    pub fn alice() -> Address {
        Self::parse("0x1234567890AbCdEf1234567890AbCdEf12345678")
    }

    pub fn bob() -> Address {
        Self::parse("0xMember2")
    }

    pub fn carol() -> Address {
        Self::parse("0xMember3")
    }

    /// Never a member of any fixture pool
    pub fn outsider() -> Address {
        Self::parse("0xOutsider")
    }

    fn parse(raw: &str) -> Address {
        Address::parse(raw).expect("fixture address must be valid")
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Pool creation date
    pub fn pool_created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    /// Date deposits are made in deposit scenarios
    pub fn deposit_day() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 15, 0, 0, 0).unwrap()
    }

    /// Date claims are opened in claim scenarios
    pub fn claim_day() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }
}
