//! Demo seed data
//!
//! One pool, "Devs Mutual Aid", built through the regular pool operations:
//!
//! - Alice (the demo user) creates it on 2024-01-01 in DAI
//! - `0xMember2` (saving 150) and `0xMember3` (saving 120) are admitted
//! - Alice deposits 300 on 2025-05-15, `0xMember2` deposits 400 on 2025-05-10
//! - `0xMember2` asks for 300 DAI for a medical emergency on 2025-06-01
//!
//! `0xMember3` has never deposited, so their premium shows as overdue.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal_macros::dec;
use tracing::info;

use core_kernel::{Address, CoreError, PoolId, Token};
use domain_claims::ClaimRules;
use domain_pool::{Pool, PoolConfig};

use crate::error::StoreError;
use crate::ledger::LedgerStore;

pub const DEMO_USER_ADDRESS: &str = "0x1234567890AbCdEf1234567890AbCdEf12345678";

/// Address of the demo user who owns the seeded pool
pub fn demo_user() -> Result<Address, CoreError> {
    Ok(Address::parse(DEMO_USER_ADDRESS)?)
}

/// Builds the demo pool and stores it
pub async fn seed_demo_data(store: &LedgerStore) -> Result<PoolId, StoreError> {
    let pool = demo_pool()?;
    let balance = pool.total_balance();
    let id = store.insert(pool).await?;
    info!(pool_id = %id, %balance, "Seeded demo pool");
    Ok(id)
}

fn demo_pool() -> Result<Pool, StoreError> {
    let alice = demo_user()?;
    let member2 = Address::parse("0xMember2").map_err(CoreError::from)?;
    let member3 = Address::parse("0xMember3").map_err(CoreError::from)?;

    let config = PoolConfig::new("Devs Mutual Aid", Token::Dai)
        .with_initial_deposit(dec!(50))
        .with_fixed_monthly_deposit(dec!(10))
        .with_personal_saving(dec!(100))
        .with_deposit_interval_days(30)
        .with_max_withdrawals_per_member(24)
        .with_member_bounds(3, 50);

    let mut pool = Pool::create(alice.clone(), &config, date(2024, 1, 1)?)?;
    pool.admit_member(member2.clone(), dec!(150), None)?;
    pool.admit_member(member3, dec!(120), None)?;

    pool.record_deposit(&member2, dec!(400), date(2025, 5, 10)?)?;
    pool.record_deposit(&alice, dec!(300), date(2025, 5, 15)?)?;

    pool.create_claim(
        &ClaimRules::default(),
        &member2,
        dec!(300),
        "Medical emergency",
        date(2025, 6, 1)?,
    )?;

    Ok(pool)
}

fn date(year: i32, month: u32, day: u32) -> Result<DateTime<Utc>, CoreError> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .ok_or_else(|| CoreError::validation(format!("invalid seed date {}-{}-{}", year, month, day)))
}
