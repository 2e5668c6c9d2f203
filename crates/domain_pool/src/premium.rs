//! Premium accounting
//!
//! A member's premium for one deposit interval is the pool's fixed monthly
//! deposit plus their personal saving. A premium is current while the last
//! deposit is no more than `deposit_interval_days` whole days old.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use core_kernel::{whole_days_between, Address, Money, PoolId};
use crate::error::PoolError;
use crate::pool::{ContributionStatus, Pool};

/// Whether a member's premium is paid up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PremiumStatus {
    Current,
    Overdue,
}

impl fmt::Display for PremiumStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PremiumStatus::Current => f.write_str("current"),
            PremiumStatus::Overdue => f.write_str("overdue"),
        }
    }
}

/// A member's premium position in one pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumStanding {
    pub pool_id: PoolId,
    pub member: Address,
    pub status: PremiumStatus,
    /// Whole days since the last deposit; `None` if the member never deposited
    pub days_since: Option<i64>,
    pub required: Money,
    pub last_payment: Option<DateTime<Utc>>,
    pub next_due: Option<DateTime<Utc>>,
    pub total_contributed: Money,
}

/// Result of a successful deposit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositReceipt {
    pub pool_id: PoolId,
    pub member: Address,
    pub amount: Money,
    pub total_contributed: Money,
    pub pool_balance: Money,
}

impl Pool {
    /// Fixed monthly deposit plus the member's personal saving (zero if unset)
    pub fn required_premium(&self, member: &Address) -> Result<Money, PoolError> {
        let saving = self
            .personal_saving(member)
            .copied()
            .unwrap_or_else(|| Money::zero(self.token));
        Ok(self.fixed_monthly_deposit.checked_add(&saving)?)
    }

    /// Current or overdue, with the whole days elapsed since the last deposit
    ///
    /// A member with no deposit record is overdue with no day count.
    pub fn premium_status(&self, member: &Address, now: DateTime<Utc>) -> (PremiumStatus, Option<i64>) {
        match self.contribution(member) {
            None => (PremiumStatus::Overdue, None),
            Some(record) => {
                let days = whole_days_between(record.last_deposit_date, now);
                let status = if days > i64::from(self.deposit_interval_days) {
                    PremiumStatus::Overdue
                } else {
                    PremiumStatus::Current
                };
                (status, Some(days))
            }
        }
    }

    /// Full premium view for one member
    pub fn premium_standing(&self, member: &Address, now: DateTime<Utc>) -> Result<PremiumStanding, PoolError> {
        let (status, days_since) = self.premium_status(member, now);
        let record = self.contribution(member);
        let last_payment = record.map(|r| r.last_deposit_date);

        Ok(PremiumStanding {
            pool_id: self.id,
            member: member.clone(),
            status,
            days_since,
            required: self.required_premium(member)?,
            last_payment,
            next_due: last_payment
                .map(|last| last + Duration::days(i64::from(self.deposit_interval_days))),
            total_contributed: record
                .map(|r| r.total_contributed)
                .unwrap_or_else(|| Money::zero(self.token)),
        })
    }

    /// Records a premium payment
    ///
    /// Over-payment is accepted and absorbed into the pool.
    ///
    /// # Errors
    ///
    /// - `NotMember` if the depositor is not in the pool
    /// - `InvalidInput` if the amount is not positive or has more decimal
    ///   places than the pool token
    /// - `InsufficientAmount` if the amount is below the required premium
    ///
    /// The pool is unchanged on error.
    pub fn record_deposit(
        &mut self,
        member: &Address,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Result<DepositReceipt, PoolError> {
        self.ensure_member(member)?;
        let amount = self.money(amount)?;
        if !amount.is_positive() {
            return Err(PoolError::InvalidInput(format!(
                "deposit amount must be positive, got {}",
                amount
            )));
        }

        let required = self.required_premium(member)?;
        if amount.checked_cmp(&required)? == Ordering::Less {
            return Err(PoolError::InsufficientAmount {
                required: required.to_string(),
                offered: amount.to_string(),
            });
        }

        let prior = self
            .contribution(member)
            .map(|r| r.total_contributed)
            .unwrap_or_else(|| Money::zero(self.token));
        let total_contributed = prior.checked_add(&amount)?;
        let pool_balance = self.total_balance.checked_add(&amount)?;

        self.total_balance = pool_balance;
        self.contribution_status.insert(
            member.clone(),
            ContributionStatus {
                last_deposit_date: now,
                total_contributed,
            },
        );

        Ok(DepositReceipt {
            pool_id: self.id,
            member: member.clone(),
            amount,
            total_contributed,
            pool_balance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PoolConfig;
    use chrono::TimeZone;
    use core_kernel::Token;
    use rust_decimal_macros::dec;

    fn addr(s: &str) -> Address {
        Address::parse(s).unwrap()
    }

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap()
    }

    fn pool() -> Pool {
        let config = PoolConfig::new("Pool", Token::Dai);
        let mut pool = Pool::create(addr("0xA"), &config, created()).unwrap();
        pool.admit_member(addr("0xB"), dec!(150), None).unwrap();
        pool
    }

    #[test]
    fn test_required_premium() {
        let pool = pool();
        assert_eq!(pool.required_premium(&addr("0xA")).unwrap().amount(), dec!(110));
        assert_eq!(pool.required_premium(&addr("0xB")).unwrap().amount(), dec!(160));
        // unknown members pay only the fixed part
        assert_eq!(pool.required_premium(&addr("0xZ")).unwrap().amount(), dec!(10));
    }

    #[test]
    fn test_status_boundary_is_inclusive() {
        let pool = pool();
        let at_limit = created() + Duration::days(30);
        assert_eq!(pool.premium_status(&addr("0xA"), at_limit), (PremiumStatus::Current, Some(30)));

        let past_limit = created() + Duration::days(31);
        assert_eq!(pool.premium_status(&addr("0xA"), past_limit), (PremiumStatus::Overdue, Some(31)));
    }

    #[test]
    fn test_no_record_is_overdue() {
        let pool = pool();
        assert_eq!(pool.premium_status(&addr("0xB"), created()), (PremiumStatus::Overdue, None));
    }
}
