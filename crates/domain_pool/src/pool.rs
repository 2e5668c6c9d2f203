//! Pool aggregate
//!
//! The pool is the unit of consistency: every mutation of members, balance or
//! withdrawal requests goes through a method on [`Pool`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use core_kernel::{Address, Money, PoolId, RequestId, Token};
use domain_claims::WithdrawalRequest;
use crate::config::PoolConfig;
use crate::error::PoolError;

/// A member's deposit history in one pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionStatus {
    pub last_deposit_date: DateTime<Utc>,
    pub total_contributed: Money,
}

/// A Breadfund mutual aid pool
///
/// # Invariants
///
/// - `members` holds no duplicates and only grows
/// - every key of `personal_savings` and `contribution_status` is a current or former member
/// - `total_balance` is never negative
/// - `max_members >= min_members >= 2`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub id: PoolId,
    pub owner: Address,
    pub name: String,
    pub token: Token,
    members: Vec<Address>,
    pub initial_deposit: Money,
    pub fixed_monthly_deposit: Money,
    personal_savings: BTreeMap<Address, Money>,
    pub deposit_interval_days: u32,
    pub max_withdrawals_per_member: u32,
    pub min_members: u32,
    pub max_members: u32,
    pub created_at: DateTime<Utc>,
    pub(crate) total_balance: Money,
    pub(crate) contribution_status: BTreeMap<Address, ContributionStatus>,
    pub(crate) withdrawal_requests: Vec<WithdrawalRequest>,
}

impl Pool {
    /// Creates a pool with the creator as its only member
    ///
    /// The creator's initial deposit seeds the balance and counts as their
    /// first contribution, so their premium starts out current.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration fails validation or an
    /// amount is more precise than the pool token.
    pub fn create(creator: Address, config: &PoolConfig, now: DateTime<Utc>) -> Result<Self, PoolError> {
        config
            .validate()
            .map_err(|e| PoolError::InvalidConfig(e.to_string()))?;
        let token = Token::from_address(&config.token_address)
            .map_err(|e| PoolError::InvalidConfig(e.to_string()))?;
        let amount = |value: Decimal| exact_money(value, token).map_err(PoolError::InvalidConfig);

        let initial_deposit = amount(config.initial_deposit)?;
        let fixed_monthly_deposit = amount(config.fixed_monthly_deposit)?;
        let mut personal_savings = BTreeMap::new();
        personal_savings.insert(creator.clone(), amount(config.personal_saving)?);
        let mut contribution_status = BTreeMap::new();
        contribution_status.insert(
            creator.clone(),
            ContributionStatus {
                last_deposit_date: now,
                total_contributed: initial_deposit,
            },
        );

        Ok(Self {
            id: PoolId::new_v7(),
            owner: creator.clone(),
            name: config.name.trim().to_string(),
            token,
            members: vec![creator],
            initial_deposit,
            fixed_monthly_deposit,
            personal_savings,
            deposit_interval_days: config.deposit_interval_days,
            max_withdrawals_per_member: config.max_withdrawals_per_member,
            min_members: config.min_members,
            max_members: config.max_members,
            created_at: now,
            total_balance: initial_deposit,
            contribution_status,
            withdrawal_requests: Vec::new(),
        })
    }

    /// Adds a member with their personal saving
    ///
    /// There is no member-facing join flow; this is used to seed pools.
    /// `contribution` carries over an existing deposit record, if any.
    ///
    /// # Errors
    ///
    /// - `AlreadyMember` if the address is already in the pool
    /// - `PoolFull` if the pool has reached `max_members`
    /// - `InvalidInput` if the personal saving is negative or too precise for the token
    pub fn admit_member(
        &mut self,
        member: Address,
        personal_saving: Decimal,
        contribution: Option<ContributionStatus>,
    ) -> Result<(), PoolError> {
        if self.is_member(&member) {
            return Err(PoolError::AlreadyMember(member.to_string()));
        }
        if self.members.len() >= self.max_members as usize {
            return Err(PoolError::PoolFull { max: self.max_members });
        }
        if personal_saving.is_sign_negative() && !personal_saving.is_zero() {
            return Err(PoolError::InvalidInput(format!(
                "personal saving must not be negative, got {}",
                personal_saving
            )));
        }
        if let Some(status) = &contribution {
            if status.total_contributed.token() != self.token {
                return Err(PoolError::InvalidInput(format!(
                    "contribution is in {}, pool settles in {}",
                    status.total_contributed.token(),
                    self.token
                )));
            }
        }

        let personal_saving = self.money(personal_saving)?;

        self.personal_savings.insert(member.clone(), personal_saving);
        if let Some(status) = contribution {
            self.contribution_status.insert(member.clone(), status);
        }
        self.members.push(member);
        Ok(())
    }

    pub fn members(&self) -> &[Address] {
        &self.members
    }

    pub fn is_member(&self, address: &Address) -> bool {
        self.members.contains(address)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn total_balance(&self) -> Money {
        self.total_balance
    }

    pub fn personal_saving(&self, member: &Address) -> Option<&Money> {
        self.personal_savings.get(member)
    }

    pub fn contribution(&self, member: &Address) -> Option<&ContributionStatus> {
        self.contribution_status.get(member)
    }

    pub fn withdrawal_requests(&self) -> &[WithdrawalRequest] {
        &self.withdrawal_requests
    }

    pub fn request(&self, id: RequestId) -> Option<&WithdrawalRequest> {
        self.withdrawal_requests.iter().find(|r| r.id == id)
    }

    /// Wraps a raw amount in this pool's token
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the amount has more decimal places than the token
    /// carries. Such amounts are refused rather than rounded.
    pub fn money(&self, amount: Decimal) -> Result<Money, PoolError> {
        exact_money(amount, self.token).map_err(PoolError::InvalidInput)
    }

    pub(crate) fn ensure_member(&self, address: &Address) -> Result<(), PoolError> {
        if !self.is_member(address) {
            return Err(PoolError::NotMember(address.to_string()));
        }
        Ok(())
    }
}

/// Wraps `amount` in `token`, refusing amounts the token cannot represent exactly
fn exact_money(amount: Decimal, token: Token) -> Result<Money, String> {
    let decimals = token.decimals();
    if amount.normalize().scale() > decimals {
        return Err(format!(
            "{} allows at most {} decimal places, got {}",
            token, decimals, amount
        ));
    }
    Ok(Money::new(amount, token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn addr(s: &str) -> Address {
        Address::parse(s).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_create_seeds_creator() {
        let config = PoolConfig::new("Devs Mutual Aid", Token::Dai);
        let pool = Pool::create(addr("0xA"), &config, now()).unwrap();

        assert_eq!(pool.owner, addr("0xA"));
        assert_eq!(pool.members(), &[addr("0xA")]);
        assert_eq!(pool.total_balance().amount(), dec!(50));
        assert_eq!(pool.personal_saving(&addr("0xA")).unwrap().amount(), dec!(100));

        let contribution = pool.contribution(&addr("0xA")).unwrap();
        assert_eq!(contribution.last_deposit_date, now());
        assert_eq!(contribution.total_contributed.amount(), dec!(50));
        assert!(pool.withdrawal_requests().is_empty());
    }

    #[test]
    fn test_admit_member_rejects_duplicates() {
        let config = PoolConfig::new("Pool", Token::Dai);
        let mut pool = Pool::create(addr("0xA"), &config, now()).unwrap();

        pool.admit_member(addr("0xB"), dec!(150), None).unwrap();
        let result = pool.admit_member(addr("0xB"), dec!(150), None);
        assert!(matches!(result, Err(PoolError::AlreadyMember(_))));
        assert_eq!(pool.member_count(), 2);
    }

    #[test]
    fn test_admit_member_respects_max_members() {
        let config = PoolConfig::new("Pool", Token::Dai).with_member_bounds(2, 2);
        let mut pool = Pool::create(addr("0xA"), &config, now()).unwrap();

        pool.admit_member(addr("0xB"), dec!(100), None).unwrap();
        let result = pool.admit_member(addr("0xC"), dec!(100), None);
        assert!(matches!(result, Err(PoolError::PoolFull { max: 2 })));
    }

    #[test]
    fn test_amounts_finer_than_token_are_refused() {
        let config = PoolConfig::new("Pool", Token::Usdc).with_initial_deposit(dec!(50.0000001));
        let result = Pool::create(addr("0xA"), &config, now());
        assert!(matches!(result, Err(PoolError::InvalidConfig(_))));

        let mut pool = Pool::create(addr("0xA"), &PoolConfig::new("Pool", Token::Usdc), now()).unwrap();
        let result = pool.admit_member(addr("0xB"), dec!(150.1234567), None);
        assert!(matches!(result, Err(PoolError::InvalidInput(_))));
        assert!(!pool.is_member(&addr("0xB")));

        assert_eq!(pool.money(dec!(1.500000)).unwrap().amount(), dec!(1.5));
    }
}
