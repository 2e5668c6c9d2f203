//! Test Data Builders
//!
//! Builds pools through the same operations production code uses, so every
//! built pool satisfies the balance equation.

use chrono::{DateTime, Utc};
use core_kernel::{Address, RequestId, Token};
use domain_claims::{ClaimRules, Vote};
use domain_pool::{Pool, PoolConfig};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::{AddressFixtures, TemporalFixtures};

/// Builder for constructing test pools
pub struct TestPoolBuilder {
    creator: Address,
    config: PoolConfig,
    created_at: DateTime<Utc>,
    members: Vec<(Address, Decimal)>,
    deposits: Vec<(Address, Decimal, DateTime<Utc>)>,
}

impl Default for TestPoolBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPoolBuilder {
    /// Alice's "Devs Mutual Aid" DAI pool with the default settings
    pub fn new() -> Self {
        Self {
            creator: AddressFixtures::alice(),
            config: PoolConfig::new("Devs Mutual Aid", Token::Dai),
            created_at: TemporalFixtures::pool_created(),
            members: Vec::new(),
            deposits: Vec::new(),
        }
    }

    /// Alice, Bob (saving 150) and Carol (saving 120)
    pub fn three_members() -> Self {
        Self::new()
            .with_member(AddressFixtures::bob(), dec!(150))
            .with_member(AddressFixtures::carol(), dec!(120))
    }

    pub fn with_creator(mut self, creator: Address) -> Self {
        self.creator = creator;
        self
    }

    pub fn with_config(mut self, config: PoolConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_initial_deposit(mut self, amount: Decimal) -> Self {
        self.config = self.config.with_initial_deposit(amount);
        self
    }

    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    pub fn with_member(mut self, member: Address, personal_saving: Decimal) -> Self {
        self.members.push((member, personal_saving));
        self
    }

    pub fn with_deposit(mut self, member: Address, amount: Decimal, at: DateTime<Utc>) -> Self {
        self.deposits.push((member, amount, at));
        self
    }

    /// Builds the pool
    ///
    /// # Panics
    ///
    /// Panics if any step is rejected by the pool.
    pub fn build(self) -> Pool {
        let mut pool = Pool::create(self.creator, &self.config, self.created_at)
            .expect("test pool config must be valid");
        for (member, saving) in self.members {
            pool.admit_member(member, saving, None)
                .expect("test member must be admissible");
        }
        for (member, amount, at) in self.deposits {
            pool.record_deposit(&member, amount, at)
                .expect("test deposit must be accepted");
        }
        pool
    }
}

/// Opens a claim and has every other member vote `vote` on it
///
/// # Panics
///
/// Panics if the claim or any vote is rejected.
pub fn claim_with_votes(
    pool: &mut Pool,
    rules: &ClaimRules,
    requester: &Address,
    amount: Decimal,
    vote: Vote,
    at: DateTime<Utc>,
) -> RequestId {
    let id = pool
        .create_claim(rules, requester, amount, "Medical emergency", at)
        .expect("test claim must be accepted");
    let voters: Vec<Address> = pool
        .members()
        .iter()
        .filter(|m| *m != requester)
        .cloned()
        .collect();
    for voter in voters {
        pool.cast_vote(id, &voter, vote, at)
            .expect("test vote must be accepted");
    }
    id
}
