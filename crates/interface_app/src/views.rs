//! Read models handed to a UI

use serde::Serialize;

use core_kernel::{Address, Money, PoolId, Token};
use domain_claims::RequestStatus;
use domain_pool::{Pool, PremiumStanding};

/// A supported token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenInfo {
    pub symbol: &'static str,
    pub address: &'static str,
    pub decimals: u32,
}

impl From<Token> for TokenInfo {
    fn from(token: Token) -> Self {
        Self {
            symbol: token.symbol(),
            address: token.address(),
            decimals: token.decimals(),
        }
    }
}

/// One line of a pool listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolSummary {
    pub id: PoolId,
    pub name: String,
    pub token: Token,
    pub owner: Address,
    pub member_count: usize,
    pub max_members: u32,
    pub total_balance: Money,
    pub pending_requests: usize,
}

impl From<&Pool> for PoolSummary {
    fn from(pool: &Pool) -> Self {
        Self {
            id: pool.id,
            name: pool.name.clone(),
            token: pool.token,
            owner: pool.owner.clone(),
            member_count: pool.member_count(),
            max_members: pool.max_members,
            total_balance: pool.total_balance(),
            pending_requests: pool
                .withdrawal_requests()
                .iter()
                .filter(|r| r.status() == RequestStatus::Pending)
                .count(),
        }
    }
}

/// Premium standing across every pool a member belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PremiumOverview {
    pub member: Address,
    pub current: usize,
    pub overdue: usize,
    pub standings: Vec<PremiumStanding>,
}
