//! Pending actions for a member
//!
//! Derived view: the requests waiting on a member's vote, and the approved
//! requests the member can pay out.

use serde::{Deserialize, Serialize};

use core_kernel::{Address, PoolId, Token};
use domain_claims::WithdrawalRequest;
use crate::pool::Pool;

/// What the member is expected to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Vote,
    Withdraw,
}

/// One request awaiting the member, with enough pool context to display it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    pub kind: ActionKind,
    pub pool_id: PoolId,
    pub pool_name: String,
    pub token: Token,
    pub request: WithdrawalRequest,
}

/// Requests in `pool` awaiting `member`, in request order
///
/// Non-members get nothing.
pub fn pending_actions(pool: &Pool, member: &Address) -> Vec<PendingAction> {
    if !pool.is_member(member) {
        return Vec::new();
    }

    pool.withdrawal_requests()
        .iter()
        .filter_map(|request| {
            let kind = if request.awaits_vote_from(member) {
                ActionKind::Vote
            } else if request.awaits_payout_by(member) {
                ActionKind::Withdraw
            } else {
                return None;
            };
            Some(PendingAction {
                kind,
                pool_id: pool.id,
                pool_name: pool.name.clone(),
                token: pool.token,
                request: request.clone(),
            })
        })
        .collect()
}
