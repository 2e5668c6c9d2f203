//! Withdrawal request aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

use core_kernel::{Address, Money, PoolId, RequestId};
use crate::error::ClaimError;
use crate::vote::{Vote, VoteReceipt};

/// Request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Collecting votes
    Pending,
    /// Vote passed, awaiting payout by the requester
    Approved,
    /// Vote failed, or payout found the pool short
    Rejected,
    /// Paid out
    Withdrawn,
}

impl RequestStatus {
    /// True for states no transition leaves
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Rejected | RequestStatus::Withdrawn)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
            RequestStatus::Withdrawn => "withdrawn",
        };
        f.write_str(label)
    }
}

/// A member's request for a payout from the pool
///
/// # Invariants
///
/// - `voted_yes + voted_no == votes.len()`, recomputed from `votes` on every vote
/// - the requester never appears in `votes`
/// - `required_votes` never changes after the request is opened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    pub id: RequestId,
    pub pool_id: PoolId,
    pub requester: Address,
    pub amount_requested: Money,
    pub reason: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    status: RequestStatus,
    votes: BTreeMap<Address, Vote>,
    voted_yes: u32,
    voted_no: u32,
    required_votes: u32,
}

impl WithdrawalRequest {
    /// Opens a new pending request
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if the amount is zero or negative
    /// - `EmptyReason` if the reason is blank
    pub fn open(
        pool_id: PoolId,
        requester: Address,
        amount_requested: Money,
        reason: &str,
        required_votes: u32,
        now: DateTime<Utc>,
    ) -> Result<Self, ClaimError> {
        if !amount_requested.is_positive() {
            return Err(ClaimError::InvalidAmount(format!(
                "claim amount must be positive, got {}",
                amount_requested
            )));
        }
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ClaimError::EmptyReason);
        }

        Ok(Self {
            id: RequestId::new_v7(),
            pool_id,
            requester,
            amount_requested,
            reason: reason.to_string(),
            created_at: now,
            updated_at: now,
            status: RequestStatus::Pending,
            votes: BTreeMap::new(),
            voted_yes: 0,
            voted_no: 0,
            required_votes,
        })
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn votes(&self) -> &BTreeMap<Address, Vote> {
        &self.votes
    }

    pub fn voted_yes(&self) -> u32 {
        self.voted_yes
    }

    pub fn voted_no(&self) -> u32 {
        self.voted_no
    }

    pub fn required_votes(&self) -> u32 {
        self.required_votes
    }

    pub fn has_voted(&self, member: &Address) -> bool {
        self.votes.contains_key(member)
    }

    /// True if `member` still owes a vote on this request
    pub fn awaits_vote_from(&self, member: &Address) -> bool {
        self.status == RequestStatus::Pending && &self.requester != member && !self.has_voted(member)
    }

    /// True if `member` is the requester and the request is ready to pay out
    pub fn awaits_payout_by(&self, member: &Address) -> bool {
        self.status == RequestStatus::Approved && &self.requester == member
    }

    /// Records a vote and resolves the request once every eligible voter has voted
    ///
    /// `eligible_voters` is the number of pool members other than the
    /// requester. The request stays pending until exactly that many votes
    /// are in, even when the outcome is already decided.
    ///
    /// Membership of `voter` is the pool's concern and must be checked by
    /// the caller.
    ///
    /// # Errors
    ///
    /// - `NotPending` if voting has closed
    /// - `RequesterCannotVote` if the requester votes on their own request
    /// - `AlreadyVoted` if the voter has voted before
    ///
    /// On error the request is left untouched.
    pub fn cast_vote(
        &mut self,
        voter: Address,
        vote: Vote,
        eligible_voters: usize,
        now: DateTime<Utc>,
    ) -> Result<VoteReceipt, ClaimError> {
        if self.status != RequestStatus::Pending {
            return Err(ClaimError::NotPending {
                status: self.status.to_string(),
            });
        }
        if voter == self.requester {
            return Err(ClaimError::RequesterCannotVote);
        }
        if self.has_voted(&voter) {
            return Err(ClaimError::AlreadyVoted(voter.to_string()));
        }

        self.votes.insert(voter, vote);
        self.recount();
        self.updated_at = now;

        if self.votes.len() == eligible_voters {
            let outcome = if self.voted_yes >= self.required_votes {
                RequestStatus::Approved
            } else {
                RequestStatus::Rejected
            };
            self.transition_to(outcome, now)?;
            debug!(
                request = %self.id,
                status = %self.status,
                yes = self.voted_yes,
                no = self.voted_no,
                "Ballot closed"
            );
        }

        Ok(VoteReceipt {
            request_id: self.id,
            status: self.status,
            voted_yes: self.voted_yes,
            voted_no: self.voted_no,
            required_votes: self.required_votes,
            votes_cast: self.votes.len(),
            eligible_voters,
        })
    }

    /// Marks an approved request as paid out
    pub fn mark_withdrawn(&mut self, now: DateTime<Utc>) -> Result<(), ClaimError> {
        self.ensure_approved()?;
        self.transition_to(RequestStatus::Withdrawn, now)
    }

    /// Rejects an approved request the pool can no longer fund
    pub fn reject_unfunded(&mut self, now: DateTime<Utc>) -> Result<(), ClaimError> {
        self.ensure_approved()?;
        self.transition_to(RequestStatus::Rejected, now)
    }

    fn ensure_approved(&self) -> Result<(), ClaimError> {
        if self.status != RequestStatus::Approved {
            return Err(ClaimError::NotApproved {
                status: self.status.to_string(),
            });
        }
        Ok(())
    }

    fn recount(&mut self) {
        let yes = self.votes.values().filter(|v| **v == Vote::Yes).count();
        let no = self.votes.len() - yes;
        self.voted_yes = yes as u32;
        self.voted_no = no as u32;
    }

    fn transition_to(&mut self, target: RequestStatus, now: DateTime<Utc>) -> Result<(), ClaimError> {
        if !self.can_transition_to(target) {
            return Err(ClaimError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: target.to_string(),
            });
        }
        self.status = target;
        self.updated_at = now;
        Ok(())
    }

    fn can_transition_to(&self, target: RequestStatus) -> bool {
        use RequestStatus::*;
        matches!(
            (self.status, target),
            (Pending, Approved) |
            (Pending, Rejected) |
            (Approved, Withdrawn) |
            (Approved, Rejected)
        )
    }
}
