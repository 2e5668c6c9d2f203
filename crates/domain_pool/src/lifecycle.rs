//! Pool-level claim lifecycle
//!
//! Opening a claim, voting on it and paying it out all need pool state the
//! request itself does not carry: membership, personal savings, and the
//! balance. These methods check that state and then drive the request's own
//! state machine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use core_kernel::{Address, Money, RequestId};
use domain_claims::{ClaimError, ClaimRules, QuorumPolicy, RequestStatus, Vote, VoteReceipt, WithdrawalRequest};
use crate::error::PoolError;
use crate::pool::Pool;

/// How a payout attempt ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PayoutOutcome {
    /// Funds left the pool and the request is withdrawn
    Paid { amount: Money, remaining_balance: Money },
    /// The pool could not cover the request, which is now rejected
    Unfunded { requested: Money, available: Money },
}

impl Pool {
    /// Opens a withdrawal request for `requester`
    ///
    /// Checks run in order: membership, amount and reason, the claim cap,
    /// then liquidity. The quorum is fixed from the current member count.
    ///
    /// # Errors
    ///
    /// - `NotMember` if the requester is not in the pool
    /// - `InvalidInput` if the amount has more decimal places than the pool token
    /// - `Claim(InvalidAmount | EmptyReason)` for a non-positive amount or blank reason
    /// - `Claim(ClaimTooLarge)` if the cap policy refuses the amount, including
    ///   any claim by a member with no personal saving
    /// - `InsufficientLiquidity` if the pool balance is below the amount
    pub fn create_claim(
        &mut self,
        rules: &ClaimRules,
        requester: &Address,
        amount: Decimal,
        reason: &str,
        now: DateTime<Utc>,
    ) -> Result<RequestId, PoolError> {
        self.ensure_member(requester)?;

        let amount = self.money(amount)?;
        let request = WithdrawalRequest::open(
            self.id,
            requester.clone(),
            amount,
            reason,
            rules.quorum.required_votes(self.member_count()),
            now,
        )?;

        rules.cap.check(self.personal_saving(requester), &amount)?;

        if self.total_balance.checked_cmp(&amount)? == Ordering::Less {
            return Err(PoolError::InsufficientLiquidity {
                available: self.total_balance.to_string(),
                requested: amount.to_string(),
            });
        }

        let id = request.id;
        self.withdrawal_requests.push(request);
        Ok(id)
    }

    /// Records `voter`'s vote on a request
    ///
    /// # Errors
    ///
    /// - `RequestNotFound` if the request is not in this pool
    /// - `Claim(NotEligibleVoter)` if the voter is not a member
    /// - `Claim(NotPending | RequesterCannotVote | AlreadyVoted)` from the request
    pub fn cast_vote(
        &mut self,
        request_id: RequestId,
        voter: &Address,
        vote: Vote,
        now: DateTime<Utc>,
    ) -> Result<VoteReceipt, PoolError> {
        let eligible = QuorumPolicy::eligible_voters(self.member_count());
        let is_member = self.is_member(voter);
        let request = self.request_mut(request_id)?;

        if !is_member {
            return Err(ClaimError::NotEligibleVoter(voter.to_string()).into());
        }
        Ok(request.cast_vote(voter.clone(), vote, eligible, now)?)
    }

    /// Pays out an approved request
    ///
    /// When the balance covers the request, the balance drops by the
    /// requested amount and the request becomes withdrawn. Otherwise the
    /// request is rejected and the balance is left alone; that case is an
    /// `Ok(PayoutOutcome::Unfunded)` so the rejection can be committed.
    ///
    /// # Errors
    ///
    /// - `RequestNotFound` if the request is not in this pool
    /// - `Claim(NotApproved)` if the request is not approved
    pub fn process_payout(&mut self, request_id: RequestId, now: DateTime<Utc>) -> Result<PayoutOutcome, PoolError> {
        let balance = self.total_balance;
        let request = self.request_mut(request_id)?;
        if request.status() != RequestStatus::Approved {
            return Err(ClaimError::NotApproved {
                status: request.status().to_string(),
            }
            .into());
        }

        let requested = request.amount_requested;
        if balance.checked_cmp(&requested)? == Ordering::Less {
            request.reject_unfunded(now)?;
            return Ok(PayoutOutcome::Unfunded {
                requested,
                available: balance,
            });
        }

        let remaining_balance = balance.checked_sub(&requested)?;
        request.mark_withdrawn(now)?;
        self.total_balance = remaining_balance;

        Ok(PayoutOutcome::Paid {
            amount: requested,
            remaining_balance,
        })
    }

    /// Number of the member's requests that have been paid out
    pub fn withdrawals_taken(&self, member: &Address) -> usize {
        self.withdrawal_requests
            .iter()
            .filter(|r| &r.requester == member && r.status() == RequestStatus::Withdrawn)
            .count()
    }

    /// Sum of every completed payout
    pub fn total_paid_out(&self) -> Result<Money, PoolError> {
        self.withdrawal_requests
            .iter()
            .filter(|r| r.status() == RequestStatus::Withdrawn)
            .try_fold(Money::zero(self.token), |acc, r| acc.checked_add(&r.amount_requested))
            .map_err(PoolError::from)
    }

    fn request_mut(&mut self, request_id: RequestId) -> Result<&mut WithdrawalRequest, PoolError> {
        self.withdrawal_requests
            .iter_mut()
            .find(|r| r.id == request_id)
            .ok_or_else(|| PoolError::RequestNotFound(request_id.to_string()))
    }
}
