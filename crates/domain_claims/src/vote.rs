//! Votes and vote receipts

use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::RequestId;
use crate::request::RequestStatus;

/// A member's vote on another member's request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Yes,
    No,
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vote::Yes => f.write_str("yes"),
            Vote::No => f.write_str("no"),
        }
    }
}

/// What the caller learns after a vote is recorded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReceipt {
    pub request_id: RequestId,
    pub status: RequestStatus,
    pub voted_yes: u32,
    pub voted_no: u32,
    pub required_votes: u32,
    pub votes_cast: usize,
    pub eligible_voters: usize,
}

impl VoteReceipt {
    /// True when this vote closed the ballot
    pub fn resolved(&self) -> bool {
        self.status != RequestStatus::Pending
    }
}
