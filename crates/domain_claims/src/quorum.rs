//! Quorum calculation
//!
//! The number of yes-votes a request needs is fixed when the request is
//! opened: a ratio of every member other than the requester, rounded up.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ClaimError;

/// Share of eligible voters whose approval a request needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuorumPolicy {
    ratio: Decimal,
}

impl QuorumPolicy {
    /// Roughly two thirds of the other members
    pub const DEFAULT_RATIO: Decimal = dec!(0.66);

    /// Creates a policy with the given ratio, which must lie in (0, 1]
    pub fn new(ratio: Decimal) -> Result<Self, ClaimError> {
        if ratio <= Decimal::ZERO || ratio > Decimal::ONE {
            return Err(ClaimError::InvalidPolicy(format!(
                "quorum ratio must be in (0, 1], got {}",
                ratio
            )));
        }
        Ok(Self { ratio })
    }

    pub fn ratio(&self) -> Decimal {
        self.ratio
    }

    /// Members other than the requester
    pub fn eligible_voters(member_count: usize) -> usize {
        member_count.saturating_sub(1)
    }

    /// Yes-votes needed for a request in a pool of `member_count` members
    pub fn required_votes(&self, member_count: usize) -> u32 {
        let eligible = Decimal::from(Self::eligible_voters(member_count) as u64);
        (eligible * self.ratio).ceil().to_u32().unwrap_or(u32::MAX)
    }
}

impl Default for QuorumPolicy {
    fn default() -> Self {
        Self {
            ratio: Self::DEFAULT_RATIO,
        }
    }
}
