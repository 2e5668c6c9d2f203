//! Claim caps
//!
//! Before a claim is opened its amount is checked against a cap derived from
//! the requester's personal saving. The cap is a policy object so pools can
//! swap the heuristic without touching the lifecycle code.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::cmp::Ordering;
use std::fmt::Debug;
use std::sync::Arc;

use core_kernel::Money;
use crate::error::ClaimError;
use crate::quorum::QuorumPolicy;

/// Decides how much a member may claim in a single request
pub trait ClaimCapPolicy: Send + Sync + Debug {
    /// Largest claim allowed for a member saving `personal_saving` per period
    fn max_claim(&self, personal_saving: &Money) -> Result<Money, ClaimError>;

    /// Checks a requested amount against the cap
    ///
    /// A member without a personal saving (or with a zero saving) has a cap
    /// of zero, so any claim is too large.
    fn check(&self, personal_saving: Option<&Money>, requested: &Money) -> Result<(), ClaimError> {
        let saving = match personal_saving {
            Some(saving) if saving.is_positive() => saving,
            _ => {
                return Err(ClaimError::ClaimTooLarge {
                    requested: requested.to_string(),
                    cap: Money::zero(requested.token()).to_string(),
                })
            }
        };

        let cap = self.max_claim(saving)?;
        if requested.checked_cmp(&cap)? == Ordering::Greater {
            return Err(ClaimError::ClaimTooLarge {
                requested: requested.to_string(),
                cap: cap.to_string(),
            });
        }
        Ok(())
    }
}

/// Caps a claim at a fixed multiple of the member's personal saving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavingsMultipleCap {
    multiplier: Decimal,
}

impl SavingsMultipleCap {
    pub const DEFAULT_MULTIPLIER: Decimal = dec!(10);

    pub fn new(multiplier: Decimal) -> Result<Self, ClaimError> {
        if multiplier <= Decimal::ZERO {
            return Err(ClaimError::InvalidPolicy(format!(
                "claim cap multiplier must be positive, got {}",
                multiplier
            )));
        }
        Ok(Self { multiplier })
    }

    pub fn multiplier(&self) -> Decimal {
        self.multiplier
    }
}

impl Default for SavingsMultipleCap {
    fn default() -> Self {
        Self {
            multiplier: Self::DEFAULT_MULTIPLIER,
        }
    }
}

impl ClaimCapPolicy for SavingsMultipleCap {
    fn max_claim(&self, personal_saving: &Money) -> Result<Money, ClaimError> {
        Ok(personal_saving.multiply(self.multiplier)?)
    }
}

/// The policies a pool applies when claims are opened
#[derive(Debug, Clone)]
pub struct ClaimRules {
    pub quorum: QuorumPolicy,
    pub cap: Arc<dyn ClaimCapPolicy>,
}

impl ClaimRules {
    pub fn new(quorum: QuorumPolicy, cap: Arc<dyn ClaimCapPolicy>) -> Self {
        Self { quorum, cap }
    }
}

impl Default for ClaimRules {
    fn default() -> Self {
        Self {
            quorum: QuorumPolicy::default(),
            cap: Arc::new(SavingsMultipleCap::default()),
        }
    }
}
