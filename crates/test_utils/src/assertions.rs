//! Custom Test Assertions
//!
//! Assertion helpers for pool invariants with more useful failure messages
//! than a bare `assert!`.

use core_kernel::Money;
use domain_claims::WithdrawalRequest;
use domain_pool::Pool;
use rust_decimal::Decimal;

/// Asserts that a Money value has the given amount
pub fn assert_money_eq(actual: &Money, expected: Decimal) {
    assert_eq!(
        actual.amount(),
        expected,
        "Expected {} {}, got {}",
        expected,
        actual.token().symbol(),
        actual
    );
}

/// Asserts `voted_yes + voted_no == votes.len()` and that the requester did not vote
pub fn assert_tally_consistent(request: &WithdrawalRequest) {
    let tallied = (request.voted_yes() + request.voted_no()) as usize;
    assert_eq!(
        tallied,
        request.votes().len(),
        "Tally {}+{} does not match {} ballots on {}",
        request.voted_yes(),
        request.voted_no(),
        request.votes().len(),
        request.id
    );
    assert!(
        !request.has_voted(&request.requester),
        "Requester {} voted on their own request {}",
        request.requester,
        request.id
    );
}

/// Asserts `total_balance == initial_deposit + deposits - completed payouts`
///
/// `deposits` is the sum of every accepted deposit after creation.
pub fn assert_balance_equation(pool: &Pool, deposits: Decimal) {
    let paid = pool
        .total_paid_out()
        .expect("payouts share the pool token")
        .amount();
    let expected = pool.initial_deposit.amount() + deposits - paid;
    assert_eq!(
        pool.total_balance().amount(),
        expected,
        "Balance {} != initial {} + deposits {} - payouts {}",
        pool.total_balance(),
        pool.initial_deposit,
        deposits,
        paid
    );
    assert!(!pool.total_balance().is_negative(), "Balance went negative");
}

/// Asserts every request in the pool has a consistent tally
pub fn assert_pool_tallies_consistent(pool: &Pool) {
    for request in pool.withdrawal_requests() {
        assert_tally_consistent(request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::TestPoolBuilder;
    use crate::fixtures::{AddressFixtures, TemporalFixtures};
    use rust_decimal_macros::dec;

    #[test]
    fn test_fresh_pool_satisfies_balance_equation() {
        let pool = TestPoolBuilder::three_members()
            .with_deposit(AddressFixtures::alice(), dec!(350), TemporalFixtures::deposit_day())
            .build();
        assert_balance_equation(&pool, dec!(350));
        assert_money_eq(&pool.total_balance(), dec!(400));
    }

    #[test]
    #[should_panic(expected = "Balance")]
    fn test_balance_mismatch_panics() {
        let pool = TestPoolBuilder::new().build();
        assert_balance_equation(&pool, dec!(1));
    }
}
