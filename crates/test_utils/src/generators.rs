//! Property-Based Test Generators
//!
//! Proptest strategies and `fake` data for Breadfund domain values.

use chrono::{DateTime, Duration, TimeZone, Utc};
use core_kernel::{Address, Money, Token};
use fake::faker::company::en::CompanyName;
use fake::Fake;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating supported tokens
pub fn token_strategy() -> impl Strategy<Value = Token> {
    prop_oneof![Just(Token::Dai), Just(Token::Usdc), Just(Token::Usdt)]
}

/// Strategy for generating positive amounts with up to two decimal places
pub fn positive_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64, 0u32..3u32).prop_map(|(m, s)| Decimal::new(m, s))
}

/// Strategy for generating positive Money in any supported token
pub fn positive_money_strategy() -> impl Strategy<Value = Money> {
    (positive_amount_strategy(), token_strategy()).prop_map(|(amount, token)| Money::new(amount, token))
}

/// Strategy for generating member addresses
pub fn address_strategy() -> impl Strategy<Value = Address> {
    "0x[0-9a-f]{40}".prop_map(|s| Address::parse(&s).expect("generated address is never blank"))
}

/// Strategy for generating timestamps within 2025
pub fn timestamp_2025_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..365 * 24).prop_map(|hours| {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::hours(hours)
    })
}

/// Strategy for generating quorum ratios in (0, 1]
pub fn quorum_ratio_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=100i64).prop_map(|n| Decimal::new(n, 2))
}

/// A plausible pool name
pub fn fake_pool_name() -> String {
    let company: String = CompanyName().fake();
    format!("{} Mutual Aid", company)
}

/// A random, well-formed member address
pub fn fake_address() -> Address {
    let digits: String = (0..40)
        .map(|_| {
            let nibble: u8 = (0u8..16).fake();
            char::from_digit(u32::from(nibble), 16).unwrap_or('0')
        })
        .collect();
    Address::parse(&format!("0x{}", digits)).expect("generated address is never blank")
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn positive_money_is_always_positive(money in positive_money_strategy()) {
            prop_assert!(money.is_positive());
        }

        #[test]
        fn quorum_ratio_is_in_range(ratio in quorum_ratio_strategy()) {
            prop_assert!(ratio > Decimal::ZERO && ratio <= Decimal::ONE);
        }

        #[test]
        fn addresses_have_expected_shape(address in address_strategy()) {
            prop_assert_eq!(address.as_str().len(), 42);
        }
    }

    #[test]
    fn test_fake_values_are_well_formed() {
        assert!(fake_pool_name().ends_with("Mutual Aid"));
        assert_eq!(fake_address().as_str().len(), 42);
    }
}
