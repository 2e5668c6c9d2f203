//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::identifiers::{Address, AddressError};
use core_kernel::money::{MoneyError, Token};

#[test]
fn test_core_error_validation() {
    let error = CoreError::validation("Invalid input");

    match error {
        CoreError::Validation(msg) => assert_eq!(msg, "Invalid input"),
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_core_error_from_money_error() {
    let money_error = MoneyError::TokenMismatch("DAI".to_string(), "USDC".to_string());
    let core_error: CoreError = money_error.into();

    assert!(matches!(core_error, CoreError::Money(_)));
}

#[test]
fn test_core_error_from_unknown_token() {
    fn resolve(address: &str) -> Result<Token, CoreError> {
        Ok(Token::from_address(address)?)
    }

    let error = resolve("0xdeadbeef").unwrap_err();
    assert!(error.to_string().contains("Unknown token"));
}

#[test]
fn test_core_error_from_address_error() {
    fn parse(raw: &str) -> Result<Address, CoreError> {
        Ok(Address::parse(raw)?)
    }

    let error = parse("").unwrap_err();
    assert!(matches!(error, CoreError::Address(AddressError::Empty)));
}

#[test]
fn test_core_error_display() {
    let error = CoreError::validation("Test error");
    let display = format!("{}", error);

    assert!(display.contains("Validation error"));
}
