//! Token amounts with precise decimal arithmetic
//!
//! Pools settle in a single ERC-20 style token chosen from a fixed allow-list.
//! `Money` pairs a decimal amount with that token so amounts from different
//! pools can never be mixed by accident.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Settlement tokens a pool may be created with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Token {
    Dai,
    Usdc,
    Usdt,
}

impl Token {
    /// Every token a pool may settle in
    pub const ALL: [Token; 3] = [Token::Dai, Token::Usdc, Token::Usdt];

    /// Returns the ticker symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Token::Dai => "DAI",
            Token::Usdc => "USDC",
            Token::Usdt => "USDT",
        }
    }

    /// Returns the mainnet contract address
    pub fn address(&self) -> &'static str {
        match self {
            Token::Dai => "0x6B175474E89094C44Da98b954EedeAC495271d0F",
            Token::Usdc => "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
            Token::Usdt => "0xdAC17F958D2ee523a2206206994597C13D831ec7",
        }
    }

    /// Returns the number of decimal places the token contract uses
    pub fn decimals(&self) -> u32 {
        match self {
            Token::Dai => 18,
            Token::Usdc | Token::Usdt => 6,
        }
    }

    /// Resolves a token from its contract address (case-insensitive)
    pub fn from_address(address: &str) -> Result<Token, MoneyError> {
        let address = address.trim();
        Token::ALL
            .into_iter()
            .find(|t| t.address().eq_ignore_ascii_case(address))
            .ok_or_else(|| MoneyError::UnknownToken(address.to_string()))
    }

    /// Resolves a token from its ticker symbol (case-insensitive)
    pub fn from_symbol(symbol: &str) -> Result<Token, MoneyError> {
        let symbol = symbol.trim();
        Token::ALL
            .into_iter()
            .find(|t| t.symbol().eq_ignore_ascii_case(symbol))
            .ok_or_else(|| MoneyError::UnknownToken(symbol.to_string()))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Token mismatch: cannot operate on {0} and {1}")]
    TokenMismatch(String, String),

    #[error("Unknown token: {0}")]
    UnknownToken(String),

    #[error("Overflow during calculation")]
    Overflow,
}

/// An amount of a settlement token
///
/// Amounts are rounded to the token's own decimal places on construction, so
/// a USDC amount never carries more precision than the contract could hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    token: Token,
}

impl Money {
    /// Creates a new Money value
    pub fn new(amount: Decimal, token: Token) -> Self {
        Self {
            amount: amount.round_dp(token.decimals()),
            token,
        }
    }

    /// Creates a zero amount in the specified token
    pub fn zero(token: Token) -> Self {
        Self {
            amount: Decimal::ZERO,
            token,
        }
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the token
    pub fn token(&self) -> Token {
        self.token
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is positive
    pub fn is_positive(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Checked addition that returns an error on token mismatch or overflow
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_token(other)?;
        let sum = self.amount.checked_add(other.amount).ok_or(MoneyError::Overflow)?;
        Ok(Self::new(sum, self.token))
    }

    /// Checked subtraction that returns an error on token mismatch or overflow
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_token(other)?;
        let difference = self.amount.checked_sub(other.amount).ok_or(MoneyError::Overflow)?;
        Ok(Self::new(difference, self.token))
    }

    /// Compares two amounts of the same token
    pub fn checked_cmp(&self, other: &Money) -> Result<Ordering, MoneyError> {
        self.ensure_same_token(other)?;
        Ok(self.amount.cmp(&other.amount))
    }

    /// Multiplies by a scalar (e.g., a cap multiplier)
    pub fn multiply(&self, factor: Decimal) -> Result<Self, MoneyError> {
        let product = self.amount.checked_mul(factor).ok_or(MoneyError::Overflow)?;
        Ok(Self::new(product, self.token))
    }

    fn ensure_same_token(&self, other: &Money) -> Result<(), MoneyError> {
        if self.token != other.token {
            return Err(MoneyError::TokenMismatch(
                self.token.to_string(),
                other.token.to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount.normalize(), self.token.symbol())
    }
}
