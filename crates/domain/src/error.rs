use rust_decimal::Decimal;
use thiserror::Error;

/// Errors produced by domain calculations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// An amount field was left empty.
    #[error("amount is empty")]
    EmptyAmount,
    /// An amount could not be parsed as a decimal number.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    /// An amount that must be strictly positive was zero or negative.
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
    /// A price that must be strictly positive was zero or negative.
    #[error("price must be positive, got {0}")]
    NonPositivePrice(Decimal),
    /// The tick lies outside the AMM's tick range.
    #[error("tick {0} is outside the valid tick range")]
    InvalidTick(i32),
    /// The price derived from a tick does not fit in a decimal.
    #[error("tick {tick} with decimal adjustment {decimals_delta} is not representable")]
    PriceOverflow { tick: i32, decimals_delta: i32 },
    /// A raw token amount does not fit in a decimal at its precision.
    #[error("raw amount {0} does not fit in a decimal")]
    AmountOverflow(String),
    /// An intermediate result of a ratio or quote calculation does not fit in
    /// a decimal.
    #[error("{0} is out of decimal range")]
    Overflow(&'static str),
    /// A token reported by the pool is not part of the configured pair.
    #[error("token {0} is not part of the configured pair")]
    TokenMismatch(String),
    /// The owner does not hold enough of a token.
    #[error("Insufficient {symbol} balance")]
    InsufficientBalance { symbol: String },
}
