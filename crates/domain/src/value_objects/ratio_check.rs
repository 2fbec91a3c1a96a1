use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Deposit amounts that would match the pool price exactly, each solved from
/// the other side of the user's input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedAmounts {
    /// token0 amount matching the entered token1 amount.
    pub token0: Decimal,
    /// token1 amount matching the entered token0 amount.
    pub token1: Decimal,
}

/// Result of comparing a user's deposit ratio against the pool price.
///
/// Only meaningful relative to the pool price it was computed against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityRatioCheck {
    /// token1 per token0 implied by the entered amounts.
    pub ratio: Decimal,
    pub pool_price: Decimal,
    pub is_valid_ratio: bool,
    /// Allowed relative deviation as a fraction (`0.05` = 5%).
    pub tolerance: Decimal,
    pub suggested_amounts: SuggestedAmounts,
    /// Signed deviation of `ratio` from `pool_price`, in percent, two decimals.
    pub price_difference_percent: Decimal,
}
