use crate::enums::SwapDirection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Expected outcome of an exact-input swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapQuote {
    pub direction: SwapDirection,
    pub input_amount: Decimal,
    /// Output tokens per input token.
    pub rate: Decimal,
    pub output_amount: Decimal,
    /// Estimated price impact in percent, capped at 5.
    pub price_impact_percent: Decimal,
    /// Output after applying the slippage tolerance.
    pub minimum_received: Decimal,
}

impl SwapQuote {
    pub fn zero(direction: SwapDirection) -> Self {
        Self {
            direction,
            input_amount: Decimal::ZERO,
            rate: Decimal::ZERO,
            output_amount: Decimal::ZERO,
            price_impact_percent: Decimal::ZERO,
            minimum_received: Decimal::ZERO,
        }
    }
}
