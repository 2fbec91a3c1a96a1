pub mod liquidity_ratio;
pub mod price_tick;
pub mod swap;

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds half away from zero, matching how amounts are shown to users.
pub(crate) fn round_display(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
