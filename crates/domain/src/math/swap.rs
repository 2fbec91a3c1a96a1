//! Exact-input swap quotes against a pool price.

use super::round_display;
use crate::enums::SwapDirection;
use crate::error::DomainError;
use crate::value_objects::{Percentage, SwapQuote};
use rust_decimal::Decimal;

/// Price impact never reported above this many percent.
pub const MAX_PRICE_IMPACT_PERCENT: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

const OUTPUT_DP: u32 = 6;

/// Quotes an exact-input swap.
///
/// `pool_price` is token1 per token0. Impact is a linear estimate of 0.1%
/// per 1000 input tokens.
pub fn quote_exact_input(
    input_amount: Decimal,
    direction: SwapDirection,
    pool_price: Decimal,
    slippage: Percentage,
) -> Result<SwapQuote, DomainError> {
    if input_amount.is_zero() {
        return Ok(SwapQuote::zero(direction));
    }
    if input_amount < Decimal::ZERO {
        return Err(DomainError::NonPositiveAmount(input_amount));
    }
    if pool_price <= Decimal::ZERO {
        return Err(DomainError::NonPositivePrice(pool_price));
    }

    let rate = match direction {
        SwapDirection::Token0ToToken1 => pool_price,
        SwapDirection::Token1ToToken0 => Decimal::ONE
            .checked_div(pool_price)
            .ok_or(DomainError::Overflow("swap rate"))?,
    };

    let output_amount = input_amount
        .checked_mul(rate)
        .ok_or(DomainError::Overflow("swap output"))?;
    let output_amount = round_display(output_amount, OUTPUT_DP);
    let price_impact_percent = (input_amount / Decimal::ONE_THOUSAND * Decimal::new(1, 1))
        .min(MAX_PRICE_IMPACT_PERCENT);
    let minimum_received = output_amount
        .checked_mul(Decimal::ONE - slippage.as_fraction())
        .ok_or(DomainError::Overflow("minimum received"))?;
    let minimum_received = round_display(minimum_received, OUTPUT_DP);

    Ok(SwapQuote {
        direction,
        input_amount,
        rate,
        output_amount,
        price_impact_percent,
        minimum_received,
    })
}
