use crate::error::DomainError;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Lowest tick a concentrated-liquidity pool can reach.
pub const MIN_TICK: i32 = -887272;
/// Highest tick a concentrated-liquidity pool can reach.
pub const MAX_TICK: i32 = 887272;

const TICK_BASE: f64 = 1.0001;

/// Returns the price corresponding to a given tick.
/// P = 1.0001 ^ tick
pub fn tick_to_price(tick: i32) -> Result<Decimal, DomainError> {
    price_from_tick(tick, 0)
}

/// Returns the price of a tick adjusted for the pair's token precision.
/// P = 1.0001 ^ tick * 10 ^ decimals_delta
///
/// `decimals_delta` is `decimals(token1) - decimals(token0)` of the pool.
pub fn price_from_tick(tick: i32, decimals_delta: i32) -> Result<Decimal, DomainError> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(DomainError::InvalidTick(tick));
    }
    let overflow = DomainError::PriceOverflow {
        tick,
        decimals_delta,
    };

    let price_f64 = TICK_BASE.powi(tick) * 10f64.powi(decimals_delta);
    if !price_f64.is_finite() {
        return Err(overflow);
    }
    let price = Decimal::from_f64(price_f64).ok_or(overflow.clone())?;
    // Prices below decimal precision collapse to zero.
    if price.is_zero() {
        return Err(overflow);
    }
    Ok(price)
}

/// Orients a pool price. Pool prices are token1 per token0; when the pool's
/// token0 is the pair's quote token the price is flipped.
pub fn orient_price(price: Decimal, invert: bool) -> Result<Decimal, DomainError> {
    if price <= Decimal::ZERO {
        return Err(DomainError::NonPositivePrice(price));
    }
    if invert {
        Decimal::ONE
            .checked_div(price)
            .ok_or(DomainError::Overflow("inverted price"))
    } else {
        Ok(price)
    }
}
