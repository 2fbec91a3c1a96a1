//! Compares a user's deposit ratio against the pool price.
//!
//! amounts are token0 and token1 of the configured pair; the pool price is
//! token1 per token0, so a matching deposit has `amount1 / amount0 == price`.

use super::round_display;
use crate::error::DomainError;
use crate::value_objects::{LiquidityRatioCheck, SuggestedAmounts};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Default allowed deviation between the deposit ratio and the pool price (0.05 = 5%).
pub const DEFAULT_RATIO_TOLERANCE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

const SUGGESTION_DP: u32 = 6;
const DIFFERENCE_DP: u32 = 2;

/// Validates deposit ratios against a fixed tolerance.
#[derive(Debug, Clone, Copy)]
pub struct RatioValidator {
    tolerance: Decimal,
}

impl Default for RatioValidator {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_RATIO_TOLERANCE,
        }
    }
}

impl RatioValidator {
    /// Creates a validator with a custom tolerance fraction.
    pub fn with_tolerance(tolerance: Decimal) -> Self {
        Self {
            tolerance: tolerance.abs(),
        }
    }

    pub fn tolerance(&self) -> Decimal {
        self.tolerance
    }

    /// Checks amounts as typed by the user.
    pub fn check_input(
        &self,
        token0_amount: &str,
        token1_amount: &str,
        pool_price: Decimal,
    ) -> Result<LiquidityRatioCheck, DomainError> {
        let amount0 = parse_amount(token0_amount)?;
        let amount1 = parse_amount(token1_amount)?;
        self.check(amount0, amount1, pool_price)
    }

    /// Checks decoded amounts.
    pub fn check(
        &self,
        amount0: Decimal,
        amount1: Decimal,
        pool_price: Decimal,
    ) -> Result<LiquidityRatioCheck, DomainError> {
        if amount0 <= Decimal::ZERO {
            return Err(DomainError::NonPositiveAmount(amount0));
        }
        if amount1 <= Decimal::ZERO {
            return Err(DomainError::NonPositiveAmount(amount1));
        }
        if pool_price <= Decimal::ZERO {
            return Err(DomainError::NonPositivePrice(pool_price));
        }

        let ratio = amount1
            .checked_div(amount0)
            .ok_or(DomainError::Overflow("deposit ratio"))?;
        let deviation = ratio
            .checked_sub(pool_price)
            .and_then(|d| d.checked_div(pool_price))
            .ok_or(DomainError::Overflow("price deviation"))?;
        let difference_percent = deviation
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or(DomainError::Overflow("price difference"))?;

        Ok(LiquidityRatioCheck {
            ratio,
            pool_price,
            is_valid_ratio: deviation.abs() <= self.tolerance,
            tolerance: self.tolerance,
            suggested_amounts: SuggestedAmounts {
                token0: suggest_token0(amount1, pool_price)?,
                token1: suggest_token1(amount0, pool_price)?,
            },
            price_difference_percent: round_display(difference_percent, DIFFERENCE_DP),
        })
    }
}

/// Checks a deposit against the pool price with the default tolerance.
pub fn check_liquidity_ratio(
    token0_amount: &str,
    token1_amount: &str,
    pool_price: Decimal,
) -> Result<LiquidityRatioCheck, DomainError> {
    RatioValidator::default().check_input(token0_amount, token1_amount, pool_price)
}

/// token1 amount that pairs with `amount0` at `pool_price`.
pub fn suggest_token1(amount0: Decimal, pool_price: Decimal) -> Result<Decimal, DomainError> {
    let amount1 = amount0
        .checked_mul(pool_price)
        .ok_or(DomainError::Overflow("suggested token1 amount"))?;
    Ok(round_display(amount1, SUGGESTION_DP))
}

/// token0 amount that pairs with `amount1` at `pool_price`.
pub fn suggest_token0(amount1: Decimal, pool_price: Decimal) -> Result<Decimal, DomainError> {
    if pool_price <= Decimal::ZERO {
        return Err(DomainError::NonPositivePrice(pool_price));
    }
    let amount0 = amount1
        .checked_div(pool_price)
        .ok_or(DomainError::Overflow("suggested token0 amount"))?;
    Ok(round_display(amount0, SUGGESTION_DP))
}

/// Parses a user-entered amount. Blank input is reported separately so
/// callers can leave the check empty while the user is typing.
pub fn parse_amount(input: &str) -> Result<Decimal, DomainError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyAmount);
    }
    let value = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| DomainError::InvalidAmount(trimmed.to_string()))?;
    if value <= Decimal::ZERO {
        return Err(DomainError::NonPositiveAmount(value));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_matching_ratio_is_valid() {
        let check = check_liquidity_ratio("100", "100000", dec!(1000)).unwrap();
        assert_eq!(check.ratio, dec!(1000));
        assert!(check.is_valid_ratio);
        assert_eq!(check.price_difference_percent, Decimal::ZERO);
        assert_eq!(check.suggested_amounts.token1, dec!(100000));
        assert_eq!(check.suggested_amounts.token0, dec!(100));
        assert_eq!(check.tolerance, dec!(0.05));
    }

    #[test]
    fn test_half_ratio_is_invalid() {
        let check = check_liquidity_ratio("100", "50000", dec!(1000)).unwrap();
        assert_eq!(check.ratio, dec!(500));
        assert_eq!(check.price_difference_percent, dec!(-50));
        assert!(!check.is_valid_ratio);
        assert_eq!(check.suggested_amounts.token1, dec!(100000));
        assert_eq!(check.suggested_amounts.token0, dec!(50));
    }

    #[test]
    fn test_tolerance_boundary() {
        // Exactly 5% above the pool price is still accepted.
        let at_edge = check_liquidity_ratio("100", "105000", dec!(1000)).unwrap();
        assert!(at_edge.is_valid_ratio);
        assert_eq!(at_edge.price_difference_percent, dec!(5));

        let past_edge = check_liquidity_ratio("100", "105100", dec!(1000)).unwrap();
        assert!(!past_edge.is_valid_ratio);

        let below_edge = check_liquidity_ratio("100", "95000", dec!(1000)).unwrap();
        assert!(below_edge.is_valid_ratio);
    }

    #[test]
    fn test_validity_matches_absolute_bound() {
        let price = dec!(1234.5678);
        for amount1 in [dec!(1000), dec!(1172.84), dec!(1234.5678), dec!(1296.3), dec!(1400)] {
            let check = RatioValidator::default().check(Decimal::ONE, amount1, price).unwrap();
            let bound = (check.ratio - price).abs() <= dec!(0.05) * price;
            assert_eq!(check.is_valid_ratio, bound, "amount1 {amount1}");
        }
    }

    #[test]
    fn test_suggestion_round_trip() {
        for (amount0, price) in [(dec!(3), dec!(1000)), (dec!(0.25), dec!(1843.219)), (dec!(7), dec!(0.5))] {
            let suggested = suggest_token1(amount0, price).unwrap();
            let implied = suggested / amount0;
            assert!((implied - price).abs() < dec!(0.00001), "{amount0} @ {price}");
        }
    }

    #[test]
    fn test_extreme_amounts_report_overflow() {
        assert_eq!(
            check_liquidity_ratio("0.0000000001", "79228162514264337593543950", dec!(1000)),
            Err(DomainError::Overflow("deposit ratio"))
        );
        assert_eq!(
            suggest_token1(Decimal::MAX, dec!(1000)),
            Err(DomainError::Overflow("suggested token1 amount"))
        );
        assert_eq!(
            suggest_token0(Decimal::MAX, dec!(0.001)),
            Err(DomainError::Overflow("suggested token0 amount"))
        );
        assert!(matches!(
            RatioValidator::default().check(dec!(0.0000001), Decimal::MAX, dec!(0.001)),
            Err(DomainError::Overflow(_))
        ));
    }

    #[test]
    fn test_extreme_but_representable_amounts() {
        let check = RatioValidator::default()
            .check(dec!(1000000000000), dec!(1000000000000000), dec!(1000))
            .unwrap();
        assert!(check.is_valid_ratio);
        assert_eq!(check.suggested_amounts.token1, dec!(1000000000000000));

        let tiny = RatioValidator::default()
            .check(dec!(0.000000000001), dec!(0.000000001), dec!(1000))
            .unwrap();
        assert_eq!(tiny.ratio, dec!(1000));
        assert!(tiny.is_valid_ratio);
    }

    #[test]
    fn test_custom_tolerance() {
        let strict = RatioValidator::with_tolerance(dec!(0.01));
        let check = strict.check(dec!(100), dec!(103000), dec!(1000)).unwrap();
        assert!(!check.is_valid_ratio);
        assert_eq!(check.tolerance, dec!(0.01));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(
            check_liquidity_ratio("", "1", dec!(1)),
            Err(DomainError::EmptyAmount)
        );
        assert!(matches!(
            check_liquidity_ratio("abc", "1", dec!(1)),
            Err(DomainError::InvalidAmount(_))
        ));
        assert!(matches!(
            check_liquidity_ratio("0", "1", dec!(1)),
            Err(DomainError::NonPositiveAmount(_))
        ));
        assert!(matches!(
            check_liquidity_ratio("1", "1", Decimal::ZERO),
            Err(DomainError::NonPositivePrice(_))
        ));
    }
}
