use crate::error::DomainError;
use primitive_types::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Precision of the router's fixed-point values (prices, liquidity, history amounts).
pub const WAD_DECIMALS: u8 = 18;

/// A raw on-chain token amount together with the token's precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount {
    pub raw: U256,
    pub decimals: u8,
}

impl Amount {
    pub fn new(raw: U256, decimals: u8) -> Self {
        Self { raw, decimals }
    }

    /// Scales a human-readable amount up to raw units. Digits beyond the
    /// token's precision are truncated.
    pub fn from_decimal(d: Decimal, decimals: u8) -> Result<Self, DomainError> {
        if d.is_sign_negative() && !d.is_zero() {
            return Err(DomainError::NonPositiveAmount(d));
        }
        let overflow = || DomainError::AmountOverflow(d.to_string());

        let digits = U256::from(d.mantissa().unsigned_abs());
        let scale = d.scale();
        let target = u32::from(decimals);

        let raw = if target >= scale {
            let factor = pow10_u256(target - scale).ok_or_else(overflow)?;
            digits.checked_mul(factor).ok_or_else(overflow)?
        } else {
            let factor = pow10_u256(scale - target).ok_or_else(overflow)?;
            digits / factor
        };

        Ok(Self { raw, decimals })
    }

    /// Scales the raw amount down to a human-readable decimal.
    pub fn to_decimal(&self) -> Result<Decimal, DomainError> {
        let overflow = || DomainError::AmountOverflow(self.raw.to_string());
        let mut value = Decimal::from_str(&self.raw.to_string()).map_err(|_| overflow())?;
        value
            .set_scale(u32::from(self.decimals))
            .map_err(|_| overflow())?;
        Ok(value.normalize())
    }

    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_decimal() {
            Ok(d) => write!(f, "{d}"),
            Err(_) => write!(f, "{} (raw, {} decimals)", self.raw, self.decimals),
        }
    }
}

/// Formats a raw value with the given precision, the way wallets display balances.
pub fn format_units(raw: U256, decimals: u8) -> Result<Decimal, DomainError> {
    Amount::new(raw, decimals).to_decimal()
}

fn pow10_u256(exp: u32) -> Option<U256> {
    U256::from(10u8).checked_pow(U256::from(exp))
}
