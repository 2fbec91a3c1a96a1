//! Checks run before asking the wallet to add liquidity.

use crate::error::DomainError;
use crate::value_objects::Amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Gas limit used when the node cannot estimate the deposit.
pub const FALLBACK_GAS_LIMIT: u64 = 1_500_000;
/// Estimates are padded by this percentage.
pub const GAS_BUFFER_PERCENT: u64 = 120;

/// On-chain state of one side of the deposit.
#[derive(Debug, Clone)]
pub struct DepositLeg {
    pub symbol: String,
    pub desired: Amount,
    pub balance: Amount,
    /// Allowance already granted to the router.
    pub allowance: Amount,
}

impl DepositLeg {
    fn check_balance(&self) -> Result<(), DomainError> {
        if self.balance.raw < self.desired.raw {
            return Err(DomainError::InsufficientBalance {
                symbol: self.symbol.clone(),
            });
        }
        Ok(())
    }

    fn needs_approval(&self) -> bool {
        self.allowance.raw < self.desired.raw
    }
}

/// What the wallet has to do to deposit both legs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositPlan {
    pub amount0: Amount,
    pub amount1: Amount,
    pub approve_token0: bool,
    pub approve_token1: bool,
    pub gas_limit: u64,
}

impl DepositPlan {
    /// Builds a plan, rejecting a deposit the wallet cannot cover.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` for the first leg whose balance is short.
    pub fn prepare(
        leg0: &DepositLeg,
        leg1: &DepositLeg,
        gas_estimate: Option<u64>,
    ) -> Result<Self, DomainError> {
        if leg0.desired.is_zero() {
            return Err(DomainError::NonPositiveAmount(Decimal::ZERO));
        }
        if leg1.desired.is_zero() {
            return Err(DomainError::NonPositiveAmount(Decimal::ZERO));
        }
        leg0.check_balance()?;
        leg1.check_balance()?;

        Ok(Self {
            amount0: leg0.desired,
            amount1: leg1.desired,
            approve_token0: leg0.needs_approval(),
            approve_token1: leg1.needs_approval(),
            gas_limit: gas_limit(gas_estimate),
        })
    }
}

/// Pads an estimate by 20%, or falls back to a fixed limit.
pub fn gas_limit(estimate: Option<u64>) -> u64 {
    match estimate {
        Some(gas) => gas.saturating_mul(GAS_BUFFER_PERCENT) / 100,
        None => FALLBACK_GAS_LIMIT,
    }
}
