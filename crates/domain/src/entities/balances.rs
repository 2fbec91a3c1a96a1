use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Wallet balances for the configured pair and the chain's native coin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub token0: Decimal,
    pub token1: Decimal,
    pub native: Decimal,
}
