use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Pool figures as reported by the swap router. A field is `None` when the
/// read that provides it failed; the others are still shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolInfo {
    pub sqrt_price_x96: Option<String>,
    pub tick: Option<i32>,
    pub liquidity: Option<Decimal>,
    pub token0_balance: Option<Decimal>,
    pub token1_balance: Option<Decimal>,
    /// token0 price in token1.
    pub token0_price: Option<Decimal>,
    /// token1 price in token0.
    pub token1_price: Option<Decimal>,
}

impl PoolInfo {
    /// True when every read failed.
    pub fn is_unavailable(&self) -> bool {
        *self == Self::default()
    }
}
