//! Pool figures for display, read through the swap router.

use crate::{Address, RouterReader, U256};
use lp_desk_domain::entities::PoolInfo;
use lp_desk_domain::value_objects::{WAD_DECIMALS, format_units};
use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct PoolInfoLoader {
    router: Arc<dyn RouterReader>,
    pool: Address,
}

impl PoolInfoLoader {
    pub fn new(router: Arc<dyn RouterReader>, pool: Address) -> Self {
        Self { router, pool }
    }

    /// Loads every figure the router exposes. Each read stands alone, so a
    /// failed one only blanks its own fields.
    pub async fn load(&self) -> PoolInfo {
        let mut info = PoolInfo::default();

        match self.router.pool_state(self.pool).await {
            Ok(state) => {
                info.sqrt_price_x96 = Some(state.sqrt_price_x96.to_string());
                info.tick = Some(state.tick);
                info.liquidity = wad(U256::from(state.liquidity));
            }
            Err(e) => warn!(pool = ?self.pool, error = %e, "Failed to read pool state"),
        }

        match self.router.pool_balances(self.pool).await {
            Ok((balance0, balance1)) => {
                info.token0_balance = wad(balance0);
                info.token1_balance = wad(balance1);
            }
            Err(e) => warn!(pool = ?self.pool, error = %e, "Failed to read pool balances"),
        }

        match self.router.token_price(self.pool).await {
            Ok(raw) => {
                info.token0_price = wad(raw);
                info.token1_price = info
                    .token0_price
                    .filter(|p| !p.is_zero())
                    .and_then(|p| Decimal::ONE.checked_div(p))
                    .map(|p| p.round_dp_with_strategy(6, RoundingStrategy::MidpointAwayFromZero));
            }
            Err(e) => warn!(pool = ?self.pool, error = %e, "Failed to read token price"),
        }

        debug!(?info, "Loaded pool info");
        info
    }
}

fn wad(raw: U256) -> Option<Decimal> {
    match format_units(raw, WAD_DECIMALS) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(%raw, error = %e, "Router value out of decimal range");
            None
        }
    }
}
