//! Resolves the configured pool's price into a [`PoolPriceQuote`].
//!
//! The direct pool read is tried first, then the swap router. A failing
//! path logs its error and moves on; when nothing works the default ratio
//! is returned with the reason attached, so callers can tell an absent pool
//! from an unreachable node.

use crate::{
    Address, ChainError, PoolReader, PriceFeed, RouterReader, TokenReader, hex_address,
};
use async_trait::async_trait;
use lp_desk_domain::DomainError;
use lp_desk_domain::entities::TokenPair;
use lp_desk_domain::math::price_tick::{orient_price, price_from_tick, tick_to_price};
use lp_desk_domain::value_objects::{FallbackReason, PoolPriceQuote};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct PoolPriceResolver {
    pool: Option<Address>,
    pair: TokenPair,
    pools: Arc<dyn PoolReader>,
    tokens: Arc<dyn TokenReader>,
    router: Option<Arc<dyn RouterReader>>,
}

impl PoolPriceResolver {
    pub fn new(
        pool: Option<Address>,
        pair: TokenPair,
        pools: Arc<dyn PoolReader>,
        tokens: Arc<dyn TokenReader>,
    ) -> Self {
        Self {
            pool,
            pair,
            pools,
            tokens,
            router: None,
        }
    }

    /// Enables the router as a secondary price source.
    #[must_use]
    pub fn with_router(mut self, router: Arc<dyn RouterReader>) -> Self {
        self.router = Some(router);
        self
    }

    /// Resolves the current quote. Never fails.
    pub async fn resolve(&self) -> PoolPriceQuote {
        let pool = match self.pool {
            Some(pool) if !pool.is_zero() => pool,
            _ => {
                info!("No pool address configured, using initial ratio");
                return PoolPriceQuote::fallback(FallbackReason::NoPoolConfigured);
            }
        };

        let mut last_error = match self.read_pool(pool).await {
            Ok(quote) => return quote,
            Err(e) => {
                warn!(pool = ?pool, error = %e, "Direct pool read failed");
                e
            }
        };

        if let Some(router) = &self.router {
            match self.read_router(router.as_ref(), pool).await {
                Ok(quote) => return quote,
                Err(e) => {
                    warn!(pool = ?pool, error = %e, "Router pool read failed");
                    last_error = e;
                }
            }
        }

        warn!(pool = ?pool, "All price reads failed, using initial ratio");
        PoolPriceQuote::fallback(FallbackReason::ReadFailed(last_error.to_string()))
    }

    async fn read_pool(&self, pool: Address) -> Result<PoolPriceQuote, ChainError> {
        let slot0 = self.pools.slot0(pool).await?;
        let token0 = self.pools.token0(pool).await?;
        let token1 = self.pools.token1(pool).await?;
        let liquidity = self.pools.liquidity(pool).await?;

        debug!(
            tick = slot0.tick,
            sqrt_price_x96 = %slot0.sqrt_price_x96,
            liquidity,
            "Read pool slot0"
        );

        if liquidity == 0 {
            info!(pool = ?pool, "Pool has no liquidity, using initial ratio");
            return Ok(PoolPriceQuote::fallback(FallbackReason::PoolUninitialized));
        }

        let invert = self.orientation(token0, token1)?;
        let decimals0 = self.tokens.decimals(token0).await?;
        let decimals1 = self.tokens.decimals(token1).await?;
        let decimals_delta = i32::from(decimals1) - i32::from(decimals0);

        let price = orient_price(price_from_tick(slot0.tick, decimals_delta)?, invert)?;
        debug!(%price, invert, decimals_delta, "Derived pool price");

        Ok(Self::sanity_checked(
            price,
            PoolPriceQuote::live(price, slot0.tick),
        ))
    }

    async fn read_router(
        &self,
        router: &dyn RouterReader,
        pool: Address,
    ) -> Result<PoolPriceQuote, ChainError> {
        let state = router.pool_state(pool).await?;
        let router_token0 = hex_address(router.token0().await?);
        let invert = self
            .pair
            .needs_inversion(&router_token0)
            .ok_or(DomainError::TokenMismatch(router_token0))?;

        let price = orient_price(tick_to_price(state.tick)?, invert)?;
        debug!(%price, tick = state.tick, "Derived router price");

        Ok(Self::sanity_checked(
            price,
            PoolPriceQuote::from_router(price, state.tick),
        ))
    }

    /// Whether the pool price must be flipped; both pool tokens must belong
    /// to the pair.
    fn orientation(&self, token0: Address, token1: Address) -> Result<bool, ChainError> {
        let token0 = hex_address(token0);
        let token1 = hex_address(token1);
        let invert = self
            .pair
            .needs_inversion(&token0)
            .ok_or(DomainError::TokenMismatch(token0))?;
        let other = if invert {
            &self.pair.base
        } else {
            &self.pair.quote
        };
        if !other.is(&token1) {
            return Err(DomainError::TokenMismatch(token1).into());
        }
        Ok(invert)
    }

    fn sanity_checked(price: Decimal, quote: PoolPriceQuote) -> PoolPriceQuote {
        if PoolPriceQuote::is_sane_price(price) {
            quote
        } else {
            warn!(%price, "Price outside reasonable range, using initial ratio");
            PoolPriceQuote::fallback(FallbackReason::PriceOutOfRange(price))
        }
    }
}

#[async_trait]
impl PriceFeed for PoolPriceResolver {
    async fn current_quote(&self) -> PoolPriceQuote {
        self.resolve().await
    }
}
