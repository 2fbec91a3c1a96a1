//! Keeps the latest pool quote and refuses ratio checks against an old one.

use crate::error::ExecutionError;
use crate::scheduler::{DEFAULT_REFRESH_INTERVAL, TaskEvent};
use chrono::Utc;
use lp_desk_domain::math::liquidity_ratio::RatioValidator;
use lp_desk_domain::value_objects::{LiquidityRatioCheck, PoolPriceQuote};
use lp_desk_protocols::PriceFeed;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, mpsc};
use tracing::{debug, info, warn};

/// Configuration for the price monitor.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Oldest quote a ratio check may use.
    pub max_quote_age: Duration,
    /// Only events for this task trigger a refresh.
    pub task_name: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            max_quote_age: DEFAULT_REFRESH_INTERVAL * 2,
            task_name: "pool-price".to_string(),
        }
    }
}

pub struct PriceMonitor {
    feed: Arc<dyn PriceFeed>,
    latest: RwLock<Option<PoolPriceQuote>>,
    validator: RatioValidator,
    config: MonitorConfig,
}

impl PriceMonitor {
    pub fn new(feed: Arc<dyn PriceFeed>, config: MonitorConfig) -> Self {
        Self {
            feed,
            latest: RwLock::new(None),
            validator: RatioValidator::default(),
            config,
        }
    }

    #[must_use]
    pub fn with_validator(mut self, validator: RatioValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Reads a new quote and stores it as the latest.
    pub async fn refresh(&self) -> PoolPriceQuote {
        let quote = self.feed.current_quote().await;
        if let Some(reason) = quote.fallback_reason() {
            info!(%reason, price = %quote.price(), "Using initial ratio");
        } else {
            debug!(price = %quote.price(), source = ?quote.source(), "Pool price refreshed");
        }
        *self.latest.write().await = Some(quote.clone());
        quote
    }

    pub async fn latest(&self) -> Option<PoolPriceQuote> {
        self.latest.read().await.clone()
    }

    /// The latest quote, if it is recent enough.
    pub async fn fresh_quote(&self) -> Result<PoolPriceQuote, ExecutionError> {
        let quote = self.latest().await.ok_or(ExecutionError::NoQuote)?;
        let max_age = self.config.max_quote_age;
        let now = Utc::now();
        if quote.is_stale(max_age, now) {
            let age = quote.age(now);
            warn!(?age, ?max_age, "Latest pool price is stale");
            return Err(ExecutionError::StaleQuote { age, max_age });
        }
        Ok(quote)
    }

    /// Validates user-entered deposit amounts against the latest fresh quote.
    pub async fn check_ratio(
        &self,
        amount0: &str,
        amount1: &str,
    ) -> Result<LiquidityRatioCheck, ExecutionError> {
        let quote = self.fresh_quote().await?;
        Ok(self
            .validator
            .check_input(amount0, amount1, quote.price())?)
    }

    /// Refreshes on every matching event until the channel closes.
    pub async fn run<F>(&self, mut events: mpsc::Receiver<TaskEvent>, mut on_update: F)
    where
        F: FnMut(&PoolPriceQuote) + Send,
    {
        info!(task = %self.config.task_name, "Price monitor started");
        while let Some(event) = events.recv().await {
            if event.task_name != self.config.task_name {
                continue;
            }
            let quote = self.refresh().await;
            on_update(&quote);
        }
        info!("Price monitor stopped");
    }
}
