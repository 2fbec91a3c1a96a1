use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Ratio assumed when no live price can be read: 1000 quote tokens per base token.
pub const DEFAULT_INITIAL_RATIO: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Prices at or above this bound are treated as a misread pool.
pub const MAX_SANE_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Why a quote fell back to the default ratio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackReason {
    /// No pool address is configured, or it is the zero address.
    NoPoolConfigured,
    /// The pool exists but holds no liquidity.
    PoolUninitialized,
    /// A price was derived but fell outside `(0, MAX_SANE_PRICE)`.
    PriceOutOfRange(Decimal),
    /// Every read path failed. Carries the last error message.
    ReadFailed(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPoolConfigured => write!(f, "no pool configured"),
            Self::PoolUninitialized => write!(f, "pool has no liquidity yet"),
            Self::PriceOutOfRange(p) => write!(f, "derived price {p} is out of range"),
            Self::ReadFailed(e) => write!(f, "pool read failed: {e}"),
        }
    }
}

/// Where a quote's price came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteSource {
    /// Read directly from the pool's `slot0`.
    Live { tick: i32 },
    /// Read through the swap router's `getPoolInfo`.
    Router { tick: i32 },
    /// Default ratio.
    Fallback(FallbackReason),
}

/// Exchange rate between the configured pair, in quote tokens per base token.
///
/// Only built through the constructors below, which keep `is_initial_ratio`
/// in step with `source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolPriceQuote {
    price: Decimal,
    is_initial_ratio: bool,
    source: QuoteSource,
    fetched_at: DateTime<Utc>,
}

impl PoolPriceQuote {
    pub fn live(price: Decimal, tick: i32) -> Self {
        Self::build(price, QuoteSource::Live { tick })
    }

    pub fn from_router(price: Decimal, tick: i32) -> Self {
        Self::build(price, QuoteSource::Router { tick })
    }

    pub fn fallback(reason: FallbackReason) -> Self {
        Self::build(DEFAULT_INITIAL_RATIO, QuoteSource::Fallback(reason))
    }

    fn build(price: Decimal, source: QuoteSource) -> Self {
        Self {
            price,
            is_initial_ratio: matches!(source, QuoteSource::Fallback(_)),
            source,
            fetched_at: Utc::now(),
        }
    }

    /// Overrides the fetch time.
    #[must_use]
    pub fn at(mut self, fetched_at: DateTime<Utc>) -> Self {
        self.fetched_at = fetched_at;
        self
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    /// True when the price is the default ratio rather than a pool reading,
    /// meaning the pool may not exist yet.
    pub fn is_initial_ratio(&self) -> bool {
        self.is_initial_ratio
    }

    pub fn source(&self) -> &QuoteSource {
        &self.source
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match &self.source {
            QuoteSource::Fallback(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        (now - self.fetched_at).to_std().unwrap_or(Duration::ZERO)
    }

    pub fn is_stale(&self, max_age: Duration, now: DateTime<Utc>) -> bool {
        self.age(now) > max_age
    }

    /// Whether a derived price is plausible enough to report as live.
    pub fn is_sane_price(price: Decimal) -> bool {
        price > Decimal::ZERO && price < MAX_SANE_PRICE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fallback_is_initial_ratio() {
        let q = PoolPriceQuote::fallback(FallbackReason::PoolUninitialized);
        assert!(q.is_initial_ratio());
        assert_eq!(q.price(), dec!(1000));
        assert_eq!(q.fallback_reason(), Some(&FallbackReason::PoolUninitialized));
    }

    #[test]
    fn test_live_is_not_initial_ratio() {
        let q = PoolPriceQuote::live(dec!(1234.5), 71_000);
        assert!(!q.is_initial_ratio());
        assert_eq!(q.source(), &QuoteSource::Live { tick: 71_000 });
        assert!(q.fallback_reason().is_none());
    }

    #[test]
    fn test_initial_ratio_flag_follows_source() {
        let quotes = [
            PoolPriceQuote::live(dec!(1000), 1),
            PoolPriceQuote::from_router(dec!(1000), 1),
            PoolPriceQuote::fallback(FallbackReason::NoPoolConfigured),
            PoolPriceQuote::fallback(FallbackReason::ReadFailed("timeout".to_string())),
            PoolPriceQuote::fallback(FallbackReason::PriceOutOfRange(dec!(2000000)))
                .at(Utc::now() - TimeDelta::seconds(5)),
        ];
        for q in quotes {
            assert_eq!(
                q.is_initial_ratio(),
                matches!(q.source(), QuoteSource::Fallback(_)),
                "{q:?}"
            );
        }
    }

    #[test]
    fn test_staleness() {
        let now = Utc::now();
        let q = PoolPriceQuote::live(dec!(1), 0).at(now - TimeDelta::seconds(90));
        assert!(q.is_stale(Duration::from_secs(60), now));
        assert!(!q.is_stale(Duration::from_secs(120), now));
    }

    #[test]
    fn test_sane_price_bounds() {
        assert!(PoolPriceQuote::is_sane_price(dec!(0.0001)));
        assert!(!PoolPriceQuote::is_sane_price(Decimal::ZERO));
        assert!(!PoolPriceQuote::is_sane_price(dec!(1000000)));
    }
}
