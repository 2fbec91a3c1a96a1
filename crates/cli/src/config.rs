//! Settings read from the environment (and `.env`).

use anyhow::{Context, Result, bail};
use lp_desk_domain::entities::{Token, TokenPair, TokenRegistry};
use lp_desk_domain::value_objects::{Percentage, WAD_DECIMALS};
use lp_desk_execution::scheduler::DEFAULT_REFRESH_INTERVAL;
use lp_desk_protocols::{Address, parse_address};
use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_TOKEN0_ADDRESS: &str = "0xac485503f2f2da0311159187374c0b568eb84e5a";
const DEFAULT_TOKEN1_ADDRESS: &str = "0xc1303afc18ab049bf0b9aab4231ac24ac93c92a4";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub rpc_url: String,
    pub router: Option<Address>,
    pub pool: Option<Address>,
    pub pair: TokenPair,
    pub refresh_interval: Duration,
    pub slippage: Percentage,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let rpc_url =
            get("LP_DESK_RPC_URL").context("LP_DESK_RPC_URL must be set in .env or environment")?;

        let router = get("LP_DESK_ROUTER_ADDRESS")
            .map(|a| parse_address(&a))
            .transpose()
            .context("LP_DESK_ROUTER_ADDRESS")?;
        let pool = get("LP_DESK_POOL_ADDRESS")
            .map(|a| parse_address(&a))
            .transpose()
            .context("LP_DESK_POOL_ADDRESS")?;

        let token0 = token(&get, "TOKEN0", DEFAULT_TOKEN0_ADDRESS, "USDC")?;
        let token1 = token(&get, "TOKEN1", DEFAULT_TOKEN1_ADDRESS, "ABYTKN")?;
        if token0.address == token1.address {
            bail!("token0 and token1 must be different tokens");
        }

        let refresh_interval = match get("LP_DESK_REFRESH_SECS") {
            Some(secs) => Duration::from_secs(parse(&secs, "LP_DESK_REFRESH_SECS")?),
            None => DEFAULT_REFRESH_INTERVAL,
        };
        if refresh_interval.is_zero() {
            bail!("LP_DESK_REFRESH_SECS must be greater than zero");
        }

        let slippage = match get("LP_DESK_SLIPPAGE_PERCENT") {
            Some(pct) => Percentage::new(parse::<Decimal>(&pct, "LP_DESK_SLIPPAGE_PERCENT")?),
            None => Percentage::default(),
        };
        if slippage.0 < Decimal::ZERO || slippage.0 >= Decimal::ONE_HUNDRED {
            bail!("LP_DESK_SLIPPAGE_PERCENT must be in [0, 100)");
        }

        Ok(Self {
            rpc_url,
            router,
            pool,
            pair: TokenPair::new(token0, token1),
            refresh_interval,
            slippage,
        })
    }

    /// Labels used when listing transaction history.
    pub fn registry(&self) -> TokenRegistry {
        TokenRegistry::new()
            .with(&self.pair.base.address, self.pair.base.symbol.clone())
            .with(&self.pair.quote.address, self.pair.quote.symbol.clone())
    }
}

fn token(
    get: &impl Fn(&str) -> Option<String>,
    prefix: &str,
    default_address: &str,
    default_label: &str,
) -> Result<Token> {
    let address_key = format!("LP_DESK_{prefix}_ADDRESS");
    let address = get(&address_key).unwrap_or_else(|| default_address.to_string());
    parse_address(&address).context(address_key)?;

    let label =
        get(&format!("LP_DESK_{prefix}_LABEL")).unwrap_or_else(|| default_label.to_string());

    let decimals_key = format!("LP_DESK_{prefix}_DECIMALS");
    let decimals = match get(&decimals_key) {
        Some(d) => parse(&d, &decimals_key)?,
        None => WAD_DECIMALS,
    };

    Ok(Token::new(address, label, decimals))
}

fn parse<T: FromStr>(value: &str, key: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .with_context(|| format!("invalid value for {key}: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[("LP_DESK_RPC_URL", "http://localhost:8545")]).unwrap();
        assert_eq!(cfg.rpc_url, "http://localhost:8545");
        assert!(cfg.pool.is_none());
        assert!(cfg.router.is_none());
        assert_eq!(cfg.refresh_interval, Duration::from_secs(30));
        assert_eq!(cfg.slippage.0, dec!(0.5));
        assert_eq!(cfg.pair.base.symbol, "USDC");
        assert_eq!(cfg.pair.quote.decimals, 18);
    }

    #[test]
    fn test_rpc_url_required() {
        assert!(config(&[]).is_err());
        assert!(config(&[("LP_DESK_RPC_URL", "  ")]).is_err());
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("LP_DESK_RPC_URL", "http://node"),
            ("LP_DESK_POOL_ADDRESS", "0x00000000000000000000000000000000000000aa"),
            ("LP_DESK_ROUTER_ADDRESS", ""),
            ("LP_DESK_TOKEN0_LABEL", "TKN0(USDC)"),
            ("LP_DESK_TOKEN0_DECIMALS", "6"),
            ("LP_DESK_REFRESH_SECS", "5"),
            ("LP_DESK_SLIPPAGE_PERCENT", "1.5"),
        ])
        .unwrap();
        assert!(cfg.pool.is_some());
        assert!(cfg.router.is_none());
        assert_eq!(cfg.pair.base.symbol, "TKN0(USDC)");
        assert_eq!(cfg.pair.base.decimals, 6);
        assert_eq!(cfg.refresh_interval, Duration::from_secs(5));
        assert_eq!(cfg.slippage.0, dec!(1.5));
        assert_eq!(
            cfg.registry().label_for(DEFAULT_TOKEN0_ADDRESS, "TKN0"),
            "TKN0(USDC)"
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        let base = ("LP_DESK_RPC_URL", "http://node");
        assert!(config(&[base, ("LP_DESK_POOL_ADDRESS", "0x12")]).is_err());
        assert!(config(&[base, ("LP_DESK_REFRESH_SECS", "0")]).is_err());
        assert!(config(&[base, ("LP_DESK_SLIPPAGE_PERCENT", "abc")]).is_err());
        assert!(config(&[base, ("LP_DESK_TOKEN1_ADDRESS", DEFAULT_TOKEN0_ADDRESS)]).is_err());
    }
}
