//! Wallet balances and the deposit preflight.

use crate::{Address, ChainError, TokenReader, parse_address};
use lp_desk_domain::entities::{BalanceSnapshot, Token, TokenPair};
use lp_desk_domain::preflight::{DepositLeg, DepositPlan};
use lp_desk_domain::value_objects::{Amount, WAD_DECIMALS, format_units};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info};

pub struct BalanceReader {
    tokens: Arc<dyn TokenReader>,
    pair: TokenPair,
    token0: Address,
    token1: Address,
}

impl BalanceReader {
    pub fn new(tokens: Arc<dyn TokenReader>, pair: TokenPair) -> Result<Self, ChainError> {
        let token0 = parse_address(&pair.base.address)?;
        let token1 = parse_address(&pair.quote.address)?;
        Ok(Self {
            tokens,
            pair,
            token0,
            token1,
        })
    }

    pub async fn load(&self, owner: Address) -> Result<BalanceSnapshot, ChainError> {
        let raw0 = self.tokens.balance_of(self.token0, owner).await?;
        let raw1 = self.tokens.balance_of(self.token1, owner).await?;
        let native = self.tokens.native_balance(owner).await?;

        let snapshot = BalanceSnapshot {
            token0: format_units(raw0, self.pair.base.decimals)?,
            token1: format_units(raw1, self.pair.quote.decimals)?,
            native: format_units(native, WAD_DECIMALS)?,
        };
        debug!(owner = ?owner, ?snapshot, "Loaded balances");
        Ok(snapshot)
    }

    /// Checks that `owner` can deposit both amounts through `spender` and
    /// reports which approvals are still missing. Nothing is sent.
    pub async fn prepare_deposit(
        &self,
        owner: Address,
        spender: Address,
        amount0: Decimal,
        amount1: Decimal,
        gas_estimate: Option<u64>,
    ) -> Result<DepositPlan, ChainError> {
        let leg0 = self
            .leg(&self.pair.base, self.token0, owner, spender, amount0)
            .await?;
        let leg1 = self
            .leg(&self.pair.quote, self.token1, owner, spender, amount1)
            .await?;

        let plan = DepositPlan::prepare(&leg0, &leg1, gas_estimate)?;
        info!(
            approve_token0 = plan.approve_token0,
            approve_token1 = plan.approve_token1,
            gas_limit = plan.gas_limit,
            "Deposit preflight passed"
        );
        Ok(plan)
    }

    async fn leg(
        &self,
        token: &Token,
        address: Address,
        owner: Address,
        spender: Address,
        desired: Decimal,
    ) -> Result<DepositLeg, ChainError> {
        let balance = self.tokens.balance_of(address, owner).await?;
        let allowance = self.tokens.allowance(address, owner, spender).await?;
        Ok(DepositLeg {
            symbol: token.symbol.clone(),
            desired: Amount::from_decimal(desired, token.decimals)?,
            balance: Amount::new(balance, token.decimals),
            allowance: Amount::new(allowance, token.decimals),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::U256;
    use crate::testing::{ABYTKN, MockChain, OWNER, ROUTER, USDC, addr};
    use lp_desk_domain::DomainError;
    use rust_decimal_macros::dec;

    fn wei(whole: u64) -> U256 {
        U256::from(whole) * U256::exp10(18)
    }

    fn pair() -> TokenPair {
        TokenPair::new(Token::new(USDC, "USDC", 18), Token::new(ABYTKN, "ABYTKN", 18))
    }

    fn funded() -> MockChain {
        let mut chain = MockChain::new(0);
        chain.balances.insert((addr(USDC), addr(OWNER)), wei(500));
        chain.balances.insert((addr(ABYTKN), addr(OWNER)), wei(200_000));
        chain.native = U256::from(1_500_000_000_000_000_000u128);
        chain
    }

    #[tokio::test]
    async fn test_load_formats_units() {
        let reader = BalanceReader::new(Arc::new(funded()), pair()).unwrap();
        let snapshot = reader.load(addr(OWNER)).await.unwrap();
        assert_eq!(snapshot.token0, dec!(500));
        assert_eq!(snapshot.token1, dec!(200000));
        assert_eq!(snapshot.native, dec!(1.5));
    }

    #[tokio::test]
    async fn test_invalid_configured_address() {
        let bad = TokenPair::new(Token::new("0x1234", "USDC", 18), Token::new(ABYTKN, "B", 18));
        assert!(matches!(
            BalanceReader::new(Arc::new(MockChain::new(0)), bad),
            Err(ChainError::InvalidAddress(_))
        ));
    }

    #[tokio::test]
    async fn test_deposit_preflight_flags_approvals() {
        let mut chain = funded();
        chain.allowances.insert((addr(USDC), addr(OWNER)), wei(1_000));
        let reader = BalanceReader::new(Arc::new(chain), pair()).unwrap();

        let plan = reader
            .prepare_deposit(addr(OWNER), addr(ROUTER), dec!(100), dec!(100000), None)
            .await
            .unwrap();
        assert!(!plan.approve_token0);
        assert!(plan.approve_token1);
        assert_eq!(plan.gas_limit, 1_500_000);
        assert_eq!(plan.amount1.raw, wei(100_000));
    }

    #[tokio::test]
    async fn test_deposit_preflight_rejects_short_balance() {
        let reader = BalanceReader::new(Arc::new(funded()), pair()).unwrap();
        let err = reader
            .prepare_deposit(addr(OWNER), addr(ROUTER), dec!(501), dec!(1), Some(200_000))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ChainError::Domain(DomainError::InsufficientBalance {
                symbol: "USDC".to_string()
            })
        );
        assert_eq!(err.to_string(), "Insufficient USDC balance");
    }
}
