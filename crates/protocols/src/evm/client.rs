use super::bindings::{ConcentratedPool, Erc20, SwapRouter};
use crate::{
    Address, ChainError, PoolReader, RouterPoolState, RouterReader, Slot0, TokenReader, U256,
    hex_address,
};
use async_trait::async_trait;
use ethers::providers::{Http, Middleware, Provider};
use ethers::types::H256;
use lp_desk_domain::entities::RawTransaction;
use std::sync::Arc;
use tracing::debug;

/// Read-only handle to an EVM node over HTTP.
#[derive(Clone)]
pub struct EvmClient {
    provider: Arc<Provider<Http>>,
}

impl EvmClient {
    /// Creates a client for `rpc_url`. No request is made until the first read.
    ///
    /// # Errors
    /// Returns `InvalidEndpoint` if the URL cannot be parsed.
    pub fn connect(rpc_url: &str) -> Result<Self, ChainError> {
        let provider = Provider::<Http>::try_from(rpc_url)
            .map_err(|e| ChainError::InvalidEndpoint(format!("{rpc_url}: {e}")))?;
        debug!(rpc_url, "Created HTTP provider");
        Ok(Self {
            provider: Arc::new(provider),
        })
    }

    pub fn provider(&self) -> Arc<Provider<Http>> {
        self.provider.clone()
    }

    fn pool(&self, address: Address) -> ConcentratedPool<Provider<Http>> {
        ConcentratedPool::new(address, self.provider.clone())
    }

    fn erc20(&self, address: Address) -> Erc20<Provider<Http>> {
        Erc20::new(address, self.provider.clone())
    }
}

#[async_trait]
impl PoolReader for EvmClient {
    async fn slot0(&self, pool: Address) -> Result<Slot0, ChainError> {
        let (sqrt_price_x96, tick, _, _, _, _, _) = self.pool(pool).slot_0().call().await?;
        Ok(Slot0 {
            sqrt_price_x96,
            tick,
        })
    }

    async fn liquidity(&self, pool: Address) -> Result<u128, ChainError> {
        Ok(self.pool(pool).liquidity().call().await?)
    }

    async fn token0(&self, pool: Address) -> Result<Address, ChainError> {
        Ok(self.pool(pool).token_0().call().await?)
    }

    async fn token1(&self, pool: Address) -> Result<Address, ChainError> {
        Ok(self.pool(pool).token_1().call().await?)
    }
}

#[async_trait]
impl TokenReader for EvmClient {
    async fn decimals(&self, token: Address) -> Result<u8, ChainError> {
        Ok(self.erc20(token).decimals().call().await?)
    }

    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256, ChainError> {
        Ok(self.erc20(token).balance_of(owner).call().await?)
    }

    async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, ChainError> {
        Ok(self.erc20(token).allowance(owner, spender).call().await?)
    }

    async fn native_balance(&self, owner: Address) -> Result<U256, ChainError> {
        Ok(self.provider.get_balance(owner, None).await?)
    }
}

/// Read-only handle to the swap router contract.
#[derive(Clone)]
pub struct RouterClient {
    contract: SwapRouter<Provider<Http>>,
}

impl RouterClient {
    pub fn new(address: Address, client: &EvmClient) -> Self {
        Self {
            contract: SwapRouter::new(address, client.provider()),
        }
    }
}

#[async_trait]
impl RouterReader for RouterClient {
    async fn token0(&self) -> Result<Address, ChainError> {
        Ok(self.contract.token_0().call().await?)
    }

    async fn token1(&self) -> Result<Address, ChainError> {
        Ok(self.contract.token_1().call().await?)
    }

    async fn pool_state(&self, pool: Address) -> Result<RouterPoolState, ChainError> {
        let (sqrt_price_x96, tick, liquidity) = self.contract.get_pool_info(pool).call().await?;
        Ok(RouterPoolState {
            sqrt_price_x96,
            tick,
            liquidity,
        })
    }

    async fn pool_balances(&self, pool: Address) -> Result<(U256, U256), ChainError> {
        Ok(self.contract.get_pool_balances(pool).call().await?)
    }

    async fn token_price(&self, pool: Address) -> Result<U256, ChainError> {
        Ok(self.contract.get_token_price(pool).call().await?)
    }

    async fn user_transaction_history(
        &self,
        owner: Address,
    ) -> Result<Vec<RawTransaction>, ChainError> {
        let entries = self
            .contract
            .get_user_transaction_history()
            .from(owner)
            .call()
            .await?;

        Ok(entries
            .into_iter()
            .map(
                |(id, kind_code, from_token, to_token, from_amount, to_amount, timestamp, hash, status)| {
                    RawTransaction {
                        id,
                        kind_code,
                        from_token: hex_address(from_token),
                        to_token: hex_address(to_token),
                        from_amount,
                        to_amount,
                        timestamp: if timestamp > U256::from(u64::MAX) {
                            0
                        } else {
                            timestamp.as_u64()
                        },
                        hash: format!("{:#x}", H256::from(hash)),
                        status,
                    }
                },
            )
            .collect())
    }
}
