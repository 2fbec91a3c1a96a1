//! In-memory chain double for unit tests.

use crate::{Address, ChainError, PoolReader, RouterPoolState, RouterReader, Slot0, TokenReader, U256};
use async_trait::async_trait;
use lp_desk_domain::entities::RawTransaction;
use std::collections::HashMap;

pub const USDC: &str = "0xac485503f2f2da0311159187374c0b568eb84e5a";
pub const ABYTKN: &str = "0xc1303afc18ab049bf0b9aab4231ac24ac93c92a4";
pub const POOL: &str = "0x00000000000000000000000000000000000000aa";
pub const OWNER: &str = "0x00000000000000000000000000000000000000bb";
pub const ROUTER: &str = "0x00000000000000000000000000000000000000cc";

pub fn addr(s: &str) -> Address {
    s.parse().expect("valid test address")
}

#[derive(Clone)]
pub struct MockChain {
    pub slot0: Result<Slot0, ChainError>,
    pub liquidity: Result<u128, ChainError>,
    pub token0: Address,
    pub token1: Address,
    pub decimals: HashMap<Address, u8>,
    pub balances: HashMap<(Address, Address), U256>,
    pub allowances: HashMap<(Address, Address), U256>,
    pub native: U256,
    pub router_state: Result<RouterPoolState, ChainError>,
    pub router_token0: Address,
    pub router_balances: Result<(U256, U256), ChainError>,
    pub router_price: Result<U256, ChainError>,
    pub history: Vec<RawTransaction>,
}

impl MockChain {
    /// A funded pool with token0 = USDC, token1 = ABYTKN, both 18 decimals.
    pub fn new(tick: i32) -> Self {
        let decimals = HashMap::from([(addr(USDC), 18), (addr(ABYTKN), 18)]);
        Self {
            slot0: Ok(Slot0 {
                sqrt_price_x96: U256::from(1u64) << 96,
                tick,
            }),
            liquidity: Ok(1_000_000),
            token0: addr(USDC),
            token1: addr(ABYTKN),
            decimals,
            balances: HashMap::new(),
            allowances: HashMap::new(),
            native: U256::zero(),
            router_state: Err(ChainError::Other("router not stubbed".to_string())),
            router_token0: addr(USDC),
            router_balances: Err(ChainError::Other("router not stubbed".to_string())),
            router_price: Err(ChainError::Other("router not stubbed".to_string())),
            history: Vec::new(),
        }
    }
}

#[async_trait]
impl PoolReader for MockChain {
    async fn slot0(&self, _pool: Address) -> Result<Slot0, ChainError> {
        self.slot0.clone()
    }

    async fn liquidity(&self, _pool: Address) -> Result<u128, ChainError> {
        self.liquidity.clone()
    }

    async fn token0(&self, _pool: Address) -> Result<Address, ChainError> {
        Ok(self.token0)
    }

    async fn token1(&self, _pool: Address) -> Result<Address, ChainError> {
        Ok(self.token1)
    }
}

#[async_trait]
impl TokenReader for MockChain {
    async fn decimals(&self, token: Address) -> Result<u8, ChainError> {
        self.decimals
            .get(&token)
            .copied()
            .ok_or_else(|| ChainError::classify("execution reverted"))
    }

    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256, ChainError> {
        Ok(self.balances.get(&(token, owner)).copied().unwrap_or_default())
    }

    async fn allowance(
        &self,
        token: Address,
        owner: Address,
        _spender: Address,
    ) -> Result<U256, ChainError> {
        Ok(self.allowances.get(&(token, owner)).copied().unwrap_or_default())
    }

    async fn native_balance(&self, _owner: Address) -> Result<U256, ChainError> {
        Ok(self.native)
    }
}

#[async_trait]
impl RouterReader for MockChain {
    async fn token0(&self) -> Result<Address, ChainError> {
        Ok(self.router_token0)
    }

    async fn token1(&self) -> Result<Address, ChainError> {
        Ok(if self.router_token0 == addr(USDC) {
            addr(ABYTKN)
        } else {
            addr(USDC)
        })
    }

    async fn pool_state(&self, _pool: Address) -> Result<RouterPoolState, ChainError> {
        self.router_state.clone()
    }

    async fn pool_balances(&self, _pool: Address) -> Result<(U256, U256), ChainError> {
        self.router_balances.clone()
    }

    async fn token_price(&self, _pool: Address) -> Result<U256, ChainError> {
        self.router_price.clone()
    }

    async fn user_transaction_history(
        &self,
        _owner: Address,
    ) -> Result<Vec<RawTransaction>, ChainError> {
        Ok(self.history.clone())
    }
}
