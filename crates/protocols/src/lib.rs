//! Chain access for pool pricing.
//!
//! Contract reads sit behind the reader traits below so the services in this
//! crate can run against a live node ([`evm`]) or an in-memory double.

pub mod balances;
pub mod error;
pub mod evm;
pub mod history;
pub mod pool_info;
pub mod resolver;

#[cfg(test)]
pub(crate) mod testing;

pub use error::ChainError;
pub use ethers::types::{Address, U256};

use async_trait::async_trait;
use lp_desk_domain::entities::RawTransaction;
use lp_desk_domain::value_objects::PoolPriceQuote;

/// The fields of a pool's `slot0` that pricing uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot0 {
    pub sqrt_price_x96: U256,
    pub tick: i32,
}

/// Pool state as reported by the swap router's `getPoolInfo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterPoolState {
    pub sqrt_price_x96: U256,
    pub tick: i32,
    pub liquidity: u128,
}

/// Read-only access to a concentrated-liquidity pool.
#[async_trait]
pub trait PoolReader: Send + Sync {
    async fn slot0(&self, pool: Address) -> Result<Slot0, ChainError>;
    async fn liquidity(&self, pool: Address) -> Result<u128, ChainError>;
    async fn token0(&self, pool: Address) -> Result<Address, ChainError>;
    async fn token1(&self, pool: Address) -> Result<Address, ChainError>;
}

/// Read-only access to ERC-20 tokens and native balances.
#[async_trait]
pub trait TokenReader: Send + Sync {
    async fn decimals(&self, token: Address) -> Result<u8, ChainError>;
    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256, ChainError>;
    async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, ChainError>;
    async fn native_balance(&self, owner: Address) -> Result<U256, ChainError>;
}

/// Read-only access to the application's swap router contract.
#[async_trait]
pub trait RouterReader: Send + Sync {
    async fn token0(&self) -> Result<Address, ChainError>;
    async fn token1(&self) -> Result<Address, ChainError>;
    async fn pool_state(&self, pool: Address) -> Result<RouterPoolState, ChainError>;
    async fn pool_balances(&self, pool: Address) -> Result<(U256, U256), ChainError>;
    /// token0 price in token1, 18-decimal fixed point.
    async fn token_price(&self, pool: Address) -> Result<U256, ChainError>;
    /// History recorded for `owner`, who must be the caller of the view.
    async fn user_transaction_history(
        &self,
        owner: Address,
    ) -> Result<Vec<RawTransaction>, ChainError>;
}

/// Anything that can produce the current pool quote. Never fails: read
/// errors surface as a fallback quote.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    async fn current_quote(&self) -> PoolPriceQuote;
}

/// Full lower-case hex form of an address, as used for comparisons.
pub fn hex_address(address: Address) -> String {
    format!("{address:#x}")
}

/// Parses a configured hex address.
pub fn parse_address(address: &str) -> Result<Address, ChainError> {
    address
        .trim()
        .parse()
        .map_err(|_| ChainError::InvalidAddress(address.to_string()))
}
