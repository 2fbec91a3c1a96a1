pub mod balances;
pub mod pool;
pub mod token;
pub mod transaction;

pub use balances::BalanceSnapshot;
pub use pool::PoolInfo;
pub use token::{Token, TokenPair};
pub use transaction::{RawTransaction, TokenRegistry, TransactionRecord};
