//! The owner's swap and liquidity history, as recorded by the router.

use crate::{Address, ChainError, RouterReader};
use lp_desk_domain::entities::{TokenRegistry, TransactionRecord};
use std::sync::Arc;
use tracing::{info, warn};

pub struct TransactionHistory {
    router: Arc<dyn RouterReader>,
    registry: TokenRegistry,
}

impl TransactionHistory {
    pub fn new(router: Arc<dyn RouterReader>, registry: TokenRegistry) -> Self {
        Self { router, registry }
    }

    /// Fetches and projects the history. Entries whose amounts cannot be
    /// represented are skipped and logged.
    pub async fn fetch(&self, owner: Address) -> Result<Vec<TransactionRecord>, ChainError> {
        let raw = self.router.user_transaction_history(owner).await?;

        let records: Vec<TransactionRecord> = raw
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                TransactionRecord::from_raw(entry, index, &self.registry)
                    .inspect_err(|e| {
                        warn!(index, hash = %entry.hash, error = %e, "Skipping history entry")
                    })
                    .ok()
            })
            .collect();

        info!(owner = ?owner, count = records.len(), "Loaded transaction history");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::U256;
    use crate::testing::{ABYTKN, MockChain, OWNER, USDC, addr};
    use lp_desk_domain::entities::RawTransaction;
    use lp_desk_domain::enums::{TransactionKind, TransactionStatus};
    use rust_decimal_macros::dec;

    fn entry(id: u64, kind_code: u8, from_amount: U256, status: &str) -> RawTransaction {
        RawTransaction {
            id: U256::from(id),
            kind_code,
            from_token: USDC.to_string(),
            to_token: ABYTKN.to_string(),
            from_amount,
            to_amount: U256::exp10(18),
            timestamp: 1_700_000_000 + id,
            hash: format!("0x{id:064x}"),
            status: status.to_string(),
        }
    }

    fn registry() -> TokenRegistry {
        TokenRegistry::new().with(USDC, "USDC").with(ABYTKN, "ABYTKN")
    }

    #[tokio::test]
    async fn test_fetch_projects_entries() {
        let mut chain = MockChain::new(0);
        chain.history = vec![
            entry(1, 1, U256::from(5u64) * U256::exp10(17), ""),
            entry(2, 2, U256::exp10(18), "pending"),
        ];
        let history = TransactionHistory::new(Arc::new(chain), registry());

        let records = history.fetch(addr(OWNER)).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, TransactionKind::Swap);
        assert_eq!(records[0].token0_amount, dec!(0.5));
        assert_eq!(records[0].token0_symbol, "USDC");
        assert_eq!(records[0].status, TransactionStatus::Confirmed);
        assert_eq!(records[1].kind, TransactionKind::Liquidity);
        assert_eq!(records[1].status, TransactionStatus::Pending);
    }

    #[tokio::test]
    async fn test_unrepresentable_entry_is_skipped() {
        let mut chain = MockChain::new(0);
        chain.history = vec![entry(1, 1, U256::MAX, ""), entry(2, 1, U256::exp10(18), "")];
        let history = TransactionHistory::new(Arc::new(chain), registry());

        let records = history.fetch(addr(OWNER)).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 2);
    }

    #[tokio::test]
    async fn test_empty_history() {
        let history = TransactionHistory::new(Arc::new(MockChain::new(0)), registry());
        assert!(history.fetch(addr(OWNER)).await.unwrap().is_empty());
    }
}
