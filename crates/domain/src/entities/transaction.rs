use super::token::normalize_address;
use crate::enums::{TransactionKind, TransactionStatus};
use crate::error::DomainError;
use crate::value_objects::amount::{WAD_DECIMALS, format_units};
use chrono::{DateTime, Utc};
use primitive_types::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One history entry exactly as the router returns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTransaction {
    pub id: U256,
    pub kind_code: u8,
    pub from_token: String,
    pub to_token: String,
    pub from_amount: U256,
    pub to_amount: U256,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
    pub hash: String,
    pub status: String,
}

/// Display labels for known token addresses.
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    labels: HashMap<String, String>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a label, replacing any previous one for the address.
    #[must_use]
    pub fn with(mut self, address: &str, label: impl Into<String>) -> Self {
        self.labels.insert(normalize_address(address), label.into());
        self
    }

    /// Label for `address`. Unknown addresses are shown as-is, and an empty
    /// address falls back to `default`.
    pub fn label_for(&self, address: &str, default: &str) -> String {
        let key = normalize_address(address);
        if key.is_empty() {
            return default.to_string();
        }
        self.labels.get(&key).cloned().unwrap_or(key)
    }
}

/// Read-only view of a past swap or liquidity action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: u64,
    pub kind: TransactionKind,
    pub token0_symbol: String,
    pub token1_symbol: String,
    pub token0_amount: Decimal,
    pub token1_amount: Decimal,
    pub timestamp: DateTime<Utc>,
    pub hash: String,
    pub status: TransactionStatus,
}

impl TransactionRecord {
    /// Projects a router entry. `index` is its position in the returned list
    /// and stands in for a zero id.
    pub fn from_raw(
        raw: &RawTransaction,
        index: usize,
        registry: &TokenRegistry,
    ) -> Result<Self, DomainError> {
        let id = if raw.id.is_zero() || raw.id > U256::from(u64::MAX) {
            index as u64
        } else {
            raw.id.low_u64()
        };

        Ok(Self {
            id,
            kind: TransactionKind::from_code(raw.kind_code),
            token0_symbol: registry.label_for(&raw.from_token, "TKN0"),
            token1_symbol: registry.label_for(&raw.to_token, "TKN1"),
            token0_amount: format_units(raw.from_amount, WAD_DECIMALS)?,
            token1_amount: format_units(raw.to_amount, WAD_DECIMALS)?,
            timestamp: DateTime::from_timestamp(raw.timestamp as i64, 0).unwrap_or_default(),
            hash: raw.hash.clone(),
            status: TransactionStatus::parse(&raw.status),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const USDC: &str = "0xac485503f2f2da0311159187374c0b568eb84e5a";
    const ABYTKN: &str = "0xc1303afc18ab049bf0b9aab4231ac24ac93c92a4";

    fn registry() -> TokenRegistry {
        TokenRegistry::new()
            .with(USDC, "TKN0(USDC)")
            .with(ABYTKN, "TKN1(ABYATKN)")
    }

    fn raw() -> RawTransaction {
        RawTransaction {
            id: U256::from(7u64),
            kind_code: 1,
            from_token: USDC.to_uppercase().replace("0X", "0x"),
            to_token: ABYTKN.to_string(),
            from_amount: U256::from(2u64) * U256::exp10(18),
            to_amount: U256::from(2_469u64) * U256::exp10(15),
            timestamp: 1_700_000_000,
            hash: "0xabc".to_string(),
            status: String::new(),
        }
    }

    #[test]
    fn test_from_raw() {
        let record = TransactionRecord::from_raw(&raw(), 0, &registry()).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.kind, TransactionKind::Swap);
        assert_eq!(record.token0_symbol, "TKN0(USDC)");
        assert_eq!(record.token1_symbol, "TKN1(ABYATKN)");
        assert_eq!(record.token0_amount, dec!(2));
        assert_eq!(record.token1_amount, dec!(2.469));
        assert_eq!(record.timestamp.timestamp(), 1_700_000_000);
        assert_eq!(record.status, TransactionStatus::Confirmed);
    }

    #[test]
    fn test_zero_id_uses_index_and_unknown_tokens_show_address() {
        let mut entry = raw();
        entry.id = U256::zero();
        entry.kind_code = 0;
        entry.to_token = "0x00000000000000000000000000000000000000ff".to_string();
        entry.from_token = String::new();

        let record = TransactionRecord::from_raw(&entry, 3, &registry()).unwrap();
        assert_eq!(record.id, 3);
        assert_eq!(record.kind, TransactionKind::Liquidity);
        assert_eq!(record.token0_symbol, "TKN0");
        assert_eq!(
            record.token1_symbol,
            "0x00000000000000000000000000000000000000ff"
        );
    }
}
