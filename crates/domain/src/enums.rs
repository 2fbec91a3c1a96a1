use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of action a history entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Swap,
    Liquidity,
}

impl TransactionKind {
    /// Maps the router's numeric transaction type. `1` is a swap, anything
    /// else is a liquidity action.
    pub fn from_code(code: u8) -> Self {
        if code == 1 {
            Self::Swap
        } else {
            Self::Liquidity
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Swap => write!(f, "swap"),
            Self::Liquidity => write!(f, "liquidity"),
        }
    }
}

/// Settlement status of a history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Confirmed,
    Pending,
    Failed,
    Other(String),
}

impl TransactionStatus {
    /// Parses a status string. Empty input means the router did not record one,
    /// which is treated as confirmed.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "confirmed" | "success" => Self::Confirmed,
            "pending" => Self::Pending,
            "failed" | "reverted" => Self::Failed,
            _ => Self::Other(raw.trim().to_string()),
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Confirmed => write!(f, "confirmed"),
            Self::Pending => write!(f, "pending"),
            Self::Failed => write!(f, "failed"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Which side of the pair is being sold in a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapDirection {
    /// Sell token0, receive token1.
    Token0ToToken1,
    /// Sell token1, receive token0.
    Token1ToToken0,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_code() {
        assert_eq!(TransactionKind::from_code(1), TransactionKind::Swap);
        assert_eq!(TransactionKind::from_code(0), TransactionKind::Liquidity);
        assert_eq!(TransactionKind::from_code(2), TransactionKind::Liquidity);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(TransactionStatus::parse(""), TransactionStatus::Confirmed);
        assert_eq!(TransactionStatus::parse("Pending"), TransactionStatus::Pending);
        assert_eq!(
            TransactionStatus::parse("queued"),
            TransactionStatus::Other("queued".to_string())
        );
    }
}
