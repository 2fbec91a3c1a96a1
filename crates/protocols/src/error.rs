use ethers::contract::ContractError;
use ethers::providers::{Middleware, ProviderError};
use lp_desk_domain::DomainError;
use thiserror::Error;

/// Errors from chain reads, grouped by what the user can do about them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// The wallet declined to sign.
    #[error("transaction rejected by user")]
    UserRejected,
    /// The account cannot pay for gas.
    #[error("insufficient funds for gas")]
    InsufficientFunds,
    /// The contract reverted.
    #[error("execution reverted{}", revert_suffix(.reason))]
    Reverted { reason: Option<String> },
    /// The node could not be reached or timed out.
    #[error("network error: {0}")]
    Network(String),
    /// The RPC endpoint could not be parsed.
    #[error("invalid RPC endpoint: {0}")]
    InvalidEndpoint(String),
    /// A configured address is not a 20-byte hex string.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    /// The contract answered with data that does not match the binding.
    #[error("could not decode contract response: {0}")]
    Decode(String),
    /// A value read from chain failed a domain check.
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("{0}")]
    Other(String),
}

fn revert_suffix(reason: &Option<String>) -> String {
    reason
        .as_deref()
        .map(|r| format!(": {r}"))
        .unwrap_or_default()
}

impl ChainError {
    /// Maps a provider or wallet error message onto the taxonomy. Message
    /// text is the only signal JSON-RPC nodes and wallets give for most of
    /// these cases.
    pub fn classify(message: &str) -> Self {
        let lower = message.to_ascii_lowercase();

        if lower.contains("user rejected") || lower.contains("user denied") {
            return Self::UserRejected;
        }
        if lower.contains("insufficient funds") {
            return Self::InsufficientFunds;
        }
        if let Some(pos) = lower.find("execution reverted") {
            let rest = message[pos + "execution reverted".len()..]
                .trim_start_matches(':')
                .trim();
            return Self::Reverted {
                reason: (!rest.is_empty()).then(|| rest.to_string()),
            };
        }
        const NETWORK_MARKERS: [&str; 6] = [
            "connection",
            "timed out",
            "timeout",
            "error sending request",
            "dns error",
            "network",
        ];
        if NETWORK_MARKERS.iter().any(|m| lower.contains(m)) {
            return Self::Network(message.to_string());
        }
        if lower.contains("invalid data") || lower.contains("decode") {
            return Self::Decode(message.to_string());
        }
        Self::Other(message.to_string())
    }

    /// Text shown to the user when `action` (e.g. "add liquidity") fails.
    pub fn user_message(&self, action: &str) -> String {
        match self {
            Self::UserRejected => "Transaction rejected by user".to_string(),
            Self::InsufficientFunds => "Insufficient funds for gas".to_string(),
            Self::Reverted { reason } => {
                format!("Transaction reverted by contract{}", revert_suffix(reason))
            }
            other => format!("Failed to {action}: {other}"),
        }
    }
}

impl<M: Middleware> From<ContractError<M>> for ChainError {
    fn from(err: ContractError<M>) -> Self {
        if err.is_revert() {
            return Self::Reverted {
                reason: err.decode_revert::<String>(),
            };
        }
        Self::classify(&err.to_string())
    }
}

impl From<ProviderError> for ChainError {
    fn from(err: ProviderError) -> Self {
        Self::classify(&err.to_string())
    }
}
