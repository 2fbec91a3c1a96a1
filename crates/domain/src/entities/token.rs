use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub address: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Token {
    pub fn new(address: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            address: normalize_address(&address.into()),
            symbol: symbol.into(),
            decimals,
        }
    }

    pub fn is(&self, address: &str) -> bool {
        self.address == normalize_address(address)
    }
}

/// The pair as the application presents it. Prices are quoted as
/// `quote` tokens per `base` token, and deposits are entered as
/// (base, quote) = (token0, token1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub base: Token,
    pub quote: Token,
}

impl TokenPair {
    pub fn new(base: Token, quote: Token) -> Self {
        Self { base, quote }
    }

    /// Decides whether a pool price (pool token1 per pool token0) needs to be
    /// inverted to read as quote per base. Returns `None` when the pool's
    /// token0 belongs to neither side.
    pub fn needs_inversion(&self, pool_token0: &str) -> Option<bool> {
        if self.base.is(pool_token0) {
            Some(false)
        } else if self.quote.is(pool_token0) {
            Some(true)
        } else {
            None
        }
    }
}

/// Lower-cases a hex address so comparisons ignore checksum casing.
pub fn normalize_address(address: &str) -> String {
    address.trim().to_ascii_lowercase()
}
