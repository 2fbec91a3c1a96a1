use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default swap slippage tolerance, 0.5%.
pub const DEFAULT_SLIPPAGE: Percentage = Percentage(Decimal::from_parts(5, 0, 0, false, 1));

/// A percentage in percent units: `Percentage(0.5)` is half a percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percentage(pub Decimal);

impl Percentage {
    pub fn new(percent: Decimal) -> Self {
        Self(percent)
    }

    /// The percentage as a plain fraction, e.g. `0.005` for 0.5%.
    pub fn as_fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }
}

impl Default for Percentage {
    fn default() -> Self {
        DEFAULT_SLIPPAGE
    }
}
