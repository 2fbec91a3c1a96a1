pub mod amount;
pub mod percentage;
pub mod quote;
pub mod ratio_check;
pub mod swap_quote;

pub use amount::{Amount, WAD_DECIMALS, format_units};
pub use percentage::Percentage;
pub use quote::{FallbackReason, PoolPriceQuote, QuoteSource};
pub use ratio_check::{LiquidityRatioCheck, SuggestedAmounts};
pub use swap_quote::SwapQuote;
