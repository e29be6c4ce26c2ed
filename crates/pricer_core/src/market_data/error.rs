//! Market data error types.
//!
//! This module provides structured error handling for market data reads.
//! Every model that pulls its parameters from live quotes surfaces these
//! errors unchanged to its caller.

use thiserror::Error;

/// Market data operation errors.
///
/// # Variants
///
/// - `UnavailableQuote`: A quote was read while it held no value
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::UnavailableQuote {
///     quote: "volatility".to_string(),
/// };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketDataError {
    /// Quote has no current value (never set, reset, or empty handle).
    #[error("Unavailable quote: {quote} has no value")]
    UnavailableQuote {
        /// Name of the quote that was read
        quote: String,
    },
}

impl MarketDataError {
    /// Build an `UnavailableQuote` error for the named quote.
    pub fn unavailable(quote: impl Into<String>) -> Self {
        MarketDataError::UnavailableQuote {
            quote: quote.into(),
        }
    }

    /// Return `true` if this is an `UnavailableQuote` error.
    pub fn is_unavailable_quote(&self) -> bool {
        matches!(self, MarketDataError::UnavailableQuote { .. })
    }
}
