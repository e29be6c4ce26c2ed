//! Quote trait definition.

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Read-side capability of an observable scalar quote.
///
/// # Contract
///
/// - `value()` returns the value held at call time, never a cached copy
/// - `value()` fails with [`MarketDataError::UnavailableQuote`] when no
///   value is held
/// - `is_valid()` is `true` exactly when `value()` would succeed
///
/// # Example
///
/// ```
/// use pricer_core::market_data::quotes::{Quote, SimpleQuote};
///
/// let quote = SimpleQuote::<f64>::empty("spot");
/// assert!(!quote.is_valid());
/// assert!(quote.value().is_err());
/// ```
pub trait Quote<T: Float> {
    /// Return the current value of the quote.
    ///
    /// # Returns
    ///
    /// * `Ok(value)` - The value held at call time
    /// * `Err(MarketDataError::UnavailableQuote)` - If no value is held
    fn value(&self) -> Result<T, MarketDataError>;

    /// Return `true` if the quote currently holds a value.
    fn is_valid(&self) -> bool;
}
