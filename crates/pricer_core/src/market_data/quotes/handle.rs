//! Shared handle to an observable quote.

use std::fmt;
use std::sync::Arc;

use num_traits::Float;

use super::{Quote, SimpleQuote};
use crate::market_data::error::MarketDataError;

/// Shared, cheap-to-clone reference to a [`SimpleQuote`].
///
/// Copies of a handle share the same underlying quote, so a value stored
/// through any owner of the quote is seen by every holder of the handle.
/// A handle may also be empty, in which case reading it fails with
/// [`MarketDataError::UnavailableQuote`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use pricer_core::market_data::quotes::{Quote, QuoteHandle, SimpleQuote};
///
/// let spot = Arc::new(SimpleQuote::new("spot", 100.0_f64));
/// let a = QuoteHandle::new(Arc::clone(&spot));
/// let b = a.clone();
///
/// spot.set_value(105.0);
/// assert_eq!(a.value().unwrap(), 105.0);
/// assert_eq!(b.value().unwrap(), 105.0);
///
/// let empty = QuoteHandle::<f64>::empty_named("volatility");
/// assert_eq!(
///     empty.value().unwrap_err().to_string(),
///     "Unavailable quote: volatility has no value"
/// );
/// ```
pub struct QuoteHandle<T: Float> {
    link: Option<Arc<SimpleQuote<T>>>,
    unlinked_name: Arc<str>,
}

const UNLINKED: &str = "empty handle";

impl<T: Float> QuoteHandle<T> {
    /// Create a handle linked to `quote`.
    #[inline]
    pub fn new(quote: Arc<SimpleQuote<T>>) -> Self {
        Self {
            link: Some(quote),
            unlinked_name: Arc::from(UNLINKED),
        }
    }

    /// Create a handle not linked to any quote.
    #[inline]
    pub fn empty() -> Self {
        Self::empty_named(UNLINKED)
    }

    /// Create an unlinked handle that reports `name` when read.
    pub fn empty_named(name: impl AsRef<str>) -> Self {
        Self {
            link: None,
            unlinked_name: Arc::from(name.as_ref()),
        }
    }

    /// Return `true` if the handle is not linked to a quote.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.link.is_none()
    }

    /// Return the linked quote, if any.
    #[inline]
    pub fn current_link(&self) -> Option<&Arc<SimpleQuote<T>>> {
        self.link.as_ref()
    }

    /// Return the name of the linked quote, or the name given to an
    /// unlinked handle (`"empty handle"` by default).
    pub fn name(&self) -> &str {
        match &self.link {
            Some(quote) => quote.name(),
            None => &*self.unlinked_name,
        }
    }
}

impl<T: Float> Quote<T> for QuoteHandle<T> {
    fn value(&self) -> Result<T, MarketDataError> {
        match &self.link {
            Some(quote) => quote.value(),
            None => Err(MarketDataError::unavailable(&*self.unlinked_name)),
        }
    }

    fn is_valid(&self) -> bool {
        self.link.as_ref().is_some_and(|quote| quote.is_valid())
    }
}

impl<T: Float> Clone for QuoteHandle<T> {
    fn clone(&self) -> Self {
        Self {
            link: self.link.clone(),
            unlinked_name: Arc::clone(&self.unlinked_name),
        }
    }
}

impl<T: Float> Default for QuoteHandle<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Float> From<Arc<SimpleQuote<T>>> for QuoteHandle<T> {
    fn from(quote: Arc<SimpleQuote<T>>) -> Self {
        Self::new(quote)
    }
}

impl<T: Float> From<SimpleQuote<T>> for QuoteHandle<T> {
    fn from(quote: SimpleQuote<T>) -> Self {
        Self::new(Arc::new(quote))
    }
}

impl<T: Float + fmt::Debug> fmt::Debug for QuoteHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.link {
            Some(quote) => f.debug_tuple("QuoteHandle").field(quote).finish(),
            None => write!(f, "QuoteHandle(empty: {})", self.unlinked_name),
        }
    }
}
