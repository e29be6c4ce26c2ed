//! Observable market quotes.
//!
//! This module provides:
//! - [`Quote`]: Read-side capability shared by every quote type
//! - [`SimpleQuote`]: Mutable, thread-safe value cell with change notification
//! - [`QuoteHandle`]: Cheap-to-clone shared handle models hold onto
//!
//! Models never cache quote values. They hold a [`QuoteHandle`] and read the
//! current value on every call, so updating the underlying [`SimpleQuote`]
//! is visible on the very next evaluation.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use pricer_core::market_data::quotes::{Quote, QuoteHandle, SimpleQuote};
//!
//! let vol = Arc::new(SimpleQuote::new("volatility", 0.20_f64));
//! let handle = QuoteHandle::new(Arc::clone(&vol));
//! assert_eq!(handle.value().unwrap(), 0.20);
//!
//! vol.set_value(0.30);
//! assert_eq!(handle.value().unwrap(), 0.30);
//! ```

mod handle;
mod simple;
mod traits;

pub use handle::QuoteHandle;
pub use simple::{ObserverId, SimpleQuote};
pub use traits::Quote;
