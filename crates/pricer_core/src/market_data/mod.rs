//! Market data structures for quantitative finance pricing.
//!
//! This module provides the observable quote abstraction models read their
//! parameters from: spot levels, rates, dividend yields and volatilities.
//!
//! # Architecture
//!
//! All structures are generic over `T: Float` to support both `f64` and
//! `f32`. Quotes are shared between models through `Arc`, and every read
//! returns the value held at call time.
//!
//! # Components
//!
//! - [`quotes`]: Quote trait, mutable `SimpleQuote` and shared `QuoteHandle`
//! - [`error`]: Market data error types (MarketDataError)
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use pricer_core::market_data::{MarketDataError, Quote, QuoteHandle, SimpleQuote};
//!
//! let spot = Arc::new(SimpleQuote::<f64>::empty("spot"));
//! let handle = QuoteHandle::new(Arc::clone(&spot));
//!
//! assert!(matches!(
//!     handle.value(),
//!     Err(MarketDataError::UnavailableQuote { .. })
//! ));
//!
//! spot.set_value(100.0);
//! assert_eq!(handle.value().unwrap(), 100.0);
//! ```

pub mod error;
pub mod quotes;

// Re-export commonly used types
pub use error::MarketDataError;
pub use quotes::{ObserverId, Quote, QuoteHandle, SimpleQuote};
