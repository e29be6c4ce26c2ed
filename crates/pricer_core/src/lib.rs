//! # pricer_core: Foundation layer for the pricer family
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the architecture, providing:
//! - The generic numeric trait `Float` (`traits`)
//! - Observable market quotes: `Quote`, `SimpleQuote`, `QuoteHandle` (`market_data::quotes`)
//! - Market data error types: `MarketDataError` (`market_data::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error type derivation
//! - tracing: Structured logging of quote updates
//!
//! ## Usage Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use pricer_core::market_data::quotes::{Quote, QuoteHandle, SimpleQuote};
//!
//! let rate = Arc::new(SimpleQuote::new("risk_free_rate", 0.05_f64));
//! let handle = QuoteHandle::new(Arc::clone(&rate));
//!
//! rate.set_value(0.045);
//! assert_eq!(handle.value().unwrap(), 0.045);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod traits;
