//! One-dimensional stochastic processes for Monte Carlo path generation.
//!
//! This module provides:
//! - `StochasticProcess1D` trait: the contract path generators are written against
//! - `Discretization1D` trait: pluggable step discretization
//! - `EulerDiscretization`, `EndEulerDiscretization`, `DiscretizationScheme`
//! - `ConstantBlackScholesProcess`: lognormal process with constant r, q and sigma
//!
//! ## Design Philosophy
//!
//! - **Static dispatch**: discretizations are generic parameters (or the
//!   `DiscretizationScheme` enum), not `Box<dyn Trait>`
//! - **Generic Float type**: works with f64 and f32
//! - **Live quotes**: market parameters are read from shared quotes on every call
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use pricer_core::market_data::{QuoteHandle, SimpleQuote};
//! use pricer_models::processes::{ConstantBlackScholesProcess, StochasticProcess1D};
//!
//! let spot = Arc::new(SimpleQuote::new("spot", 100.0_f64));
//! let process = ConstantBlackScholesProcess::new(
//!     QuoteHandle::new(Arc::clone(&spot)),
//!     SimpleQuote::new("dividend_yield", 0.02).into(),
//!     SimpleQuote::new("risk_free_rate", 0.05).into(),
//!     SimpleQuote::new("volatility", 0.20).into(),
//! );
//!
//! // Walk a short path with zero shocks
//! let dt = 1.0 / 252.0;
//! let mut s = process.x0().unwrap();
//! for step in 0..10 {
//!     s = process.evolve(step as f64 * dt, s, dt, 0.0).unwrap();
//! }
//! assert!((s - 100.0 * (0.01 * 10.0 * dt).exp()).abs() < 1e-10);
//! ```

pub mod constant_black_scholes;
pub mod discretization;
pub mod stochastic_process;

pub use constant_black_scholes::ConstantBlackScholesProcess;
pub use discretization::{
    Discretization1D, DiscretizationScheme, EndEulerDiscretization, EulerDiscretization,
    UnknownSchemeError,
};
pub use stochastic_process::StochasticProcess1D;
