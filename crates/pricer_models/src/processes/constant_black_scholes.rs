//! Black-Scholes process with constant coefficients.
//!
//! The process models the log of an asset level:
//! ```text
//! d ln S = (r - q - 0.5*sigma^2) dt + sigma dW
//! ```
//! where:
//! - r = risk-free rate
//! - q = continuous dividend yield
//! - sigma = volatility
//!
//! Unlike a generalised Black-Scholes process, r, q and sigma are plain
//! quotes rather than term structures: drift and diffusion depend on neither
//! time nor level. The quotes are read on every call, so updating a quote
//! takes effect on the next evaluation without rebuilding the process.
//!
//! ## State convention
//!
//! `x0`, `apply` and `evolve` work on the asset level S, while `drift` and
//! `diffusion` are the log-space coefficients. `apply(x0, dx) = x0 * exp(dx)`
//! maps a log increment onto a multiplicative level update.

use std::fmt;

use pricer_core::market_data::{MarketDataError, Quote, QuoteHandle};
use pricer_core::traits::Float;

use super::discretization::{Discretization1D, EulerDiscretization};
use super::stochastic_process::StochasticProcess1D;

/// Black-Scholes process with constant rate, dividend yield and volatility.
///
/// # Type Parameters
/// * `T` - Float type (f64 or f32)
/// * `D` - Discretization scheme, [`EulerDiscretization`] by default
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use pricer_core::market_data::{QuoteHandle, SimpleQuote};
/// use pricer_models::processes::{ConstantBlackScholesProcess, StochasticProcess1D};
///
/// let vol = Arc::new(SimpleQuote::new("volatility", 0.20_f64));
/// let process = ConstantBlackScholesProcess::new(
///     SimpleQuote::new("spot", 100.0).into(),
///     SimpleQuote::new("dividend_yield", 0.02).into(),
///     SimpleQuote::new("risk_free_rate", 0.05).into(),
///     QuoteHandle::new(Arc::clone(&vol)),
/// );
///
/// assert!((process.drift(1.0, 100.0).unwrap() - 0.01).abs() < 1e-12);
/// assert_eq!(process.diffusion(1.0, 100.0).unwrap(), 0.20);
///
/// vol.set_value(0.30);
/// assert_eq!(process.diffusion(1.0, 100.0).unwrap(), 0.30);
/// ```
pub struct ConstantBlackScholesProcess<T: Float, D = EulerDiscretization> {
    x0: QuoteHandle<T>,
    dividend_yield: QuoteHandle<T>,
    risk_free_rate: QuoteHandle<T>,
    volatility: QuoteHandle<T>,
    discretization: D,
}

impl<T: Float> ConstantBlackScholesProcess<T, EulerDiscretization> {
    /// Create a process discretised with the Euler scheme.
    ///
    /// # Arguments
    /// * `x0` - Initial asset level
    /// * `dividend_yield` - Continuous dividend yield q
    /// * `risk_free_rate` - Risk-free rate r
    /// * `volatility` - Volatility sigma
    pub fn new(
        x0: QuoteHandle<T>,
        dividend_yield: QuoteHandle<T>,
        risk_free_rate: QuoteHandle<T>,
        volatility: QuoteHandle<T>,
    ) -> Self {
        Self::with_discretization(
            x0,
            dividend_yield,
            risk_free_rate,
            volatility,
            EulerDiscretization,
        )
    }
}

impl<T: Float, D: Discretization1D<T>> ConstantBlackScholesProcess<T, D> {
    /// Create a process with an explicit discretization scheme.
    pub fn with_discretization(
        x0: QuoteHandle<T>,
        dividend_yield: QuoteHandle<T>,
        risk_free_rate: QuoteHandle<T>,
        volatility: QuoteHandle<T>,
        discretization: D,
    ) -> Self {
        tracing::debug!(
            x0 = x0.name(),
            dividend_yield = dividend_yield.name(),
            risk_free_rate = risk_free_rate.name(),
            volatility = volatility.name(),
            "constant Black-Scholes process created"
        );
        Self {
            x0,
            dividend_yield,
            risk_free_rate,
            volatility,
            discretization,
        }
    }

    /// Handle to the initial level quote.
    #[inline]
    pub fn x0_handle(&self) -> &QuoteHandle<T> {
        &self.x0
    }

    /// Handle to the dividend yield quote.
    #[inline]
    pub fn dividend_yield(&self) -> &QuoteHandle<T> {
        &self.dividend_yield
    }

    /// Handle to the risk-free rate quote.
    #[inline]
    pub fn risk_free_rate(&self) -> &QuoteHandle<T> {
        &self.risk_free_rate
    }

    /// Handle to the volatility quote.
    #[inline]
    pub fn volatility(&self) -> &QuoteHandle<T> {
        &self.volatility
    }
}

impl<T, D> StochasticProcess1D<T> for ConstantBlackScholesProcess<T, D>
where
    T: Float,
    D: Discretization1D<T>,
{
    type Discretization = D;

    #[inline]
    fn discretization(&self) -> &D {
        &self.discretization
    }

    fn x0(&self) -> Result<T, MarketDataError> {
        self.x0.value()
    }

    /// Log-space drift `r - q - sigma^2 / 2`; `t` and `x` are ignored.
    fn drift(&self, _t: T, _x: T) -> Result<T, MarketDataError> {
        let r = self.risk_free_rate.value()?;
        let q = self.dividend_yield.value()?;
        let sigma = self.volatility.value()?;
        let half = T::one() / (T::one() + T::one());
        Ok(r - q - half * sigma * sigma)
    }

    /// Log-space diffusion `sigma`; `t` and `x` are ignored.
    ///
    /// A negative volatility quote is returned as is.
    fn diffusion(&self, _t: T, _x: T) -> Result<T, MarketDataError> {
        self.volatility.value()
    }

    /// Level update for a log increment: `x0 * exp(dx)`.
    #[inline]
    fn apply(&self, x0: T, dx: T) -> T {
        x0 * dx.exp()
    }
}

impl<T: Float, D: Clone> Clone for ConstantBlackScholesProcess<T, D> {
    fn clone(&self) -> Self {
        Self {
            x0: self.x0.clone(),
            dividend_yield: self.dividend_yield.clone(),
            risk_free_rate: self.risk_free_rate.clone(),
            volatility: self.volatility.clone(),
            discretization: self.discretization.clone(),
        }
    }
}

impl<T: Float + fmt::Debug, D: fmt::Debug> fmt::Debug for ConstantBlackScholesProcess<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstantBlackScholesProcess")
            .field("x0", &self.x0)
            .field("dividend_yield", &self.dividend_yield)
            .field("risk_free_rate", &self.risk_free_rate)
            .field("volatility", &self.volatility)
            .field("discretization", &self.discretization)
            .finish()
    }
}
