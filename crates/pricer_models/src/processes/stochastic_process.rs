//! One-dimensional stochastic process contract.
//!
//! A process `dx_t = μ(t, x_t) dt + σ(t, x_t) dW_t` is described by:
//! - `x0`: initial value
//! - `drift`: μ(t, x)
//! - `diffusion`: σ(t, x)
//! - `apply`: how an increment `dx` changes a state `x0`
//!
//! Everything else (expectation, standard deviation, variance and the
//! one-step `evolve`) is derived from those four primitives plus the
//! process's [`Discretization1D`]. Overriding `drift`, `diffusion` and
//! `apply` is therefore enough to redefine a process completely.
//!
//! ## Example
//!
//! ```
//! use pricer_core::market_data::MarketDataError;
//! use pricer_models::processes::{EulerDiscretization, StochasticProcess1D};
//!
//! // Arithmetic Brownian motion with constant coefficients
//! struct Abm {
//!     mu: f64,
//!     sigma: f64,
//!     discretization: EulerDiscretization,
//! }
//!
//! impl StochasticProcess1D<f64> for Abm {
//!     type Discretization = EulerDiscretization;
//!
//!     fn discretization(&self) -> &EulerDiscretization {
//!         &self.discretization
//!     }
//!     fn x0(&self) -> Result<f64, MarketDataError> {
//!         Ok(0.0)
//!     }
//!     fn drift(&self, _t: f64, _x: f64) -> Result<f64, MarketDataError> {
//!         Ok(self.mu)
//!     }
//!     fn diffusion(&self, _t: f64, _x: f64) -> Result<f64, MarketDataError> {
//!         Ok(self.sigma)
//!     }
//! }
//!
//! let abm = Abm { mu: 0.1, sigma: 0.2, discretization: EulerDiscretization };
//! let x1 = abm.evolve(0.0, 1.0, 0.25, 1.0).unwrap();
//! assert!((x1 - (1.0 + 0.1 * 0.25 + 0.2 * 0.5)).abs() < 1e-12);
//! ```

use pricer_core::market_data::MarketDataError;
use pricer_core::traits::Float;

use super::discretization::Discretization1D;

/// Unified trait interface for one-dimensional stochastic processes.
///
/// Path generators and Monte Carlo drivers are written against this trait
/// only, so any implementation can be substituted for any other.
///
/// # Type Parameters
/// * `T` - Float type (f64 or f32), used for both times and levels
///
/// # Errors
///
/// Methods that read market data return
/// [`MarketDataError::UnavailableQuote`] when a backing quote has no value.
/// The error is never recovered inside the process.
pub trait StochasticProcess1D<T: Float> {
    /// Discretization scheme used by the derived methods.
    type Discretization: Discretization1D<T>;

    /// The discretization used by `expectation`, `std_deviation`,
    /// `variance` and `evolve`.
    fn discretization(&self) -> &Self::Discretization;

    /// Initial value of the process.
    fn x0(&self) -> Result<T, MarketDataError>;

    /// Drift coefficient μ(t, x).
    fn drift(&self, t: T, x: T) -> Result<T, MarketDataError>;

    /// Diffusion coefficient σ(t, x).
    fn diffusion(&self, t: T, x: T) -> Result<T, MarketDataError>;

    /// Apply an increment `dx` to the state `x0`.
    ///
    /// Defaults to `x0 + dx`. Processes defined on a transformed state
    /// (e.g. the log of a level) override this.
    fn apply(&self, x0: T, dx: T) -> T {
        x0 + dx
    }

    /// Number of state variables (always 1).
    fn size(&self) -> usize {
        1
    }

    /// Number of Brownian factors driving the process (always 1).
    fn factors(&self) -> usize {
        1
    }

    /// Expected state at `t0 + dt` given `x0` at `t0`.
    fn expectation(&self, t0: T, x0: T, dt: T) -> Result<T, MarketDataError> {
        let dx = self.discretization().drift(self, t0, x0, dt)?;
        Ok(self.apply(x0, dx))
    }

    /// Standard deviation of the increment over `[t0, t0 + dt]`.
    fn std_deviation(&self, t0: T, x0: T, dt: T) -> Result<T, MarketDataError> {
        self.discretization().diffusion(self, t0, x0, dt)
    }

    /// Variance of the increment over `[t0, t0 + dt]`.
    fn variance(&self, t0: T, x0: T, dt: T) -> Result<T, MarketDataError> {
        self.discretization().variance(self, t0, x0, dt)
    }

    /// Advance the state `x0` at `t0` by one step of length `dt`.
    ///
    /// # Arguments
    /// * `t0` - Start time of the step
    /// * `x0` - State at `t0`
    /// * `dt` - Step length (must be non-negative)
    /// * `dw` - Standard normal draw for the step
    ///
    /// # Returns
    /// `apply(x0, increment)` where the increment is computed by the
    /// process's discretization.
    fn evolve(&self, t0: T, x0: T, dt: T, dw: T) -> Result<T, MarketDataError> {
        let dx = self.discretization().increment(self, t0, x0, dt, dw)?;
        Ok(self.apply(x0, dx))
    }
}
