//! Discretization schemes for one-dimensional processes.
//!
//! A discretization turns the continuous-time coefficients of a
//! [`StochasticProcess1D`] into finite-step quantities:
//!
//! ```text
//! drift     ≈ μ(t, x) · dt
//! diffusion ≈ σ(t, x) · √dt
//! variance  ≈ σ(t, x)² · dt
//! increment = drift + diffusion · dw      (dw ~ N(0, 1))
//! ```
//!
//! ## Schemes
//!
//! - [`EulerDiscretization`]: coefficients evaluated at the start of the step
//! - [`EndEulerDiscretization`]: coefficients evaluated at the end of the step
//! - [`DiscretizationScheme`]: static dispatch enum over the schemes above,
//!   selectable from configuration

use std::fmt;
use std::str::FromStr;

use pricer_core::market_data::MarketDataError;
use pricer_core::traits::Float;
use thiserror::Error;

use super::stochastic_process::StochasticProcess1D;

/// Policy converting process coefficients into a finite-step increment.
///
/// Implementations must be stateless (or internally synchronised) so a
/// process can be shared between simulation threads.
pub trait Discretization1D<T: Float> {
    /// Deterministic part of the increment over `[t0, t0 + dt]`.
    fn drift<P>(&self, process: &P, t0: T, x0: T, dt: T) -> Result<T, MarketDataError>
    where
        P: StochasticProcess1D<T> + ?Sized;

    /// Scale of the random part of the increment over `[t0, t0 + dt]`.
    fn diffusion<P>(&self, process: &P, t0: T, x0: T, dt: T) -> Result<T, MarketDataError>
    where
        P: StochasticProcess1D<T> + ?Sized;

    /// Variance of the increment over `[t0, t0 + dt]`.
    fn variance<P>(&self, process: &P, t0: T, x0: T, dt: T) -> Result<T, MarketDataError>
    where
        P: StochasticProcess1D<T> + ?Sized;

    /// Full increment for a standard normal draw `dw`.
    fn increment<P>(&self, process: &P, t0: T, x0: T, dt: T, dw: T) -> Result<T, MarketDataError>
    where
        P: StochasticProcess1D<T> + ?Sized,
    {
        let drift = self.drift(process, t0, x0, dt)?;
        let diffusion = self.diffusion(process, t0, x0, dt)?;
        Ok(drift + diffusion * dw)
    }
}

/// Euler scheme with coefficients frozen at the start of the step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EulerDiscretization;

impl<T: Float> Discretization1D<T> for EulerDiscretization {
    #[inline]
    fn drift<P>(&self, process: &P, t0: T, x0: T, dt: T) -> Result<T, MarketDataError>
    where
        P: StochasticProcess1D<T> + ?Sized,
    {
        Ok(process.drift(t0, x0)? * dt)
    }

    #[inline]
    fn diffusion<P>(&self, process: &P, t0: T, x0: T, dt: T) -> Result<T, MarketDataError>
    where
        P: StochasticProcess1D<T> + ?Sized,
    {
        Ok(process.diffusion(t0, x0)? * dt.sqrt())
    }

    #[inline]
    fn variance<P>(&self, process: &P, t0: T, x0: T, dt: T) -> Result<T, MarketDataError>
    where
        P: StochasticProcess1D<T> + ?Sized,
    {
        let sigma = process.diffusion(t0, x0)?;
        Ok(sigma * sigma * dt)
    }
}

/// Euler scheme with coefficients evaluated at the end of the step
/// (`t0 + dt`, state `x0`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EndEulerDiscretization;

impl<T: Float> Discretization1D<T> for EndEulerDiscretization {
    #[inline]
    fn drift<P>(&self, process: &P, t0: T, x0: T, dt: T) -> Result<T, MarketDataError>
    where
        P: StochasticProcess1D<T> + ?Sized,
    {
        Ok(process.drift(t0 + dt, x0)? * dt)
    }

    #[inline]
    fn diffusion<P>(&self, process: &P, t0: T, x0: T, dt: T) -> Result<T, MarketDataError>
    where
        P: StochasticProcess1D<T> + ?Sized,
    {
        Ok(process.diffusion(t0 + dt, x0)? * dt.sqrt())
    }

    #[inline]
    fn variance<P>(&self, process: &P, t0: T, x0: T, dt: T) -> Result<T, MarketDataError>
    where
        P: StochasticProcess1D<T> + ?Sized,
    {
        let sigma = process.diffusion(t0 + dt, x0)?;
        Ok(sigma * sigma * dt)
    }
}

/// Error returned when a scheme name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown discretization: {0}. Must be one of: euler, end_euler")]
pub struct UnknownSchemeError(pub String);

/// Static dispatch enum over the available discretization schemes.
///
/// Use this when the scheme is chosen at runtime (e.g. from configuration)
/// instead of `Box<dyn Discretization1D>`.
///
/// # Example
///
/// ```
/// use pricer_models::processes::DiscretizationScheme;
///
/// let scheme: DiscretizationScheme = "end_euler".parse().unwrap();
/// assert_eq!(scheme, DiscretizationScheme::EndEuler);
/// assert_eq!(DiscretizationScheme::default(), DiscretizationScheme::Euler);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DiscretizationScheme {
    /// Start-of-step Euler scheme
    #[default]
    Euler,
    /// End-of-step Euler scheme
    EndEuler,
}

impl DiscretizationScheme {
    /// Scheme name as used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscretizationScheme::Euler => "euler",
            DiscretizationScheme::EndEuler => "end_euler",
        }
    }
}

impl FromStr for DiscretizationScheme {
    type Err = UnknownSchemeError;

    /// Parse a scheme name, ignoring case, surrounding whitespace and
    /// `-`/`_` spelling (`"End-Euler"` parses as [`DiscretizationScheme::EndEuler`]).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "euler" => Ok(DiscretizationScheme::Euler),
            "end_euler" | "endeuler" => Ok(DiscretizationScheme::EndEuler),
            _ => Err(UnknownSchemeError(s.to_string())),
        }
    }
}

impl fmt::Display for DiscretizationScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T: Float> Discretization1D<T> for DiscretizationScheme {
    fn drift<P>(&self, process: &P, t0: T, x0: T, dt: T) -> Result<T, MarketDataError>
    where
        P: StochasticProcess1D<T> + ?Sized,
    {
        match self {
            DiscretizationScheme::Euler => EulerDiscretization.drift(process, t0, x0, dt),
            DiscretizationScheme::EndEuler => EndEulerDiscretization.drift(process, t0, x0, dt),
        }
    }

    fn diffusion<P>(&self, process: &P, t0: T, x0: T, dt: T) -> Result<T, MarketDataError>
    where
        P: StochasticProcess1D<T> + ?Sized,
    {
        match self {
            DiscretizationScheme::Euler => EulerDiscretization.diffusion(process, t0, x0, dt),
            DiscretizationScheme::EndEuler => {
                EndEulerDiscretization.diffusion(process, t0, x0, dt)
            }
        }
    }

    fn variance<P>(&self, process: &P, t0: T, x0: T, dt: T) -> Result<T, MarketDataError>
    where
        P: StochasticProcess1D<T> + ?Sized,
    {
        match self {
            DiscretizationScheme::Euler => EulerDiscretization.variance(process, t0, x0, dt),
            DiscretizationScheme::EndEuler => EndEulerDiscretization.variance(process, t0, x0, dt),
        }
    }
}
