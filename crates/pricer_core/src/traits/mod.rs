//! Core numeric traits.
//!
//! Every model and market data structure in the pricer family is generic
//! over [`Float`], so the same code runs with `f64` and `f32`.

/// Generic floating-point trait for numeric computations.
///
/// # Type Safety
/// All implementing types must support:
/// - Arithmetic operations (+, -, *, /)
/// - Comparisons (PartialOrd)
/// - Mathematical functions (exp, ln, sqrt, etc.)
/// - Copy and Clone semantics
///
/// # Examples
/// ```
/// use pricer_core::traits::Float;
///
/// fn log_growth<T: Float>(x0: T, dx: T) -> T {
///     x0 * dx.exp()
/// }
///
/// let grown: f64 = log_growth(100.0, 0.01);
/// assert!((grown - 101.005017).abs() < 1e-5);
/// ```
pub use num_traits::Float;
