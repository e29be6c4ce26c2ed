//! Integration tests for the constant Black-Scholes process.
//!
//! Exercises the process through the public API only, the way a path
//! generator would: quotes built from configuration, paths walked through
//! `StochasticProcess1D::evolve`, parameters updated between calls.

use std::sync::{Arc, Once};

use approx::assert_relative_eq;
use pricer_core::market_data::{MarketDataError, QuoteHandle, SimpleQuote};
use pricer_models::config::ProcessConfig;
use pricer_models::processes::{
    ConstantBlackScholesProcess, DiscretizationScheme, StochasticProcess1D,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Minimal path generator written against the process trait only.
fn generate_path<P>(
    process: &P,
    n_steps: usize,
    dt: f64,
    shocks: &[f64],
) -> Result<Vec<f64>, MarketDataError>
where
    P: StochasticProcess1D<f64>,
{
    let mut path = Vec::with_capacity(n_steps + 1);
    let mut x = process.x0()?;
    path.push(x);
    for (step, &dw) in shocks.iter().take(n_steps).enumerate() {
        x = process.evolve(step as f64 * dt, x, dt, dw)?;
        path.push(x);
    }
    Ok(path)
}

fn reference_quotes() -> pricer_models::config::ProcessQuotes {
    ProcessConfig {
        spot: Some(100.0),
        dividend_yield: Some(0.02),
        risk_free_rate: Some(0.05),
        volatility: Some(0.20),
        discretization: DiscretizationScheme::Euler,
    }
    .build()
    .unwrap()
}

// =============================================================================
// Reference scenario
// =============================================================================

#[test]
fn test_reference_scenario() {
    init_tracing();
    let quotes = reference_quotes();
    let process = quotes.process();

    assert_eq!(process.x0().unwrap(), 100.0);
    for x in [1.0, 50.0, 100.0, 1000.0] {
        assert_relative_eq!(process.drift(1.0, x).unwrap(), 0.01, epsilon = 1e-15);
        assert_eq!(process.diffusion(1.0, x).unwrap(), 0.20);
    }

    let dx = 0.01 * 1.0 + 0.20 * 0.0;
    assert_relative_eq!(process.apply(100.0, dx), 101.005, epsilon = 1e-3);
    assert_relative_eq!(
        process.evolve(0.0, 100.0, 1.0, 0.0).unwrap(),
        process.apply(100.0, dx),
        epsilon = 1e-12
    );
}

#[test]
fn test_volatility_change_between_calls() {
    init_tracing();
    let quotes = reference_quotes();
    let process = quotes.process();

    assert_eq!(process.diffusion(0.5, 100.0).unwrap(), 0.20);
    quotes.volatility.set_value(0.30);
    assert_eq!(process.diffusion(0.5, 100.0).unwrap(), 0.30);
}

#[test]
fn test_simulation_blocked_until_all_quotes_set() {
    init_tracing();
    let quotes = ProcessConfig::default().build().unwrap();
    let process = quotes.process();
    let shocks = [0.1, -0.2, 0.3];

    let err = generate_path(&process, 3, 0.1, &shocks).unwrap_err();
    assert_eq!(err, MarketDataError::unavailable("spot"));

    quotes.spot.set_value(100.0);
    quotes.dividend_yield.set_value(0.0);
    quotes.risk_free_rate.set_value(0.03);
    let err = generate_path(&process, 3, 0.1, &shocks).unwrap_err();
    assert_eq!(err, MarketDataError::unavailable("volatility"));

    quotes.volatility.set_value(0.25);
    let path = generate_path(&process, 3, 0.1, &shocks).unwrap();
    assert_eq!(path.len(), 4);
    assert_eq!(path[0], 100.0);
}

// =============================================================================
// Path generation
// =============================================================================

#[test]
fn test_path_matches_closed_form() {
    init_tracing();
    let process = reference_quotes().process();
    let dt = 1.0 / 52.0;
    let shocks: Vec<f64> = (0..52).map(|i| ((i as f64) * 0.37).sin()).collect();

    let path = generate_path(&process, 52, dt, &shocks).unwrap();

    // Constant coefficients: the log-Euler path is the exact GBM path
    let sum_shocks: f64 = shocks.iter().sum();
    let expected = 100.0 * (0.01 * 1.0 + 0.20 * dt.sqrt() * sum_shocks).exp();
    assert_relative_eq!(path[52], expected, max_relative = 1e-10);
    assert!(path.iter().all(|&s| s > 0.0));
}

#[test]
fn test_monte_carlo_forward() {
    init_tracing();
    let process = reference_quotes().process();
    let mut rng = StdRng::seed_from_u64(42);
    let n_paths = 20_000;
    let maturity = 1.0;

    let mean = (0..n_paths)
        .map(|_| {
            let z: f64 = rng.sample(StandardNormal);
            process.evolve(0.0, 100.0, maturity, z).unwrap()
        })
        .sum::<f64>()
        / n_paths as f64;

    // E[S_T] = S_0 exp((r - q) T); standard error is about 0.15
    let forward = 100.0 * (0.03_f64 * maturity).exp();
    assert!(
        (mean - forward).abs() < 1.0,
        "mean {} too far from forward {}",
        mean,
        forward
    );
}

#[test]
fn test_end_euler_config_builds_equivalent_process() {
    init_tracing();
    let config = ProcessConfig::from_toml_str(
        r#"
            spot = 100.0
            dividend_yield = 0.02
            risk_free_rate = 0.05
            volatility = 0.2
            discretization = "end_euler"
        "#,
    )
    .unwrap();
    let end_euler = config.build().unwrap().process();
    let euler = reference_quotes().process();

    let shocks = [0.5, -1.0, 0.25, 2.0];
    assert_eq!(
        generate_path(&end_euler, 4, 0.25, &shocks).unwrap(),
        generate_path(&euler, 4, 0.25, &shocks).unwrap()
    );
}

// =============================================================================
// Shared quotes and concurrency
// =============================================================================

#[test]
fn test_quote_shared_between_processes() {
    init_tracing();
    let vol = Arc::new(SimpleQuote::new("volatility", 0.2_f64));
    let build = |spot: f64| {
        ConstantBlackScholesProcess::new(
            SimpleQuote::new("spot", spot).into(),
            SimpleQuote::new("dividend_yield", 0.0).into(),
            SimpleQuote::new("risk_free_rate", 0.0).into(),
            QuoteHandle::new(Arc::clone(&vol)),
        )
    };
    let a = build(100.0);
    let b = build(50.0);

    vol.set_value(0.4);
    assert_eq!(a.diffusion(0.0, 100.0).unwrap(), 0.4);
    assert_eq!(b.diffusion(0.0, 50.0).unwrap(), 0.4);
}

#[test]
fn test_concurrent_evolve() {
    init_tracing();
    let process = Arc::new(reference_quotes().process());
    let expected = process.evolve(0.0, 100.0, 0.5, 0.3).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let p = Arc::clone(&process);
            std::thread::spawn(move || {
                (0..1000)
                    .map(|_| p.evolve(0.0, 100.0, 0.5, 0.3).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for value in handle.join().unwrap() {
            assert_eq!(value, expected);
        }
    }
}

#[test]
fn test_observer_sees_config_quote_updates() {
    init_tracing();
    let quotes = reference_quotes();
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let seen_cb = Arc::clone(&seen);
    quotes.risk_free_rate.register_observer(move |v| {
        seen_cb.lock().unwrap().push(v);
    });

    quotes.risk_free_rate.set_value(0.04);
    quotes.risk_free_rate.reset();

    assert_eq!(*seen.lock().unwrap(), vec![Some(0.04), None]);
    assert!(quotes.process().drift(0.0, 100.0).is_err());
}
