//! Process configuration management.
//!
//! Loads the market parameters of a [`ConstantBlackScholesProcess`] from a
//! TOML file and environment variables, validates them, and builds the
//! shared quotes the process reads from.
//!
//! Priority (highest to lowest):
//! 1. Environment variables
//! 2. Config file
//! 3. Default values (all quotes unset, Euler discretization)
//!
//! An absent parameter yields an empty quote: the process is still built and
//! fails with an unavailable-quote error only when the missing value is read.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use pricer_core::market_data::{QuoteHandle, SimpleQuote};
use serde::Deserialize;
use thiserror::Error;

use crate::processes::{ConstantBlackScholesProcess, DiscretizationScheme, UnknownSchemeError};

/// Environment variable overriding the initial level.
pub const ENV_SPOT: &str = "PRICER_PROCESS_SPOT";
/// Environment variable overriding the dividend yield.
pub const ENV_DIVIDEND_YIELD: &str = "PRICER_PROCESS_DIVIDEND_YIELD";
/// Environment variable overriding the risk-free rate.
pub const ENV_RISK_FREE_RATE: &str = "PRICER_PROCESS_RISK_FREE_RATE";
/// Environment variable overriding the volatility.
pub const ENV_VOLATILITY: &str = "PRICER_PROCESS_VOLATILITY";
/// Environment variable overriding the discretization scheme.
pub const ENV_DISCRETIZATION: &str = "PRICER_PROCESS_DISCRETIZATION";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A parameter is outside its valid domain.
    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidValue {
        /// Parameter name
        field: &'static str,
        /// Rejected value
        value: f64,
        /// Constraint that was violated
        reason: &'static str,
    },

    /// Unrecognised discretization scheme name.
    #[error(transparent)]
    UnknownDiscretization(#[from] UnknownSchemeError),

    /// Config file could not be read or parsed.
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Environment variable could not be parsed.
    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Market parameters of a constant Black-Scholes process.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProcessConfig {
    /// Initial asset level
    pub spot: Option<f64>,
    /// Continuous dividend yield
    pub dividend_yield: Option<f64>,
    /// Risk-free rate
    pub risk_free_rate: Option<f64>,
    /// Volatility
    pub volatility: Option<f64>,
    /// Discretization scheme used by `evolve`
    #[serde(deserialize_with = "deserialize_discretization")]
    pub discretization: DiscretizationScheme,
}

fn deserialize_discretization<'de, D>(deserializer: D) -> Result<DiscretizationScheme, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    DiscretizationScheme::from_str(&s).map_err(serde::de::Error::custom)
}

impl ProcessConfig {
    /// Create a configuration with every quote unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ProcessConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "process configuration file loaded");
        Ok(config)
    }

    /// Load configuration from environment variables only.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.merge_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields with any process environment variables that are set.
    pub fn merge_env(&mut self) -> Result<(), ConfigError> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Override fields from a variable lookup (`None` means unset).
    pub fn merge_vars<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse = |key: &str| -> Result<Option<f64>, ConfigError> {
            lookup(key)
                .map(|raw| {
                    raw.trim()
                        .parse::<f64>()
                        .map_err(|e| ConfigError::EnvError(format!("{}: {}", key, e)))
                })
                .transpose()
        };

        if let Some(spot) = parse(ENV_SPOT)? {
            self.spot = Some(spot);
        }
        if let Some(q) = parse(ENV_DIVIDEND_YIELD)? {
            self.dividend_yield = Some(q);
        }
        if let Some(r) = parse(ENV_RISK_FREE_RATE)? {
            self.risk_free_rate = Some(r);
        }
        if let Some(sigma) = parse(ENV_VOLATILITY)? {
            self.volatility = Some(sigma);
        }
        if let Some(scheme) = lookup(ENV_DISCRETIZATION) {
            self.discretization = DiscretizationScheme::from_str(&scheme)?;
        }
        Ok(())
    }

    /// Validate the configuration.
    ///
    /// Rejects non-finite values, a non-positive spot and a negative
    /// volatility. Unset values are accepted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("spot", self.spot),
            ("dividend_yield", self.dividend_yield),
            ("risk_free_rate", self.risk_free_rate),
            ("volatility", self.volatility),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                if !value.is_finite() {
                    return Err(ConfigError::InvalidValue {
                        field,
                        value,
                        reason: "must be finite",
                    });
                }
            }
        }

        if let Some(spot) = self.spot {
            if spot <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: "spot",
                    value: spot,
                    reason: "must be positive",
                });
            }
        }
        if let Some(sigma) = self.volatility {
            if sigma < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: "volatility",
                    value: sigma,
                    reason: "must be non-negative",
                });
            }
        }
        Ok(())
    }

    /// Validate and create the shared quotes described by this configuration.
    pub fn build(&self) -> Result<ProcessQuotes, ConfigError> {
        self.validate()?;
        tracing::debug!(
            spot = ?self.spot,
            dividend_yield = ?self.dividend_yield,
            risk_free_rate = ?self.risk_free_rate,
            volatility = ?self.volatility,
            discretization = %self.discretization,
            "building process quotes"
        );
        Ok(ProcessQuotes {
            spot: Arc::new(SimpleQuote::with_value("spot", self.spot)),
            dividend_yield: Arc::new(SimpleQuote::with_value(
                "dividend_yield",
                self.dividend_yield,
            )),
            risk_free_rate: Arc::new(SimpleQuote::with_value(
                "risk_free_rate",
                self.risk_free_rate,
            )),
            volatility: Arc::new(SimpleQuote::with_value("volatility", self.volatility)),
            discretization: self.discretization,
        })
    }
}

/// Load configuration from all sources.
///
/// Reads `path` when given, then applies environment overrides, then
/// validates the result.
pub fn load_config(path: Option<&Path>) -> Result<ProcessConfig, ConfigError> {
    let mut config = match path {
        Some(path) => ProcessConfig::from_file(path)?,
        None => ProcessConfig::default(),
    };
    config.merge_env()?;
    config.validate()?;
    Ok(config)
}

/// Shared quotes built from a [`ProcessConfig`].
///
/// Keep this around to update market parameters after the process is
/// built; every process created from it observes the changes.
#[derive(Debug, Clone)]
pub struct ProcessQuotes {
    /// Initial asset level
    pub spot: Arc<SimpleQuote<f64>>,
    /// Continuous dividend yield
    pub dividend_yield: Arc<SimpleQuote<f64>>,
    /// Risk-free rate
    pub risk_free_rate: Arc<SimpleQuote<f64>>,
    /// Volatility
    pub volatility: Arc<SimpleQuote<f64>>,
    /// Discretization scheme handed to built processes
    pub discretization: DiscretizationScheme,
}

impl ProcessQuotes {
    /// Build a process reading from these quotes.
    pub fn process(&self) -> ConstantBlackScholesProcess<f64, DiscretizationScheme> {
        ConstantBlackScholesProcess::with_discretization(
            QuoteHandle::new(Arc::clone(&self.spot)),
            QuoteHandle::new(Arc::clone(&self.dividend_yield)),
            QuoteHandle::new(Arc::clone(&self.risk_free_rate)),
            QuoteHandle::new(Arc::clone(&self.volatility)),
            self.discretization,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processes::StochasticProcess1D;
    use pricer_core::market_data::Quote;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = ProcessConfig::default();
        assert_eq!(config.spot, None);
        assert_eq!(config.dividend_yield, None);
        assert_eq!(config.risk_free_rate, None);
        assert_eq!(config.volatility, None);
        assert_eq!(config.discretization, DiscretizationScheme::Euler);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            spot = 100.0
            dividend_yield = 0.02
            risk_free_rate = 0.05
            volatility = 0.2
            discretization = "end_euler"
        "#;

        let config = ProcessConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.spot, Some(100.0));
        assert_eq!(config.dividend_yield, Some(0.02));
        assert_eq!(config.risk_free_rate, Some(0.05));
        assert_eq!(config.volatility, Some(0.2));
        assert_eq!(config.discretization, DiscretizationScheme::EndEuler);
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let config = ProcessConfig::from_toml_str("volatility = 0.3").unwrap();
        assert_eq!(config.volatility, Some(0.3));
        assert_eq!(config.spot, None);
        assert_eq!(config.discretization, DiscretizationScheme::Euler);
    }

    #[test]
    fn test_toml_and_env_accept_same_scheme_spellings() {
        for spelling in ["euler", "End-Euler", "endeuler", " END_EULER "] {
            let from_toml =
                ProcessConfig::from_toml_str(&format!("discretization = \"{}\"", spelling))
                    .unwrap();
            let mut from_env = ProcessConfig::default();
            let env = vars(&[(ENV_DISCRETIZATION, spelling)]);
            from_env.merge_vars(|k| env.get(k).cloned()).unwrap();
            assert_eq!(from_toml.discretization, from_env.discretization);
        }
    }

    #[test]
    fn test_toml_unknown_discretization() {
        let err = ProcessConfig::from_toml_str(r#"discretization = "milstein""#).unwrap_err();
        assert!(matches!(err, ConfigError::FileError(_)));
        assert!(err.to_string().contains("milstein"));
    }

    #[test]
    fn test_toml_parse_error() {
        let err = ProcessConfig::from_toml_str("spot = [").unwrap_err();
        assert!(matches!(err, ConfigError::FileError(_)));
    }

    #[test]
    fn test_validate_rejects_negative_volatility() {
        let config = ProcessConfig {
            volatility: Some(-0.1),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "volatility",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_non_positive_spot() {
        let config = ProcessConfig {
            spot: Some(0.0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "spot", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let config = ProcessConfig {
            risk_free_rate: Some(f64::NAN),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "risk_free_rate",
                reason: "must be finite",
                ..
            })
        ));
    }

    #[test]
    fn test_merge_vars_overrides() {
        let mut config = ProcessConfig {
            spot: Some(90.0),
            volatility: Some(0.2),
            ..Default::default()
        };
        let env = vars(&[
            (ENV_SPOT, "100"),
            (ENV_RISK_FREE_RATE, " 0.05 "),
            (ENV_DISCRETIZATION, "end-euler"),
        ]);
        config.merge_vars(|k| env.get(k).cloned()).unwrap();

        assert_eq!(config.spot, Some(100.0));
        assert_eq!(config.risk_free_rate, Some(0.05));
        assert_eq!(config.volatility, Some(0.2));
        assert_eq!(config.dividend_yield, None);
        assert_eq!(config.discretization, DiscretizationScheme::EndEuler);
    }

    #[test]
    fn test_merge_vars_parse_error() {
        let mut config = ProcessConfig::default();
        let env = vars(&[(ENV_VOLATILITY, "twenty percent")]);
        let err = config.merge_vars(|k| env.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::EnvError(_)));
        assert!(err.to_string().contains(ENV_VOLATILITY));
    }

    #[test]
    fn test_merge_vars_unknown_discretization() {
        let mut config = ProcessConfig::default();
        let env = vars(&[(ENV_DISCRETIZATION, "runge_kutta")]);
        assert!(matches!(
            config.merge_vars(|k| env.get(k).cloned()),
            Err(ConfigError::UnknownDiscretization(_))
        ));
    }

    #[test]
    fn test_from_file_missing() {
        let err = ProcessConfig::from_file(Path::new("/nonexistent/process.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileError(_)));
    }

    #[test]
    fn test_from_file_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "pricer_models_process_config_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "spot = 100.0\nvolatility = 0.25\n").unwrap();
        let config = ProcessConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.spot, Some(100.0));
        assert_eq!(config.volatility, Some(0.25));
    }

    #[test]
    fn test_build_quotes_and_process() {
        let config = ProcessConfig {
            spot: Some(100.0),
            dividend_yield: Some(0.02),
            risk_free_rate: Some(0.05),
            volatility: Some(0.2),
            discretization: DiscretizationScheme::Euler,
        };
        let quotes = config.build().unwrap();
        let process = quotes.process();

        assert_eq!(process.x0().unwrap(), 100.0);
        assert!((process.drift(0.0, 100.0).unwrap() - 0.01).abs() < 1e-15);
        assert_eq!(*process.discretization(), DiscretizationScheme::Euler);

        quotes.volatility.set_value(0.3);
        assert_eq!(process.diffusion(0.0, 100.0).unwrap(), 0.3);
    }

    #[test]
    fn test_build_with_missing_values() {
        let quotes = ProcessConfig::default().build().unwrap();
        assert!(!quotes.spot.is_valid());
        let process = quotes.process();
        assert!(process.x0().unwrap_err().is_unavailable_quote());
    }

    #[test]
    fn test_build_rejects_invalid() {
        let config = ProcessConfig {
            volatility: Some(-0.2),
            ..Default::default()
        };
        assert!(config.build().is_err());
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidValue {
            field: "spot",
            value: -1.0,
            reason: "must be positive",
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for spot: -1 (must be positive)"
        );

        let err = ConfigError::from(UnknownSchemeError("bad".to_string()));
        assert!(err.to_string().contains("Unknown discretization"));
    }
}
