//! Calculator configuration
//!
//! Priority (highest to lowest):
//! 1. Environment variables prefixed `CALC_` (e.g. `CALC_MAX_HISTORY_SIZE`)
//! 2. Config file (TOML, YAML or JSON, chosen by extension)
//! 3. Default values

use crate::error::{CalcError, Result};
use crate::format::DEFAULT_PRECISION;
use crate::history::DEFAULT_MAX_SIZE;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "CALC_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    /// Capacity of the calculation history
    pub max_history_size: usize,
    /// Decimal places kept for float results before they are recorded
    pub decimal_precision: u32,
    /// Decimal places shown when printing results
    pub display_precision: u32,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            max_history_size: DEFAULT_MAX_SIZE,
            decimal_precision: 10,
            display_precision: DEFAULT_PRECISION,
        }
    }
}

impl CalcConfig {
    /// Load configuration from defaults, an optional file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(CalcConfig::default()));

        if let Some(path) = path {
            figment = figment.merge(file_provider(path)?);
        }

        let config: CalcConfig = figment
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| CalcError::invalid_config(format!("Failed to load configuration: {}", e)))?;

        config.validate()?;
        debug!(?config, "configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_history_size == 0 {
            return Err(CalcError::invalid_config(
                "max_history_size must be at least 1",
            ));
        }
        Ok(())
    }
}

fn file_provider(path: &Path) -> Result<Figment> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| CalcError::invalid_config("Config file must have an extension"))?;

    match extension {
        "toml" => Ok(Figment::from(Toml::file(path))),
        "yaml" | "yml" => Ok(Figment::from(Yaml::file(path))),
        "json" => Ok(Figment::from(Json::file(path))),
        other => Err(CalcError::invalid_config(format!(
            "Unsupported config file format: {}",
            other
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_jail| {
            let config = CalcConfig::load(None).unwrap();
            assert_eq!(config, CalcConfig::default());
            assert_eq!(config.max_history_size, 100);
            assert_eq!(config.decimal_precision, 10);
            Ok(())
        });
    }

    #[test]
    fn test_file_then_env() {
        Jail::expect_with(|jail| {
            jail.create_file("calc.toml", "max_history_size = 5\ndisplay_precision = 4")?;
            let config = CalcConfig::load(Some(Path::new("calc.toml"))).unwrap();
            assert_eq!(config.max_history_size, 5);
            assert_eq!(config.display_precision, 4);
            assert_eq!(config.decimal_precision, 10);

            jail.set_env("CALC_MAX_HISTORY_SIZE", "7");
            let config = CalcConfig::load(Some(Path::new("calc.toml"))).unwrap();
            assert_eq!(config.max_history_size, 7);
            Ok(())
        });
    }

    #[test]
    fn test_yaml_file() {
        Jail::expect_with(|jail| {
            jail.create_file("calc.yaml", "max_history_size: 3\n")?;
            let config = CalcConfig::load(Some(Path::new("calc.yaml"))).unwrap();
            assert_eq!(config.max_history_size, 3);
            Ok(())
        });
    }

    #[test]
    fn test_rejects_zero_history() {
        Jail::expect_with(|jail| {
            jail.set_env("CALC_MAX_HISTORY_SIZE", "0");
            assert!(matches!(
                CalcConfig::load(None),
                Err(CalcError::InvalidConfig(_))
            ));
            Ok(())
        });
    }

    #[test]
    fn test_unsupported_extension() {
        let err = CalcConfig::load(Some(Path::new("calc.ini"))).unwrap_err();
        assert!(err.to_string().contains("Unsupported config file format"));
    }
}
