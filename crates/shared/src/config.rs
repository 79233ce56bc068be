//! Application configuration management.

use serde::Deserialize;

use crate::rounding::RoundingMode;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Money engine defaults.
    pub money: MoneyConfig,
    /// Logging configuration.
    pub log: LogConfig,
}

/// Defaults applied by callers that do not pick a mode or locale themselves.
#[derive(Debug, Clone, Deserialize)]
pub struct MoneyConfig {
    /// Rounding mode the cart walkthrough applies to discounts and tax.
    #[serde(default)]
    pub default_rounding: RoundingMode,
    /// Locale used for display formatting.
    #[serde(default = "default_locale")]
    pub default_locale: String,
    /// Currency the cart walkthrough prices its lines in.
    #[serde(default = "default_currency")]
    pub default_currency: String,
}

impl Default for MoneyConfig {
    fn default() -> Self {
        Self {
            default_rounding: RoundingMode::default(),
            default_locale: default_locale(),
            default_currency: default_currency(),
        }
    }
}

fn default_locale() -> String {
    "en_US".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "minted_core=info,minted_cart=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones: `config/default`,
    /// `config/{RUN_MODE}`, then `MINTED__*` environment variables
    /// (e.g. `MINTED__MONEY__DEFAULT_ROUNDING=half_even`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("MINTED").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.money.default_rounding, RoundingMode::HalfUp);
        assert_eq!(config.money.default_locale, "en_US");
        assert_eq!(config.money.default_currency, "USD");
        assert_eq!(config.log.filter, "minted_core=info,minted_cart=info");
        assert!(!config.log.json);
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        temp_env::with_vars_unset(
            [
                "MINTED__MONEY__DEFAULT_ROUNDING",
                "MINTED__MONEY__DEFAULT_LOCALE",
                "MINTED__LOG__FILTER",
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.money.default_rounding, RoundingMode::HalfUp);
                assert_eq!(config.money.default_locale, "en_US");
            },
        );
    }

    #[test]
    fn test_load_env_overrides() {
        temp_env::with_vars(
            [
                ("MINTED__MONEY__DEFAULT_ROUNDING", Some("half_even")),
                ("MINTED__MONEY__DEFAULT_LOCALE", Some("de_DE")),
                ("MINTED__LOG__FILTER", Some("minted_core=trace")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.money.default_rounding, RoundingMode::HalfEven);
                assert_eq!(config.money.default_locale, "de_DE");
                assert_eq!(config.log.filter, "minted_core=trace");
            },
        );
    }
}
