use crate::error::ConfigError;
use serde::Deserialize;

/// The root configuration structure for the entire application.
///
/// Every section falls back to its `Default` so a missing config file still
/// yields a runnable setup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub screener: ScreenerConfig,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

/// Connection settings for the Lixinger Open API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Valuation snapshot endpoint (PB/PE and their percentiles).
    pub fundamental_path: String,
    /// Financial statement endpoint (revenue, receivables, inventory, current ratio).
    pub statement_path: String,
    /// Provider token. The command line and `LIXINGER_TOKEN` take precedence.
    pub token: Option<String>,
    pub timeout_secs: u64,
}

/// Thresholds used by the screening rules.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScreenerConfig {
    /// A 10-year PB or PE-TTM percentile above this fails valuation.
    pub percentile_ceiling: f64,
    /// Tolerance for every threshold comparison.
    pub epsilon: f64,
    /// A December current ratio below this fails liquidity.
    pub current_ratio_floor: f64,
    /// Industry names that are excluded outright.
    pub excluded_industries: Vec<String>,
    /// Number of most recent fiscal year-ends the growth rules look at.
    pub year_window: usize,
    /// Fail instead of skipping the growth rules when history is too short.
    pub require_full_history: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` overrides it.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<String>,
    pub file_prefix: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// How the verdict is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// A human-readable table.
    #[default]
    Text,
    /// The verdict as a JSON document.
    Json,
}

// --- Default Implementations ---

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://open.lixinger.com/api".to_string(),
            fundamental_path: "/a/stock/fundamental".to_string(),
            statement_path: "/a/stock/fs/industry".to_string(),
            token: None,
            timeout_secs: 30,
        }
    }
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            percentile_ceiling: 0.5,
            epsilon: 0.00001,
            current_ratio_floor: 1.0,
            excluded_industries: vec!["Banking".to_string(), "银行".to_string()],
            year_window: 4,
            require_full_history: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "white-horse.log".to_string(),
        }
    }
}

impl Config {
    /// Checks that the loaded values are usable before any request is made.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.screener;
        if !(0.0..=1.0).contains(&s.percentile_ceiling) {
            return Err(ConfigError::ValidationError(format!(
                "screener.percentile_ceiling must be within [0, 1], got {}",
                s.percentile_ceiling
            )));
        }
        if s.epsilon.is_nan() || s.epsilon < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "screener.epsilon must not be negative, got {}",
                s.epsilon
            )));
        }
        if s.current_ratio_floor.is_nan() || s.current_ratio_floor <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "screener.current_ratio_floor must be greater than 0, got {}",
                s.current_ratio_floor
            )));
        }
        if s.year_window < 3 {
            return Err(ConfigError::ValidationError(format!(
                "screener.year_window must be at least 3, got {}",
                s.year_window
            )));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "api.base_url must not be empty".to_string(),
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "api.timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.screener.percentile_ceiling, 0.5);
        assert_eq!(config.screener.year_window, 4);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn rejects_ceiling_outside_unit_interval() {
        let mut config = Config::default();
        config.screener.percentile_ceiling = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(msg)) if msg.contains("percentile_ceiling")
        ));
    }

    #[test]
    fn rejects_short_year_window_and_bad_floor() {
        let mut config = Config::default();
        config.screener.year_window = 2;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.screener.current_ratio_floor = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.screener.epsilon = f64::NAN;
        assert!(config.validate().is_err());
    }
}
