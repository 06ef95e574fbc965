use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{ApiConfig, Config, LoggingConfig, OutputConfig, OutputFormat, ScreenerConfig};

/// Name (without extension) of the config file picked up from the working directory.
pub const DEFAULT_CONFIG_NAME: &str = "white-horse";

/// Prefix for environment overrides, e.g. `WHITE_HORSE__SCREENER__PERCENTILE_CEILING=0.4`.
pub const ENV_PREFIX: &str = "WHITE_HORSE";

/// Loads the application configuration.
///
/// Sources are layered in this order, later ones winning:
/// 1. built-in defaults,
/// 2. the TOML file at `path` (required), or `white-horse.toml` in the working
///    directory when no path is given (optional),
/// 3. `WHITE_HORSE__*` environment variables.
///
/// The result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file_source = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file_source)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("screener.excluded_industries"),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn explicit_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[api]
token = "file-token"

[screener]
percentile_ceiling = 0.4
excluded_industries = ["银行", "证券"]

[output]
format = "json"
"#
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.api.token.as_deref(), Some("file-token"));
        assert_eq!(config.screener.percentile_ceiling, 0.4);
        assert_eq!(config.screener.excluded_industries, vec!["银行", "证券"]);
        assert_eq!(config.output.format, OutputFormat::Json);
        // Untouched sections keep their defaults.
        assert_eq!(config.screener.current_ratio_floor, 1.0);
        assert_eq!(config.api.base_url, "https://open.lixinger.com/api");
    }

    #[test]
    fn invalid_values_in_file_are_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[screener]\nyear_window = 1").unwrap();

        assert!(matches!(
            load_config(Some(file.path())),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn empty_file_yields_the_default_config() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();

        let config: crate::Config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.screener.year_window, Config::default().screener.year_window);
        assert_eq!(config.screener.excluded_industries, vec!["Banking", "银行"]);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = load_config(Some(Path::new("/definitely/not/here/white-horse.toml")));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
