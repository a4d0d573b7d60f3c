use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{ChartSettings, GdpSettings, LogLevel, LoggingSettings, Settings};

/// The file looked up in the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix of the environment variables that override file values,
/// e.g. `ECON__CHARTS__WIDTH=100`.
pub const ENV_PREFIX: &str = "ECON";

/// Loads the application configuration.
///
/// Sources, later ones winning: built-in defaults, then `config.toml` in the working
/// directory (optional) or the given `path` (required), then `ECON__*` environment variables.
pub fn load_config(path: Option<&Path>) -> Result<Settings, ConfigError> {
    load_with_env(path, None)
}

/// `env` replaces the process environment when given.
fn load_with_env(
    path: Option<&Path>,
    env: Option<config::Map<String, String>>,
) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder().add_source(file).add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .source(env),
    );

    let settings = builder.build()?.try_deserialize::<Settings>()?;
    validate(&settings)?;

    tracing::debug!(?settings, "Configuration loaded.");
    Ok(settings)
}

/// Rejects values that the rest of the application cannot work with.
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    let charts = &settings.charts;
    if charts.width < ChartSettings::MIN_WIDTH {
        return Err(ConfigError::ValidationError(format!(
            "charts.width must be at least {}, got {}",
            ChartSettings::MIN_WIDTH,
            charts.width
        )));
    }
    if charts.height < ChartSettings::MIN_HEIGHT {
        return Err(ConfigError::ValidationError(format!(
            "charts.height must be at least {}, got {}",
            ChartSettings::MIN_HEIGHT,
            charts.height
        )));
    }
    if settings.logging.file_prefix.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "logging.file_prefix must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn toml_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_apply_to_missing_sections() {
        let file = toml_file("[charts]\nwidth = 100\n");
        let settings = load_config(Some(file.path())).unwrap();

        assert_eq!(settings.charts.width, 100);
        assert_eq!(settings.charts.height, 20);
        assert_eq!(settings.gdp.data_file, PathBuf::from("gdp_data.json"));
        assert_eq!(settings.logging.level, LogLevel::Info);
    }

    #[test]
    fn reads_every_section() {
        let file = toml_file(
            r#"
[gdp]
data_file = "data/series.json"

[charts]
width = 60
height = 12

[logging]
directory = "/tmp/econ-logs"
file_prefix = "econ.log"
level = "debug"
"#,
        );
        let settings = load_config(Some(file.path())).unwrap();

        assert_eq!(settings.gdp.data_file, PathBuf::from("data/series.json"));
        assert_eq!(settings.charts, ChartSettings { width: 60, height: 12 });
        assert_eq!(settings.logging.directory, PathBuf::from("/tmp/econ-logs"));
        assert_eq!(settings.logging.file_prefix, "econ.log");
        assert_eq!(settings.logging.level, LogLevel::Debug);
    }

    fn env(vars: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
    }

    #[test]
    fn environment_overrides_file_values() {
        let file = toml_file("[charts]\nwidth = 60\nheight = 12\n\n[logging]\nlevel = \"warn\"\n");
        let settings = load_with_env(
            Some(file.path()),
            env(&[
                ("ECON__CHARTS__WIDTH", "100"),
                ("ECON__LOGGING__LEVEL", "trace"),
                ("OTHER__CHARTS__HEIGHT", "50"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.charts, ChartSettings { width: 100, height: 12 });
        assert_eq!(settings.logging.level, LogLevel::Trace);
    }

    #[test]
    fn environment_values_are_validated() {
        let file = toml_file("[charts]\nwidth = 60\n");
        let result = load_with_env(Some(file.path()), env(&[("ECON__CHARTS__HEIGHT", "3")]));
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn rejects_tiny_charts() {
        let file = toml_file("[charts]\nwidth = 5\n");
        assert!(matches!(
            load_config(Some(file.path())),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn explicit_path_must_exist() {
        let missing = PathBuf::from("/definitely/not/here/econ.toml");
        assert!(matches!(load_config(Some(missing.as_path())), Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn log_level_directives() {
        assert_eq!(LogLevel::Warn.as_directive(), "warn");
        assert_eq!(LogLevel::default().to_string(), "info");
    }
}
