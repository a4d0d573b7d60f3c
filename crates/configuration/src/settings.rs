use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional in the file; missing values fall back to the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub gdp: GdpSettings,
    pub charts: ChartSettings,
    pub logging: LoggingSettings,
}

/// Settings for the GDP tracker.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GdpSettings {
    /// Where the named GDP series are saved and loaded from.
    pub data_file: PathBuf,
}

impl Default for GdpSettings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("gdp_data.json"),
        }
    }
}

/// Size of the text canvas that charts are drawn on, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub width: u16,
    pub height: u16,
}

impl ChartSettings {
    pub const MIN_WIDTH: u16 = 20;
    pub const MIN_HEIGHT: u16 = 8;
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self { width: 80, height: 20 }
    }
}

/// Where log files go and how verbose they are.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub directory: PathBuf,
    pub file_prefix: String,
    /// Used when `RUST_LOG` is not set.
    pub level: LogLevel,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
            file_prefix: "econ-toolkit.log".to_string(),
            level: LogLevel::Info,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// The directive string understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_directive())
    }
}
