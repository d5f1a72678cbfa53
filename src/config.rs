// config.rs
// Purpose: Layered logger configuration (defaults, TOML file, LOG_* environment)

use crate::errors::{LoggingError, LoggingResult};
use crate::level::Level;
use crate::logger::Logger;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Where serialized events go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogOutput {
    Stdout,
    Stderr,
    File(PathBuf),
}

impl From<String> for LogOutput {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "" | "stdout" => LogOutput::Stdout,
            "stderr" => LogOutput::Stderr,
            _ => LogOutput::File(PathBuf::from(value.trim())),
        }
    }
}

impl From<LogOutput> for String {
    fn from(output: LogOutput) -> Self {
        output.to_string()
    }
}

impl fmt::Display for LogOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogOutput::Stdout => f.write_str("stdout"),
            LogOutput::Stderr => f.write_str("stderr"),
            LogOutput::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_level")]
    pub level: Level,
    #[serde(default = "default_output")]
    pub output: LogOutput,
    #[serde(default)]
    pub timestamps: bool,
}

fn default_level() -> Level {
    Level::Info
}

fn default_output() -> LogOutput {
    LogOutput::Stdout
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_level(),
            output: default_output(),
            timestamps: false,
        }
    }
}

impl LogConfig {
    /// Defaults, then the TOML file at `path` if given, then `LOG_*` variables.
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(LogConfig::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed("LOG_"))
    }

    pub fn load(path: Option<&Path>) -> LoggingResult<Self> {
        Ok(Self::figment(path).extract()?)
    }

    /// Open the configured output and build a logger over it.
    pub fn build(&self) -> LoggingResult<Logger> {
        let sink: Box<dyn Write + Send> = match &self.output {
            LogOutput::Stdout => Box::new(io::stdout()),
            LogOutput::Stderr => Box::new(io::stderr()),
            LogOutput::File(path) => Box::new(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| LoggingError::io(format!("open {}", path.display()), e))?,
            ),
        };

        Ok(Logger::new(self.level, Some(sink)).with_timestamps(self.timestamps))
    }
}
