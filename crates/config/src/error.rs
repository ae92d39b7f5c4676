use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config in {path}: {message}")]
    Invalid { path: PathBuf, message: String },

    #[error("unsupported config format: {0} (expected .yaml, .yml, .json or .toml)")]
    UnsupportedFormat(PathBuf),

    #[error("unknown rule '{rule}'{}", did_you_mean(.suggestion.as_deref()))]
    UnknownRule {
        rule: String,
        suggestion: Option<String>,
    },
}

fn did_you_mean(suggestion: Option<&str>) -> String {
    suggestion.map_or_else(String::new, |s| format!(", did you mean '{s}'?"))
}
