//! Shared setup for CLI commands.

use anyhow::{Context, Result};
use mqtt_config::AnalyzerConfig;
use mqtt_ide::{Analysis, Position};
use mqtt_syntax::SourceFile;
use std::path::{Path, PathBuf};

/// Loaded configuration and the analysis built from it.
pub struct CommandContext {
    pub analysis: Analysis,
}

impl CommandContext {
    /// Load the config from `config_path`, or discover it from the working
    /// directory, falling back to defaults.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => Some(path),
            None => {
                let cwd = std::env::current_dir().context("Failed to get current directory")?;
                mqtt_config::find_config(&cwd)?
            }
        };

        let config = match &config_path {
            Some(path) => mqtt_config::load_config(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => AnalyzerConfig::default(),
        };
        mqtt_linter::check_rule_names(&config).context("Invalid rules section")?;

        tracing::debug!(config = ?config_path, module = %config.module, "Loaded configuration");
        Ok(Self {
            analysis: Analysis::new(config),
        })
    }
}

/// Read and parse a source file, named by its path as given.
pub fn read_source(path: &Path) -> Result<SourceFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path.to_string_lossy();
    SourceFile::parse(&name, &text).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Convert 1-based command line coordinates to a [`Position`].
pub fn position(line: u32, column: u32) -> Result<Position> {
    anyhow::ensure!(line > 0 && column > 0, "--line and --column are 1-based");
    Ok(Position::new(line - 1, column - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_is_one_based() {
        assert_eq!(position(14, 1).unwrap(), Position::new(13, 0));
        assert!(position(0, 1).is_err());
        assert!(position(1, 0).is_err());
    }

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source(Path::new("/nonexistent/main.bal")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
        assert!(err.chain().any(|c| c.is::<std::io::Error>()));
    }

    #[test]
    fn test_load_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".mqtt-analyzer.yaml");
        std::fs::write(&path, "indent: 2\nrules:\n  unknown_remote_method: warn\n").unwrap();

        let ctx = CommandContext::load(Some(path)).unwrap();
        assert_eq!(ctx.analysis.config().indent, 2);
    }

    #[test]
    fn test_load_rejects_unknown_rule() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".mqtt-analyzer.yaml");
        std::fs::write(&path, "rules:\n  empty_servce: off\n").unwrap();

        let err = CommandContext::load(Some(path)).err().unwrap();
        assert!(format!("{err:#}").contains("did you mean 'empty_service'?"));
    }
}
