use crate::{AnalyzerConfig, ConfigError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names to search for, in order of preference
pub const CONFIG_FILES: &[&str] = &[
    ".mqtt-analyzer.yaml",
    ".mqtt-analyzer.yml",
    ".mqtt-analyzer.json",
    ".mqtt-analyzer.toml",
];

/// Find a config file by walking up the directory tree from `start_dir`.
/// Returns the path to the config file if found.
#[tracing::instrument(fields(start = %start_dir.display()))]
pub fn find_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    let mut current_dir = start_dir.to_path_buf();
    let mut checked_dirs = 0;

    loop {
        tracing::trace!(dir = %current_dir.display(), "Checking directory for config files");
        for file_name in CONFIG_FILES {
            let config_path = current_dir.join(file_name);
            if config_path.is_file() {
                tracing::info!(path = %config_path.display(), checked_dirs, "Found config file");
                return Ok(Some(config_path));
            }
        }

        checked_dirs += 1;
        if !current_dir.pop() {
            tracing::debug!(checked_dirs, "No config file found");
            break;
        }
    }

    Ok(None)
}

/// Load a config from the specified path.
/// The format is detected from the file extension.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<AnalyzerConfig> {
    tracing::debug!("Reading config file");
    let contents = fs::read_to_string(path)?;
    let config = load_config_from_str(&contents, path)?;
    tracing::info!(
        module = %config.module,
        overrides = config.rules.len(),
        "Config loaded successfully"
    );
    Ok(config)
}

/// Load a config from a string.
/// The path is used for error messages and format detection.
#[tracing::instrument(skip(contents), fields(path = %path.display(), size = contents.len()))]
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<AnalyzerConfig> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    tracing::debug!(extension, "Detecting config format");

    let config = match extension {
        "yml" | "yaml" => parse_yaml(contents, path)?,
        "json" => parse_json(contents, path)?,
        "toml" => parse_toml(contents, path)?,
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    config.validate().map_err(|message| ConfigError::Invalid {
        path: path.to_path_buf(),
        message,
    })?;
    tracing::debug!("Config validation passed");

    Ok(config)
}

fn parse_yaml(contents: &str, path: &Path) -> Result<AnalyzerConfig> {
    // An empty YAML document means "all defaults"
    if contents.trim().is_empty() {
        return Ok(AnalyzerConfig::default());
    }
    serde_saphyr::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}

fn parse_json(contents: &str, path: &Path) -> Result<AnalyzerConfig> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}

fn parse_toml(contents: &str, path: &Path) -> Result<AnalyzerConfig> {
    toml::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("TOML parse error: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mqtt_types::RuleSeverity;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn write_config(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(suffix).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_yaml() {
        let yaml = r"
module: ballerina/mqtt
indent: 2
contract:
  required:
    - name: onMessage
      params:
        - type: Message
        - type: Caller
          optional: true
rules:
  unknown_remote_method: warn
";
        let file = write_config(".yaml", yaml);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.indent, 2);
        assert_eq!(config.contract.required.len(), 1);
        assert!(config.contract.optional.is_empty());
        assert_eq!(
            config.rules.get("unknown_remote_method"),
            Some(&RuleSeverity::Warn)
        );
    }

    #[test]
    fn test_load_contract_with_required_on_error() {
        let json = r#"{"contract": {"required": [
            {"name": "onMessage", "params": [{"type": "Message"}, {"type": "Caller", "optional": true}]},
            {"name": "onError", "params": [{"type": "Error"}]}
        ]}}"#;
        let config = load_config_from_str(json, Path::new("c.json")).unwrap();

        let required: Vec<&str> = config
            .contract
            .required
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(required, ["onMessage", "onError"]);
        assert!(config.contract.optional.is_empty());
    }

    #[test]
    fn test_load_json() {
        let json = r#"{"listener": "Listener", "rules": {"empty_service": "off"}}"#;
        let file = write_config(".json", json);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.rules.get("empty_service"), Some(&RuleSeverity::Off));
        assert_eq!(config.contract, crate::ListenerContract::default());
    }

    #[test]
    fn test_load_toml() {
        let toml = r#"
module = "acme/mqtt"
indent = 3

[rules]
invalid_method_signature = "warn"
"#;
        let file = write_config(".toml", toml);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.module, "acme/mqtt");
        assert_eq!(config.indent, 3);
        assert_eq!(
            config.rules.get("invalid_method_signature"),
            Some(&RuleSeverity::Warn)
        );
    }

    #[test]
    fn test_formats_agree() {
        let yaml = load_config_from_str(
            "rules:\n  empty_service: warn\n",
            Path::new(".mqtt-analyzer.yaml"),
        )
        .unwrap();
        let json = load_config_from_str(
            r#"{"rules": {"empty_service": "warn"}}"#,
            Path::new(".mqtt-analyzer.json"),
        )
        .unwrap();
        let toml = load_config_from_str(
            "[rules]\nempty_service = \"warn\"\n",
            Path::new(".mqtt-analyzer.toml"),
        )
        .unwrap();

        assert_eq!(yaml, json);
        assert_eq!(json, toml);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = load_config_from_str("", Path::new(".mqtt-analyzer.yml")).unwrap();
        assert_eq!(config, AnalyzerConfig::default());
    }

    #[test]
    fn test_unsupported_format() {
        let result = load_config_from_str("module: x/y", Path::new("config.ini"));
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_invalid_syntax() {
        let result = load_config_from_str("{not json", Path::new("config.json"));
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = load_config_from_str(r#"{"modul": "x/y"}"#, Path::new("config.json"));
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_invalid_severity_rejected() {
        let result = load_config_from_str(
            r#"{"rules": {"empty_service": "fatal"}}"#,
            Path::new("config.json"),
        );
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_validation_error_mentions_path() {
        let err = load_config_from_str(r#"{"indent": 12}"#, Path::new("cfg.json")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("cfg.json"));
        assert!(message.contains("indent"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = load_config(&dir.path().join(".mqtt-analyzer.yaml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_find_config_in_current_dir() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let config_path = dir.path().join(".mqtt-analyzer.yaml");
        fs::write(&config_path, "indent: 4\n")?;

        assert_eq!(find_config(dir.path())?, Some(config_path));
        Ok(())
    }

    #[test]
    fn test_find_config_in_parent_dir() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let config_path = dir.path().join(".mqtt-analyzer.json");
        fs::write(&config_path, "{}")?;
        let nested = dir.path().join("src").join("services");
        fs::create_dir_all(&nested)?;

        assert_eq!(find_config(&nested)?, Some(config_path));
        Ok(())
    }

    #[test]
    fn test_find_config_prefers_yaml() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join(".mqtt-analyzer.toml"), "")?;
        fs::write(dir.path().join(".mqtt-analyzer.yaml"), "")?;

        let found = find_config(dir.path())?.unwrap();
        assert!(found.ends_with(".mqtt-analyzer.yaml"));
        Ok(())
    }
}
