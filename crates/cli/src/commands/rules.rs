//! List the registered lint rules and their configured severity.

use crate::commands::common::CommandContext;
use crate::exit_code::ExitCode;
use crate::OutputFormat;
use anyhow::Result;
use colored::Colorize;
use mqtt_config::AnalyzerConfig;
use mqtt_types::RuleSeverity;
use std::path::PathBuf;

/// One row of the rule listing.
#[derive(Debug, PartialEq, Eq)]
pub struct RuleRow {
    pub name: &'static str,
    pub code: &'static str,
    pub severity: RuleSeverity,
    pub description: &'static str,
}

/// Rules in reporting order, with severities resolved against `config`.
pub fn rule_rows(config: &AnalyzerConfig) -> Vec<RuleRow> {
    mqtt_linter::service_rules()
        .iter()
        .map(|rule| RuleRow {
            name: rule.name(),
            code: rule.code().as_str(),
            severity: config.rule_severity(rule.name(), rule.default_severity()),
            description: rule.description(),
        })
        .collect()
}

pub fn run(config_path: Option<PathBuf>, format: OutputFormat) -> Result<ExitCode> {
    let ctx = CommandContext::load(config_path)?;
    let rows = rule_rows(ctx.analysis.config());

    match format {
        OutputFormat::Human => {
            for row in &rows {
                let severity = match row.severity {
                    RuleSeverity::Error => "error".red(),
                    RuleSeverity::Warn => "warn".yellow(),
                    RuleSeverity::Off => "off".dimmed(),
                };
                println!(
                    "{:<28} {:<7} {} {}",
                    row.name.bold(),
                    severity,
                    row.description,
                    format!("({})", row.code).dimmed()
                );
            }
        }
        OutputFormat::Json | OutputFormat::Github => {
            let json: Vec<_> = rows
                .iter()
                .map(|row| {
                    serde_json::json!({
                        "name": row.name,
                        "code": row.code,
                        "severity": row.severity,
                        "description": row.description,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(ExitCode::Success)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_rows_follow_registry_order() {
        let rows = rule_rows(&AnalyzerConfig::default());
        let names: Vec<&str> = rows.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            [
                "empty_service",
                "missing_required_method",
                "unknown_remote_method",
                "invalid_method_signature",
                "resource_method_not_allowed",
            ]
        );
        assert_eq!(rows[0].code, "EMPTY_SERVICE");
        assert!(rows.iter().all(|r| !r.description.is_empty()));
    }

    #[test]
    fn test_rule_rows_apply_overrides() {
        let mut config = AnalyzerConfig::default();
        config
            .rules
            .insert("empty_service".to_string(), RuleSeverity::Off);

        let rows = rule_rows(&config);
        assert_eq!(rows[0].severity, RuleSeverity::Off);
        assert_eq!(rows[1].severity, RuleSeverity::Error);
    }
}
