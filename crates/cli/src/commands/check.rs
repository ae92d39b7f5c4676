//! Validate MQTT services in one or more files.
//!
//! The `check` command runs every service rule over the given files and
//! reports the diagnostics with a unified output and exit code. This is the
//! recommended command for CI pipelines.

use crate::commands::common::CommandContext;
use crate::exit_code::ExitCode;
use crate::{OutputFormat, OutputOptions};
use anyhow::{Context, Result};
use colored::Colorize;
use mqtt_ide::{Diagnostic, DiagnosticSeverity, Position};
use mqtt_syntax::{LineIndex, ParseError, SourceFile};
use std::path::{Path, PathBuf};

/// Outcome of checking a single file.
struct FileReport {
    path: String,
    diagnostics: Vec<Diagnostic>,
    parse_error: Option<(Position, ParseError)>,
}

impl FileReport {
    fn count(&self, severity: DiagnosticSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

/// Run the check command.
///
/// Returns [`ExitCode::ParseError`] if any file failed to parse,
/// [`ExitCode::DiagnosticsFound`] if any error-severity diagnostic was
/// reported, and [`ExitCode::Success`] otherwise.
pub fn run(
    config_path: Option<PathBuf>,
    patterns: &[String],
    format: OutputFormat,
    output: OutputOptions,
) -> Result<ExitCode> {
    let start_time = std::time::Instant::now();
    let ctx = CommandContext::load(config_path)?;

    let files = expand_patterns(patterns)?;
    if files.is_empty() {
        anyhow::bail!("No files matched {}", patterns.join(", "));
    }

    let reports = files
        .iter()
        .map(|path| check_file(&ctx, path))
        .collect::<Result<Vec<_>>>()?;

    let total_errors: usize = reports
        .iter()
        .map(|r| r.count(DiagnosticSeverity::Error))
        .sum();
    let total_warnings: usize = reports
        .iter()
        .map(|r| r.count(DiagnosticSeverity::Warning))
        .sum();
    let parse_errors = reports.iter().filter(|r| r.parse_error.is_some()).count();

    match format {
        OutputFormat::Human => {
            print_human(&reports);
            if output.show_info {
                print_summary(
                    files.len(),
                    total_errors,
                    total_warnings,
                    parse_errors,
                    start_time.elapsed(),
                );
            }
        }
        OutputFormat::Json => {
            let json = to_json(&reports, total_errors, total_warnings, parse_errors);
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Github => print_github(&reports),
    }

    Ok(if parse_errors > 0 {
        ExitCode::ParseError
    } else if total_errors > 0 {
        ExitCode::DiagnosticsFound
    } else {
        ExitCode::Success
    })
}

/// Expand each argument as a literal path if it exists, otherwise as a glob.
///
/// Results are sorted and deduplicated so output order does not depend on
/// argument order.
fn expand_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        let matches =
            glob::glob(pattern).with_context(|| format!("Invalid glob pattern '{pattern}'"))?;
        for entry in matches {
            let entry = entry.context("Failed to read glob match")?;
            if entry.is_file() {
                files.push(entry);
            }
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

#[tracing::instrument(skip(ctx))]
fn check_file(ctx: &CommandContext, path: &Path) -> Result<FileReport> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path.display().to_string();

    match SourceFile::parse(&name, &text) {
        Ok(file) => Ok(FileReport {
            diagnostics: ctx.analysis.diagnostics(&file),
            path: name,
            parse_error: None,
        }),
        Err(err) => {
            tracing::debug!(error = %err, "Parse failed");
            let index = LineIndex::new(text.as_str());
            let offset = err.offset().min(text.len());
            let position = if text.is_char_boundary(offset) {
                index.position(offset)
            } else {
                Position::default()
            };
            Ok(FileReport {
                path: name,
                diagnostics: Vec::new(),
                parse_error: Some((position, err)),
            })
        }
    }
}

fn print_human(reports: &[FileReport]) {
    for report in reports {
        if let Some((position, err)) = &report.parse_error {
            println!(
                "\n{}:{}:{}: {} {}",
                report.path,
                position.line + 1,
                position.character + 1,
                "parse error:".red().bold(),
                err.to_string().red()
            );
        }
        for diag in &report.diagnostics {
            let (severity_styled, message_styled) = match diag.severity {
                DiagnosticSeverity::Error => ("error:".red().bold(), diag.message.red()),
                DiagnosticSeverity::Warning => {
                    ("warning:".yellow().bold(), diag.message.yellow())
                }
            };
            println!(
                "\n{}:{}:{}: {} {}",
                report.path,
                diag.range.start.line + 1,
                diag.range.start.character + 1,
                severity_styled,
                message_styled
            );
            println!("  {}: {}", "code".dimmed(), diag.code.as_str().dimmed());
        }
    }
}

fn print_summary(
    total_files: usize,
    total_errors: usize,
    total_warnings: usize,
    parse_errors: usize,
    elapsed: std::time::Duration,
) {
    println!();
    if total_errors == 0 && total_warnings == 0 && parse_errors == 0 {
        println!("{}", "✓ All services passed!".green().bold());
    } else if total_errors == 0 && parse_errors == 0 {
        println!(
            "{}",
            format!("✓ Services passed with {total_warnings} warning(s)")
                .yellow()
                .bold()
        );
    } else {
        let mut parts = Vec::new();
        if parse_errors > 0 {
            parts.push(format!("{parse_errors} unparsable file(s)"));
        }
        if total_errors > 0 {
            parts.push(format!("{total_errors} error(s)"));
        }
        if total_warnings > 0 {
            parts.push(format!("{total_warnings} warning(s)"));
        }
        println!("{}", format!("✗ Found {}", parts.join(", ")).red());
    }
    println!(
        "  {} {total_files} file(s) in {:.2}s",
        "⏱".dimmed(),
        elapsed.as_secs_f64()
    );
}

fn to_json(
    reports: &[FileReport],
    total_errors: usize,
    total_warnings: usize,
    parse_errors: usize,
) -> serde_json::Value {
    let files: Vec<serde_json::Value> = reports
        .iter()
        .filter(|r| r.parse_error.is_some() || !r.diagnostics.is_empty())
        .map(|report| {
            let mut obj = serde_json::json!({
                "file": report.path,
                "diagnostics": report.diagnostics,
            });
            if let Some((position, err)) = &report.parse_error {
                obj["parseError"] = serde_json::json!({
                    "message": err.to_string(),
                    "position": position,
                });
            }
            obj
        })
        .collect();

    serde_json::json!({
        "success": total_errors == 0 && parse_errors == 0,
        "files": files,
        "stats": {
            "total_files": reports.len(),
            "total_errors": total_errors,
            "total_warnings": total_warnings,
            "parse_errors": parse_errors,
        }
    })
}

/// GitHub Actions workflow commands, one annotation per diagnostic.
fn print_github(reports: &[FileReport]) {
    for report in reports {
        if let Some((position, err)) = &report.parse_error {
            println!(
                "::error file={},line={},col={},title=PARSE_ERROR::{}",
                report.path,
                position.line + 1,
                position.character + 1,
                escape_github(&err.to_string())
            );
        }
        for diag in &report.diagnostics {
            let level = match diag.severity {
                DiagnosticSeverity::Error => "error",
                DiagnosticSeverity::Warning => "warning",
            };
            println!(
                "::{level} file={},line={},col={},endLine={},endColumn={},title={}::{}",
                report.path,
                diag.range.start.line + 1,
                diag.range.start.character + 1,
                diag.range.end.line + 1,
                diag.range.end.character + 1,
                diag.code,
                escape_github(&diag.message)
            );
        }
    }
}

fn escape_github(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
