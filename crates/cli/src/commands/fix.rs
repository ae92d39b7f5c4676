//! Execute a service template code action.

use crate::commands::common::{self, CommandContext};
use crate::exit_code::ExitCode;
use crate::OutputOptions;
use anyhow::{Context, Result};
use colored::Colorize;
use mqtt_ide::{apply_edit, TemplateKind};
use std::path::{Path, PathBuf};

/// Options for the `fix` command.
#[derive(Debug, Clone, Copy)]
pub struct FixOptions {
    pub line: u32,
    pub column: u32,
    /// Insert the template without the acknowledgment handle
    pub without_caller: bool,
    /// Print the fixed file instead of writing it
    pub dry_run: bool,
}

/// Run the fix command.
///
/// Returns [`ExitCode::DiagnosticsFound`] without touching the file when no
/// fixable diagnostic covers the position.
pub fn run(
    config_path: Option<PathBuf>,
    file: &Path,
    options: FixOptions,
    output: OutputOptions,
) -> Result<ExitCode> {
    let ctx = CommandContext::load(config_path)?;
    let source = common::read_source(file)?;
    let position = common::position(options.line, options.column)?;

    let kind = if options.without_caller {
        TemplateKind::WithoutCaller
    } else {
        TemplateKind::WithCaller
    };
    let Some(action) = ctx
        .analysis
        .code_actions(&source, position)
        .into_iter()
        .find(|action| action.provider_id.template == kind)
    else {
        if output.show_info {
            eprintln!(
                "{}",
                format!(
                    "No fixable diagnostic at {}:{}:{}",
                    file.display(),
                    options.line,
                    options.column
                )
                .yellow()
            );
        }
        return Ok(ExitCode::DiagnosticsFound);
    };

    let edit = ctx
        .analysis
        .execute(&source, &action)
        .with_context(|| format!("Failed to apply '{}'", action.title))?;
    let fixed = apply_edit(source.text(), &edit)?;

    if options.dry_run {
        print!("{fixed}");
        return Ok(ExitCode::Success);
    }

    std::fs::write(file, &fixed).with_context(|| format!("Failed to write {}", file.display()))?;
    tracing::debug!(file = %file.display(), provider = %action.provider_id, "Applied code action");
    if output.show_info {
        println!(
            "{} {} {}",
            "✓".green(),
            action.title,
            format!("({})", file.display()).dimmed()
        );
    }
    Ok(ExitCode::Success)
}
