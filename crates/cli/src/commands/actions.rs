//! List the code actions available at a position.

use crate::commands::common::{self, CommandContext};
use crate::exit_code::ExitCode;
use crate::OutputFormat;
use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

pub fn run(
    config_path: Option<PathBuf>,
    file: &Path,
    line: u32,
    column: u32,
    format: OutputFormat,
) -> Result<ExitCode> {
    let ctx = CommandContext::load(config_path)?;
    let source = common::read_source(file)?;
    let position = common::position(line, column)?;

    let actions = ctx.analysis.code_actions(&source, position);

    match format {
        OutputFormat::Human => {
            if actions.is_empty() {
                println!("{}", "No code actions at this position".dimmed());
            }
            for (i, action) in actions.iter().enumerate() {
                println!(
                    "{} {} {}",
                    format!("[{}]", i + 1).cyan(),
                    action.title,
                    format!("({})", action.provider_id).dimmed()
                );
            }
        }
        OutputFormat::Json | OutputFormat::Github => {
            println!("{}", serde_json::to_string_pretty(&actions)?);
        }
    }

    Ok(ExitCode::Success)
}
