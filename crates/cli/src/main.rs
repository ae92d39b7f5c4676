mod commands;
mod exit_code;

use clap::{Parser, Subcommand};
use colored::Colorize;
use exit_code::ExitCode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mqtt-analyzer")]
#[command(about = "Validate MQTT services and insert service templates", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to analyzer config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Force colored output even when not a TTY
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, global = true, conflicts_with = "color")]
    no_color: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output verbosity options
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    /// Whether to show informational output (success messages, summaries)
    pub show_info: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the MQTT services in the given files
    ///
    /// Arguments are file paths or glob patterns. Exits with 1 if any
    /// error-severity diagnostic is found. Recommended for CI pipelines.
    Check {
        /// Files or glob patterns (e.g. "src/**/*.bal")
        #[arg(required = true)]
        paths: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// List the code actions available at a position
    Actions {
        file: PathBuf,

        /// Line number (1-based)
        #[arg(short, long)]
        line: u32,

        /// Column number (1-based)
        #[arg(long, default_value_t = 1)]
        column: u32,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Insert an onMessage template into the service at a position
    Fix {
        file: PathBuf,

        /// Line number (1-based)
        #[arg(short, long)]
        line: u32,

        /// Column number (1-based)
        #[arg(long, default_value_t = 1)]
        column: u32,

        /// Generate onMessage without the caller parameter
        #[arg(long)]
        without_caller: bool,

        /// Print the fixed file instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// List the lint rules with their configured severity
    Rules {
        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON output for tooling
    Json,
    /// GitHub Actions workflow commands for PR annotations
    Github,
}

fn main() {
    let cli = Cli::parse();

    init_tracing();
    configure_colors(cli.color, cli.no_color);

    let output_opts = OutputOptions {
        show_info: !cli.quiet,
    };

    let result = match cli.command {
        Commands::Check { paths, format } => {
            commands::check::run(cli.config, &paths, format, output_opts)
        }
        Commands::Actions {
            file,
            line,
            column,
            format,
        } => commands::actions::run(cli.config, &file, line, column, format),
        Commands::Fix {
            file,
            line,
            column,
            without_caller,
            dry_run,
        } => commands::fix::run(
            cli.config,
            &file,
            commands::fix::FixOptions {
                line,
                column,
                without_caller,
                dry_run,
            },
            output_opts,
        ),
        Commands::Rules { format } => commands::rules::run(cli.config, format),
    };

    let code = result.unwrap_or_else(|err| {
        let code = ExitCode::for_error(&err);
        eprintln!("{} {err:#}", format!("✗ {code}:").red());
        code
    });
    code.exit()
}

/// Initialize tracing; silent unless `RUST_LOG` is set.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Configure colored output based on flags and environment variables.
///
/// Priority order (highest to lowest):
/// 1. `--color` flag (force colors on)
/// 2. `--no-color` flag (force colors off)
/// 3. `NO_COLOR` environment variable (if set to any value, disable colors)
/// 4. `CLICOLOR_FORCE` environment variable (if set to non-zero, force colors)
/// 5. `CLICOLOR` environment variable (if set to "0", disable colors)
/// 6. Default: colors enabled if stdout is a TTY (handled by `colored` crate)
///
/// See: <https://no-color.org/> and <https://bixense.com/clicolors/>
fn configure_colors(force_color: bool, no_color: bool) {
    use colored::control;

    if force_color {
        control::set_override(true);
    } else if no_color {
        control::set_override(false);
    } else if std::env::var_os("NO_COLOR").is_some() {
        control::set_override(false);
    } else if let Ok(val) = std::env::var("CLICOLOR_FORCE") {
        if !val.is_empty() && val != "0" {
            control::set_override(true);
        }
    } else if let Ok(val) = std::env::var("CLICOLOR") {
        if val == "0" {
            control::set_override(false);
        }
    }
}


#[cfg(test)]
mod color_tests {
    use super::configure_colors;
    use colored::control::{self, SHOULD_COLORIZE};
    use std::sync::Mutex;

    // Serializes tests that modify global state (env vars and color override)
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    fn with_clean_env<F: FnOnce()>(f: F) {
        let _lock = TEST_MUTEX.lock().unwrap();

        let saved: Vec<_> = ["NO_COLOR", "CLICOLOR", "CLICOLOR_FORCE"]
            .into_iter()
            .map(|key| (key, std::env::var_os(key)))
            .collect();
        for (key, _) in &saved {
            std::env::remove_var(key);
        }
        control::unset_override();

        f();

        control::unset_override();
        for (key, value) in saved {
            if let Some(value) = value {
                std::env::set_var(key, value);
            }
        }
    }

    #[test]
    fn color_flag_forces_colors_on() {
        with_clean_env(|| {
            configure_colors(true, false);
            assert!(SHOULD_COLORIZE.should_colorize());
        });
    }

    #[test]
    fn no_color_flag_forces_colors_off() {
        with_clean_env(|| {
            configure_colors(false, true);
            assert!(!SHOULD_COLORIZE.should_colorize());
        });
    }

    #[test]
    fn color_flag_overrides_no_color_env() {
        with_clean_env(|| {
            std::env::set_var("NO_COLOR", "1");
            configure_colors(true, false);
            assert!(SHOULD_COLORIZE.should_colorize());
        });
    }

    #[test]
    fn no_color_env_disables_colors() {
        with_clean_env(|| {
            std::env::set_var("NO_COLOR", "");
            configure_colors(false, false);
            assert!(!SHOULD_COLORIZE.should_colorize());
        });
    }

    #[test]
    fn clicolor_force_enables_colors() {
        with_clean_env(|| {
            std::env::set_var("CLICOLOR_FORCE", "1");
            configure_colors(false, false);
            assert!(SHOULD_COLORIZE.should_colorize());
        });
    }

    #[test]
    fn clicolor_zero_disables_colors() {
        with_clean_env(|| {
            std::env::set_var("CLICOLOR", "0");
            configure_colors(false, false);
            assert!(!SHOULD_COLORIZE.should_colorize());
        });
    }
}
