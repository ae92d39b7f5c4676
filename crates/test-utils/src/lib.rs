//! # MQTT Analyzer Test Utilities
//!
//! Shared test infrastructure for the analyzer crates.
//!
//! ## Modules
//!
//! - [`fixtures`] - Golden source files and expected code action results
//! - [`cursor`] - Cursor position extraction for code action tests
//! - [`assertions`] - Diagnostic formatting for snapshot tests

// Test utilities are less strict than production code
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::needless_raw_string_hashes)]

pub mod assertions;
pub mod cursor;
pub mod fixtures;

pub use assertions::format_diagnostics;
pub use cursor::extract_cursor;

use mqtt_syntax::SourceFile;

/// File name used for fixtures parsed with [`parse`].
pub const FIXTURE_FILE: &str = "main.bal";

/// Parse `text` as [`FIXTURE_FILE`].
///
/// # Panics
///
/// Panics if the text does not parse.
pub fn parse(text: &str) -> SourceFile {
    SourceFile::parse(FIXTURE_FILE, text)
        .unwrap_or_else(|e| panic!("fixture failed to parse: {e}"))
}

// Re-export insta for snapshot testing
pub use insta;
