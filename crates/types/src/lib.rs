//! Foundation types for the MQTT service analyzer.
//!
//! This crate provides the plain records shared across the analyzer stack and
//! exchanged with the host editing surface. Everything here is serializable so
//! diagnostics and code actions can be persisted and replayed by editors.
//!
//! # Type Categories
//!
//! - **Position types**: [`Position`], [`LineRange`], [`OffsetRange`]
//! - **Severity types**: [`DiagnosticSeverity`], [`RuleSeverity`]
//! - **Edit types**: [`TextEdit`]

mod edits;
mod position;
mod severity;

pub use edits::TextEdit;
pub use position::{LineRange, OffsetRange, Position};
pub use severity::{DiagnosticSeverity, RuleSeverity};
