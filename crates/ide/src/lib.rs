//! # mqtt-ide
//!
//! Editor-facing features for MQTT services: validation diagnostics, the code
//! actions offered for them, and execution of those actions into text edits.
//!
//! ## Architecture
//!
//! ```text
//! Host (CLI, editor bridge)
//!     ↓
//! mqtt-ide (this crate) ← code actions, templates, edits
//!     ↓
//! mqtt-linter ← service contract rules
//!     ↓
//! mqtt-syntax ← parsing, line index
//! ```
//!
//! ## Main Types
//!
//! - [`Analysis`] - Shared entry point holding config and templates
//! - [`CodeActionInfo`] - A serializable action with its `location` argument
//! - [`TemplateStore`] - Immutable registry of `onMessage` templates

mod analysis;
mod code_actions;
mod edit;
mod error;
mod executor;
mod templates;

pub use analysis::Analysis;
pub use code_actions::{
    code_actions, code_actions_for_diagnostic, CodeActionArgument, CodeActionInfo, ProviderId,
    LOCATION_KEY,
};
pub use edit::{apply_edit, apply_edits};
pub use error::{ActionError, Result};
pub use executor::execute;
pub use templates::{RenderContext, Template, TemplateKind, TemplateStore};

pub use mqtt_linter::{Diagnostic, DiagnosticCode};
pub use mqtt_types::{DiagnosticSeverity, LineRange, Position, TextEdit};
