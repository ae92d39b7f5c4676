//! Service contract validator.
//!
//! Finds the services of a file that are attached to the configured MQTT
//! listener and checks them against the listener contract. Each check is a
//! [`ServiceRule`] in a static registry; severities come from the rule
//! defaults or the `rules` section of the analyzer config.

mod diagnostics;
mod linter;
mod model;
mod registry;
mod rules;
mod traits;

pub use diagnostics::{Diagnostic, DiagnosticCode, LintDiagnostic};
pub use linter::validate;
pub use model::ServiceModel;
pub use registry::{all_rule_names, check_rule_names, service_rules};
pub use traits::{LintRule, ServiceRule};
