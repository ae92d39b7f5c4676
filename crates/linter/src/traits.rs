use crate::diagnostics::{DiagnosticCode, LintDiagnostic};
use crate::model::ServiceModel;
use mqtt_syntax::ServiceDecl;
use mqtt_types::RuleSeverity;

/// Base trait for all lint rules
pub trait LintRule: Send + Sync {
    /// Unique identifier for this rule (e.g., `"empty_service"`), used in config
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Diagnostic code attached to every finding of this rule
    fn code(&self) -> DiagnosticCode;

    /// Default severity (can be overridden by config)
    fn default_severity(&self) -> RuleSeverity {
        RuleSeverity::Error
    }
}

/// Lint rule that checks one service bound to the recognized listener.
pub trait ServiceRule: LintRule {
    fn check(&self, service: &ServiceDecl<'_>, model: &ServiceModel<'_>) -> Vec<LintDiagnostic>;
}
