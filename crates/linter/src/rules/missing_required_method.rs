use super::empty_service::quoted_list;
use crate::diagnostics::{DiagnosticCode, LintDiagnostic};
use crate::model::ServiceModel;
use crate::traits::{LintRule, ServiceRule};
use mqtt_syntax::ServiceDecl;
use mqtt_types::OffsetRange;

/// Trait implementation for `missing_required_method` rule
pub struct MissingRequiredMethodRuleImpl;

impl LintRule for MissingRequiredMethodRuleImpl {
    fn name(&self) -> &'static str {
        "missing_required_method"
    }

    fn description(&self) -> &'static str {
        "Requires every remote method of the listener contract to be declared"
    }

    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::MissingRequiredMethod
    }
}

impl ServiceRule for MissingRequiredMethodRuleImpl {
    fn check(&self, service: &ServiceDecl<'_>, model: &ServiceModel<'_>) -> Vec<LintDiagnostic> {
        // Empty bodies are reported by `empty_service`
        let Some(last) = service.last_member() else {
            return Vec::new();
        };

        let missing: Vec<&str> = model
            .config()
            .contract
            .required
            .iter()
            .map(|m| m.name.as_str())
            .filter(|name| !service.remote_methods().any(|m| m.name() == Some(*name)))
            .collect();
        if missing.is_empty() {
            return Vec::new();
        }

        let noun = if missing.len() == 1 { "function" } else { "functions" };
        let message = format!(
            "Service is missing required remote {noun} {}",
            quoted_list(&missing)
        );
        let span = OffsetRange::new(service.span().start, last.span().end);
        vec![LintDiagnostic::new(span, message)]
    }
}
