use crate::diagnostics::{DiagnosticCode, LintDiagnostic};
use crate::model::ServiceModel;
use crate::traits::{LintRule, ServiceRule};
use mqtt_syntax::ServiceDecl;

/// Trait implementation for `empty_service` rule
pub struct EmptyServiceRuleImpl;

impl LintRule for EmptyServiceRuleImpl {
    fn name(&self) -> &'static str {
        "empty_service"
    }

    fn description(&self) -> &'static str {
        "Flags services with an empty body"
    }

    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::EmptyService
    }
}

impl ServiceRule for EmptyServiceRuleImpl {
    fn check(&self, service: &ServiceDecl<'_>, model: &ServiceModel<'_>) -> Vec<LintDiagnostic> {
        if !service.is_empty() {
            return Vec::new();
        }
        let required: Vec<&str> = model
            .config()
            .contract
            .required
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        let message = if required.is_empty() {
            "Service body is empty".to_string()
        } else {
            format!(
                "Service body is empty; a service attached to '{}:{}' must declare remote function {}",
                model.prefix(),
                model.config().listener,
                quoted_list(&required)
            )
        };
        vec![LintDiagnostic::new(service.span(), message)]
    }
}

pub(super) fn quoted_list(names: &[&str]) -> String {
    names
        .iter()
        .map(|n| format!("'{n}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
