use crate::diagnostics::{DiagnosticCode, LintDiagnostic};
use crate::model::ServiceModel;
use crate::traits::{LintRule, ServiceRule};
use mqtt_syntax::{ServiceDecl, SyntaxKind};

/// Trait implementation for `resource_method_not_allowed` rule
pub struct ResourceMethodNotAllowedRuleImpl;

impl LintRule for ResourceMethodNotAllowedRuleImpl {
    fn name(&self) -> &'static str {
        "resource_method_not_allowed"
    }

    fn description(&self) -> &'static str {
        "Disallows resource functions in services attached to the listener"
    }

    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::ResourceMethodNotAllowed
    }
}

impl ServiceRule for ResourceMethodNotAllowedRuleImpl {
    fn check(&self, service: &ServiceDecl<'_>, model: &ServiceModel<'_>) -> Vec<LintDiagnostic> {
        service
            .members()
            .filter(|m| m.kind() == SyntaxKind::ResourceMethod)
            .map(|m| {
                LintDiagnostic::new(
                    m.span(),
                    format!(
                        "Resource functions are not allowed in a service attached to '{}:{}'",
                        model.prefix(),
                        model.config().listener
                    ),
                )
            })
            .collect()
    }
}
