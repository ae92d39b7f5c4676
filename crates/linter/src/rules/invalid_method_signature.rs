use crate::diagnostics::{DiagnosticCode, LintDiagnostic};
use crate::model::ServiceModel;
use crate::traits::{LintRule, ServiceRule};
use mqtt_config::MethodContract;
use mqtt_syntax::{Param, ServiceDecl};

/// Trait implementation for `invalid_method_signature` rule
pub struct InvalidMethodSignatureRuleImpl;

impl LintRule for InvalidMethodSignatureRuleImpl {
    fn name(&self) -> &'static str {
        "invalid_method_signature"
    }

    fn description(&self) -> &'static str {
        "Checks parameter count and types of contract remote methods"
    }

    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::InvalidMethodSignature
    }
}

impl InvalidMethodSignatureRuleImpl {
    fn param_matches(param: &Param, expected: &str, prefix: &str) -> bool {
        param.type_name() == expected && param.type_prefix() == Some(prefix)
    }

    /// Describe the first mismatch between `params` and `contract`, if any.
    fn mismatch(params: &[Param], contract: &MethodContract, prefix: &str) -> Option<String> {
        let count = params.len();
        if count < contract.min_arity() || count > contract.max_arity() {
            let expected = if contract.min_arity() == contract.max_arity() {
                contract.min_arity().to_string()
            } else {
                format!("{} to {}", contract.min_arity(), contract.max_arity())
            };
            return Some(format!("expected {expected} parameters, found {count}"));
        }

        params
            .iter()
            .zip(&contract.params)
            .find(|(param, spec)| !Self::param_matches(param, &spec.type_name, prefix))
            .map(|(param, spec)| {
                format!(
                    "parameter '{}' must be of type '{prefix}:{}', found '{}'",
                    param.name, spec.type_name, param.type_text
                )
            })
    }
}

impl ServiceRule for InvalidMethodSignatureRuleImpl {
    fn check(&self, service: &ServiceDecl<'_>, model: &ServiceModel<'_>) -> Vec<LintDiagnostic> {
        let mut diagnostics = Vec::new();

        for method in service.remote_methods() {
            let Some(contract) = method.name().and_then(|n| model.config().contract.method(n))
            else {
                continue;
            };
            let Some(span) = method.params_span() else {
                continue;
            };
            if let Some(reason) = Self::mismatch(method.params(), contract, model.prefix()) {
                let signature = contract
                    .params
                    .iter()
                    .map(|p| {
                        let optional = if p.optional { "?" } else { "" };
                        format!("{}:{}{optional}", model.prefix(), p.type_name)
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                diagnostics.push(LintDiagnostic::new(
                    span,
                    format!(
                        "Invalid signature for remote function '{}': {reason}. Expected ({signature})",
                        contract.name
                    ),
                ));
            }
        }

        diagnostics
    }
}
