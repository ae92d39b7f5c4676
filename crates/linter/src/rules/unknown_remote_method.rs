use crate::diagnostics::{DiagnosticCode, LintDiagnostic};
use crate::model::ServiceModel;
use crate::traits::{LintRule, ServiceRule};
use mqtt_syntax::ServiceDecl;

const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Trait implementation for `unknown_remote_method` rule
pub struct UnknownRemoteMethodRuleImpl;

impl LintRule for UnknownRemoteMethodRuleImpl {
    fn name(&self) -> &'static str {
        "unknown_remote_method"
    }

    fn description(&self) -> &'static str {
        "Flags remote methods the listener never dispatches to"
    }

    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::UnknownRemoteMethod
    }
}

impl ServiceRule for UnknownRemoteMethodRuleImpl {
    fn check(&self, service: &ServiceDecl<'_>, model: &ServiceModel<'_>) -> Vec<LintDiagnostic> {
        let contract = &model.config().contract;
        let mut diagnostics = Vec::new();

        for method in service.remote_methods() {
            let (Some(name), Some(span)) = (method.name(), method.name_span()) else {
                continue;
            };
            if contract.method(name).is_some() {
                continue;
            }

            let suggestion = contract
                .methods()
                .map(|m| (strsim::jaro_winkler(name, &m.name), m.name.as_str()))
                .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
                .max_by(|a, b| a.0.total_cmp(&b.0))
                .map(|(_, candidate)| candidate);

            let mut message = format!(
                "Remote function '{name}' is not part of the '{}:{}' contract",
                model.prefix(),
                model.config().listener
            );
            if let Some(candidate) = suggestion {
                message.push_str(&format!(". Did you mean '{candidate}'?"));
            }
            diagnostics.push(LintDiagnostic::new(span, message));
        }

        diagnostics
    }
}
