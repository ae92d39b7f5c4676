use crate::diagnostics::Diagnostic;
use crate::model::ServiceModel;
use crate::registry::service_rules;
use mqtt_config::AnalyzerConfig;
use mqtt_syntax::SourceFile;

/// Validate every service in `file` bound to the configured listener.
///
/// Diagnostics are ordered by range start, then by code. A file that does not
/// import the configured module yields no diagnostics.
#[tracing::instrument(skip_all, fields(file = file.name()))]
pub fn validate(file: &SourceFile, config: &AnalyzerConfig) -> Vec<Diagnostic> {
    let Some(model) = ServiceModel::resolve(file, config) else {
        tracing::debug!(module = %config.module, "Module not imported, skipping");
        return Vec::new();
    };

    let mut diagnostics = Vec::new();
    for service in model.bound_services() {
        for rule in service_rules() {
            let severity = config.rule_severity(rule.name(), rule.default_severity());
            let Some(severity) = severity.to_diagnostic_severity() else {
                continue;
            };
            for finding in rule.check(&service, &model) {
                tracing::trace!(rule = rule.name(), span = %finding.span, "Rule finding");
                diagnostics.push(Diagnostic::new(
                    rule.code(),
                    severity,
                    file.range(finding.span),
                    finding.message,
                ));
            }
        }
    }

    diagnostics.sort_by(|a, b| {
        a.range
            .start
            .cmp(&b.range.start)
            .then_with(|| a.code.cmp(&b.code))
    });
    tracing::debug!(count = diagnostics.len(), "Validation complete");
    diagnostics
}
