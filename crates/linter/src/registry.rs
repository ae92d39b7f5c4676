/// Registry of all available lint rules
use crate::rules::{
    EmptyServiceRuleImpl, InvalidMethodSignatureRuleImpl, MissingRequiredMethodRuleImpl,
    ResourceMethodNotAllowedRuleImpl, UnknownRemoteMethodRuleImpl,
};
use crate::traits::ServiceRule;
use mqtt_config::{AnalyzerConfig, ConfigError};
use std::sync::{Arc, LazyLock};

/// Lazily initialized service rules, in reporting order.
/// Rules are created once and reused across all calls.
static SERVICE_RULES: LazyLock<Vec<Arc<dyn ServiceRule>>> = LazyLock::new(|| {
    vec![
        Arc::new(EmptyServiceRuleImpl),
        Arc::new(MissingRequiredMethodRuleImpl),
        Arc::new(UnknownRemoteMethodRuleImpl),
        Arc::new(InvalidMethodSignatureRuleImpl),
        Arc::new(ResourceMethodNotAllowedRuleImpl),
    ]
});

#[must_use]
pub fn service_rules() -> &'static [Arc<dyn ServiceRule>] {
    &SERVICE_RULES
}

#[must_use]
pub fn all_rule_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = service_rules().iter().map(|r| r.name()).collect();
    names.sort_unstable();
    names
}

/// Reject rule overrides in `config` that name no registered rule.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownRule`] for the first unknown name.
pub fn check_rule_names(config: &AnalyzerConfig) -> Result<(), ConfigError> {
    config.check_rule_names(&all_rule_names())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mqtt_types::RuleSeverity;

    #[test]
    fn test_all_rule_names() {
        assert_eq!(
            all_rule_names(),
            vec![
                "empty_service",
                "invalid_method_signature",
                "missing_required_method",
                "resource_method_not_allowed",
                "unknown_remote_method",
            ]
        );
    }

    #[test]
    fn test_rule_codes_are_unique() {
        let mut codes: Vec<_> = service_rules().iter().map(|r| r.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), service_rules().len());
    }

    #[test]
    fn test_check_rule_names() {
        let mut config = AnalyzerConfig::default();
        config
            .rules
            .insert("unknown_remote_methods".to_string(), RuleSeverity::Off);
        let err = check_rule_names(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown rule 'unknown_remote_methods', did you mean 'unknown_remote_method'?"
        );
    }
}
