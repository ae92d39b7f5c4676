use mqtt_types::RuleSeverity;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::{ConfigError, Result};

/// Module id of the recognized listener module.
pub const DEFAULT_MODULE: &str = "ballerina/mqtt";

/// Analyzer configuration.
///
/// ```yaml
/// module: ballerina/mqtt
/// listener: Listener
/// indent: 4
/// contract:
///   required:
///     - name: onMessage
///       params: [{type: Message}, {type: Caller, optional: true}]
///   optional:
///     - name: onError
///       params: [{type: Error}]
/// rules:
///   unknown_remote_method: warn
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// `org/module` id of the listener module; also the provider namespace
    pub module: String,
    /// Name of the listener type exported by `module`
    pub listener: String,
    /// Spaces per indentation level in generated code
    pub indent: usize,
    pub contract: ListenerContract,
    /// Rule severity overrides by rule name
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub rules: BTreeMap<String, RuleSeverity>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            module: DEFAULT_MODULE.to_string(),
            listener: "Listener".to_string(),
            indent: 4,
            contract: ListenerContract::default(),
            rules: BTreeMap::new(),
        }
    }
}

impl AnalyzerConfig {
    /// The last segment of the module id, used as the import prefix when the
    /// import has no alias (`ballerina/mqtt` -> `mqtt`).
    #[must_use]
    pub fn module_prefix(&self) -> &str {
        let module = self
            .module
            .rsplit_once('/')
            .map_or(self.module.as_str(), |(_, m)| m);
        module.rsplit('.').next().unwrap_or(module)
    }

    /// Severity configured for `rule`, or `default` when not overridden.
    #[must_use]
    pub fn rule_severity(&self, rule: &str, default: RuleSeverity) -> RuleSeverity {
        self.rules.get(rule).copied().unwrap_or(default)
    }

    /// Check the structural constraints of the config.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first violated constraint.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.module.trim().is_empty() || !self.module.contains('/') {
            return Err(format!(
                "module '{}' must be an 'org/module' id",
                self.module
            ));
        }
        if self.listener.trim().is_empty() {
            return Err("listener type name must not be empty".to_string());
        }
        if !(1..=8).contains(&self.indent) {
            return Err(format!("indent must be between 1 and 8, got {}", self.indent));
        }
        self.contract.validate()
    }

    /// Reject rule overrides that name no known rule.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownRule`] with the closest known name, if any.
    pub fn check_rule_names(&self, known: &[&str]) -> Result<()> {
        for rule in self.rules.keys() {
            if known.contains(&rule.as_str()) {
                continue;
            }
            let suggestion = known
                .iter()
                .map(|k| (strsim::jaro_winkler(rule, k), *k))
                .filter(|(score, _)| *score >= 0.8)
                .max_by(|a, b| a.0.total_cmp(&b.0))
                .map(|(_, k)| k.to_string());
            return Err(ConfigError::UnknownRule {
                rule: rule.clone(),
                suggestion,
            });
        }
        Ok(())
    }
}

/// The remote methods a service bound to the listener must (or may) declare.
///
/// [`Default`] is the built-in MQTT contract and only applies when a config
/// has no `contract` table. A table that omits a list declares it empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListenerContract {
    #[serde(default)]
    pub required: Vec<MethodContract>,
    #[serde(default)]
    pub optional: Vec<MethodContract>,
}

impl Default for ListenerContract {
    fn default() -> Self {
        Self {
            required: vec![MethodContract::new(
                "onMessage",
                vec![ParamSpec::new("Message"), ParamSpec::optional("Caller")],
            )],
            optional: vec![MethodContract::new(
                "onError",
                vec![ParamSpec::new("Error")],
            )],
        }
    }
}

impl ListenerContract {
    /// Look up a required or optional method by name.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MethodContract> {
        self.methods().find(|m| m.name == name)
    }

    /// Required methods first, then optional ones.
    pub fn methods(&self) -> impl Iterator<Item = &MethodContract> {
        self.required.iter().chain(&self.optional)
    }

    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|m| m.name == name)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        let mut seen = HashSet::new();
        for method in self.methods() {
            if method.name.trim().is_empty() {
                return Err("contract method name must not be empty".to_string());
            }
            if !seen.insert(method.name.as_str()) {
                return Err(format!("contract method '{}' is declared twice", method.name));
            }
            let first_optional = method.params.iter().position(|p| p.optional);
            if let Some(first) = first_optional {
                if method.params[first..].iter().any(|p| !p.optional) {
                    return Err(format!(
                        "contract method '{}' has a required parameter after an optional one",
                        method.name
                    ));
                }
            }
        }
        Ok(())
    }
}

/// A remote method the listener dispatches to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodContract {
    pub name: String,
    #[serde(default)]
    pub params: Vec<ParamSpec>,
}

impl MethodContract {
    #[must_use]
    pub fn new(name: impl Into<String>, params: Vec<ParamSpec>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    /// Number of parameters that must be present.
    #[must_use]
    pub fn min_arity(&self) -> usize {
        self.params.iter().filter(|p| !p.optional).count()
    }

    /// Number of parameters that may be present.
    #[must_use]
    pub fn max_arity(&self) -> usize {
        self.params.len()
    }

    /// Human-readable signature, e.g. `onMessage(Message, Caller?)`.
    #[must_use]
    pub fn signature(&self) -> String {
        let params: Vec<String> = self
            .params
            .iter()
            .map(|p| {
                if p.optional {
                    format!("{}?", p.type_name)
                } else {
                    p.type_name.clone()
                }
            })
            .collect();
        format!("{}({})", self.name, params.join(", "))
    }
}

/// Expected type of one parameter, named without module prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamSpec {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
}

impl ParamSpec {
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            optional: false,
        }
    }

    #[must_use]
    pub fn optional(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            optional: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.module, "ballerina/mqtt");
        assert_eq!(config.module_prefix(), "mqtt");
        assert_eq!(config.listener, "Listener");
        assert_eq!(config.indent, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_contract() {
        let contract = ListenerContract::default();
        let on_message = contract.method("onMessage").unwrap();
        assert!(contract.is_required("onMessage"));
        assert_eq!(on_message.min_arity(), 1);
        assert_eq!(on_message.max_arity(), 2);
        assert_eq!(on_message.signature(), "onMessage(Message, Caller?)");

        assert!(!contract.is_required("onError"));
        assert!(contract.method("onError").is_some());
        assert!(contract.method("onComplete").is_none());
    }

    #[test]
    fn test_module_prefix() {
        let config = AnalyzerConfig {
            module: "acme/messaging.mqtt".to_string(),
            ..AnalyzerConfig::default()
        };
        assert_eq!(config.module_prefix(), "mqtt");
    }

    #[test]
    fn test_rule_severity_override() {
        let mut config = AnalyzerConfig::default();
        config
            .rules
            .insert("empty_service".to_string(), RuleSeverity::Off);

        assert_eq!(
            config.rule_severity("empty_service", RuleSeverity::Error),
            RuleSeverity::Off
        );
        assert_eq!(
            config.rule_severity("missing_required_method", RuleSeverity::Error),
            RuleSeverity::Error
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_module = AnalyzerConfig {
            module: "mqtt".to_string(),
            ..AnalyzerConfig::default()
        };
        assert!(bad_module.validate().unwrap_err().contains("org/module"));

        let bad_indent = AnalyzerConfig {
            indent: 0,
            ..AnalyzerConfig::default()
        };
        assert!(bad_indent.validate().unwrap_err().contains("indent"));

        let empty_listener = AnalyzerConfig {
            listener: " ".to_string(),
            ..AnalyzerConfig::default()
        };
        assert!(empty_listener.validate().is_err());
    }

    #[test]
    fn test_validate_contract() {
        let mut config = AnalyzerConfig::default();
        config
            .contract
            .optional
            .push(MethodContract::new("onMessage", vec![]));
        assert!(config.validate().unwrap_err().contains("declared twice"));

        let mut config = AnalyzerConfig::default();
        config.contract.required = vec![MethodContract::new(
            "onMessage",
            vec![ParamSpec::optional("Caller"), ParamSpec::new("Message")],
        )];
        assert!(config
            .validate()
            .unwrap_err()
            .contains("required parameter after an optional one"));
    }

    #[test]
    fn test_check_rule_names() {
        let known = ["empty_service", "missing_required_method"];
        let mut config = AnalyzerConfig::default();
        config
            .rules
            .insert("empty_service".to_string(), RuleSeverity::Warn);
        assert!(config.check_rule_names(&known).is_ok());

        config
            .rules
            .insert("empty_servise".to_string(), RuleSeverity::Warn);
        let err = config.check_rule_names(&known).unwrap_err();
        assert!(matches!(
            &err,
            ConfigError::UnknownRule { rule, suggestion: Some(s) }
                if rule == "empty_servise" && s == "empty_service"
        ));
        assert_eq!(
            err.to_string(),
            "unknown rule 'empty_servise', did you mean 'empty_service'?"
        );
    }

    #[test]
    fn test_unknown_rule_without_suggestion() {
        let mut config = AnalyzerConfig::default();
        config.rules.insert("zzz".to_string(), RuleSeverity::Warn);
        let err = config.check_rule_names(&["empty_service"]).unwrap_err();
        assert_eq!(err.to_string(), "unknown rule 'zzz'");
    }

    #[test]
    fn test_deserialize_partial_json() {
        let config: AnalyzerConfig =
            serde_json::from_str(r#"{"indent": 2, "rules": {"empty_service": "warn"}}"#).unwrap();
        assert_eq!(config.indent, 2);
        assert_eq!(config.module, DEFAULT_MODULE);
        assert_eq!(config.rules["empty_service"], RuleSeverity::Warn);
        assert_eq!(config.contract, ListenerContract::default());
    }

    #[test]
    fn test_contract_table_replaces_default() {
        let config: AnalyzerConfig = serde_json::from_str(
            r#"{"contract": {"required": [
                {"name": "onMessage", "params": [{"type": "Message"}]},
                {"name": "onError", "params": [{"type": "Error"}]}
            ]}}"#,
        )
        .unwrap();
        assert!(config.contract.optional.is_empty());
        assert!(config.contract.is_required("onError"));
        assert!(config.validate().is_ok());

        let empty: AnalyzerConfig = serde_json::from_str(r#"{"contract": {}}"#).unwrap();
        assert!(empty.contract.methods().next().is_none());
    }
}
