//! Code action provider.
//!
//! Maps `EMPTY_SERVICE` and `MISSING_REQUIRED_METHOD` diagnostics to the two
//! template insertion actions. Actions carry everything the executor needs, so
//! a host can persist them and execute them later without the diagnostic.

use crate::templates::TemplateKind;
use crate::{ActionError, Result};
use mqtt_config::AnalyzerConfig;
use mqtt_linter::Diagnostic;
use mqtt_syntax::SourceFile;
use mqtt_types::{LineRange, Position};
use serde::{Deserialize, Serialize};

/// Key of the argument carrying the diagnostic's range.
pub const LOCATION_KEY: &str = "location";

/// Identifies which module offered an action and which template it inserts.
///
/// Wire form: `<module-id>/<template-name>`, e.g.
/// `ballerina/mqtt/add_on_message_with_caller`. The id carries no diagnostic
/// code segment, so hosts that key providers as `MQTT_114/ballerina/mqtt/...`
/// must strip that prefix before parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ProviderId {
    pub module: String,
    pub template: TemplateKind,
}

impl ProviderId {
    #[must_use]
    pub fn new(module: impl Into<String>, template: TemplateKind) -> Self {
        Self {
            module: module.into(),
            template,
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.module, self.template.name())
    }
}

impl std::str::FromStr for ProviderId {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self> {
        let (module, name) = s
            .rsplit_once('/')
            .ok_or_else(|| ActionError::UnknownTemplate(s.to_string()))?;
        let template =
            TemplateKind::from_name(name).ok_or_else(|| ActionError::UnknownTemplate(name.to_string()))?;
        Ok(Self::new(module, template))
    }
}

impl From<ProviderId> for String {
    fn from(id: ProviderId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for ProviderId {
    type Error = ActionError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// A named code action argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeActionArgument {
    pub key: String,
    pub value: serde_json::Value,
}

impl CodeActionArgument {
    /// The `location` argument for `range`.
    #[must_use]
    pub fn location(range: &LineRange) -> Self {
        Self {
            key: LOCATION_KEY.to_string(),
            // LineRange serialization cannot fail
            value: serde_json::to_value(range).unwrap_or_default(),
        }
    }
}

/// A code action offered to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeActionInfo {
    pub title: String,
    pub provider_id: ProviderId,
    pub arguments: Vec<CodeActionArgument>,
}

impl CodeActionInfo {
    #[must_use]
    pub fn argument(&self, key: &str) -> Option<&serde_json::Value> {
        self.arguments.iter().find(|a| a.key == key).map(|a| &a.value)
    }

    /// Recover the range the action is anchored to.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::MissingLocation`] or
    /// [`ActionError::MalformedLocation`].
    pub fn location(&self) -> Result<LineRange> {
        let value = self
            .argument(LOCATION_KEY)
            .ok_or(ActionError::MissingLocation)?;
        let range: LineRange = serde_json::from_value(value.clone())
            .map_err(|e| ActionError::MalformedLocation(e.to_string()))?;
        if range.start > range.end {
            return Err(ActionError::MalformedLocation(format!(
                "range start {} is after end {}",
                range.start, range.end
            )));
        }
        Ok(range)
    }
}

/// Code actions for one diagnostic: two for fixable codes, none otherwise.
#[must_use]
pub fn code_actions_for_diagnostic(diagnostic: &Diagnostic, module: &str) -> Vec<CodeActionInfo> {
    if !diagnostic.code.is_fixable() {
        return Vec::new();
    }
    TemplateKind::ALL
        .into_iter()
        .map(|kind| CodeActionInfo {
            title: kind.title().to_string(),
            provider_id: ProviderId::new(module, kind),
            arguments: vec![CodeActionArgument::location(&diagnostic.range)],
        })
        .collect()
}

/// Code actions for the fixable diagnostics whose range touches `position`.
#[tracing::instrument(skip(file, config), fields(file = file.name()))]
pub fn code_actions(
    file: &SourceFile,
    config: &AnalyzerConfig,
    position: Position,
) -> Vec<CodeActionInfo> {
    let actions: Vec<CodeActionInfo> = mqtt_linter::validate(file, config)
        .iter()
        .filter(|d| d.range.touches(position))
        .flat_map(|d| code_actions_for_diagnostic(d, &config.module))
        .collect();
    tracing::debug!(count = actions.len(), "Computed code actions");
    actions
}
