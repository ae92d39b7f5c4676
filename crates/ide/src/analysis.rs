use crate::code_actions::{self, CodeActionInfo};
use crate::executor;
use crate::templates::TemplateStore;
use crate::Result;
use mqtt_config::AnalyzerConfig;
use mqtt_linter::Diagnostic;
use mqtt_syntax::SourceFile;
use mqtt_types::{Position, TextEdit};
use std::sync::Arc;

/// Shared, read-only entry point for every editor-facing feature.
///
/// Holds the analyzer config and the template store behind `Arc`s, so it is
/// cheap to clone and can be queried from many threads at once. Every query
/// takes the file explicitly; nothing is cached between calls.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    config: Arc<AnalyzerConfig>,
    templates: Arc<TemplateStore>,
}

impl Analysis {
    /// Analysis with the built-in templates.
    #[must_use]
    pub fn new(config: AnalyzerConfig) -> Self {
        Self::with_templates(config, TemplateStore::builtin())
    }

    #[must_use]
    pub fn with_templates(config: AnalyzerConfig, templates: TemplateStore) -> Self {
        Self {
            config: Arc::new(config),
            templates: Arc::new(templates),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    #[must_use]
    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    /// Validate every bound service in `file`.
    #[must_use]
    pub fn diagnostics(&self, file: &SourceFile) -> Vec<Diagnostic> {
        mqtt_linter::validate(file, &self.config)
    }

    /// Code actions for the fixable diagnostics at `position`.
    #[must_use]
    pub fn code_actions(&self, file: &SourceFile, position: Position) -> Vec<CodeActionInfo> {
        code_actions::code_actions(file, &self.config, position)
    }

    #[must_use]
    pub fn code_actions_for_diagnostic(&self, diagnostic: &Diagnostic) -> Vec<CodeActionInfo> {
        code_actions::code_actions_for_diagnostic(diagnostic, &self.config.module)
    }

    /// Build the edit for `action`.
    ///
    /// # Errors
    ///
    /// See [`executor::execute`].
    pub fn execute(&self, file: &SourceFile, action: &CodeActionInfo) -> Result<TextEdit> {
        executor::execute(file, action, &self.config, &self.templates)
    }
}
