//! Service skeleton templates.
//!
//! Template bodies are written at column zero with a 4-space indentation unit
//! and use `${prefix}` for the module import prefix. Rendering re-indents every
//! line for the insertion site and joins lines with the file's line ending.

use crate::{ActionError, Result};
use std::collections::BTreeMap;

const PREFIX_PLACEHOLDER: &str = "${prefix}";
const CANONICAL_INDENT: usize = 4;

const WITH_CALLER_BODY: &str = "\
remote function onMessage(${prefix}:Message message, ${prefix}:Caller caller) returns error? {
    check caller->complete();
}";

const WITHOUT_CALLER_BODY: &str = "\
remote function onMessage(${prefix}:Message message) returns error? {
}";

/// The built-in templates, identified independently of their wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemplateKind {
    /// `onMessage` that receives the acknowledgment handle and completes the message
    WithCaller,
    /// `onMessage` with the message parameter only
    WithoutCaller,
}

impl TemplateKind {
    /// All kinds, in the order code actions are offered.
    pub const ALL: [Self; 2] = [Self::WithCaller, Self::WithoutCaller];

    /// Template name used in provider ids.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::WithCaller => "add_on_message_with_caller",
            Self::WithoutCaller => "add_on_message_without_caller",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Code action title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::WithCaller => "Insert service template with caller",
            Self::WithoutCaller => "Insert service template without caller",
        }
    }
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub kind: TemplateKind,
    pub name: String,
    pub body: String,
}

impl Template {
    #[must_use]
    pub fn new(kind: TemplateKind, body: impl Into<String>) -> Self {
        Self {
            kind,
            name: kind.name().to_string(),
            body: body.into(),
        }
    }
}

/// Where and how a template is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext<'a> {
    /// Import prefix substituted for `${prefix}`
    pub prefix: &'a str,
    /// Column of the first template line
    pub base_indent: usize,
    /// Spaces per nesting level inside the template
    pub indent_unit: usize,
    /// `"\n"` or `"\r\n"`
    pub line_ending: &'a str,
}

/// Immutable registry of templates by name.
///
/// Built once and shared; rendering never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateStore {
    templates: BTreeMap<String, Template>,
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateStore {
    /// Store with the two `onMessage` templates.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_templates([
            Template::new(TemplateKind::WithCaller, WITH_CALLER_BODY),
            Template::new(TemplateKind::WithoutCaller, WITHOUT_CALLER_BODY),
        ])
    }

    /// Store with exactly `templates`; a later template replaces an earlier one
    /// with the same name.
    #[must_use]
    pub fn from_templates(templates: impl IntoIterator<Item = Template>) -> Self {
        Self {
            templates: templates
                .into_iter()
                .map(|template| (template.name.clone(), template))
                .collect(),
        }
    }

    /// Look up a template by name.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::UnknownTemplate`] if no template has that name.
    pub fn get(&self, name: &str) -> Result<&Template> {
        self.templates
            .get(name)
            .ok_or_else(|| ActionError::UnknownTemplate(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// Render the template `name` for `ctx`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::UnknownTemplate`] if no template has that name.
    pub fn render(&self, name: &str, ctx: &RenderContext<'_>) -> Result<String> {
        let template = self.get(name)?;
        Ok(render_body(&template.body, ctx))
    }
}

fn render_body(body: &str, ctx: &RenderContext<'_>) -> String {
    body.replace(PREFIX_PLACEHOLDER, ctx.prefix)
        .lines()
        .map(|line| {
            let content = line.trim_start_matches(' ');
            if content.is_empty() {
                return String::new();
            }
            let leading = line.len() - content.len();
            let indent = ctx.base_indent
                + (leading / CANONICAL_INDENT) * ctx.indent_unit
                + leading % CANONICAL_INDENT;
            format!("{}{content}", " ".repeat(indent))
        })
        .collect::<Vec<_>>()
        .join(ctx.line_ending)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(base_indent: usize) -> RenderContext<'static> {
        RenderContext {
            prefix: "mqtt",
            base_indent,
            indent_unit: 4,
            line_ending: "\n",
        }
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(TemplateKind::WithCaller.name(), "add_on_message_with_caller");
        assert_eq!(
            TemplateKind::from_name("add_on_message_without_caller"),
            Some(TemplateKind::WithoutCaller)
        );
        assert_eq!(TemplateKind::from_name("add_on_error"), None);
        assert_eq!(
            TemplateKind::WithoutCaller.title(),
            "Insert service template without caller"
        );
    }

    #[test]
    fn test_builtin_store() {
        let store = TemplateStore::builtin();
        assert_eq!(
            store.names().collect::<Vec<_>>(),
            vec!["add_on_message_with_caller", "add_on_message_without_caller"]
        );
        assert_eq!(
            store.get("nope"),
            Err(ActionError::UnknownTemplate("nope".to_string()))
        );
    }

    #[test]
    fn test_render_with_caller() {
        let store = TemplateStore::builtin();
        let text = store.render("add_on_message_with_caller", &ctx(4)).unwrap();
        assert_eq!(
            text,
            "    remote function onMessage(mqtt:Message message, mqtt:Caller caller) returns error? {\n        check caller->complete();\n    }"
        );
    }

    #[test]
    fn test_render_without_caller_nested() {
        let store = TemplateStore::builtin();
        let text = store
            .render("add_on_message_without_caller", &ctx(8))
            .unwrap();
        assert_eq!(
            text,
            "        remote function onMessage(mqtt:Message message) returns error? {\n        }"
        );
    }

    #[test]
    fn test_render_indent_unit_and_crlf() {
        let store = TemplateStore::builtin();
        let ctx = RenderContext {
            prefix: "m",
            base_indent: 2,
            indent_unit: 2,
            line_ending: "\r\n",
        };
        let text = store.render("add_on_message_with_caller", &ctx).unwrap();
        assert_eq!(
            text,
            "  remote function onMessage(m:Message message, m:Caller caller) returns error? {\r\n    check caller->complete();\r\n  }"
        );
    }

    #[test]
    fn test_blank_lines_not_indented() {
        let store = TemplateStore::from_templates([Template::new(
            TemplateKind::WithoutCaller,
            "remote function onMessage(${prefix}:Message message) {\n\n    int x = 0;\n}",
        )]);
        let text = store.render("add_on_message_without_caller", &ctx(4)).unwrap();
        assert_eq!(
            text,
            "    remote function onMessage(mqtt:Message message) {\n\n        int x = 0;\n    }"
        );
        assert!(store.get("add_on_message_with_caller").is_err());
    }

    #[test]
    fn test_render_is_deterministic() {
        let store = TemplateStore::builtin();
        let first = store.render("add_on_message_with_caller", &ctx(0)).unwrap();
        let second = store.render("add_on_message_with_caller", &ctx(0)).unwrap();
        assert_eq!(first, second);
    }
}
