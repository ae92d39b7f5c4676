//! Code action executor.
//!
//! Turns a [`CodeActionInfo`] back into a single [`TextEdit`] that replaces the
//! diagnosed range with the original text plus a rendered `onMessage` template.
//! Execution either yields the complete edit or an [`ActionError`]; the source
//! file is never touched.

use crate::code_actions::CodeActionInfo;
use crate::templates::{RenderContext, TemplateStore};
use crate::{ActionError, Result};
use mqtt_config::AnalyzerConfig;
use mqtt_linter::ServiceModel;
use mqtt_syntax::{ServiceDecl, SourceFile};
use mqtt_types::{OffsetRange, TextEdit};

/// Execute `action` against `file`.
///
/// # Errors
///
/// - [`ActionError::UnknownTemplate`] if `templates` has no template for the action
/// - [`ActionError::ForeignProvider`] if the action was offered for another module
/// - [`ActionError::MissingLocation`] / [`ActionError::MalformedLocation`] for a bad argument
/// - [`ActionError::LocationOutOfBounds`] if the range does not fit the file
/// - [`ActionError::StaleLocation`] if no bound service is anchored at the range
#[tracing::instrument(skip_all, fields(file = file.name(), provider = %action.provider_id))]
pub fn execute(
    file: &SourceFile,
    action: &CodeActionInfo,
    config: &AnalyzerConfig,
    templates: &TemplateStore,
) -> Result<TextEdit> {
    let provider = &action.provider_id;
    let template = templates.get(provider.template.name())?;
    if provider.module != config.module {
        return Err(ActionError::ForeignProvider {
            expected: config.module.clone(),
            found: provider.module.clone(),
        });
    }

    let location = action.location()?;
    if location.file != file.name() {
        return Err(ActionError::StaleLocation(location));
    }
    let range = file
        .line_index()
        .offset_range(&location)
        .ok_or_else(|| ActionError::LocationOutOfBounds(location.clone()))?;

    let model = ServiceModel::resolve(file, config)
        .ok_or_else(|| ActionError::StaleLocation(location.clone()))?;
    let service = model
        .bound_services()
        .find(|service| anchored_at(service, range))
        .ok_or_else(|| ActionError::StaleLocation(location.clone()))?;

    let line_ending = file.line_ending();
    let column = location.start.character as usize;
    let ctx = RenderContext {
        prefix: model.prefix(),
        base_indent: column + config.indent,
        indent_unit: config.indent,
        line_ending,
    };
    let rendered = templates.render(&template.name, &ctx)?;

    let new_text = if service.is_empty() {
        // The body may still hold comments; keep them ahead of the template.
        let head = file.slice(OffsetRange::new(range.start, service.open_brace().end));
        let body = file
            .slice(OffsetRange::new(
                service.open_brace().end,
                service.close_brace().start,
            ))
            .trim_end();
        format!(
            "{head}{body}{line_ending}{rendered}{line_ending}{}}}",
            " ".repeat(column)
        )
    } else {
        let existing = file.slice(range);
        format!("{existing}{line_ending}{line_ending}{rendered}")
    };

    tracing::debug!(template = %template.name, range = %location, "Built code action edit");
    Ok(TextEdit::new(location, new_text))
}

/// Whether `range` is the range the linter reports for `service`: the whole
/// declaration when empty, otherwise through the end of its last member.
fn anchored_at(service: &ServiceDecl<'_>, range: OffsetRange) -> bool {
    let span = service.span();
    if span.start != range.start {
        return false;
    }
    match service.last_member() {
        None => span.end == range.end,
        Some(last) => last.span().end == range.end,
    }
}

