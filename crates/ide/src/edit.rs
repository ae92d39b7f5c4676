//! Applying [`TextEdit`]s to plain text.

use crate::{ActionError, Result};
use mqtt_syntax::LineIndex;
use mqtt_types::{OffsetRange, TextEdit};

/// Apply a single edit to `text`.
///
/// # Errors
///
/// Returns [`ActionError::LocationOutOfBounds`] if the edit range does not fit.
pub fn apply_edit(text: &str, edit: &TextEdit) -> Result<String> {
    apply_edits(text, std::slice::from_ref(edit))
}

/// Apply several edits, all expressed against the original `text`.
///
/// # Errors
///
/// Returns [`ActionError::LocationOutOfBounds`] for a range outside `text` and
/// [`ActionError::OverlappingEdits`] if two ranges overlap.
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> Result<String> {
    let index = LineIndex::new(text);
    let mut resolved: Vec<(OffsetRange, &TextEdit)> = edits
        .iter()
        .map(|edit| {
            index
                .offset_range(&edit.range)
                .filter(|range| range.start <= range.end)
                .map(|range| (range, edit))
                .ok_or_else(|| ActionError::LocationOutOfBounds(edit.range.clone()))
        })
        .collect::<Result<_>>()?;
    resolved.sort_by_key(|(range, _)| (range.start, range.end));

    for pair in resolved.windows(2) {
        if pair[1].0.start < pair[0].0.end {
            return Err(ActionError::OverlappingEdits(pair[1].1.range.clone()));
        }
    }

    let mut out = text.to_string();
    for (range, edit) in resolved.iter().rev() {
        out.replace_range(range.start..range.end, &edit.new_text);
    }
    Ok(out)
}
