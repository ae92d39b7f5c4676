//! Text edit type produced by code actions.

use crate::LineRange;
use serde::{Deserialize, Serialize};

/// A text edit representing a change to apply to source code.
///
/// The range is expressed in editor coordinates so the host can apply it
/// without access to the analyzer's byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextEdit {
    /// Range to replace (zero-width for a pure insertion)
    pub range: LineRange,
    /// The text to replace the range with (empty string means deletion)
    pub new_text: String,
}

impl TextEdit {
    /// Create a new text edit that replaces a range with new text.
    #[must_use]
    pub fn new(range: LineRange, new_text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: new_text.into(),
        }
    }
}
