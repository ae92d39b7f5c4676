use crate::{parser, LineIndex, ParseError, SyntaxTree};
use mqtt_types::{LineRange, OffsetRange};
use std::sync::Arc;

/// A parsed source file: name, text, syntax tree and line index.
///
/// Immutable once built and cheap to share across threads.
#[derive(Debug, Clone)]
pub struct SourceFile {
    name: String,
    text: Arc<str>,
    tree: Arc<SyntaxTree>,
    line_index: LineIndex,
}

impl SourceFile {
    /// Parse `text` as the file `name`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the text is not structurally well-formed.
    #[tracing::instrument(skip(text), fields(len = text.len()))]
    pub fn parse(name: &str, text: &str) -> Result<Self, ParseError> {
        let tree = parser::parse(text).inspect_err(|e| {
            tracing::debug!(file = name, error = %e, "Failed to parse source file");
        })?;
        tracing::debug!(
            file = name,
            nodes = tree.len(),
            services = tree.services().count(),
            "Parsed source file"
        );

        let text: Arc<str> = Arc::from(text);
        Ok(Self {
            name: name.to_string(),
            line_index: LineIndex::new(Arc::clone(&text)),
            text,
            tree: Arc::new(tree),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    #[must_use]
    pub const fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Convert a byte range of this file to a [`LineRange`].
    #[must_use]
    pub fn range(&self, range: OffsetRange) -> LineRange {
        self.line_index.range(&self.name, range)
    }

    #[must_use]
    pub fn slice(&self, range: OffsetRange) -> &str {
        &self.text[range.start..range.end]
    }

    /// The line terminator used by the file: `\r\n` if any line uses it.
    #[must_use]
    pub fn line_ending(&self) -> &'static str {
        if self.text.contains("\r\n") {
            "\r\n"
        } else {
            "\n"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mqtt_types::Position;

    #[test]
    fn test_source_file_parse() {
        let file = SourceFile::parse(
            "main.bal",
            "import ballerina/mqtt;\n\nservice on l {\n    int x = 0;\n}\n",
        )
        .unwrap();

        assert_eq!(file.name(), "main.bal");
        let service = file.tree().services().next().unwrap();
        let range = file.range(service.span());
        assert_eq!(range.start, Position::new(2, 0));
        assert_eq!(range.end, Position::new(4, 1));
        assert_eq!(file.slice(service.open_brace()), "{");
        assert_eq!(file.line_ending(), "\n");
    }

    #[test]
    fn test_source_file_crlf() {
        let file = SourceFile::parse("main.bal", "service on l {\r\n}\r\n").unwrap();
        assert_eq!(file.line_ending(), "\r\n");
        let service = file.tree().services().next().unwrap();
        assert_eq!(file.range(service.span()).end, Position::new(1, 1));
    }

    #[test]
    fn test_source_file_parse_error() {
        let err = SourceFile::parse("main.bal", "service on l {").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_source_file_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SourceFile>();
    }
}
