//! Snapshot testing assertions for analyzer diagnostics
//!
//! Diagnostics are formatted one per line, numbered, so snapshots stay
//! readable and diffs point at the diagnostic that changed.

/// Format a list of diagnostics for snapshot testing.
///
/// # Example
///
/// ```ignore
/// use mqtt_test_utils::assertions::format_diagnostics;
///
/// let diagnostics = mqtt_linter::validate(&file, &config);
/// insta::assert_snapshot!(format_diagnostics(&diagnostics));
/// ```
pub fn format_diagnostics<D: std::fmt::Display>(diagnostics: &[D]) -> String {
    if diagnostics.is_empty() {
        return String::from("(no diagnostics)");
    }

    diagnostics
        .iter()
        .enumerate()
        .map(|(i, d)| format!("[{}] {d}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_diagnostics_empty() {
        let empty: Vec<String> = vec![];
        assert_eq!(format_diagnostics(&empty), "(no diagnostics)");
    }

    #[test]
    fn test_format_diagnostics_numbered() {
        let diagnostics = vec!["main.bal:(13, 0)-(13, 28) error EMPTY_SERVICE: empty", "second"];
        assert_eq!(
            format_diagnostics(&diagnostics),
            "[1] main.bal:(13, 0)-(13, 28) error EMPTY_SERVICE: empty\n[2] second"
        );
    }
}
