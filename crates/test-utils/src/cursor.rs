//! Cursor position extraction for code action tests.
//!
//! Code actions are requested at a cursor position. Mark the position in the
//! source with a `*` character and extract the clean source and position.

use mqtt_types::Position;

/// Extract cursor position from source marked with `*`.
///
/// # Example
///
/// ```
/// use mqtt_test_utils::extract_cursor;
///
/// let (source, pos) = extract_cursor("service on sub {\n    *int x = 0;\n}");
/// assert_eq!(source, "service on sub {\n    int x = 0;\n}");
/// assert_eq!(pos.line, 1);
/// assert_eq!(pos.character, 4);
/// ```
///
/// # Panics
///
/// Panics if the input contains no `*` marker or multiple `*` markers.
pub fn extract_cursor(input: &str) -> (String, Position) {
    let marker_count = input.chars().filter(|&c| c == '*').count();

    assert!(
        marker_count != 0,
        "extract_cursor: input must contain exactly one '*' marker, found none"
    );
    assert!(
        marker_count <= 1,
        "extract_cursor: input must contain exactly one '*' marker, found {marker_count}"
    );

    let mut line = 0u32;
    let mut character = 0u32;
    let mut found_pos = None;
    let mut result = String::with_capacity(input.len() - 1);

    for ch in input.chars() {
        if ch == '*' {
            found_pos = Some(Position::new(line, character));
        } else {
            result.push(ch);
            if ch == '\n' {
                line += 1;
                character = 0;
            } else if ch != '\r' {
                character += 1;
            }
        }
    }

    (result, found_pos.unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_cursor_single_line() {
        let (source, pos) = extract_cursor("service on *sub {}");
        assert_eq!(source, "service on sub {}");
        assert_eq!(pos, Position::new(0, 11));
    }

    #[test]
    fn test_extract_cursor_end_of_service() {
        let (source, pos) = extract_cursor("a\nservice on sub {}*\n");
        assert_eq!(source, "a\nservice on sub {}\n");
        assert_eq!(pos, Position::new(1, 17));
    }

    #[test]
    #[should_panic(expected = "found none")]
    fn test_extract_cursor_no_marker() {
        let _ = extract_cursor("service on sub {}");
    }

    #[test]
    #[should_panic(expected = "found 2")]
    fn test_extract_cursor_multiple_markers() {
        let _ = extract_cursor("*service on *sub {}");
    }
}
