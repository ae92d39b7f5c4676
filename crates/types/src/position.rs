//! Position and range types for source locations.

use serde::{Deserialize, Serialize};

/// Byte offset range in a source file.
///
/// Used internally for text manipulation. Byte offsets are converted to
/// line/column [`Position`]s when presenting to users or the host editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct OffsetRange {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl OffsetRange {
    /// Create a new offset range.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length of this range in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if this is a zero-width range.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl std::fmt::Display for OffsetRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Position in a source file (editor coordinates, 0-indexed).
///
/// - `line` is 0-indexed (first line is 0)
/// - `character` is 0-indexed, counted in Unicode scalar values from the
///   start of the line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: u32,
    /// Character offset within the line (0-indexed)
    pub character: u32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.line.cmp(&other.line) {
            std::cmp::Ordering::Equal => self.character.cmp(&other.character),
            ord => ord,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.line, self.character)
    }
}

/// A range in a named file (editor coordinates).
///
/// The range spans from `start` (inclusive) to `end` (exclusive). This is the
/// location carried by diagnostics and by the `location` argument of code
/// actions, so it must survive a serialize/deserialize round trip through the
/// host editor unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LineRange {
    /// File name the range belongs to (as reported by the host)
    pub file: String,
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl LineRange {
    /// Create a new range.
    ///
    /// # Panics
    ///
    /// Panics if `start` is after `end`.
    #[must_use]
    pub fn new(file: impl Into<String>, start: Position, end: Position) -> Self {
        assert!(start <= end, "range start {start} is after end {end}");
        Self {
            file: file.into(),
            start,
            end,
        }
    }

    /// Create a zero-width range at a specific position.
    #[must_use]
    pub fn at(file: impl Into<String>, position: Position) -> Self {
        Self {
            file: file.into(),
            start: position,
            end: position,
        }
    }

    /// Returns `true` if this is a zero-width range.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if this range contains a position (end exclusive).
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        position >= self.start && position < self.end
    }

    /// Check if a position lies within the range or on one of its endpoints.
    ///
    /// A cursor placed right after a closing brace still "touches" the
    /// construct that brace belongs to.
    #[must_use]
    pub fn touches(&self, position: Position) -> bool {
        position >= self.start && position <= self.end
    }
}

impl std::fmt::Display for LineRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.file, self.start, self.end)
    }
}
