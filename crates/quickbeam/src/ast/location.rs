//! Source locations attached to every node

use std::fmt;

use serde::{Deserialize, Serialize};

/// A line/column pair. Both are 1-based; columns are exclusive at the end
/// of a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Line number
    pub line: u32,
    /// Column number
    pub column: u32,
}

impl Position {
    /// Create a position.
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Where a node came from in the source text.
///
/// The display form is `[file:]line.col`, extended with `-line.col` when the
/// range spans lines or `-col` when it only spans columns. The end column
/// is shown inclusively.
///
/// ```
/// use quickbeam::ast::{Location, Position};
///
/// let loc = Location::span(Position::new(3, 5), Position::new(3, 9));
/// assert_eq!(loc.to_string(), "3.5-8");
///
/// let loc = Location::new(7, 1).with_file("queens.tig");
/// assert_eq!(loc.to_string(), "queens.tig:7.1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Source file, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// First position covered
    pub begin: Position,
    /// Position just past the last character covered
    pub end: Position,
}

impl Location {
    /// A location covering a single point.
    pub fn new(line: u32, column: u32) -> Self {
        let pos = Position::new(line, column);
        Self {
            file: None,
            begin: pos,
            end: pos,
        }
    }

    /// A location covering `begin..end`.
    pub fn span(begin: Position, end: Position) -> Self {
        Self {
            file: None,
            begin,
            end,
        }
    }

    /// Attach a file name.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last_column = self.end.column.saturating_sub(1);
        if let Some(file) = &self.file {
            write!(f, "{}:", file)?;
        }
        write!(f, "{}.{}", self.begin.line, self.begin.column)?;
        if self.begin.line < self.end.line {
            write!(f, "-{}.{}", self.end.line, last_column)
        } else if self.begin.column < last_column {
            write!(f, "-{}", last_column)
        } else {
            Ok(())
        }
    }
}
