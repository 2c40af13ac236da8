//! Parse Utilities
//!
//! Source provenance attached to IR nodes and diagnostics. The parser that
//! produces the IR owns the source text; spans here only carry positions.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ParseLocation {
    pub file_path: Option<String>,
    pub offset: usize,
    pub line: usize,
    pub col: usize,
}

impl ParseLocation {
    pub fn new(file_path: Option<String>, offset: usize, line: usize, col: usize) -> Self {
        ParseLocation {
            file_path,
            offset,
            line,
            col,
        }
    }

    /// Move the location forward by `delta` characters on the same line.
    pub fn move_by(&self, delta: usize) -> ParseLocation {
        ParseLocation::new(
            self.file_path.clone(),
            self.offset + delta,
            self.line,
            self.col + delta,
        )
    }
}

impl fmt::Display for ParseLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = self.file_path.as_deref().unwrap_or("<unknown>");
        write!(f, "{}@{}:{}", file, self.line, self.col)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ParseSourceSpan {
    pub start: ParseLocation,
    pub end: ParseLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ParseSourceSpan {
    pub fn new(start: ParseLocation, end: ParseLocation) -> Self {
        ParseSourceSpan {
            start,
            end,
            details: None,
        }
    }

    /// A span of `length` characters that does not cross a line break.
    pub fn single_line(start: ParseLocation, length: usize) -> Self {
        let end = start.move_by(length);
        ParseSourceSpan::new(start, end)
    }

    pub fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }

    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for ParseSourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)?;
        if let Some(details) = &self.details {
            write!(f, ", {}", details)?;
        }
        Ok(())
    }
}
