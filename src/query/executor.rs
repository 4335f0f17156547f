//! Query executor
//!
//! Turns raw occurrence offsets from the suffix tree into matches a user can
//! read: line number, column and the surrounding line. Batches of patterns
//! run in parallel since the index is read-only once built.

use crate::index::build::TextIndex;
use crate::index::types::TextPosition;
use rayon::prelude::*;
use serde::Serialize;

/// One occurrence of a pattern, located within its line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextMatch {
    /// Byte offset of the match in the text
    pub offset: TextPosition,
    /// 1-based line number
    pub line_number: u32,
    /// 1-based byte column
    pub column: u32,
    /// The line holding the start of the match, terminator stripped
    pub line_content: String,
    /// Start of the match within `line_content`
    pub match_start: usize,
    /// End of the match within `line_content` (clamped to the line)
    pub match_end: usize,
}

/// All matches of one pattern
#[derive(Debug, Clone, Serialize)]
pub struct PatternResult {
    pub pattern: String,
    pub matches: Vec<TextMatch>,
}

/// Query executor bound to one index
pub struct QueryExecutor<'a> {
    index: &'a TextIndex,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(index: &'a TextIndex) -> Self {
        Self { index }
    }

    /// Every match of `pattern`, in text order
    pub fn execute(&self, pattern: &str) -> Vec<TextMatch> {
        self.index
            .find(pattern.as_bytes())
            .into_iter()
            .map(|offset| self.locate(offset, pattern.len()))
            .collect()
    }

    /// Run several patterns concurrently; results keep the input order
    pub fn execute_many(&self, patterns: &[String]) -> Vec<PatternResult> {
        patterns
            .par_iter()
            .map(|pattern| PatternResult {
                pattern: pattern.clone(),
                matches: self.execute(pattern),
            })
            .collect()
    }

    /// Occurrence counts only, skipping line resolution
    pub fn count_many(&self, patterns: &[String]) -> Vec<(String, usize)> {
        patterns
            .par_iter()
            .map(|pattern| (pattern.clone(), self.index.count(pattern.as_bytes())))
            .collect()
    }

    fn locate(&self, offset: TextPosition, len: usize) -> TextMatch {
        let text = self.index.text();
        let lines = self.index.lines();

        let line = lines.line_index(offset);
        let range = lines.line_range(text, line);
        let match_start = offset - range.start;
        let match_end = (match_start + len).min(range.len());

        TextMatch {
            offset,
            line_number: line as u32 + 1,
            column: match_start as u32 + 1,
            line_content: String::from_utf8_lossy(&text[range]).into_owned(),
            match_start,
            match_end,
        }
    }
}
