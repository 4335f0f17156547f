//! Line map for turning byte offsets into line numbers

use std::ops::Range;

/// Start offset of every line in a text
#[derive(Debug, Clone)]
pub struct LineMap {
    starts: Vec<usize>,
    len: usize,
}

impl LineMap {
    pub fn new(content: &[u8]) -> Self {
        let mut starts = vec![0];
        starts.extend(
            memchr::memchr_iter(b'\n', content)
                .map(|i| i + 1)
                .filter(|&start| start < content.len()),
        );
        Self {
            starts,
            len: content.len(),
        }
    }

    /// Number of lines (an empty text has none)
    pub fn line_count(&self) -> usize {
        if self.len == 0 { 0 } else { self.starts.len() }
    }

    /// Zero-based line holding byte `offset`
    pub fn line_index(&self, offset: usize) -> usize {
        self.starts.partition_point(|&start| start <= offset) - 1
    }

    /// Byte range of line `index`, without its line terminator
    pub fn line_range(&self, content: &[u8], index: usize) -> Range<usize> {
        let start = self.starts[index];
        let mut end = self.starts.get(index + 1).copied().unwrap_or(self.len);
        if end > start && content[end - 1] == b'\n' {
            end -= 1;
        }
        if end > start && content[end - 1] == b'\r' {
            end -= 1;
        }
        start..end
    }
}
