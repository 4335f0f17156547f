use crate::index::suffix_tree::SuffixTree;
use crate::index::types::{IndexConfig, IndexMeta, TextPosition};
use crate::utils::progress::spinner;
use crate::utils::{LineMap, fold_case, is_likely_binary};
use anyhow::{Context, Result, bail};
use memmap2::Mmap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

/// Source name used for text read from standard input
pub const STDIN_SOURCE: &str = "-";

/// A suffix tree over one byte text, plus what is needed to report
/// matches back in terms of lines.
///
/// The index is immutable; when the text changes, build a new one.
pub struct TextIndex {
    tree: SuffixTree<u8>,
    /// Original bytes, kept when the tree holds a case-folded copy
    original: Option<Vec<u8>>,
    lines: LineMap,
    config: IndexConfig,
    pub meta: IndexMeta,
}

impl TextIndex {
    /// Build an index over in-memory bytes
    pub fn from_bytes(source: &str, content: &[u8], config: IndexConfig) -> Result<Self> {
        if content.len() as u64 > config.max_text_size {
            bail!(
                "{}: text is {} bytes, above the {} byte limit",
                source,
                content.len(),
                config.max_text_size
            );
        }

        if !config.allow_binary && is_likely_binary(content) {
            bail!("{}: content looks binary (pass --binary to index it anyway)", source);
        }

        let started = Instant::now();
        let (tree, original) = if config.case_insensitive {
            (SuffixTree::build(fold_case(content)), Some(content.to_vec()))
        } else {
            (SuffixTree::build(content.to_vec()), None)
        };
        let build_millis = started.elapsed().as_millis() as u64;

        let lines = LineMap::new(content);
        let stats = tree.stats();
        let meta = IndexMeta {
            source: source.to_string(),
            text_size: stats.text_len as u64,
            line_count: lines.line_count() as u64,
            node_count: stats.node_count as u64,
            leaf_count: stats.leaf_count as u64,
            internal_count: stats.internal_count as u64,
            max_depth: stats.max_depth as u64,
            config: config.clone(),
            build_millis,
        };

        Ok(Self {
            tree,
            original,
            lines,
            config,
            meta,
        })
    }

    /// Build an index over a file (memory-mapped) or `-` for stdin
    pub fn open(path: &Path, config: IndexConfig, silent: bool) -> Result<Self> {
        let source = path.display().to_string();

        if source == STDIN_SOURCE {
            let mut content = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut content)
                .context("Failed to read standard input")?;
            return Self::build_with_spinner(&source, &content, config, silent);
        }

        let file = File::open(path).with_context(|| format!("Failed to open {}", source))?;
        let len = file
            .metadata()
            .with_context(|| format!("Failed to stat {}", source))?
            .len();

        // Mapping an empty file fails on some platforms
        if len == 0 {
            return Self::build_with_spinner(&source, &[], config, silent);
        }

        let mmap = unsafe { Mmap::map(&file) }
            .with_context(|| format!("Failed to map {}", source))?;
        Self::build_with_spinner(&source, &mmap, config, silent)
    }

    fn build_with_spinner(
        source: &str,
        content: &[u8],
        config: IndexConfig,
        silent: bool,
    ) -> Result<Self> {
        let progress = spinner(&format!("Indexing {} ({} bytes)...", source, content.len()), silent);
        let index = Self::from_bytes(source, content, config);
        if let Some(progress) = progress {
            progress.finish_and_clear();
        }
        index
    }

    /// Start offsets of `pattern`, ascending
    pub fn find(&self, pattern: &[u8]) -> Vec<TextPosition> {
        if self.config.case_insensitive {
            self.tree.find(&fold_case(pattern))
        } else {
            self.tree.find(pattern)
        }
    }

    /// Number of occurrences of `pattern`
    pub fn count(&self, pattern: &[u8]) -> usize {
        if self.config.case_insensitive {
            self.tree.count(&fold_case(pattern))
        } else {
            self.tree.count(pattern)
        }
    }

    /// The indexed text as it was read (not case-folded)
    pub fn text(&self) -> &[u8] {
        match &self.original {
            Some(original) => original,
            None => self.tree.text(),
        }
    }

    pub fn tree(&self) -> &SuffixTree<u8> {
        &self.tree
    }

    pub fn lines(&self) -> &LineMap {
        &self.lines
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }
}
