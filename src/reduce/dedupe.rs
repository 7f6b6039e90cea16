//! Order-preserving block deduplication.
//!
//! The same diagnostic is printed once per translation unit that triggers
//! it. Keeping only the first block for every key shrinks a kernel-wide log
//! by orders of magnitude while keeping every distinct diagnostic visible.

use std::collections::HashSet;

use super::block::{Block, BlockSource};

/// Keeps the first block seen for every distinct [`Block::key`].
///
/// **Algorithm**:
/// 1. Compute the key of each incoming block
/// 2. Unseen key: append the block, remember the key
/// 3. Seen key: drop the block entirely, even if it differs past the key
///
/// The seen set persists across calls, so feeding several sources through
/// the same deduplicator removes repeats across all of them.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<String>,
    dropped: usize,
}

impl Deduplicator {
    /// Create a deduplicator with an empty seen set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blocks dropped as repeats so far.
    pub fn dropped_count(&self) -> usize {
        self.dropped
    }

    /// Reduce `source` to one block per unseen key, in first-seen order.
    pub fn dedup(&mut self, source: impl BlockSource) -> DedupedLog {
        let mut blocks = Vec::new();

        for block in source.blocks() {
            if self.seen.insert(block.key()) {
                blocks.push(block);
            } else {
                self.dropped += 1;
            }
        }

        tracing::debug!(kept = blocks.len(), dropped = self.dropped, "deduplicated blocks");
        DedupedLog { blocks }
    }
}

/// Key-unique blocks in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupedLog {
    blocks: Vec<Block>,
}

impl DedupedLog {
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Keys of the retained blocks, in order.
    pub fn keys(&self) -> Vec<String> {
        self.blocks.iter().map(Block::key).collect()
    }

    /// Total number of retained lines.
    pub fn line_count(&self) -> usize {
        self.blocks.iter().map(Block::len).sum()
    }

    /// Render back to text, one line per retained line, newline-terminated.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in self.blocks.iter().flat_map(|b| b.lines()) {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

impl IntoIterator for DedupedLog {
    type Item = Block;
    type IntoIter = std::vec::IntoIter<Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.into_iter()
    }
}
