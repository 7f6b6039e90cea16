//! Block splitting.
//!
//! A block is a maximal run of lines bounded by delimiter lines. A delimiter
//! line closes the block in progress and opens the next one, so every block
//! after the first starts with its delimiter.

/// Literal marker the bug detector prints around each diagnostic header.
pub const DEFAULT_DELIMITER: &str = "---";

/// Decides which lines open a new block.
pub trait Boundary {
    fn is_boundary(&self, line: &str) -> bool;
}

impl<F> Boundary for F
where
    F: Fn(&str) -> bool,
{
    fn is_boundary(&self, line: &str) -> bool {
        self(line)
    }
}

/// Boundary matching any line that contains a literal substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker(String);

impl Marker {
    pub fn new(marker: impl Into<String>) -> Self {
        Self(marker.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Marker {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl Boundary for Marker {
    fn is_boundary(&self, line: &str) -> bool {
        line.contains(self.0.as_str())
    }
}

/// One diagnostic unit: an ordered, non-empty run of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    lines: Vec<String>,
}

impl Block {
    /// Build a block from its lines.
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Deduplication identity: the first two lines joined by a newline, or
    /// the whole block when it is shorter than that.
    pub fn key(&self) -> String {
        let head = &self.lines[..self.lines.len().min(2)];
        head.join("\n")
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// Anything that can be read as a sequence of blocks.
pub trait BlockSource {
    type Iter: Iterator<Item = Block>;

    fn blocks(self) -> Self::Iter;
}

impl<I: Iterator<Item = Block>> BlockSource for I {
    type Iter = I;

    fn blocks(self) -> Self::Iter {
        self
    }
}

/// Streaming block splitter over an iterator of lines.
///
/// Emits a block every time a boundary line arrives and the pending block is
/// non-empty, then flushes whatever is pending once the lines run out. A
/// leading boundary therefore never produces an empty block, and trailing
/// content without a closing delimiter is kept.
pub struct Blocks<I, B> {
    lines: I,
    boundary: B,
    pending: Vec<String>,
}

impl<I, B> Blocks<I, B>
where
    I: Iterator<Item = String>,
    B: Boundary,
{
    pub fn new<L>(lines: L, boundary: B) -> Self
    where
        L: IntoIterator<IntoIter = I>,
    {
        Self {
            lines: lines.into_iter(),
            boundary,
            pending: Vec::new(),
        }
    }
}

impl<I, B> Iterator for Blocks<I, B>
where
    I: Iterator<Item = String>,
    B: Boundary,
{
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        for line in self.lines.by_ref() {
            if self.boundary.is_boundary(&line) && !self.pending.is_empty() {
                let done = std::mem::replace(&mut self.pending, vec![line]);
                return Some(Block::new(done));
            }
            self.pending.push(line);
        }

        if self.pending.is_empty() {
            None
        } else {
            Some(Block::new(std::mem::take(&mut self.pending)))
        }
    }
}
