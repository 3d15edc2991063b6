//! Build-time staging for one trie depth.

use surf_bits::WORD_BITS;

/// Selects one of the per-level bitmaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bitmap {
    HasChild,
    Louds,
    HasSuffix,
}

/// Labels, bitmaps, suffixes and values appended at one depth of the trie while
/// keys are inserted.
///
/// Bitmap storage grows by one word every 64 labels, so the bit of the last appended
/// label is always addressable.
#[derive(Debug, Clone, Default)]
pub struct Level {
    labels: Vec<u8>,
    has_child: Vec<u64>,
    louds: Vec<u64>,
    has_suffix: Vec<u64>,
    suffixes: Vec<Vec<u8>>,
    values: Vec<u32>,
    last_is_terminator: bool,
}

impl Level {
    pub fn new() -> Level {
        Level::default()
    }

    #[inline]
    pub fn num_labels(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[inline]
    pub fn last_label(&self) -> Option<u8> {
        self.labels.last().copied()
    }

    /// Whether the last appended label is a terminator, which can never be extended.
    #[inline]
    pub fn last_is_terminator(&self) -> bool {
        self.last_is_terminator
    }

    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    pub fn bitmap(&self, kind: Bitmap) -> &[u64] {
        match kind {
            Bitmap::HasChild => &self.has_child,
            Bitmap::Louds => &self.louds,
            Bitmap::HasSuffix => &self.has_suffix,
        }
    }

    pub fn suffixes(&self) -> &[Vec<u8>] {
        &self.suffixes
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Appends a label, marking it as the first label of a new node if requested.
    pub fn push_label(&mut self, label: u8, start_of_node: bool, is_terminator: bool) {
        if self.labels.len() % WORD_BITS == 0 {
            self.has_child.push(0);
            self.louds.push(0);
            self.has_suffix.push(0);
        }
        self.labels.push(label);
        if start_of_node {
            set_bit(&mut self.louds, self.labels.len() - 1);
        }
        self.last_is_terminator = is_terminator;
    }

    /// Marks the last appended label as continuing into a child node.
    pub fn set_last_has_child(&mut self) {
        debug_assert!(!self.labels.is_empty());
        set_bit(&mut self.has_child, self.labels.len() - 1);
    }

    /// Attaches `suffix` to the last appended label.
    pub fn set_last_suffix(&mut self, suffix: &[u8]) {
        debug_assert!(!self.labels.is_empty());
        set_bit(&mut self.has_suffix, self.labels.len() - 1);
        self.suffixes.push(suffix.to_vec());
    }

    pub fn push_value(&mut self, value: u32) {
        self.values.push(value);
    }

    /// Clears the level, keeping its allocations.
    pub fn reset(&mut self) {
        self.labels.clear();
        self.has_child.clear();
        self.louds.clear();
        self.has_suffix.clear();
        self.suffixes.clear();
        self.values.clear();
        self.last_is_terminator = false;
    }

    pub fn read_bit(&self, kind: Bitmap, pos: usize) -> bool {
        assert!(pos < self.labels.len());
        self.bitmap(kind)[pos / WORD_BITS] & (1u64 << (pos % WORD_BITS)) != 0
    }
}

#[inline]
fn set_bit(words: &mut [u64], pos: usize) {
    words[pos / WORD_BITS] |= 1u64 << (pos % WORD_BITS);
}
