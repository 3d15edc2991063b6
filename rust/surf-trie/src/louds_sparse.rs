//! The immutable LOUDS-Sparse trie.

use std::fmt;
use std::io::{Cursor, Write};

use byteorder::{LE, WriteBytesExt};
use surf_bits::{BitVector, BitVectorRank, BitVectorSelect, codec};
use surf_common::{Result, error::Error, verify_data};

use crate::{
    builder::Builder,
    config::TrieConfig,
    label_vector::{LabelVector, TERMINATOR},
    level::{Bitmap, Level},
    suffix_vector::SuffixVector,
    value_vector::ValueVector,
};

/// Succinct trie over byte-string keys.
///
/// Trie positions index the label vector and the per-edge bitmaps. Nodes are laid out
/// in level order; `louds` marks the first edge of every node and `has_child` marks
/// the edges that lead to a child node. Child `n` (in level order, the root being
/// node 0) starts at `select(louds, n + 1)`, and the edge at `pos` leads to node
/// `rank(has_child, pos)`.
#[derive(Clone)]
pub struct LoudsSparse {
    labels: LabelVector,
    has_child: BitVectorRank,
    louds: BitVectorSelect,
    suffixes: SuffixVector,
    values: ValueVector,
    height: usize,
    total_keys: usize,
}

impl LoudsSparse {
    /// Folds the builder levels into flat level-ordered vectors.
    pub fn from_builder(builder: &Builder, config: &TrieConfig) -> Result<LoudsSparse> {
        config.validate()?;
        let levels = builder.levels();
        for (depth, level) in levels.iter().enumerate() {
            log::trace!(
                "level {depth}: labels={}, suffixes={}, values={}",
                level.num_labels(),
                level.suffixes().len(),
                level.values().len()
            );
        }

        let labels = LabelVector::from_levels(levels.iter().map(Level::labels));
        let has_child = BitVectorRank::new(fold(levels, Bitmap::HasChild), config.rank_block_size);
        let louds = BitVectorSelect::new(fold(levels, Bitmap::Louds));
        let suffixes = SuffixVector::new(
            fold(levels, Bitmap::HasSuffix),
            levels
                .iter()
                .flat_map(|l| l.suffixes().iter().map(Vec::as_slice)),
            config.rank_block_size,
        )?;
        let values = ValueVector::new(
            levels
                .iter()
                .flat_map(|l| l.values().iter().copied())
                .collect(),
        );

        Ok(LoudsSparse {
            labels,
            has_child,
            louds,
            suffixes,
            values,
            height: builder.height(),
            total_keys: builder.total_keys(),
        })
    }

    /// Returns the value stored for `key`.
    pub fn lookup_key(&self, key: &[u8]) -> Option<u32> {
        if self.labels.is_empty() {
            return None;
        }
        let mut pos = self.first_label_pos(0);
        for (level, &byte) in key.iter().enumerate() {
            pos = self.labels.search(byte, pos, self.node_size(pos))?;
            if !self.has_child.read_bit(pos) {
                return self
                    .suffixes
                    .check_suffix(key, level + 1, pos)
                    .then(|| self.values.get(self.value_pos(pos)));
            }
            pos = self.first_label_pos(self.child_node_num(pos));
        }
        // The key ends at a node: it is stored only if that node has a terminator.
        self.is_terminator(pos)
            .then(|| self.values.get(self.value_pos(pos)))
    }

    /// Number of the node the edge at `pos` leads to.
    #[inline]
    pub fn child_node_num(&self, pos: usize) -> usize {
        self.has_child.rank(pos)
    }

    /// Position of the first edge of node `node_num`.
    #[inline]
    pub fn first_label_pos(&self, node_num: usize) -> usize {
        self.louds.select(node_num + 1)
    }

    /// Index into the value vector of the terminating edge at `pos`.
    #[inline]
    pub fn value_pos(&self, pos: usize) -> usize {
        pos - self.has_child.rank(pos)
    }

    /// Number of edges from `pos` to the end of its node.
    #[inline]
    pub fn node_size(&self, pos: usize) -> usize {
        self.louds.distance_to_next_set_bit(pos)
    }

    #[inline]
    pub fn is_end_of_node(&self, pos: usize) -> bool {
        pos + 1 == self.louds.len() || self.louds.read_bit(pos + 1)
    }

    /// Whether the edge at `pos` marks a key ending at its node.
    #[inline]
    pub fn is_terminator(&self, pos: usize) -> bool {
        self.labels.label(pos) == TERMINATOR
            && !self.has_child.read_bit(pos)
            && !self.is_end_of_node(pos)
    }

    #[inline]
    pub fn has_child(&self, pos: usize) -> bool {
        self.has_child.read_bit(pos)
    }

    #[inline]
    pub fn is_start_of_node(&self, pos: usize) -> bool {
        self.louds.read_bit(pos)
    }

    #[inline]
    pub fn label(&self, pos: usize) -> u8 {
        self.labels.label(pos)
    }

    #[inline]
    pub fn suffix(&self, pos: usize) -> &[u8] {
        self.suffixes.get_suffix(pos)
    }

    #[inline]
    pub fn value(&self, pos: usize) -> u32 {
        self.values.get(self.value_pos(pos))
    }

    /// Number of edges in the trie.
    #[inline]
    pub fn num_labels(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn total_keys(&self) -> usize {
        self.total_keys
    }

    pub fn num_nodes(&self) -> usize {
        self.louds.num_ones()
    }

    pub fn labels(&self) -> &LabelVector {
        &self.labels
    }

    pub fn suffixes(&self) -> &SuffixVector {
        &self.suffixes
    }

    /// Heap bytes held by all vectors, lookup tables included.
    pub fn memory_usage(&self) -> usize {
        self.labels.memory_usage()
            + self.has_child.memory_usage()
            + self.louds.memory_usage()
            + self.suffixes.memory_usage()
            + self.values.memory_usage()
    }

    pub fn serialized_size(&self) -> usize {
        8 + self.labels.serialized_size()
            + self.has_child.serialized_size()
            + self.louds.serialized_size()
            + self.suffixes.serialized_size()
            + self.values.serialized_size()
    }

    pub fn write<W>(&self, w: &mut W) -> Result<()>
    where
        W: Write + ?Sized,
    {
        let total_keys = u32::try_from(self.total_keys)
            .map_err(|_| Error::invalid_arg("total_keys", "exceeds u32::MAX"))?;
        let height = u32::try_from(self.height)
            .map_err(|_| Error::invalid_arg("height", "exceeds u32::MAX"))?;
        w.write_u32::<LE>(total_keys)
            .map_err(|e| Error::io("total keys", e))?;
        w.write_u32::<LE>(height)
            .map_err(|e| Error::io("height", e))?;
        self.labels.write(w)?;
        self.has_child.write(w)?;
        self.louds.write(w)?;
        self.suffixes.write(w)?;
        self.values.write(w)
    }

    /// Reads a trie written by [`LoudsSparse::write`], rebuilding the rank and select
    /// tables, and checks that the vectors describe a well-formed trie.
    pub fn read(r: &mut Cursor<&[u8]>, config: &TrieConfig) -> Result<LoudsSparse> {
        config.validate()?;
        let total_keys = codec::read_u32(r, "total keys")? as usize;
        let height = codec::read_u32(r, "height")? as usize;
        let labels = LabelVector::read(r)?;
        let has_child = BitVectorRank::read(r, config.rank_block_size, "hasChild")?;
        let louds = BitVectorSelect::read(r, "louds")?;
        let suffixes = SuffixVector::read(r, config.rank_block_size)?;
        let values = ValueVector::read(r, total_keys)?;

        let trie = LoudsSparse {
            labels,
            has_child,
            louds,
            suffixes,
            values,
            height,
            total_keys,
        };
        trie.validate()?;
        log::debug!(
            "trie decoded: keys={}, height={}, labels={}",
            trie.total_keys,
            trie.height,
            trie.labels.len()
        );
        Ok(trie)
    }

    fn validate(&self) -> Result<()> {
        let num_labels = self.labels.len();
        for (element, len) in [
            ("hasChild", self.has_child.len()),
            ("louds", self.louds.len()),
            ("hasSuffix", self.suffixes.has_suffix().len()),
        ] {
            if len != num_labels {
                return Err(Error::invalid_format(
                    element,
                    format!("{len} bits for {num_labels} labels"),
                ));
            }
        }

        if num_labels == 0 {
            verify_data!(total_keys, self.total_keys == 0);
            verify_data!(height, self.height == 0);
            return Ok(());
        }
        verify_data!(louds, self.louds.read_bit(0));
        let branches = self.has_child.count_ones();
        verify_data!(louds, self.louds.num_ones() == branches + 1);
        // Every child node starts after the edge leading to it.
        let mut child = 0;
        for pos in 0..num_labels {
            if self.has_child.read_bit(pos) {
                child += 1;
                verify_data!(has_child, self.first_label_pos(child) > pos);
            }
        }
        verify_data!(total_keys, num_labels - branches == self.total_keys);
        // A stored height above the level count only sizes iterator buffers.
        let levels = self.compute_height();
        verify_data!(height, levels <= self.height && self.height <= num_labels);
        Ok(())
    }

    /// Counts the levels by walking node ranges: the nodes of a level are numbered
    /// consecutively, and the children of its edges form the next level.
    fn compute_height(&self) -> usize {
        let num_nodes = self.louds.num_ones();
        let (mut lo, mut hi) = (0, 1);
        let mut height = 0;
        while lo < hi {
            height += 1;
            let end = if hi < num_nodes {
                self.first_label_pos(hi)
            } else {
                self.labels.len()
            };
            lo = hi;
            hi = self.has_child.rank(end - 1) + 1;
        }
        height
    }
}

fn fold(levels: &[Level], kind: Bitmap) -> BitVector {
    BitVector::concat(levels.iter().map(|l| (l.bitmap(kind), l.num_labels())))
}

impl fmt::Display for LoudsSparse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "louds sparse:")?;
        writeln!(f, "labels:    {}", self.labels)?;
        writeln!(f, "hasChild:  {}", self.has_child.bits())?;
        writeln!(f, "louds:     {}", self.louds.bits())?;
        write!(f, "hasSuffix: {}", self.suffixes.has_suffix().bits())
    }
}

impl fmt::Debug for LoudsSparse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoudsSparse")
            .field("total_keys", &self.total_keys)
            .field("height", &self.height)
            .field("labels", &self.labels.len())
            .field("suffixes", &self.suffixes.num_suffixes())
            .finish()
    }
}
