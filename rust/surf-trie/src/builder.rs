//! Level-by-level LOUDS-Sparse construction from sorted keys.

use surf_common::{Result, error::Error, verify_arg};

use crate::{
    label_vector::TERMINATOR,
    level::{Bitmap, Level},
};

/// Accumulates sorted keys into one [`Level`] per trie depth.
///
/// Each key contributes the bytes needed to tell it apart from both its predecessor
/// and its successor; the bytes past that point are kept verbatim as the key's
/// suffix. A builder can be reused: every [`Builder::build`] starts from scratch.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    levels: Vec<Level>,
    total_keys: usize,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Inserts `keys` with their `values`.
    ///
    /// `keys` must be non-empty byte strings in strictly ascending order and
    /// `values` must have the same length. Violations are reported as
    /// `InvalidArgument` and leave the builder empty.
    pub fn build<K: AsRef<[u8]>>(&mut self, keys: &[K], values: &[u32]) -> Result<()> {
        self.reset();
        validate_input(keys, values)?;

        for (i, (key, &value)) in keys.iter().zip(values).enumerate() {
            let key = key.as_ref();
            let next_key = keys.get(i + 1).map_or(&[][..], |k| k.as_ref());
            let level = self.skip_common_prefix(key);
            let level = self.insert_key_bytes_until_unique(key, next_key, level);
            // `level` is one past the depth of the label that made the key unique.
            let leaf = &mut self.levels[level - 1];
            leaf.push_value(value);
            if level < key.len() {
                leaf.set_last_suffix(&key[level..]);
            }
        }
        self.total_keys = keys.len();

        log::debug!(
            "trie built: keys={}, height={}, labels={}, suffix_bytes={}",
            self.total_keys,
            self.height(),
            self.num_labels(),
            self.levels
                .iter()
                .flat_map(|l| l.suffixes())
                .map(Vec::len)
                .sum::<usize>()
        );
        Ok(())
    }

    /// Drops every inserted key.
    pub fn reset(&mut self) {
        self.levels.clear();
        self.total_keys = 0;
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.levels.len()
    }

    #[inline]
    pub fn total_keys(&self) -> usize {
        self.total_keys
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn num_labels(&self) -> usize {
        self.levels.iter().map(Level::num_labels).sum()
    }

    /// Whether the label at `pos` of `level` is a terminator.
    pub fn is_terminator(&self, level: usize, pos: usize) -> bool {
        let level = &self.levels[level];
        level.labels()[pos] == TERMINATOR && !level.read_bit(Bitmap::HasChild, pos)
    }

    /// Whether the label at `pos` of `level` starts a node.
    pub fn is_start_of_node(&self, level: usize, pos: usize) -> bool {
        self.levels[level].read_bit(Bitmap::Louds, pos)
    }

    /// Walks the edges shared with the previous key, marking them as branching.
    ///
    /// Keys arrive sorted, so the shared path is always made of the last label at
    /// each level. A terminator ends the walk since nothing continues past it.
    fn skip_common_prefix(&mut self, key: &[u8]) -> usize {
        let mut level = 0;
        while level < key.len() && self.is_common_prefix(key[level], level) {
            self.levels[level].set_last_has_child();
            level += 1;
        }
        level
    }

    fn is_common_prefix(&self, byte: u8, level: usize) -> bool {
        self.levels.get(level).is_some_and(|l| {
            !l.last_is_terminator() && l.last_label() == Some(byte)
        })
    }

    /// Inserts the bytes of `key` from `level` until it is distinguished from
    /// `next_key`, returning the level past the last inserted label.
    fn insert_key_bytes_until_unique(
        &mut self,
        key: &[u8],
        next_key: &[u8],
        start_level: usize,
    ) -> usize {
        let mut level = start_level;

        // The first byte after the shared prefix extends the node the previous
        // key went through, unless this level has no node yet.
        let start_of_node = self.is_level_empty(level);
        self.insert_key_byte(key[level], level, start_of_node, false);
        level += 1;
        if next_key.len() < level || key[..level] != next_key[..level] {
            return level;
        }

        // Every further byte shared with the successor opens a single-label node.
        while level < key.len() && level < next_key.len() && key[level] == next_key[level] {
            self.insert_key_byte(key[level], level, true, false);
            level += 1;
        }

        if level < key.len() {
            self.insert_key_byte(key[level], level, true, false);
        } else {
            // The successor extends this key: the key ends inside the new node.
            self.insert_key_byte(TERMINATOR, level, true, true);
        }
        level + 1
    }

    fn insert_key_byte(&mut self, label: u8, level: usize, start_of_node: bool, is_term: bool) {
        if level == self.levels.len() {
            self.levels.push(Level::new());
        }
        if level > 0 {
            self.levels[level - 1].set_last_has_child();
        }
        self.levels[level].push_label(label, start_of_node, is_term);
    }

    fn is_level_empty(&self, level: usize) -> bool {
        self.levels.get(level).is_none_or(Level::is_empty)
    }
}

fn validate_input<K: AsRef<[u8]>>(keys: &[K], values: &[u32]) -> Result<()> {
    verify_arg!(values, values.len() == keys.len());
    verify_arg!(keys, keys.len() <= u32::MAX as usize);
    for (i, key) in keys.iter().enumerate() {
        let key = key.as_ref();
        if key.is_empty() {
            return Err(Error::invalid_arg("keys", format!("key {i} is empty")));
        }
        if i > 0 && keys[i - 1].as_ref() >= key {
            return Err(Error::invalid_arg(
                "keys",
                format!("key {i} is not strictly greater than its predecessor"),
            ));
        }
    }
    Ok(())
}
