//! Ordered traversal over a [`LoudsSparse`] trie.

use crate::louds_sparse::LoudsSparse;

/// Cursor over the keys of a trie in ascending byte order.
///
/// The cursor records the edge taken at every depth of the current path. A freshly
/// created cursor is invalid; position it with [`TrieIterator::first`] or
/// [`TrieIterator::seek`]. The cursor borrows the trie and never modifies it, so any
/// number of cursors can walk the same trie concurrently.
#[derive(Clone)]
pub struct TrieIterator<'a> {
    trie: &'a LoudsSparse,
    valid: bool,
    /// The current path ends with a terminator edge, which is not part of the key.
    at_terminator: bool,
    labels: Vec<u8>,
    positions: Vec<usize>,
    key: Vec<u8>,
}

impl<'a> TrieIterator<'a> {
    pub fn new(trie: &'a LoudsSparse) -> TrieIterator<'a> {
        TrieIterator {
            trie,
            valid: false,
            at_terminator: false,
            labels: Vec::with_capacity(trie.height()),
            positions: Vec::with_capacity(trie.height()),
            key: Vec::new(),
        }
    }

    /// Positions the cursor at the smallest key.
    pub fn first(&mut self) {
        self.reset();
        if self.trie.num_labels() == 0 {
            return;
        }
        let pos = self.trie.first_label_pos(0);
        self.push(pos);
        self.move_to_left_most_key();
    }

    /// Advances to the next key; the cursor becomes invalid past the last one.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        if !self.valid {
            return;
        }
        if let Some(pos) = self.next_pos() {
            self.push(pos);
            self.move_to_left_most_key();
        }
    }

    /// Positions the cursor at the smallest key greater than or equal to `target`.
    ///
    /// Returns `true` if the cursor is valid and its key starts with `target`, i.e.
    /// some stored key has `target` as a prefix.
    pub fn seek(&mut self, target: &[u8]) -> bool {
        self.reset();
        if self.trie.num_labels() == 0 {
            return false;
        }

        let mut pos = self.trie.first_label_pos(0);
        for (level, &byte) in target.iter().enumerate() {
            let size = self.trie.node_size(pos);
            let Some(found) = self.trie.labels().search(byte, pos, size) else {
                self.move_to_left_in_next_sub_trie(pos, size, byte);
                return false;
            };
            pos = found;
            self.push(pos);

            if !self.trie.has_child(pos) {
                // The path ends here: compare the stored suffix with what is left of
                // the target.
                let rest = &target[level + 1..];
                let suffix = self.trie.suffix(pos);
                if suffix >= rest {
                    self.land();
                    return suffix.starts_with(rest);
                }
                self.valid = true;
                self.next();
                return false;
            }
            pos = self.trie.first_label_pos(self.trie.child_node_num(pos));
        }

        // Every key below the current node extends the target.
        self.push(pos);
        self.move_to_left_most_key();
        true
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Key at the cursor: the edge labels of the path followed by the stored suffix.
    ///
    /// Empty when the cursor is invalid.
    pub fn key(&self) -> &[u8] {
        if self.valid { &self.key } else { &[] }
    }

    /// Value of the key at the cursor.
    ///
    /// # Panics
    /// Panics if the cursor is invalid.
    pub fn value(&self) -> u32 {
        assert!(self.valid, "value() on an invalid trie iterator");
        let pos = self.positions[self.positions.len() - 1];
        self.trie.value(pos)
    }

    fn reset(&mut self) {
        self.valid = false;
        self.at_terminator = false;
        self.labels.clear();
        self.positions.clear();
        self.key.clear();
    }

    fn push(&mut self, pos: usize) {
        self.labels.push(self.trie.label(pos));
        self.positions.push(pos);
    }

    /// Descends along the first edge of every node until an edge without child.
    fn move_to_left_most_key(&mut self) {
        let mut pos = self.positions[self.positions.len() - 1];
        while self.trie.has_child(pos) {
            pos = self.trie.first_label_pos(self.trie.child_node_num(pos));
            self.push(pos);
        }
        self.land();
    }

    /// Marks the cursor valid at the terminating edge on top of the path and
    /// materializes its key.
    fn land(&mut self) {
        let pos = self.positions[self.positions.len() - 1];
        self.at_terminator = self.trie.is_terminator(pos);
        let path_len = self.labels.len() - usize::from(self.at_terminator);
        self.key.clear();
        self.key.extend_from_slice(&self.labels[..path_len]);
        self.key.extend_from_slice(self.trie.suffix(pos));
        self.valid = true;
    }

    /// Pops the path up to the deepest edge that has a right sibling and returns
    /// that sibling's position, or invalidates the cursor if there is none.
    fn next_pos(&mut self) -> Option<usize> {
        self.at_terminator = false;
        while let Some(last) = self.positions.pop() {
            self.labels.pop();
            let pos = last + 1;
            if pos < self.trie.num_labels() && !self.trie.is_start_of_node(pos) {
                return Some(pos);
            }
        }
        self.valid = false;
        None
    }

    /// Moves to the smallest key of the first subtree to the right of `byte` in the
    /// node starting at `pos`.
    fn move_to_left_in_next_sub_trie(&mut self, pos: usize, size: usize, byte: u8) {
        match self.trie.labels().search_greater_than(byte, pos, size) {
            Ok(greater) => {
                self.push(greater);
                self.move_to_left_most_key();
            }
            Err(last) => {
                // Everything in this node sorts before the target.
                self.push(last);
                if let Some(next) = self.next_pos() {
                    self.push(next);
                    self.move_to_left_most_key();
                }
            }
        }
    }
}
