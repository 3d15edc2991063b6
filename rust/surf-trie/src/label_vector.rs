//! Edge labels of all trie nodes, concatenated in level order.

use std::fmt;
use std::io::{Cursor, Write};

use byteorder::{LE, WriteBytesExt};
use surf_bits::codec;
use surf_common::{Result, error::Error};

/// Label marking that a key ends at the node holding it.
///
/// A terminator is always the first label of its node and never has a child, which
/// is how it is told apart from a real `0xFF` key byte.
pub const TERMINATOR: u8 = 0xFF;

/// Flat array of single-byte edge labels.
///
/// A node occupies a contiguous label range `[off, off + size)`; the labels within a
/// node are strictly increasing, except that a leading [`TERMINATOR`] may precede
/// them.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LabelVector {
    labels: Vec<u8>,
}

impl LabelVector {
    pub fn new(labels: Vec<u8>) -> LabelVector {
        LabelVector { labels }
    }

    /// Concatenates per-level labels.
    pub fn from_levels<'a>(levels: impl IntoIterator<Item = &'a [u8]>) -> LabelVector {
        LabelVector {
            labels: levels.into_iter().flatten().copied().collect(),
        }
    }

    /// Label at trie position `pos`.
    #[inline]
    pub fn label(&self, pos: usize) -> u8 {
        self.labels[pos]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.labels
    }

    /// Finds `label` among the `size` labels of the node starting at `off`.
    ///
    /// A leading terminator is skipped when the node has more than one label, so a
    /// real `0xFF` key byte is never confused with it.
    pub fn search(&self, label: u8, off: usize, size: usize) -> Option<usize> {
        let (start, size) = self.skip_terminator(off, size);
        let end = (start + size).min(self.labels.len());
        let node = &self.labels[start..end];
        let found = if node.len() < 4 {
            node.iter().position(|&b| b == label)
        } else {
            node.binary_search(&label).ok()
        };
        found.map(|i| start + i)
    }

    /// Finds the first label strictly greater than `label` in the node starting at
    /// `pos`.
    ///
    /// Returns `Ok(position)` on success. When every label of the node is less than or
    /// equal to `label`, returns `Err` with the position of the node's last label so
    /// that the caller can advance past the node.
    pub fn search_greater_than(
        &self,
        label: u8,
        pos: usize,
        size: usize,
    ) -> std::result::Result<usize, usize> {
        let (start, size) = self.skip_terminator(pos, size);
        let node = &self.labels[start..start + size];
        let idx = node.partition_point(|&b| b <= label);
        if idx == size {
            Err(start + size - 1)
        } else {
            Ok(start + idx)
        }
    }

    #[inline]
    fn skip_terminator(&self, off: usize, size: usize) -> (usize, usize) {
        if size > 1 && self.labels[off] == TERMINATOR {
            (off + 1, size - 1)
        } else {
            (off, size)
        }
    }

    pub fn memory_usage(&self) -> usize {
        self.labels.len()
    }

    pub fn serialized_size(&self) -> usize {
        4 + self.labels.len()
    }

    pub fn write<W>(&self, w: &mut W) -> Result<()>
    where
        W: Write + ?Sized,
    {
        let len = u32::try_from(self.labels.len())
            .map_err(|_| Error::invalid_arg("labels", "label count exceeds u32::MAX"))?;
        w.write_u32::<LE>(len)
            .map_err(|e| Error::io("labels", e))?;
        w.write_all(&self.labels)
            .map_err(|e| Error::io("labels", e))
    }

    pub fn read(r: &mut Cursor<&[u8]>) -> Result<LabelVector> {
        let len = codec::read_u32(r, "labels")? as usize;
        let labels = codec::read_bytes(r, len, "labels")?;
        Ok(LabelVector { labels })
    }
}

impl fmt::Display for LabelVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.labels {
            let c = match b {
                TERMINATOR => '$',
                b' '..=b'~' => b as char,
                _ => '.',
            };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for LabelVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LabelVector({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_skips_leading_terminator() {
        // Nodes: [$ a b c d e] [x] [$ \xff]
        let labels = LabelVector::new(b"\xffabcdex\xff\xff".to_vec());
        assert_eq!(labels.search(b'c', 0, 6), Some(3));
        assert_eq!(labels.search(b'e', 0, 6), Some(5));
        assert_eq!(labels.search(b'x', 0, 6), None);
        assert_eq!(labels.search(b'x', 6, 1), Some(6));
        assert_eq!(labels.search(TERMINATOR, 7, 2), Some(8));
        assert_eq!(labels.search(b'a', 7, 2), None);
    }

    #[test]
    fn test_search_greater_than() {
        let labels = LabelVector::new(b"\xffbdfz".to_vec());
        assert_eq!(labels.search_greater_than(b'a', 0, 4), Ok(1));
        assert_eq!(labels.search_greater_than(b'b', 0, 4), Ok(2));
        assert_eq!(labels.search_greater_than(b'e', 0, 4), Ok(3));
        assert_eq!(labels.search_greater_than(b'f', 0, 4), Err(3));
        assert_eq!(labels.search_greater_than(b'f', 1, 4), Ok(4));
        assert_eq!(labels.search_greater_than(b'z', 1, 4), Err(4));
    }

    #[test]
    fn test_display() {
        let labels = LabelVector::new(b"\xffab\n".to_vec());
        assert_eq!(labels.to_string(), "$ab.");
    }

    #[test]
    fn test_write_read_labels() {
        let labels = LabelVector::new(b"\xffab\x00".to_vec());
        let mut buf = Vec::new();
        labels.write(&mut buf).unwrap();
        let mut r = Cursor::new(&buf[..]);
        let parsed = LabelVector::read(&mut r).unwrap();
        assert_eq!(parsed.len(), 4);
        assert_eq!(parsed.label(0), TERMINATOR);
        assert_eq!(parsed.label(2), b'b');
        assert_eq!(parsed.label(3), 0);
        assert_eq!(parsed.as_bytes(), labels.as_bytes());
    }

    #[test]
    fn test_read_truncated() {
        let mut buf = Vec::new();
        LabelVector::new(b"abc".to_vec()).write(&mut buf).unwrap();
        buf.pop();
        let err = LabelVector::read(&mut Cursor::new(&buf[..])).unwrap_err();
        assert!(err.is_invalid_format());
    }
}
