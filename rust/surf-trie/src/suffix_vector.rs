//! Unconsumed key suffixes stored behind terminating edges.

use std::io::{Cursor, Write};

use byteorder::{LE, WriteBytesExt};
use surf_bits::{BitVector, BitVectorRank, codec};
use surf_common::{Result, error::Error, verify_data};

/// Suffix bytes of the keys whose path became unique before the key was exhausted.
///
/// `has_suffix` has one bit per trie edge; for an edge with its bit set,
/// `offsets[rank(pos) - 1]` is the start of its suffix in `data` and the suffix runs
/// to the next offset (or to the end of `data` for the last one).
#[derive(Clone, Debug)]
pub struct SuffixVector {
    has_suffix: BitVectorRank,
    offsets: Vec<u32>,
    data: Vec<u8>,
}

impl SuffixVector {
    /// Assembles the vector from level-ordered `has_suffix` bits and the suffixes of
    /// each level, in edge order.
    pub fn new<'a>(
        has_suffix: BitVector,
        suffixes: impl IntoIterator<Item = &'a [u8]>,
        rank_block_size: usize,
    ) -> Result<SuffixVector> {
        let mut offsets = Vec::new();
        let mut data = Vec::new();
        for suffix in suffixes {
            let offset = u32::try_from(data.len())
                .map_err(|_| Error::invalid_arg("suffixes", "suffix data exceeds u32::MAX"))?;
            offsets.push(offset);
            data.extend_from_slice(suffix);
        }
        debug_assert_eq!(offsets.len(), has_suffix.count_ones());
        Ok(SuffixVector {
            has_suffix: BitVectorRank::new(has_suffix, rank_block_size),
            offsets,
            data,
        })
    }

    /// Suffix stored for the edge at `pos`; empty if the edge has none.
    pub fn get_suffix(&self, pos: usize) -> &[u8] {
        if !self.has_suffix.read_bit(pos) {
            return &[];
        }
        let idx = self.has_suffix.rank(pos) - 1;
        let start = self.offsets[idx] as usize;
        let end = self
            .offsets
            .get(idx + 1)
            .map_or(self.data.len(), |&off| off as usize);
        &self.data[start..end]
    }

    /// Checks that the suffix stored at `pos` equals `key[level..]`.
    ///
    /// If `level` is at or past the end of `key`, only an empty suffix matches.
    pub fn check_suffix(&self, key: &[u8], level: usize, pos: usize) -> bool {
        let suffix = self.get_suffix(pos);
        match key.get(level..) {
            Some(rest) => suffix == rest,
            None => suffix.is_empty(),
        }
    }

    #[inline]
    pub fn has_suffix(&self) -> &BitVectorRank {
        &self.has_suffix
    }

    #[inline]
    pub fn num_suffixes(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    pub fn data_len(&self) -> usize {
        self.data.len()
    }

    pub fn memory_usage(&self) -> usize {
        self.has_suffix.memory_usage()
            + self.offsets.len() * std::mem::size_of::<u32>()
            + self.data.len()
    }

    pub fn serialized_size(&self) -> usize {
        self.has_suffix.serialized_size() + 8 + self.offsets.len() * 4 + self.data.len()
    }

    pub fn write<W>(&self, w: &mut W) -> Result<()>
    where
        W: Write + ?Sized,
    {
        self.has_suffix.write(w)?;
        let offsets_len = u32::try_from(self.offsets.len() * 4)
            .map_err(|_| Error::invalid_arg("suffixes", "too many suffixes"))?;
        let data_len = u32::try_from(self.data.len())
            .map_err(|_| Error::invalid_arg("suffixes", "suffix data exceeds u32::MAX"))?;
        w.write_u32::<LE>(offsets_len)
            .map_err(|e| Error::io("suffix offsets", e))?;
        w.write_u32::<LE>(data_len)
            .map_err(|e| Error::io("suffix data", e))?;
        for &offset in &self.offsets {
            w.write_u32::<LE>(offset)
                .map_err(|e| Error::io("suffix offsets", e))?;
        }
        w.write_all(&self.data)
            .map_err(|e| Error::io("suffix data", e))
    }

    pub fn read(r: &mut Cursor<&[u8]>, rank_block_size: usize) -> Result<SuffixVector> {
        let has_suffix = BitVectorRank::read(r, rank_block_size, "hasSuffix")?;
        let offsets_len = codec::read_u32(r, "suffix offsets")? as usize;
        let data_len = codec::read_u32(r, "suffix data")? as usize;
        verify_data!(offsets_len, offsets_len % 4 == 0);
        let num_suffixes = offsets_len / 4;
        verify_data!(num_suffixes, num_suffixes == has_suffix.count_ones());
        let offsets = codec::read_u32_words(r, num_suffixes, "suffix offsets")?;
        let data = codec::read_bytes(r, data_len, "suffix data")?;

        verify_data!(offsets, offsets.is_sorted());
        verify_data!(offsets, offsets.last().is_none_or(|&o| o as usize <= data_len));
        Ok(SuffixVector {
            has_suffix,
            offsets,
            data,
        })
    }
}
