//! Bit vector with a block-sampled rank lookup table.

use std::io::{Cursor, Write};

use surf_common::Result;

use crate::{BitVector, WORD_BITS, broadword::popcount_block};

/// Default rank block size, in bits (eight words).
pub const DEFAULT_RANK_BLOCK_SIZE: usize = 512;

/// A [`BitVector`] with `O(1)` rank queries.
///
/// `rank_lut[b]` holds the number of set bits strictly before block `b`; a query adds
/// the popcount of the words inside the block up to the queried position. Only the
/// bits are serialized, the lookup table is rebuilt on load.
#[derive(Clone, Debug)]
pub struct BitVectorRank {
    bits: BitVector,
    block_size: usize,
    rank_lut: Vec<u32>,
}

impl BitVectorRank {
    /// Builds the rank table over `bits` with the given block size.
    ///
    /// `block_size` must be a non-zero multiple of 64.
    pub fn new(bits: BitVector, block_size: usize) -> BitVectorRank {
        assert!(
            block_size != 0 && block_size % WORD_BITS == 0,
            "rank block size {block_size} must be a non-zero multiple of {WORD_BITS}"
        );
        let words_per_block = block_size / WORD_BITS;
        let num_blocks = bits.len().div_ceil(block_size);
        let mut rank_lut = Vec::with_capacity(num_blocks);
        let mut total = 0u32;
        for block in 0..num_blocks {
            rank_lut.push(total);
            let start = block * words_per_block;
            let end = (start + words_per_block).min(bits.num_words());
            total += bits.storage()[start..end]
                .iter()
                .map(|w| w.count_ones())
                .sum::<u32>();
        }
        BitVectorRank {
            bits,
            block_size,
            rank_lut,
        }
    }

    /// Builds the rank table with [`DEFAULT_RANK_BLOCK_SIZE`].
    pub fn with_default_block_size(bits: BitVector) -> BitVectorRank {
        Self::new(bits, DEFAULT_RANK_BLOCK_SIZE)
    }

    /// Number of set bits in `[0, pos]`.
    ///
    /// # Panics
    /// Panics if `pos >= len()`.
    #[inline]
    pub fn rank(&self, pos: usize) -> usize {
        assert!(
            pos < self.bits.len(),
            "Index {pos} out of bounds (len: {})",
            self.bits.len()
        );
        let block = pos / self.block_size;
        let words_per_block = self.block_size / WORD_BITS;
        self.rank_lut[block] as usize
            + popcount_block(
                self.bits.storage(),
                block * words_per_block,
                pos % self.block_size + 1,
            )
    }

    #[inline]
    pub fn read_bit(&self, pos: usize) -> bool {
        self.bits.read_bit(pos)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    #[inline]
    pub fn bits(&self) -> &BitVector {
        &self.bits
    }

    /// Total number of set bits.
    pub fn count_ones(&self) -> usize {
        if self.bits.is_empty() {
            0
        } else {
            self.rank(self.bits.len() - 1)
        }
    }

    pub fn memory_usage(&self) -> usize {
        self.bits.memory_usage() + self.rank_lut.len() * std::mem::size_of::<u32>()
    }

    pub fn serialized_size(&self) -> usize {
        self.bits.serialized_size()
    }

    pub fn write<W>(&self, w: &mut W) -> Result<()>
    where
        W: Write + ?Sized,
    {
        self.bits.write(w)
    }

    /// Reads the bits and rebuilds the rank table with `block_size`.
    pub fn read(r: &mut Cursor<&[u8]>, block_size: usize, element: &str) -> Result<BitVectorRank> {
        let bits = BitVector::read(r, element)?;
        Ok(BitVectorRank::new(bits, block_size))
    }
}
