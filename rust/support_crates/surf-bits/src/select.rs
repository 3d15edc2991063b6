//! Bit vector with a sampled select lookup table.

use std::io::{Cursor, Write};

use surf_common::Result;

use crate::{BitVector, WORD_BITS, broadword::select64};

/// Every `SELECT_SAMPLE_INTERVAL`-th set bit has its position recorded.
pub const SELECT_SAMPLE_INTERVAL: usize = 64;

/// A [`BitVector`] with sampled `select` queries.
///
/// `select_lut[0]` is `0` and `select_lut[i]` is the position of the
/// `i * SELECT_SAMPLE_INTERVAL`-th set bit. A query jumps to the nearest sample at or
/// below the requested rank and scans forward word by word, finishing inside the last
/// word with a broadword select. The table is immutable after construction, so
/// concurrent readers need no synchronization.
#[derive(Clone, Debug)]
pub struct BitVectorSelect {
    bits: BitVector,
    num_ones: usize,
    select_lut: Vec<u32>,
}

impl BitVectorSelect {
    pub fn new(bits: BitVector) -> BitVectorSelect {
        let mut select_lut = vec![0u32];
        let mut num_ones = 0usize;
        for (word_index, &word) in bits.storage().iter().enumerate() {
            let mut w = word;
            while w != 0 {
                num_ones += 1;
                if num_ones % SELECT_SAMPLE_INTERVAL == 0 {
                    let pos = word_index * WORD_BITS + w.trailing_zeros() as usize;
                    select_lut.push(pos as u32);
                }
                w &= w - 1;
            }
        }
        BitVectorSelect {
            bits,
            num_ones,
            select_lut,
        }
    }

    /// Position of the `rank`-th (one-based) set bit.
    ///
    /// # Panics
    /// Panics if `rank` is zero or greater than [`BitVectorSelect::num_ones`].
    pub fn select(&self, rank: usize) -> usize {
        assert!(
            rank >= 1 && rank <= self.num_ones,
            "select rank {rank} out of range 1..={}",
            self.num_ones
        );
        let sample = rank / SELECT_SAMPLE_INTERVAL;
        let mut remaining = rank % SELECT_SAMPLE_INTERVAL;
        if remaining == 0 {
            return self.select_lut[sample] as usize;
        }

        let start = if sample == 0 {
            0
        } else {
            self.select_lut[sample] as usize + 1
        };
        let words = self.bits.storage();
        let mut word_index = start / WORD_BITS;
        let mut word = words[word_index] & (u64::MAX << (start % WORD_BITS));
        loop {
            let ones = word.count_ones() as usize;
            if ones >= remaining {
                return word_index * WORD_BITS + select64(word, remaining);
            }
            remaining -= ones;
            word_index += 1;
            word = words[word_index];
        }
    }

    #[inline]
    pub fn read_bit(&self, pos: usize) -> bool {
        self.bits.read_bit(pos)
    }

    #[inline]
    pub fn distance_to_next_set_bit(&self, pos: usize) -> usize {
        self.bits.distance_to_next_set_bit(pos)
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
    pub fn num_ones(&self) -> usize {
        self.num_ones
    }

    #[inline]
    pub fn bits(&self) -> &BitVector {
        &self.bits
    }

    pub fn memory_usage(&self) -> usize {
        self.bits.memory_usage() + self.select_lut.len() * std::mem::size_of::<u32>()
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

    /// Reads the bits and rebuilds the select samples.
    pub fn read(r: &mut Cursor<&[u8]>, element: &str) -> Result<BitVectorSelect> {
        let bits = BitVector::read(r, element)?;
        Ok(BitVectorSelect::new(bits))
    }
}
