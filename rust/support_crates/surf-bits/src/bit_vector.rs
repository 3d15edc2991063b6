//! A fixed-size array of bits.

use std::fmt;
use std::io::{Cursor, Write};

use byteorder::{LE, WriteBytesExt};
use surf_common::{Result, error::Error};

use crate::{WORD_BITS, codec};

/// A fixed-size sequence of bits with `[u64]` storage.
///
/// # Storage Format
///
/// The bits are stored in little-endian order within an array of `u64` words:
/// - Bit 0 corresponds to the least significant bit (LSB) of the first word
/// - Bit 63 corresponds to the most significant bit (MSB) of the first word
/// - Bit 64 corresponds to the LSB of the second word, and so on
///
/// The number of words is `len.div_ceil(64)`. Any bits beyond the vector's length
/// in the final word are guaranteed to be 0.
///
/// # Binary Layout
///
/// `u32 num_bits` followed by `num_bits.div_ceil(64)` little-endian `u64` words.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BitVector {
    num_bits: usize,
    words: Vec<u64>,
}

impl BitVector {
    /// Wraps existing LSB-ordered words.
    ///
    /// Panics if `words.len() != num_bits.div_ceil(64)`. Bits beyond `num_bits` in the
    /// last word are cleared.
    pub fn new(mut words: Vec<u64>, num_bits: usize) -> BitVector {
        assert_eq!(words.len(), num_bits.div_ceil(WORD_BITS));
        Self::mask_tail(&mut words, num_bits);
        BitVector { num_bits, words }
    }

    /// Creates a bit vector of `num_bits` zero bits.
    pub fn empty(num_bits: usize) -> BitVector {
        BitVector {
            num_bits,
            words: vec![0; num_bits.div_ceil(WORD_BITS)],
        }
    }

    /// Creates a bit vector with the bits at `positions` set.
    ///
    /// Panics if any position is `>= num_bits`.
    pub fn from_positions(
        positions: impl IntoIterator<Item = usize>,
        num_bits: usize,
    ) -> BitVector {
        let mut bits = BitVector::empty(num_bits);
        for pos in positions {
            assert!(pos < num_bits, "Index {pos} out of bounds (len: {num_bits})");
            bits.words[pos / WORD_BITS] |= 1u64 << (pos % WORD_BITS);
        }
        bits
    }

    /// Concatenates a sequence of partially filled bitmaps into one vector.
    ///
    /// Each part is `(words, len)`: the first `len` bits of `words` are appended, in
    /// order, right after the bits of the previous part. This is how the per-level
    /// build-time bitmaps are folded into a single level-ordered vector.
    pub fn concat<'a>(parts: impl IntoIterator<Item = (&'a [u64], usize)>) -> BitVector {
        let mut num_bits = 0usize;
        let mut words: Vec<u64> = Vec::new();
        for (src, len) in parts {
            assert!(len <= src.len() * WORD_BITS, "{len} bits from {} words", src.len());
            let mut left = len;
            for &word in src {
                if left == 0 {
                    break;
                }
                let take = left.min(WORD_BITS);
                let word = if take < WORD_BITS {
                    word & ((1u64 << take) - 1)
                } else {
                    word
                };
                let shift = num_bits % WORD_BITS;
                if shift == 0 {
                    words.push(word);
                } else {
                    if let Some(last) = words.last_mut() {
                        *last |= word << shift;
                    }
                    if shift + take > WORD_BITS {
                        words.push(word >> (WORD_BITS - shift));
                    }
                }
                num_bits += take;
                left -= take;
            }
        }
        debug_assert_eq!(words.len(), num_bits.div_ceil(WORD_BITS));
        BitVector { num_bits, words }
    }

    /// Number of bits in the vector.
    #[inline]
    pub fn len(&self) -> usize {
        self.num_bits
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_bits == 0
    }

    #[inline]
    pub fn num_words(&self) -> usize {
        self.words.len()
    }

    /// The underlying LSB-ordered words.
    #[inline]
    pub fn storage(&self) -> &[u64] {
        &self.words
    }

    /// Returns the bit at `pos`.
    ///
    /// # Panics
    /// Panics if `pos >= len()`.
    #[inline]
    pub fn read_bit(&self, pos: usize) -> bool {
        assert!(
            pos < self.num_bits,
            "Index {pos} out of bounds (len: {})",
            self.num_bits
        );
        self.words[pos / WORD_BITS] & (1u64 << (pos % WORD_BITS)) != 0
    }

    /// Counts the set bits in the whole vector.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Distance from `pos` to the next set bit strictly after it.
    ///
    /// Returns `d` such that `pos + d` is the position of the next set bit, or
    /// `len() - pos` if no set bit follows `pos`. The result is always at least 1.
    ///
    /// # Panics
    /// Panics if `pos >= len()`.
    pub fn distance_to_next_set_bit(&self, pos: usize) -> usize {
        assert!(
            pos < self.num_bits,
            "Index {pos} out of bounds (len: {})",
            self.num_bits
        );
        let start = pos + 1;
        if start >= self.num_bits {
            return self.num_bits - pos;
        }

        let mut word_index = start / WORD_BITS;
        let test_bits = self.words[word_index] >> (start % WORD_BITS);
        if test_bits != 0 {
            return 1 + test_bits.trailing_zeros() as usize;
        }

        word_index += 1;
        while word_index < self.words.len() {
            let word = self.words[word_index];
            if word != 0 {
                return word_index * WORD_BITS + word.trailing_zeros() as usize - pos;
            }
            word_index += 1;
        }
        self.num_bits - pos
    }

    /// Number of bytes [`BitVector::write`] emits.
    pub fn serialized_size(&self) -> usize {
        4 + self.words.len() * 8
    }

    /// Heap bytes held by the vector.
    pub fn memory_usage(&self) -> usize {
        self.words.len() * std::mem::size_of::<u64>()
    }

    /// Writes `u32 num_bits` followed by the little-endian words.
    pub fn write<W>(&self, w: &mut W) -> Result<()>
    where
        W: Write + ?Sized,
    {
        let num_bits = u32::try_from(self.num_bits)
            .map_err(|_| Error::invalid_arg("num_bits", "bit vector exceeds u32::MAX bits"))?;
        w.write_u32::<LE>(num_bits)
            .map_err(|e| Error::io("bit vector length", e))?;
        for &word in &self.words {
            w.write_u64::<LE>(word)
                .map_err(|e| Error::io("bit vector words", e))?;
        }
        Ok(())
    }

    /// Reads a vector written by [`BitVector::write`].
    ///
    /// `element` names the vector in decode errors. Fails if the buffer is truncated
    /// or if any bit beyond `num_bits` is set.
    pub fn read(r: &mut Cursor<&[u8]>, element: &str) -> Result<BitVector> {
        let num_bits = codec::read_u32(r, element)? as usize;
        let words = codec::read_u64_words(r, num_bits.div_ceil(WORD_BITS), element)?;
        let partial = num_bits % WORD_BITS;
        if partial != 0 {
            let last = words[words.len() - 1];
            if last >> partial != 0 {
                return Err(Error::invalid_format(element, "bits set beyond length"));
            }
        }
        Ok(BitVector { num_bits, words })
    }

    fn mask_tail(words: &mut [u64], num_bits: usize) {
        let partial = num_bits % WORD_BITS;
        if partial != 0 {
            if let Some(last) = words.last_mut() {
                *last &= (1u64 << partial) - 1;
            }
        }
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pos in 0..self.num_bits {
            f.write_str(if self.read_bit(pos) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitVector({}: {self})", self.num_bits)
    }
}
