//! Word-level popcount and select primitives.

use std::sync::LazyLock;

use crate::WORD_BITS;

/// `SELECT_IN_BYTE_LUT[b][k]` is the position of the `k`-th (zero-based) set bit of
/// byte `b`, or `8` when `b` has fewer than `k + 1` set bits.
static SELECT_IN_BYTE_LUT: LazyLock<[[u8; 8]; 256]> = LazyLock::new(|| {
    let mut lut = [[8u8; 8]; 256];
    for (byte, row) in lut.iter_mut().enumerate() {
        let mut rank = 0;
        for bit in 0..8 {
            if byte & (1 << bit) != 0 {
                row[rank] = bit as u8;
                rank += 1;
            }
        }
    }
    lut
});

/// Position of the `rank`-th (zero-based) set bit within `byte`, `8` if there is none.
#[inline]
pub fn select_in_byte(byte: u8, rank: usize) -> u8 {
    SELECT_IN_BYTE_LUT[byte as usize][rank]
}

/// Returns the zero-based position of the `nth` (one-based) set bit of `x`.
///
/// Uses the broadword byte-sum technique: compute cumulative per-byte popcounts in a
/// single multiplication, locate the byte holding the target bit with a parallel
/// comparison, then finish with a byte lookup.
///
/// `nth` must be in `1..=x.count_ones()`.
#[inline]
pub fn select64(x: u64, nth: usize) -> usize {
    const ONES_STEP_4: u64 = 0x1111_1111_1111_1111;
    const ONES_STEP_8: u64 = 0x0101_0101_0101_0101;
    const MSBS_STEP_8: u64 = 0x80 * ONES_STEP_8;

    debug_assert!(
        nth >= 1 && nth <= x.count_ones() as usize,
        "select64: nth {nth} out of range for {x:#x}"
    );

    let k = (nth - 1) as u64;
    let mut s = x;
    s = s.wrapping_sub((s & (0xA * ONES_STEP_4)) >> 1);
    s = (s & (0x3 * ONES_STEP_4)) + ((s >> 2) & (0x3 * ONES_STEP_4));
    s = (s + (s >> 4)) & (0xF * ONES_STEP_8);
    let byte_sums = s.wrapping_mul(ONES_STEP_8);

    let k_step_8 = k.wrapping_mul(ONES_STEP_8);
    let geq_k_step_8 = (k_step_8 | MSBS_STEP_8).wrapping_sub(byte_sums) & MSBS_STEP_8;
    let place = geq_k_step_8.count_ones() as usize * 8;
    let byte_rank = k - (((byte_sums << 8) >> place) & 0xFF);
    place + select_in_byte(((x >> place) & 0xFF) as u8, byte_rank as usize) as usize
}

/// Counts the set bits among the first `num_bits` bits of `words[offset..]`.
#[inline]
pub fn popcount_block(words: &[u64], offset: usize, num_bits: usize) -> usize {
    if num_bits == 0 {
        return 0;
    }
    let last_word = (num_bits - 1) / WORD_BITS;
    let last_bits = (num_bits - 1) % WORD_BITS;
    let full: usize = words[offset..offset + last_word]
        .iter()
        .map(|w| w.count_ones() as usize)
        .sum();
    let last = words[offset + last_word] << (WORD_BITS - 1 - last_bits);
    full + last.count_ones() as usize
}
