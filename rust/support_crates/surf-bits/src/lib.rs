//! Succinct bit vectors for the LOUDS-Sparse trie.
//!
//! - [`BitVector`]: fixed-size `[u64]` bit storage with a little-endian binary layout.
//! - [`BitVectorRank`]: adds a block-sampled prefix popcount table for constant-time
//!   `rank` queries.
//! - [`BitVectorSelect`]: adds a sparse sample of one-bit positions for
//!   `select` queries that only scan a bounded number of words.
//!
//! Positions are zero-based, ranks are one-based: `rank(pos)` counts the set bits in
//! `[0, pos]`, and `select(r)` returns the position of the `r`-th set bit.

pub mod bit_vector;
pub mod broadword;
pub mod codec;
pub mod rank;
pub mod select;


pub use bit_vector::BitVector;
pub use rank::BitVectorRank;
pub use select::BitVectorSelect;

/// Number of bits in a storage word.
pub const WORD_BITS: usize = 64;
