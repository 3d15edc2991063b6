//! Succinct ordered trie index.
//!
//! A [`Trie`] maps byte-string keys to `u32` values. It is built once from sorted
//! keys and encoded as a LOUDS-Sparse trie: edge labels plus a few bitmaps navigated
//! with rank and select, with each key's unshared tail stored verbatim as a suffix.
//! It supports exact lookup, ordered iteration, lower-bound seek, and a compact
//! little-endian binary form.

pub mod builder;
pub mod config;
pub mod iterator;
pub mod label_vector;
pub mod level;
pub mod louds_sparse;
pub mod suffix_vector;
pub mod trie;
pub mod value_vector;

pub use builder::Builder;
pub use config::TrieConfig;
pub use iterator::TrieIterator;
pub use louds_sparse::LoudsSparse;
pub use trie::{Entries, Trie};
