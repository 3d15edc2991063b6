//! Test utilities for the trie crates.
//!
//! Provides deterministic key-set generators shared by the unit tests, the
//! integration tests and the command-line tool's tests.

pub mod data_gen;
