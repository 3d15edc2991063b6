//! Inspect command implementation

use anyhow::Result;
use std::fmt::Write;
use surf_trie::Trie;

use crate::utils::{format_size, load_trie};

pub fn run(verbose: u8, trie_path: String) -> Result<()> {
    let trie = load_trie(&trie_path)?;
    print!("{}", summary(&trie, verbose)?);
    Ok(())
}

/// Human-readable description of a trie. With `verbose > 0` the LOUDS-Sparse
/// vectors are dumped as well.
pub fn summary(trie: &Trie, verbose: u8) -> Result<String> {
    let ls = trie.louds_sparse();
    let suffixes = ls.suffixes();
    let mut out = String::new();
    writeln!(out, "Keys: {}", trie.len())?;
    writeln!(out, "Height: {}", trie.height())?;
    writeln!(out, "Nodes: {}", ls.num_nodes())?;
    writeln!(out, "Labels: {}", ls.num_labels())?;
    writeln!(
        out,
        "Suffixes: {} ({} bytes)",
        suffixes.num_suffixes(),
        suffixes.data_len()
    )?;
    writeln!(
        out,
        "Serialized size: {}",
        format_size(trie.serialized_size() as u64)
    )?;
    writeln!(out, "  labels: {} bytes", ls.labels().serialized_size())?;
    writeln!(out, "  suffixes: {} bytes", suffixes.serialized_size())?;
    writeln!(
        out,
        "Memory usage: {}",
        format_size(trie.memory_usage() as u64)
    )?;
    if verbose > 0 {
        writeln!(out, "{trie}")?;
    }
    Ok(out)
}
