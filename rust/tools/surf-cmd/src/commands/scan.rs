//! Scan command implementation

use anyhow::Result;
use surf_trie::Trie;

use crate::utils::{display_key, load_trie};

pub fn run(
    prefix: Option<String>,
    from: Option<String>,
    limit: Option<usize>,
    trie_path: String,
) -> Result<()> {
    let trie = load_trie(&trie_path)?;
    let lines = scan(&trie, prefix.as_deref(), from.as_deref(), limit);
    if lines.is_empty() {
        println!("No entries found.");
    }
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

/// Entries in key order, formatted as `key\tvalue`.
///
/// With `prefix`, only keys starting with it are listed. With `from`, listing starts
/// at the smallest key greater than or equal to it.
pub fn scan(
    trie: &Trie,
    prefix: Option<&str>,
    from: Option<&str>,
    limit: Option<usize>,
) -> Vec<String> {
    let limit = limit.unwrap_or(usize::MAX);
    let format = |(key, value): (Vec<u8>, u32)| format!("{}\t{value}", display_key(&key));

    if let Some(prefix) = prefix {
        return trie
            .scan_prefix(prefix.as_bytes())
            .take(limit)
            .map(format)
            .collect();
    }

    let mut it = trie.iterator();
    match from {
        Some(from) => {
            it.seek(from.as_bytes());
        }
        None => it.first(),
    }
    let mut lines = Vec::new();
    while it.is_valid() && lines.len() < limit {
        lines.push(format((it.key().to_vec(), it.value())));
        it.next();
    }
    lines
}
