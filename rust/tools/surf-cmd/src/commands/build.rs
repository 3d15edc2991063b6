//! Build command implementation

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use surf_trie::Trie;

use crate::utils::{format_size, validate_file_exists};

pub fn run(input: String, output: String) -> Result<()> {
    validate_file_exists(&input)?;
    let trie = build_trie(Path::new(&input))?;
    let buf = trie.to_vec().context("Failed to serialize trie")?;
    std::fs::write(&output, &buf).with_context(|| format!("Failed to write trie: {output}"))?;

    println!("Keys: {}", trie.len());
    println!("Height: {}", trie.height());
    println!("Size: {} ({} bytes)", format_size(buf.len() as u64), buf.len());
    Ok(())
}

/// Builds a trie from the key file at `path`.
pub fn build_trie(path: &Path) -> Result<Trie> {
    let data =
        std::fs::read(path).with_context(|| format!("Failed to read key file: {}", path.display()))?;
    let (keys, values) = parse_keys(&data);
    log::debug!("building trie from {} distinct keys", keys.len());
    Trie::create(&keys, &values).context("Failed to build trie")
}

/// Splits `data` into lines and pairs every distinct non-empty line with the
/// zero-based ordinal of its first occurrence. The result is sorted by key.
///
/// A trailing `\r` is stripped from each line.
pub fn parse_keys(data: &[u8]) -> (Vec<Vec<u8>>, Vec<u32>) {
    let mut first_seen = HashMap::new();
    for (ordinal, line) in data.split(|&b| b == b'\n').enumerate() {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if line.is_empty() {
            continue;
        }
        first_seen.entry(line).or_insert(ordinal as u32);
    }

    let mut pairs = first_seen
        .into_iter()
        .map(|(key, ordinal)| (key.to_vec(), ordinal))
        .collect::<Vec<_>>();
    pairs.sort_unstable();
    pairs.into_iter().unzip()
}
