//! Get command implementation

use anyhow::Result;
use surf_trie::Trie;

use crate::utils::load_trie;

pub fn run(trie_path: String, keys: Vec<String>) -> Result<()> {
    let trie = load_trie(&trie_path)?;
    for line in lookup(&trie, &keys) {
        println!("{line}");
    }
    Ok(())
}

/// One output line per key: `key -> value` or `key: not found`.
pub fn lookup(trie: &Trie, keys: &[String]) -> Vec<String> {
    keys.iter()
        .map(|key| match trie.get(key.as_bytes()) {
            Some(value) => format!("{key} -> {value}"),
            None => format!("{key}: not found"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let trie = Trie::create(&["far", "fast", "s"], &[7, 8, 9]).unwrap();
        let keys = ["fast", "fa", "s"].map(String::from);
        assert_eq!(
            lookup(&trie, &keys),
            ["fast -> 8", "fa: not found", "s -> 9"]
        );
    }
}
