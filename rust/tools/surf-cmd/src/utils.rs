//! Common utilities for surf-cmd

use anyhow::{Context, Result};
use std::path::Path;
use surf_trie::Trie;

/// Checks if a file exists and is readable
pub fn validate_file_exists(path: &str) -> Result<()> {
    let file_path = Path::new(path);
    if !file_path.exists() {
        anyhow::bail!("File does not exist: {}", path);
    }
    if !file_path.is_file() {
        anyhow::bail!("Path is not a file: {}", path);
    }
    Ok(())
}

/// Reads and decodes a serialized trie.
pub fn load_trie(path: &str) -> Result<Trie> {
    validate_file_exists(path)?;
    let buf = std::fs::read(path).with_context(|| format!("Failed to read trie file: {path}"))?;
    let trie =
        Trie::unmarshal(&buf).with_context(|| format!("Failed to decode trie file: {path}"))?;
    log::debug!("loaded trie {path}: {} keys, {} bytes", trie.len(), buf.len());
    Ok(trie)
}

/// Renders a key for display: valid UTF-8 as is, anything else escaped.
pub fn display_key(key: &[u8]) -> String {
    match std::str::from_utf8(key) {
        Ok(s) => s.to_string(),
        Err(_) => key.escape_ascii().to_string(),
    }
}

/// Formats file size in human-readable format
pub fn format_size(size: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = size as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", size as u64, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn test_display_key() {
        assert_eq!(display_key(b"abc"), "abc");
        assert_eq!(display_key(&[b'a', 0xff]), "a\\xff");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.surf");
        assert!(load_trie(path.to_str().unwrap()).is_err());
        assert!(validate_file_exists(dir.path().to_str().unwrap()).is_err());
    }
}
