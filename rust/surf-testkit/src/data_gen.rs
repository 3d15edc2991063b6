//! Data generation utilities for testing.
//!
//! Every generator is deterministic for a given seed and returns keys sorted in
//! ascending byte order without duplicates, ready to be fed to a trie builder.

use std::io::{Seek, SeekFrom, Write};

/// Generates IP-address-like keys `"x.y.y.z"` for `x` in `1..=10` and `y`, `z` in
/// `1..batch_size`, paired with their generation ordinal (starting at 1).
///
/// The pairs are returned sorted by key. Keys of this shape share long prefixes and
/// end in short, dense tails.
pub fn ip_keys(batch_size: usize) -> (Vec<Vec<u8>>, Vec<u32>) {
    let mut pairs = Vec::new();
    for x in (1..=10).rev() {
        for y in 1..batch_size {
            for z in (1..batch_size).rev() {
                let ordinal = pairs.len() as u32 + 1;
                pairs.push((format!("{x}.{y}.{y}.{z}").into_bytes(), ordinal));
            }
        }
    }
    pairs.sort_unstable();
    pairs.into_iter().unzip()
}

/// Generates `count` random keys of `1..=max_len` bytes over the full byte range.
///
/// Fewer than `count` keys are returned when duplicates are drawn.
pub fn random_keys(seed: u64, count: usize, max_len: usize) -> Vec<Vec<u8>> {
    assert_ne!(max_len, 0);
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut keys = (0..count)
        .map(|_| {
            let len = rng.usize(1..=max_len);
            (0..len).map(|_| rng.u8(..)).collect::<Vec<u8>>()
        })
        .collect::<Vec<_>>();
    keys.sort_unstable();
    keys.dedup();
    keys
}

/// Generates word-like lowercase keys built from a small syllable set, so that many
/// keys share prefixes and some keys are prefixes of others.
pub fn words(seed: u64, count: usize) -> Vec<Vec<u8>> {
    const SYLLABLES: [&str; 12] = [
        "a", "an", "ar", "be", "ca", "de", "er", "in", "on", "re", "st", "tri",
    ];
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut keys = (0..count)
        .map(|_| {
            let parts = rng.usize(1..=5);
            (0..parts)
                .flat_map(|_| SYLLABLES[rng.usize(..SYLLABLES.len())].bytes())
                .collect::<Vec<u8>>()
        })
        .collect::<Vec<_>>();
    keys.sort_unstable();
    keys.dedup();
    keys
}

/// Values `0, 1, 2, ...` for a key set.
pub fn ordinal_values<K>(keys: &[K]) -> Vec<u32> {
    (0..keys.len() as u32).collect()
}

/// Writes `keys` one per line to a temporary file positioned at its start.
///
/// Keys must not contain newlines.
pub fn write_keys_file<K: AsRef<[u8]>>(keys: &[K]) -> anyhow::Result<tempfile::NamedTempFile> {
    let mut file = tempfile::NamedTempFile::new()?;
    for key in keys {
        let key = key.as_ref();
        anyhow::ensure!(!key.contains(&b'\n'), "key contains a newline");
        file.write_all(key)?;
        file.write_all(b"\n")?;
    }
    file.flush()?;
    file.seek(SeekFrom::Start(0))?;
    Ok(file)
}
