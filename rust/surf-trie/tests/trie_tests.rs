use itertools::Itertools;
use surf_testkit::data_gen;
use surf_trie::{Trie, TrieConfig};

const SAMPLE_KEYS: [&str; 11] = [
    "f", "far", "fas", "fast", "fat", "s", "top", "toy", "trie", "trip", "try",
];

fn sample_trie() -> Trie {
    Trie::create(&SAMPLE_KEYS, &(1..=11).collect::<Vec<u32>>()).unwrap()
}

fn collect_from(trie: &Trie, target: &[u8]) -> Vec<(String, u32)> {
    let mut it = trie.iterator();
    it.seek(target);
    let mut entries = Vec::new();
    while it.is_valid() {
        entries.push((String::from_utf8_lossy(it.key()).into_owned(), it.value()));
        it.next();
    }
    entries
}

/// Checks lookups, full iteration and a serialization round trip.
fn verify_trie(keys: &[Vec<u8>], values: &[u32], config: &TrieConfig) {
    let trie = Trie::create_with_config(keys, values, config).unwrap();
    assert_eq!(trie.len(), keys.len());
    for (key, &value) in keys.iter().zip(values) {
        assert_eq!(trie.get(key), Some(value), "key {key:?}");
    }

    let entries = trie.iter().collect::<Vec<_>>();
    assert_eq!(entries.len(), keys.len());
    for ((key, value), (expected_key, &expected_value)) in
        entries.iter().zip(keys.iter().zip(values))
    {
        assert_eq!(key, expected_key);
        assert_eq!(*value, expected_value);
    }

    let buf = trie.to_vec().unwrap();
    assert_eq!(buf.len(), trie.serialized_size());
    let restored = Trie::unmarshal_with_config(&buf, config).unwrap();
    assert_eq!(restored.len(), trie.len());
    assert_eq!(restored.height(), trie.height());
    for key in keys {
        assert_eq!(restored.get(key), trie.get(key));
    }
    assert!(restored.iter().eq(trie.iter()));
    assert_eq!(restored.to_vec().unwrap(), buf);
}

#[test]
fn test_sample_lookup() {
    let trie = sample_trie();
    assert_eq!(trie.get(b"trip"), Some(10));
    assert_eq!(trie.height(), 4);
    for (i, key) in SAMPLE_KEYS.iter().enumerate() {
        assert_eq!(trie.get(key.as_bytes()), Some(i as u32 + 1), "{key}");
    }
    for absent in ["", "fa", "fasts", "t", "to", "tr", "tri", "tries", "z", "ff", "sa"] {
        assert_eq!(trie.get(absent.as_bytes()), None, "{absent}");
    }
}

#[test]
fn test_sample_iteration_order() {
    let trie = sample_trie();
    let mut it = trie.iterator();
    it.first();
    let mut seen = Vec::new();
    while it.is_valid() {
        seen.push((String::from_utf8_lossy(it.key()).into_owned(), it.value()));
        it.next();
    }
    let expected = SAMPLE_KEYS
        .iter()
        .map(|k| k.to_string())
        .zip(1..)
        .collect::<Vec<_>>();
    assert_eq!(seen, expected);
}

#[test]
fn test_sample_seek() {
    let trie = sample_trie();
    let entries = collect_from(&trie, b"fasra");
    assert_eq!(entries[0], ("fast".to_string(), 4));
    assert_eq!(
        entries.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>(),
        ["fast", "fat", "s", "top", "toy", "trie", "trip", "try"]
    );

    let mut it = trie.iterator();
    assert!(it.seek(b"fas"));
    assert_eq!(it.key(), b"fas");
    assert!(it.seek(b"tri"));
    assert_eq!(it.key(), b"trie");
    assert!(!it.seek(b"tro"));
    assert_eq!(it.key(), b"try");
    assert!(!it.seek(b"g"));
    assert_eq!(it.key(), b"s");
    assert!(!it.seek(b"tz"));
    assert!(!it.is_valid());
    assert!(it.seek(b"f"));
    assert_eq!(it.key(), b"f");
}

#[test]
fn test_suffix_keys() {
    let keys = ["hello", "her", "hi", "how", "seor", "so"];
    let trie = Trie::create(&keys, &[1, 2, 3, 4, 5, 6]).unwrap();
    assert_eq!(trie.get(b"hello"), Some(1));
    assert_eq!(trie.get(b"how"), Some(4));
    assert_eq!(trie.get(b"seor"), Some(5));
    for absent in ["hel", "hell", "hellp", "hello1", "ho", "hoe", "seo", "sor", "h"] {
        assert_eq!(trie.get(absent.as_bytes()), None, "{absent}");
    }
    assert_eq!(
        collect_from(&trie, b"hello1"),
        [
            ("her".to_string(), 2),
            ("hi".to_string(), 3),
            ("how".to_string(), 4),
            ("seor".to_string(), 5),
            ("so".to_string(), 6),
        ]
    );
}

#[test]
fn test_words() {
    let mut keys = [
        "a",
        "ab",
        "abc",
        "abcdefgh",
        "abcdefghijklmnopqrstuvwxyz",
        "abcdefghijkl",
        "b",
        "ice",
        "zzzzzz",
    ];
    keys.sort_unstable();
    let trie = Trie::create(&keys, &data_gen::ordinal_values(&keys)).unwrap();
    let cases = [
        ("a", true),
        ("ab", true),
        ("abc", true),
        ("abcd", false),
        ("abcdefghijklmnopqrstuvwxyz", true),
        ("abcdefghijkl", true),
        ("abcdefghijklm", false),
        ("b", true),
        ("bb", false),
        ("i", false),
        ("ic", false),
        ("ice", true),
        ("ices", false),
        ("zzzzzz", true),
        ("zzzzz", false),
        ("zzzzzzz", false),
    ];
    for (input, expected) in cases {
        assert_eq!(trie.contains(input.as_bytes()), expected, "{input}");
    }
}

#[test]
fn test_mixed_case_words() {
    let keys = ["A", "Aani", "a", "aa"];
    let trie = Trie::create(&keys, &[0, 1, 2, 3]).unwrap();
    assert_eq!(trie.get(b"A"), Some(0));
    assert_eq!(trie.get(b"Aani"), Some(1));
    assert_eq!(trie.get(b"a"), Some(2));
    assert_eq!(trie.get(b"aa"), Some(3));
    assert_eq!(trie.get(b"ab"), None);
    assert_eq!(trie.get(b"Aan"), None);
}

#[test]
fn test_terminator_byte_in_keys() {
    let keys: [&[u8]; 5] = [b"a", b"a\xff", b"a\xff\xff", b"b\xff", b"\xff"];
    let trie = Trie::create(&keys, &[1, 2, 3, 4, 5]).unwrap();
    for (i, key) in keys.iter().enumerate() {
        assert_eq!(trie.get(key), Some(i as u32 + 1));
    }
    assert_eq!(trie.get(b"b"), None);
    assert_eq!(trie.get(b"a\xff\xff\xff"), None);
    let iterated = trie.iter().map(|(k, _)| k).collect::<Vec<_>>();
    assert_eq!(iterated, keys.iter().map(|k| k.to_vec()).collect::<Vec<_>>());
}

#[test]
fn test_ip_keys() {
    let (keys, values) = data_gen::ip_keys(20);
    verify_trie(&keys, &values, &TrieConfig::default());

    let trie = Trie::create(&keys, &values).unwrap();
    let under = trie.scan_prefix(b"3.12.").collect::<Vec<_>>();
    assert_eq!(under.len(), 19);
    assert!(under.iter().all(|(k, _)| k.starts_with(b"3.12.12.")));
    assert!(under.iter().map(|(k, _)| k).tuple_windows().all(|(a, b)| a < b));
}

#[test]
fn test_random_keys() {
    let mut rng = fastrand::Rng::with_seed(17);
    for seed in 0..8 {
        let keys = data_gen::random_keys(seed, 2000, 12);
        let values = keys.iter().map(|_| rng.u32(..)).collect::<Vec<_>>();
        verify_trie(&keys, &values, &TrieConfig::default());
    }
}

#[test]
fn test_rank_block_sizes() {
    let keys = data_gen::words(11, 3000);
    let values = data_gen::ordinal_values(&keys);
    for block_size in [64, 256, 512, 4096] {
        let config = TrieConfig::with_rank_block_size(block_size).unwrap();
        verify_trie(&keys, &values, &config);
    }
}

#[test]
fn test_seek_matches_lower_bound() {
    let keys = data_gen::words(5, 2000);
    let trie = Trie::create(&keys, &data_gen::ordinal_values(&keys)).unwrap();
    let mut rng = fastrand::Rng::with_seed(99);
    let mut targets = data_gen::words(6, 300);
    targets.extend(keys.iter().step_by(17).cloned());
    targets.extend((0..100).map(|_| {
        let mut t = keys[rng.usize(..keys.len())].clone();
        t.truncate(rng.usize(0..=t.len()));
        t
    }));

    let mut it = trie.iterator();
    for target in targets {
        let idx = keys.partition_point(|k| k < &target);
        let matched = it.seek(&target);
        match keys.get(idx) {
            Some(expected) => {
                assert!(it.is_valid(), "{target:?}");
                assert_eq!(it.key(), expected.as_slice(), "{target:?}");
                assert_eq!(it.value(), idx as u32);
                assert_eq!(matched, expected.starts_with(&target), "{target:?}");
            }
            None => {
                assert!(!it.is_valid(), "{target:?}");
                assert!(!matched);
            }
        }
    }
}

#[test]
fn test_scan_prefix() {
    let keys = data_gen::words(21, 1000);
    let trie = Trie::create(&keys, &data_gen::ordinal_values(&keys)).unwrap();
    for prefix in [&b"a"[..], b"re", b"trist", b"zz", b""] {
        let expected = keys
            .iter()
            .enumerate()
            .filter(|(_, k)| k.starts_with(prefix))
            .map(|(i, k)| (k.clone(), i as u32))
            .collect::<Vec<_>>();
        assert_eq!(trie.scan_prefix(prefix).collect::<Vec<_>>(), expected);
    }
}

#[test]
fn test_empty_trie() {
    let keys: [&[u8]; 0] = [];
    let trie = Trie::create(&keys, &[]).unwrap();
    assert!(trie.is_empty());
    assert_eq!(trie.height(), 0);
    assert_eq!(trie.get(b"a"), None);
    assert_eq!(trie.iter().count(), 0);
    let mut it = trie.iterator();
    it.first();
    assert!(!it.is_valid());
    assert!(!it.seek(b"a"));

    let buf = trie.to_vec().unwrap();
    let restored = Trie::unmarshal(&buf).unwrap();
    assert!(restored.is_empty());
    assert_eq!(restored.get(b""), None);
}

#[test]
fn test_invalid_input() {
    assert!(Trie::create(&["b", "a"], &[1, 2]).unwrap_err().is_invalid_arg());
    assert!(Trie::create(&["a", "a"], &[1, 2]).unwrap_err().is_invalid_arg());
    assert!(Trie::create(&["a"], &[1, 2]).unwrap_err().is_invalid_arg());
    assert!(Trie::create(&["", "a"], &[1, 2]).unwrap_err().is_invalid_arg());
    let config = TrieConfig {
        rank_block_size: 100,
    };
    assert!(
        Trie::create_with_config(&["a"], &[1], &config)
            .unwrap_err()
            .is_invalid_arg()
    );
}

#[test]
fn test_truncated_buffers() {
    let buf = sample_trie().to_vec().unwrap();
    for cut in 0..buf.len() {
        let err = Trie::unmarshal(&buf[..cut]).unwrap_err();
        assert!(err.is_invalid_format(), "cut at {cut}: {err}");
    }
    let mut extended = buf.clone();
    extended.push(0);
    assert!(Trie::unmarshal(&extended).unwrap_err().is_invalid_format());
}

/// Runs every read operation over a trie decoded from untrusted bytes.
fn exercise(trie: &Trie, keys: &[&str]) {
    for key in keys {
        trie.get(key.as_bytes());
        let mut it = trie.iterator();
        it.seek(key.as_bytes());
        for _ in 0..keys.len() + 1 {
            if !it.is_valid() {
                break;
            }
            it.key();
            it.value();
            it.next();
        }
    }
    assert!(trie.iter().take(1000).count() <= 1000);
    trie.scan_prefix(b"t").count();
}

#[test]
fn test_corrupted_buffers_do_not_panic() {
    let suffixed = ["hello", "her", "hi", "how", "seor", "so"];
    let suffixed_trie = Trie::create(&suffixed, &[1, 2, 3, 4, 5, 6]).unwrap();
    for (trie, keys) in [
        (sample_trie(), &SAMPLE_KEYS[..]),
        (suffixed_trie, &suffixed[..]),
    ] {
        let buf = trie.to_vec().unwrap();
        let mut decoded = 0;
        // Every bit of the buffer: header, labels, bitmaps, suffix offsets and
        // data, values.
        for offset in 0..buf.len() {
            for bit in 0..8 {
                let mut corrupted = buf.clone();
                corrupted[offset] ^= 1 << bit;
                match Trie::unmarshal(&corrupted) {
                    Ok(restored) => {
                        decoded += 1;
                        exercise(&restored, keys);
                    }
                    Err(err) => assert!(err.is_invalid_format(), "offset {offset}: {err}"),
                }
            }
        }
        // Label and value flips keep the structure intact.
        assert!(decoded > 0);
        // The key count is cross-checked against the leaves.
        for offset in 0..4 {
            let mut corrupted = buf.clone();
            corrupted[offset] ^= 1;
            assert!(Trie::unmarshal(&corrupted).is_err(), "offset {offset}");
        }
    }
}

#[test]
fn test_display_and_memory_usage() {
    let trie = sample_trie();
    let dump = trie.to_string();
    assert!(dump.contains("labels:    fst$aorrstpyiy$tep"));
    assert!(dump.contains("hasChild:  101011101000100000"));
    assert!(trie.memory_usage() > 0);
}
