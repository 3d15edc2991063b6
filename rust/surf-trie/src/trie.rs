use std::fmt;
use std::io::{Cursor, Write};

use surf_bits::codec;
use surf_common::{Result, error::Error};

use crate::{
    builder::Builder, config::TrieConfig, iterator::TrieIterator, louds_sparse::LoudsSparse,
};

/// Immutable ordered map from byte-string keys to `u32` values.
///
/// ```
/// use surf_trie::Trie;
///
/// let trie = Trie::create(&["far", "fast", "s"], &[1, 2, 3]).unwrap();
/// assert_eq!(trie.get(b"fast"), Some(2));
/// assert_eq!(trie.get(b"fa"), None);
///
/// let restored = Trie::unmarshal(&trie.to_vec().unwrap()).unwrap();
/// let keys = restored.iter().map(|(k, _)| k).collect::<Vec<_>>();
/// assert_eq!(keys, [b"far".to_vec(), b"fast".to_vec(), b"s".to_vec()]);
/// ```
#[derive(Clone)]
pub struct Trie {
    louds_sparse: LoudsSparse,
}

impl Trie {
    /// Builds a trie from strictly ascending, non-empty `keys` and their `values`.
    pub fn create<K: AsRef<[u8]>>(keys: &[K], values: &[u32]) -> Result<Trie> {
        Self::create_with_config(keys, values, &TrieConfig::default())
    }

    pub fn create_with_config<K: AsRef<[u8]>>(
        keys: &[K],
        values: &[u32],
        config: &TrieConfig,
    ) -> Result<Trie> {
        let mut builder = Builder::new();
        builder.build(keys, values)?;
        Self::from_builder(&builder, config)
    }

    /// Freezes the keys accumulated by `builder`.
    pub fn from_builder(builder: &Builder, config: &TrieConfig) -> Result<Trie> {
        Ok(Trie {
            louds_sparse: LoudsSparse::from_builder(builder, config)?,
        })
    }

    /// Decodes a trie written by [`Trie::write`]. The whole buffer must be consumed.
    pub fn unmarshal(buf: &[u8]) -> Result<Trie> {
        Self::unmarshal_with_config(buf, &TrieConfig::default())
    }

    pub fn unmarshal_with_config(buf: &[u8], config: &TrieConfig) -> Result<Trie> {
        let mut r = Cursor::new(buf);
        let louds_sparse = LoudsSparse::read(&mut r, config)?;
        let trailing = codec::remaining(&r);
        if trailing != 0 {
            return Err(Error::invalid_format(
                "trie",
                format!("{trailing} trailing bytes"),
            ));
        }
        Ok(Trie { louds_sparse })
    }

    pub fn get(&self, key: &[u8]) -> Option<u32> {
        self.louds_sparse.lookup_key(key)
    }

    pub fn contains(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Returns an unpositioned cursor over this trie.
    pub fn iterator(&self) -> TrieIterator<'_> {
        TrieIterator::new(&self.louds_sparse)
    }

    /// All entries in key order.
    pub fn iter(&self) -> Entries<'_> {
        let mut it = self.iterator();
        it.first();
        Entries {
            it,
            prefix: Vec::new(),
        }
    }

    /// Entries whose key starts with `prefix`, in key order.
    pub fn scan_prefix(&self, prefix: &[u8]) -> Entries<'_> {
        let mut it = self.iterator();
        it.seek(prefix);
        Entries {
            it,
            prefix: prefix.to_vec(),
        }
    }

    pub fn write<W>(&self, w: &mut W) -> Result<()>
    where
        W: Write + ?Sized,
    {
        self.louds_sparse.write(w)
    }

    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.serialized_size());
        self.write(&mut buf)?;
        Ok(buf)
    }

    /// Exact number of bytes [`Trie::write`] emits.
    pub fn serialized_size(&self) -> usize {
        self.louds_sparse.serialized_size()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.louds_sparse.total_keys()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn height(&self) -> usize {
        self.louds_sparse.height()
    }

    pub fn memory_usage(&self) -> usize {
        self.louds_sparse.memory_usage()
    }

    pub fn louds_sparse(&self) -> &LoudsSparse {
        &self.louds_sparse
    }
}

impl fmt::Display for Trie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.louds_sparse, f)
    }
}

impl fmt::Debug for Trie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Trie").field(&self.louds_sparse).finish()
    }
}

/// Iterator over `(key, value)` pairs of a [`Trie`], see [`Trie::iter`] and
/// [`Trie::scan_prefix`].
pub struct Entries<'a> {
    it: TrieIterator<'a>,
    prefix: Vec<u8>,
}

impl Iterator for Entries<'_> {
    type Item = (Vec<u8>, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.it.is_valid() || !self.it.key().starts_with(&self.prefix) {
            return None;
        }
        let entry = (self.it.key().to_vec(), self.it.value());
        self.it.next();
        Some(entry)
    }
}
