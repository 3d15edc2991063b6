use std::io::{Cursor, Write};

use byteorder::{LE, WriteBytesExt};
use surf_bits::codec;
use surf_common::{Result, error::Error};

/// Values of the terminating edges, in the level order of those edges.
///
/// The value of the leaf edge at trie position `pos` lives at
/// `pos - rank(hasChild, pos)`. The serialized form carries no length prefix: the
/// count is the trie's total key count.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValueVector {
    values: Vec<u32>,
}

impl ValueVector {
    pub fn new(values: Vec<u32>) -> ValueVector {
        ValueVector { values }
    }

    #[inline]
    pub fn get(&self, pos: usize) -> u32 {
        self.values[pos]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn memory_usage(&self) -> usize {
        self.values.len() * std::mem::size_of::<u32>()
    }

    pub fn serialized_size(&self) -> usize {
        self.values.len() * 4
    }

    pub fn write<W>(&self, w: &mut W) -> Result<()>
    where
        W: Write + ?Sized,
    {
        for &value in &self.values {
            w.write_u32::<LE>(value)
                .map_err(|e| Error::io("values", e))?;
        }
        Ok(())
    }

    pub fn read(r: &mut Cursor<&[u8]>, total_keys: usize) -> Result<ValueVector> {
        let values = codec::read_u32_words(r, total_keys, "values")?;
        Ok(ValueVector { values })
    }
}
