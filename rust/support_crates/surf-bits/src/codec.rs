//! Little-endian decoding helpers over an in-memory buffer.
//!
//! All readers take the name of the element being decoded so that a truncated or
//! corrupted buffer is reported as an `InvalidFormat` error naming the culprit.

use std::io::{Cursor, Read};

use byteorder::{LE, ReadBytesExt};
use surf_common::{Result, error::Error};

/// Number of unread bytes left in the cursor.
#[inline]
pub fn remaining(r: &Cursor<&[u8]>) -> usize {
    let len = r.get_ref().len() as u64;
    len.saturating_sub(r.position()) as usize
}

/// Fails with `InvalidFormat` unless at least `len` bytes are left to read.
pub fn ensure_remaining(r: &Cursor<&[u8]>, len: usize, element: &str) -> Result<()> {
    let available = remaining(r);
    if available < len {
        return Err(Error::invalid_format(
            element,
            format!("need {len} bytes, only {available} left"),
        ));
    }
    Ok(())
}

pub fn read_u32(r: &mut Cursor<&[u8]>, element: &str) -> Result<u32> {
    r.read_u32::<LE>().map_err(|e| Error::decode(element, e))
}

pub fn read_u32_words(r: &mut Cursor<&[u8]>, count: usize, element: &str) -> Result<Vec<u32>> {
    ensure_remaining(r, count.saturating_mul(4), element)?;
    let mut words = vec![0u32; count];
    r.read_u32_into::<LE>(&mut words)
        .map_err(|e| Error::decode(element, e))?;
    Ok(words)
}

pub fn read_u64_words(r: &mut Cursor<&[u8]>, count: usize, element: &str) -> Result<Vec<u64>> {
    ensure_remaining(r, count.saturating_mul(8), element)?;
    let mut words = vec![0u64; count];
    r.read_u64_into::<LE>(&mut words)
        .map_err(|e| Error::decode(element, e))?;
    Ok(words)
}

pub fn read_bytes(r: &mut Cursor<&[u8]>, len: usize, element: &str) -> Result<Vec<u8>> {
    ensure_remaining(r, len, element)?;
    let mut bytes = vec![0u8; len];
    r.read_exact(&mut bytes)
        .map_err(|e| Error::decode(element, e))?;
    Ok(bytes)
}
