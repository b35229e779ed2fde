// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Little-endian field access over raw record buffers
//!
//! Every read is bounds checked; nothing here trusts a length prefix beyond
//! the buffer it was handed.

use crate::error::{ArchiveError, Result};

/// Borrow `len` bytes at `offset`, failing instead of panicking past the end
pub(crate) fn slice(bytes: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    offset
        .checked_add(len)
        .and_then(|end| bytes.get(offset..end))
        .ok_or_else(|| ArchiveError::out_of_range(offset, len, bytes.len()))
}

pub(crate) fn slice_mut(bytes: &mut [u8], offset: usize, len: usize) -> Result<&mut [u8]> {
    let size = bytes.len();
    offset
        .checked_add(len)
        .and_then(|end| bytes.get_mut(offset..end))
        .ok_or_else(|| ArchiveError::out_of_range(offset, len, size))
}

pub(crate) fn read_u8(bytes: &[u8], offset: usize) -> Result<u8> {
    bytes
        .get(offset)
        .copied()
        .ok_or_else(|| ArchiveError::out_of_range(offset, 1, bytes.len()))
}

pub(crate) fn read_u16(bytes: &[u8], offset: usize) -> Result<u16> {
    let raw = slice(bytes, offset, 2)?;
    Ok(u16::from_le_bytes([raw[0], raw[1]]))
}

pub(crate) fn read_u64(bytes: &[u8], offset: usize) -> Result<u64> {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(slice(bytes, offset, 8)?);
    Ok(u64::from_le_bytes(buf))
}

/// UTF-16LE bytes of `text`
pub(crate) fn encode_utf16(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

/// Decode UTF-16LE bytes; an odd byte count or unpaired surrogate is rejected
pub(crate) fn decode_utf16(bytes: &[u8]) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(ArchiveError::InvalidText);
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|_| ArchiveError::InvalidText)
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
