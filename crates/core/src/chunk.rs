// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Byte-addressable chunks
//!
//! `ByteChunk` is the capability shared by every fixed-layout value in the
//! archive: the three record shapes and the 16-byte index entry.

use crate::error::{ArchiveError, Result};
use crate::layout;

/// Raw byte access over an owned buffer
pub trait ByteChunk {
    fn bytes(&self) -> &[u8];

    fn bytes_mut(&mut self) -> &mut [u8];

    fn len(&self) -> usize {
        self.bytes().len()
    }

    fn is_empty(&self) -> bool {
        self.bytes().is_empty()
    }

    fn byte(&self, index: usize) -> Result<u8> {
        layout::read_u8(self.bytes(), index)
    }

    fn set_byte(&mut self, index: usize, value: u8) -> Result<()> {
        let target = layout::slice_mut(self.bytes_mut(), index, 1)?;
        target[0] = value;
        Ok(())
    }

    fn range(&self, index: usize, len: usize) -> Result<&[u8]> {
        layout::slice(self.bytes(), index, len)
    }

    /// Overwrite `len` bytes at `index` with `src`
    ///
    /// `src` must be exactly `len` bytes long.
    fn set_range(&mut self, index: usize, len: usize, src: &[u8]) -> Result<()> {
        if src.len() != len {
            return Err(ArchiveError::LengthMismatch {
                expected: len,
                actual: src.len(),
            });
        }
        layout::slice_mut(self.bytes_mut(), index, len)?.copy_from_slice(src);
        Ok(())
    }
}

/// Fixed 16-byte `(id, offset)` index entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdOffsetChunk {
    bytes: [u8; IdOffsetChunk::SIZE],
}

impl IdOffsetChunk {
    pub const SIZE: usize = 16;

    pub fn new(id: u64, offset: u64) -> Self {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..8].copy_from_slice(&id.to_le_bytes());
        bytes[8..16].copy_from_slice(&offset.to_le_bytes());
        Self { bytes }
    }

    /// Build a chunk from exactly 16 bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; Self::SIZE] = bytes.try_into().map_err(|_| ArchiveError::MalformedSize {
            expected: Self::SIZE,
            actual: bytes.len(),
        })?;
        Ok(Self { bytes })
    }

    pub fn id(&self) -> u64 {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&self.bytes[0..8]);
        u64::from_le_bytes(buf)
    }

    /// Absolute file position this entry points at
    pub fn offset(&self) -> u64 {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&self.bytes[8..16]);
        u64::from_le_bytes(buf)
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        self.bytes
    }
}

impl ByteChunk for IdOffsetChunk {
    fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

#[cfg(test)]
#[path = "chunk_tests.rs"]
mod tests;
