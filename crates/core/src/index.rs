// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Index block codec
//!
//! ```text
//! { count: u16, count × { id: u64, offset: u64 } }
//! ```

use crate::chunk::IdOffsetChunk;
use crate::error::{ArchiveError, Result};
use std::io::{Read, Write};

/// Most entries a single index block can hold
pub const MAX_INDEX_ENTRIES: usize = u16::MAX as usize;

/// On-disk size of a block with `entries` chunks
pub fn index_block_len(entries: usize) -> u64 {
    2 + (entries * IdOffsetChunk::SIZE) as u64
}

/// Read one index block at the reader's current position
pub fn read_index_block<R: Read>(reader: &mut R) -> Result<Vec<IdOffsetChunk>> {
    let mut count = [0u8; 2];
    reader.read_exact(&mut count)?;
    let count = u16::from_le_bytes(count) as usize;

    let mut chunks = Vec::with_capacity(count);
    let mut buffer = [0u8; IdOffsetChunk::SIZE];
    for _ in 0..count {
        reader.read_exact(&mut buffer)?;
        chunks.push(IdOffsetChunk::from_bytes(&buffer)?);
    }
    Ok(chunks)
}

/// Write `chunks` as one contiguous index block
pub fn write_index_block<W: Write>(writer: &mut W, chunks: &[IdOffsetChunk]) -> Result<()> {
    if chunks.len() > MAX_INDEX_ENTRIES {
        return Err(ArchiveError::TooLarge {
            what: "index block",
            size: chunks.len(),
            max: MAX_INDEX_ENTRIES,
        });
    }
    let mut buf = Vec::with_capacity(index_block_len(chunks.len()) as usize);
    buf.extend_from_slice(&(chunks.len() as u16).to_le_bytes());
    for chunk in chunks {
        buf.extend_from_slice(&chunk.to_bytes());
    }
    writer.write_all(&buf)?;
    Ok(())
}

#[cfg(test)]
#[path = "index_tests.rs"]
mod tests;
