// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File handle seam
//!
//! The log needs truncation and durability on top of `Read + Write + Seek`.
//! `File` is the production handle; `Cursor<Vec<u8>>` backs in-memory tests.

use archive_core::StorageConfig;
use std::fs::{File, OpenOptions};
use std::io::{self, Cursor, Read, Seek, Write};
use std::path::Path;

/// A seekable read/write handle that can also be resized and synced
pub trait ArchiveFile: Read + Write + Seek {
    /// Resize the underlying storage to exactly `len` bytes
    fn set_len(&mut self, len: u64) -> io::Result<()>;

    /// Current size in bytes
    fn byte_len(&mut self) -> io::Result<u64>;

    /// Persist buffered writes
    fn sync(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl ArchiveFile for File {
    fn set_len(&mut self, len: u64) -> io::Result<()> {
        File::set_len(self, len)
    }

    fn byte_len(&mut self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn sync(&mut self) -> io::Result<()> {
        self.flush()?;
        self.sync_all()
    }
}

impl ArchiveFile for Cursor<Vec<u8>> {
    fn set_len(&mut self, len: u64) -> io::Result<()> {
        let len = usize::try_from(len)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "length exceeds memory"))?;
        self.get_mut().resize(len, 0);
        Ok(())
    }

    fn byte_len(&mut self) -> io::Result<u64> {
        Ok(self.get_ref().len() as u64)
    }
}

/// Open an existing file for reading and writing, creating it if missing
pub(crate) fn open_rw(path: &Path, config: &StorageConfig) -> io::Result<File> {
    ensure_parent(path, config)?;
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
}

/// Create (or truncate) a file for reading and writing
pub(crate) fn create_rw(path: &Path, config: &StorageConfig) -> io::Result<File> {
    ensure_parent(path, config)?;
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

fn ensure_parent(path: &Path, config: &StorageConfig) -> io::Result<()> {
    if !config.create_dirs {
        return Ok(());
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
