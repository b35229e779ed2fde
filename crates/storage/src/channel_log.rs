// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only channel log
//!
//! One file per channel:
//!
//! ```text
//! [0:8)   server id (u64)
//! [8:16)  channel id (u64)
//! [16:..) { length: i32, record: length bytes }* until EOF or length 0
//! ```
//!
//! Every method moves the single file cursor, so the log takes `&mut self`
//! throughout and the message iterator holds that borrow while it runs.

use crate::file::{self, ArchiveFile};
use archive_core::{ArchiveError, ByteChunk, ChannelMessage, Result, StorageConfig};
use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Size of the `(server id, channel id)` header
pub const HEADER_LEN: u64 = 16;

/// Header plus one zero-length terminator
const MIN_MESSAGES_LEN: u64 = HEADER_LEN + 4;

/// Sequential log of one channel's messages
pub struct ChannelLog<F = File> {
    file: F,
    sync_writes: bool,
}

impl ChannelLog<File> {
    /// Open a log file, creating an empty one if it does not exist
    pub fn open(path: &Path, config: &StorageConfig) -> Result<Self> {
        let file = file::open_rw(path, config)?;
        tracing::debug!(path = %path.display(), "opened channel log");
        Ok(Self::with_config(file, config))
    }

    /// Create an empty log file, truncating any existing one
    pub fn create(path: &Path, config: &StorageConfig) -> Result<Self> {
        let file = file::create_rw(path, config)?;
        tracing::debug!(path = %path.display(), "created channel log");
        Ok(Self::with_config(file, config))
    }
}

impl<F: ArchiveFile> ChannelLog<F> {
    pub fn new(file: F) -> Self {
        Self::with_config(file, &StorageConfig::default())
    }

    pub fn with_config(file: F, config: &StorageConfig) -> Self {
        Self {
            file,
            sync_writes: config.sync_writes,
        }
    }

    /// Truncate the file to zero length
    ///
    /// The caller writes a fresh header afterwards.
    pub fn initialize(&mut self) -> Result<()> {
        self.file.flush()?;
        self.file.set_len(0)?;
        self.file.seek(SeekFrom::Start(0))?;
        tracing::debug!("channel log truncated");
        Ok(())
    }

    pub fn move_to_start(&mut self) -> Result<u64> {
        Ok(self.file.seek(SeekFrom::Start(0))?)
    }

    pub fn move_to_end(&mut self) -> Result<u64> {
        Ok(self.file.seek(SeekFrom::End(0))?)
    }

    /// Position the cursor on the first message
    pub fn move_to_messages(&mut self) -> Result<u64> {
        Ok(self.file.seek(SeekFrom::Start(HEADER_LEN))?)
    }

    pub fn position(&mut self) -> Result<u64> {
        Ok(self.file.stream_position()?)
    }

    /// File size in bytes
    pub fn len(&mut self) -> Result<u64> {
        Ok(self.file.byte_len()?)
    }

    pub fn is_empty(&mut self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Write the 16-byte header at the current cursor
    pub fn write_channel(&mut self, server_id: u64, channel_id: u64) -> Result<()> {
        self.file.write_all(&header_bytes(server_id, channel_id))?;
        Ok(())
    }

    /// Rewrite the header in place, leaving the cursor where it was
    pub fn set_channel(&mut self, server_id: u64, channel_id: u64) -> Result<()> {
        let position = self.file.stream_position()?;
        self.file.seek(SeekFrom::Start(0))?;
        self.file.write_all(&header_bytes(server_id, channel_id))?;
        self.file.seek(SeekFrom::Start(position))?;
        tracing::debug!(server_id, channel_id, "channel header rewritten");
        Ok(())
    }

    /// Read `(server id, channel id)` from the header
    ///
    /// Leaves the cursor at the first message.
    pub fn channel(&mut self) -> Result<(u64, u64)> {
        if self.file.byte_len()? < HEADER_LEN {
            return Err(ArchiveError::EndOfStream(
                "file too small for channel header".to_string(),
            ));
        }
        self.file.seek(SeekFrom::Start(0))?;
        let mut header = [0u8; HEADER_LEN as usize];
        self.file.read_exact(&mut header)?;

        let mut server = [0u8; 8];
        let mut channel = [0u8; 8];
        server.copy_from_slice(&header[0..8]);
        channel.copy_from_slice(&header[8..16]);
        Ok((u64::from_le_bytes(server), u64::from_le_bytes(channel)))
    }

    /// Write one length-prefixed record at the current cursor
    pub fn dump_message(&mut self, message: &ChannelMessage) -> Result<()> {
        self.file.write_all(&framed(message)?)?;
        self.maybe_sync()
    }

    /// Write several length-prefixed records at the current cursor
    pub fn dump_messages(&mut self, messages: &[ChannelMessage]) -> Result<()> {
        let mut buf = Vec::new();
        for message in messages {
            buf.extend_from_slice(&framed(message)?);
        }
        self.file.write_all(&buf)?;
        self.maybe_sync()
    }

    /// Append a length-prefixed record at the end of the file, leaving the
    /// cursor where it was
    pub fn append_message(&mut self, message: &ChannelMessage) -> Result<()> {
        let frame = framed(message)?;
        let position = self.file.stream_position()?;
        self.file.seek(SeekFrom::End(0))?;
        self.file.write_all(&frame)?;
        self.file.seek(SeekFrom::Start(position))?;
        self.maybe_sync()
    }

    /// Write a zero-length record marking the end of the messages
    pub fn write_sentinel(&mut self) -> Result<()> {
        self.file.write_all(&0i32.to_le_bytes())?;
        self.maybe_sync()
    }

    /// Read one length-prefixed record at the current cursor
    pub fn read_message(&mut self) -> Result<ChannelMessage> {
        let mut prefix = [0u8; 4];
        self.file.read_exact(&mut prefix)?;
        let len = record_len(i32::from_le_bytes(prefix))?;
        let mut record = vec![0u8; len];
        self.file.read_exact(&mut record)?;
        Ok(ChannelMessage::from_bytes(record))
    }

    /// Iterate the messages from the start of the message stream
    ///
    /// Fails unless the file holds at least a header and one length prefix.
    /// Iteration ends at a zero-length record or at the end of the file.
    pub fn read_messages(&mut self) -> Result<LogMessages<'_, F>> {
        if self.file.byte_len()? < MIN_MESSAGES_LEN {
            return Err(ArchiveError::EndOfStream(
                "no messages in channel log".to_string(),
            ));
        }
        self.move_to_messages()?;
        Ok(LogMessages {
            log: self,
            done: false,
        })
    }

    /// Flush and persist everything written so far
    pub fn sync(&mut self) -> Result<()> {
        self.file.sync()?;
        Ok(())
    }

    pub fn get_ref(&self) -> &F {
        &self.file
    }

    pub fn into_inner(self) -> F {
        self.file
    }

    fn maybe_sync(&mut self) -> Result<()> {
        if self.sync_writes {
            self.sync()?;
        }
        Ok(())
    }

    /// Read a length prefix, distinguishing a clean end of file
    fn read_prefix(&mut self) -> Result<Option<i32>> {
        let mut prefix = [0u8; 4];
        let mut filled = 0;
        while filled < prefix.len() {
            match self.file.read(&mut prefix[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        match filled {
            0 => Ok(None),
            4 => Ok(Some(i32::from_le_bytes(prefix))),
            _ => Err(ArchiveError::EndOfStream(format!(
                "truncated length prefix ({} of 4 bytes)",
                filled
            ))),
        }
    }
}

/// Lazy iterator over a channel log's messages
pub struct LogMessages<'a, F> {
    log: &'a mut ChannelLog<F>,
    done: bool,
}

impl<F: ArchiveFile> LogMessages<'_, F> {
    fn read_next(&mut self) -> Result<Option<ChannelMessage>> {
        let len = match self.log.read_prefix()? {
            None | Some(0) => return Ok(None),
            Some(len) => record_len(len)?,
        };
        let mut record = vec![0u8; len];
        self.log.file.read_exact(&mut record)?;
        Ok(Some(ChannelMessage::from_bytes(record)))
    }
}

impl<F: ArchiveFile> Iterator for LogMessages<'_, F> {
    type Item = Result<ChannelMessage>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_next() {
            Ok(Some(message)) => Some(Ok(message)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "channel log read stopped");
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

fn header_bytes(server_id: u64, channel_id: u64) -> [u8; HEADER_LEN as usize] {
    let mut header = [0u8; HEADER_LEN as usize];
    header[0..8].copy_from_slice(&server_id.to_le_bytes());
    header[8..16].copy_from_slice(&channel_id.to_le_bytes());
    header
}

/// `{ length: i32, bytes }` frame for one record
fn framed(message: &ChannelMessage) -> Result<Vec<u8>> {
    let len = i32::try_from(message.len()).map_err(|_| ArchiveError::TooLarge {
        what: "log record",
        size: message.len(),
        max: i32::MAX as usize,
    })?;
    let mut buf = Vec::with_capacity(4 + message.len());
    buf.extend_from_slice(&len.to_le_bytes());
    buf.extend_from_slice(message.bytes());
    Ok(buf)
}

fn record_len(prefix: i32) -> Result<usize> {
    usize::try_from(prefix).map_err(|_| ArchiveError::MalformedLength(prefix))
}

#[cfg(test)]
#[path = "channel_log_tests.rs"]
mod tests;
