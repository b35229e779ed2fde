// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Indexed binary store
//!
//! Three levels of index blocks lead to runs of message records:
//!
//! ```text
//! offset 0                 server index   { count: u16, count × (id, offset) }
//! server chunk offset  ->  channel index  (same shape)
//! channel chunk offset ->  message index  (same shape)
//! first message offset ->  count × { length: u16, record }
//! ```
//!
//! Nothing is cached: each call re-reads the index levels it needs, and
//! lookups scan siblings linearly.

use archive_core::{
    read_index_block, ChannelMessage, IdOffsetChunk, Result, ServerMessage, StorageConfig,
};
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Read-only navigator over an indexed archive file
pub struct IndexedStore<F = BufReader<File>> {
    file: F,
}

impl IndexedStore<BufReader<File>> {
    /// Opens a store read-only. The store never writes, so `sync_writes`
    /// and `create_dirs` have no effect here; a missing file is an error.
    pub fn open(path: &Path, config: &StorageConfig) -> Result<Self> {
        let file = File::open(path)?;
        tracing::debug!(path = %path.display(), ?config, "opened indexed store");
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<F: Read + Seek> IndexedStore<F> {
    pub fn new(file: F) -> Self {
        Self { file }
    }

    /// Top-level index of servers
    pub fn server_list(&mut self) -> Result<Vec<IdOffsetChunk>> {
        self.read_block_at(0)
    }

    /// Channel index of `server_id`; empty when the server is unknown
    pub fn channel_list(&mut self, server_id: u64) -> Result<Vec<IdOffsetChunk>> {
        match find(&self.server_list()?, server_id) {
            Some(server) => self.read_block_at(server.offset()),
            None => Ok(Vec::new()),
        }
    }

    /// Message index of one channel; empty when server or channel is unknown
    pub fn message_list(&mut self, server_id: u64, channel_id: u64) -> Result<Vec<IdOffsetChunk>> {
        match find(&self.channel_list(server_id)?, channel_id) {
            Some(channel) => self.read_block_at(channel.offset()),
            None => Ok(Vec::new()),
        }
    }

    /// Lazily read the message run of one channel
    pub fn channel_messages(
        &mut self,
        server_id: u64,
        channel_id: u64,
    ) -> Result<ChannelMessages<'_, F>> {
        let messages = self.message_list(server_id, channel_id)?;
        if let Some(first) = messages.first() {
            self.file.seek(SeekFrom::Start(first.offset()))?;
        }
        Ok(ChannelMessages {
            file: &mut self.file,
            remaining: messages.len(),
        })
    }

    /// Lazily read every message of a server, paired with its channel id
    pub fn server_messages(&mut self, server_id: u64) -> Result<ServerMessages<'_, F>> {
        let channels = self.channel_list(server_id)?;
        Ok(ServerMessages {
            store: self,
            server_id,
            channels: channels.into_iter(),
            current: None,
        })
    }

    /// Like [`Self::server_messages`], widening each record with its channel id
    pub fn server_messages_widened(
        &mut self,
        server_id: u64,
    ) -> Result<impl Iterator<Item = Result<ServerMessage>> + '_> {
        Ok(self.server_messages(server_id)?.map(|item| {
            item.map(|(message, channel_id)| ServerMessage::from_channel(&message, channel_id))
        }))
    }

    pub fn into_inner(self) -> F {
        self.file
    }

    fn read_block_at(&mut self, offset: u64) -> Result<Vec<IdOffsetChunk>> {
        self.file.seek(SeekFrom::Start(offset))?;
        let block = read_index_block(&mut self.file)?;
        tracing::debug!(offset, entries = block.len(), "read index block");
        Ok(block)
    }
}

fn find(chunks: &[IdOffsetChunk], id: u64) -> Option<&IdOffsetChunk> {
    chunks.iter().find(|chunk| chunk.id() == id)
}

/// Read one `{ length: u16, record }` entry of a message run
fn read_run_record<R: Read>(reader: &mut R) -> Result<ChannelMessage> {
    let mut prefix = [0u8; 2];
    reader.read_exact(&mut prefix)?;
    let mut record = vec![0u8; u16::from_le_bytes(prefix) as usize];
    reader.read_exact(&mut record)?;
    Ok(ChannelMessage::from_bytes(record))
}

/// Lazy iterator over one channel's message run
pub struct ChannelMessages<'a, F> {
    file: &'a mut F,
    remaining: usize,
}

impl<F: Read + Seek> Iterator for ChannelMessages<'_, F> {
    type Item = Result<ChannelMessage>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        match read_run_record(&mut *self.file) {
            Ok(message) => {
                self.remaining -= 1;
                Some(Ok(message))
            }
            Err(e) => {
                self.remaining = 0;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

/// Lazy iterator over every channel of a server
pub struct ServerMessages<'a, F> {
    store: &'a mut IndexedStore<F>,
    server_id: u64,
    channels: std::vec::IntoIter<IdOffsetChunk>,
    /// Channel being read and records left in its run
    current: Option<(u64, usize)>,
}

impl<F: Read + Seek> ServerMessages<'_, F> {
    /// Position on the next channel with a non-empty run
    fn advance(&mut self) -> Result<bool> {
        for channel in self.channels.by_ref() {
            let messages = self.store.message_list(self.server_id, channel.id())?;
            if let Some(first) = messages.first() {
                self.store.file.seek(SeekFrom::Start(first.offset()))?;
                self.current = Some((channel.id(), messages.len()));
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl<F: Read + Seek> Iterator for ServerMessages<'_, F> {
    type Item = Result<(ChannelMessage, u64)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((channel_id, remaining)) = self.current.as_mut() {
                if *remaining > 0 {
                    let channel_id = *channel_id;
                    *remaining -= 1;
                    return match read_run_record(&mut self.store.file) {
                        Ok(message) => Some(Ok((message, channel_id))),
                        Err(e) => {
                            self.current = None;
                            self.channels = Vec::new().into_iter();
                            Some(Err(e))
                        }
                    };
                }
            }
            self.current = None;
            match self.advance() {
                Ok(true) => continue,
                Ok(false) => return None,
                Err(e) => {
                    self.channels = Vec::new().into_iter();
                    return Some(Err(e));
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
