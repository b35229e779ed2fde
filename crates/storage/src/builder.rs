// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Indexed store builder
//!
//! Collects servers, channels and messages in memory and lays them out in
//! the format [`crate::IndexedStore`] reads. Every block is written after the
//! block that points to it:
//!
//! ```text
//! server index
//! ├─ channel index (server A)
//! │  ├─ message index (channel 1) + run
//! │  └─ message index (channel 2) + run
//! └─ channel index (server B)
//!    └─ …
//! ```

use crate::file;
use archive_core::{
    index_block_len, write_index_block, ArchiveError, ByteChunk, ChannelMessage, IdOffsetChunk,
    MessageRecord, Result, StorageConfig, MAX_INDEX_ENTRIES,
};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Largest record a u16 run prefix can describe
const MAX_RUN_RECORD: usize = u16::MAX as usize;

/// In-memory archive waiting to be written
#[derive(Debug, Default, Clone)]
pub struct StoreBuilder {
    servers: Vec<ServerEntry>,
}

#[derive(Debug, Clone)]
pub struct ServerEntry {
    id: u64,
    channels: Vec<ChannelEntry>,
}

#[derive(Debug, Clone)]
pub struct ChannelEntry {
    id: u64,
    messages: Vec<ChannelMessage>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or insert a server; insertion order is file order
    pub fn server(&mut self, id: u64) -> &mut ServerEntry {
        let index = match self.servers.iter().position(|s| s.id == id) {
            Some(index) => index,
            None => {
                self.servers.push(ServerEntry {
                    id,
                    channels: Vec::new(),
                });
                self.servers.len() - 1
            }
        };
        &mut self.servers[index]
    }

    pub fn servers(&self) -> &[ServerEntry] {
        &self.servers
    }

    /// Lay out the whole store, returning the number of bytes written
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<u64> {
        let plan = self.plan()?;

        let servers: Vec<_> = self
            .servers
            .iter()
            .zip(&plan.servers)
            .map(|(server, placed)| IdOffsetChunk::new(server.id, placed.offset))
            .collect();
        write_index_block(writer, &servers)?;

        for (server, placed) in self.servers.iter().zip(&plan.servers) {
            let channels: Vec<_> = server
                .channels
                .iter()
                .zip(&placed.channels)
                .map(|(channel, placed)| IdOffsetChunk::new(channel.id, placed.offset))
                .collect();
            write_index_block(writer, &channels)?;

            for (channel, placed) in server.channels.iter().zip(&placed.channels) {
                let messages = channel
                    .messages
                    .iter()
                    .zip(&placed.messages)
                    .map(|(message, &offset)| -> Result<IdOffsetChunk> {
                        Ok(IdOffsetChunk::new(message.message_id()?, offset))
                    })
                    .collect::<Result<Vec<_>>>()?;
                write_index_block(writer, &messages)?;

                for message in &channel.messages {
                    writer.write_all(&(message.len() as u16).to_le_bytes())?;
                    writer.write_all(message.bytes())?;
                }
            }
        }

        tracing::debug!(
            servers = self.servers.len(),
            bytes = plan.total,
            "indexed store written"
        );
        Ok(plan.total)
    }

    /// Write the store to `path`, replacing any existing file
    pub fn write_file(&self, path: &Path, config: &StorageConfig) -> Result<u64> {
        let file = file::create_rw(path, config)?;
        let mut writer = BufWriter::new(file);
        let written = self.write_to(&mut writer)?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        if config.sync_writes {
            file.sync_all()?;
        }
        Ok(written)
    }

    /// Compute every block's absolute offset before anything is written
    fn plan(&self) -> Result<Plan> {
        check_level(self.servers.len())?;
        let mut pos = index_block_len(self.servers.len());
        let mut servers = Vec::with_capacity(self.servers.len());

        for server in &self.servers {
            check_level(server.channels.len())?;
            let offset = pos;
            pos += index_block_len(server.channels.len());

            let mut channels = Vec::with_capacity(server.channels.len());
            for channel in &server.channels {
                check_level(channel.messages.len())?;
                let channel_offset = pos;
                pos += index_block_len(channel.messages.len());

                let mut messages = Vec::with_capacity(channel.messages.len());
                for message in &channel.messages {
                    if message.len() > MAX_RUN_RECORD {
                        return Err(ArchiveError::TooLarge {
                            what: "store record",
                            size: message.len(),
                            max: MAX_RUN_RECORD,
                        });
                    }
                    messages.push(pos);
                    pos += 2 + message.len() as u64;
                }
                channels.push(PlacedChannel {
                    offset: channel_offset,
                    messages,
                });
            }
            servers.push(PlacedServer { offset, channels });
        }

        Ok(Plan {
            servers,
            total: pos,
        })
    }
}

impl ServerEntry {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Get or insert a channel of this server
    pub fn channel(&mut self, id: u64) -> &mut ChannelEntry {
        let index = match self.channels.iter().position(|c| c.id == id) {
            Some(index) => index,
            None => {
                self.channels.push(ChannelEntry {
                    id,
                    messages: Vec::new(),
                });
                self.channels.len() - 1
            }
        };
        &mut self.channels[index]
    }

    pub fn channels(&self) -> &[ChannelEntry] {
        &self.channels
    }
}

impl ChannelEntry {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn push(&mut self, message: ChannelMessage) -> &mut Self {
        self.messages.push(message);
        self
    }

    pub fn messages(&self) -> &[ChannelMessage] {
        &self.messages
    }
}

fn check_level(entries: usize) -> Result<()> {
    if entries > MAX_INDEX_ENTRIES {
        return Err(ArchiveError::TooLarge {
            what: "index block",
            size: entries,
            max: MAX_INDEX_ENTRIES,
        });
    }
    Ok(())
}

struct Plan {
    servers: Vec<PlacedServer>,
    total: u64,
}

struct PlacedServer {
    offset: u64,
    channels: Vec<PlacedChannel>,
}

struct PlacedChannel {
    offset: u64,
    /// Offset of each record's length prefix
    messages: Vec<u64>,
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
