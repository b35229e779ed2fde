// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! archive-core: binary record formats for chat archives
//!
//! This crate provides:
//! - The three nested message record shapes and their shared byte access
//! - The attachment list codec embedded in every record
//! - The 16-byte `(id, offset)` index entry and index block codec
//! - Storage configuration and the shared error type

pub mod attachments;
pub mod chunk;
pub mod config;
pub mod error;
pub mod index;
mod layout;
pub mod record;

pub use chunk::{ByteChunk, IdOffsetChunk};
pub use config::StorageConfig;
pub use error::{ArchiveError, Result};
pub use index::{index_block_len, read_index_block, write_index_block, MAX_INDEX_ENTRIES};
pub use record::{ChannelMessage, Message, MessageRecord, ServerMessage, MAX_TEXT_LEN};
