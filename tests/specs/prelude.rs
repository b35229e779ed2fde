//! Shared helpers for archive specs

#![allow(dead_code)]

pub use archive_core::{
    ArchiveError, ByteChunk, ChannelMessage, Message, MessageRecord, ServerMessage,
    StorageConfig,
};
pub use archive_storage::{ChannelLog, IndexedStore, StoreBuilder};
pub use std::path::PathBuf;

/// Temporary directory holding archive files for one spec
pub struct Archive {
    dir: tempfile::TempDir,
}

impl Archive {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn size(&self, name: &str) -> u64 {
        std::fs::metadata(self.path(name)).unwrap().len()
    }

    pub fn write(&self, name: &str, bytes: &[u8]) {
        std::fs::write(self.path(name), bytes).unwrap();
    }
}

pub fn msg(id: u64, text: &str) -> ChannelMessage {
    ChannelMessage::encode(id, 4000 + id, text, &[format!("https://cdn.example/{id}.png")])
        .unwrap()
}

/// Field-level view used to compare records in assertions
pub fn fields<R: MessageRecord>(record: &R) -> (u64, u64, String, Vec<String>) {
    (
        record.message_id().unwrap(),
        record.user_id().unwrap(),
        record.text().unwrap(),
        record.attachments().unwrap(),
    )
}
