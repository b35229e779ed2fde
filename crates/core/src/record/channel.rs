// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{encode_record, MessageRecord};
use crate::chunk::ByteChunk;
use crate::error::Result;

/// Message scoped to a single channel
///
/// Layout: `messageID(0:8) userID(8:8) textLen(16:2) attachmentCount(18:1)
/// text(19:textLen) attachments(…)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMessage {
    bytes: Vec<u8>,
}

impl ChannelMessage {
    /// Wrap raw bytes without validating them
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn encode<S: AsRef<str>>(
        message_id: u64,
        user_id: u64,
        text: &str,
        attachments: &[S],
    ) -> Result<Self> {
        let bytes = encode_record(&[message_id, user_id], text, attachments)?;
        Ok(Self { bytes })
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl ByteChunk for ChannelMessage {
    fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

impl MessageRecord for ChannelMessage {
    const MESSAGE_ID_AT: usize = 0;
    const USER_ID_AT: usize = 8;
    const TEXT_LEN_AT: usize = 16;
    const ATTACHMENT_COUNT_AT: usize = 18;
    const HEADER_LEN: usize = 19;
}
