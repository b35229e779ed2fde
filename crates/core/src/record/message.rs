// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{encode_record, narrow, widen, ChannelMessage, MessageRecord, ServerMessage};
use crate::chunk::ByteChunk;
use crate::error::Result;
use crate::layout;

/// Fully-qualified message carrying both server and channel ids
///
/// Layout: `serverID(0:8) channelID(8:8) messageID(16:8) userID(24:8)
/// textLen(32:2) attachmentCount(34:1) text(35:textLen) attachments(…)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    bytes: Vec<u8>,
}

impl Message {
    const SERVER_ID_AT: usize = 0;
    const CHANNEL_ID_AT: usize = 8;

    /// Wrap raw bytes without validating them
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn encode<S: AsRef<str>>(
        server_id: u64,
        channel_id: u64,
        message_id: u64,
        user_id: u64,
        text: &str,
        attachments: &[S],
    ) -> Result<Self> {
        let bytes = encode_record(
            &[server_id, channel_id, message_id, user_id],
            text,
            attachments,
        )?;
        Ok(Self { bytes })
    }

    pub fn from_server(message: &ServerMessage, server_id: u64) -> Self {
        Self {
            bytes: widen(&[server_id], message.bytes()),
        }
    }

    pub fn from_channel(message: &ChannelMessage, server_id: u64, channel_id: u64) -> Self {
        Self {
            bytes: widen(&[server_id, channel_id], message.bytes()),
        }
    }

    pub fn server_id(&self) -> Result<u64> {
        layout::read_u64(&self.bytes, Self::SERVER_ID_AT)
    }

    pub fn channel_id(&self) -> Result<u64> {
        layout::read_u64(&self.bytes, Self::CHANNEL_ID_AT)
    }

    pub fn server_message(&self) -> Result<ServerMessage> {
        Ok(ServerMessage::from_bytes(narrow(&self.bytes, 1)?))
    }

    pub fn channel_message(&self) -> Result<ChannelMessage> {
        Ok(ChannelMessage::from_bytes(narrow(&self.bytes, 2)?))
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl ByteChunk for Message {
    fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

impl MessageRecord for Message {
    const MESSAGE_ID_AT: usize = 16;
    const USER_ID_AT: usize = 24;
    const TEXT_LEN_AT: usize = 32;
    const ATTACHMENT_COUNT_AT: usize = 34;
    const HEADER_LEN: usize = 35;
}
