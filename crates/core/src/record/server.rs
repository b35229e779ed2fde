// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{encode_record, narrow, widen, ChannelMessage, MessageRecord};
use crate::chunk::ByteChunk;
use crate::error::Result;
use crate::layout;

/// Message scoped to a server: a channel message with its channel id in front
///
/// Layout: `channelID(0:8) messageID(8:8) userID(16:8) textLen(24:2)
/// attachmentCount(26:1) text(27:textLen) attachments(…)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerMessage {
    bytes: Vec<u8>,
}

impl ServerMessage {
    const CHANNEL_ID_AT: usize = 0;

    /// Wrap raw bytes without validating them
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn encode<S: AsRef<str>>(
        channel_id: u64,
        message_id: u64,
        user_id: u64,
        text: &str,
        attachments: &[S],
    ) -> Result<Self> {
        let bytes = encode_record(&[channel_id, message_id, user_id], text, attachments)?;
        Ok(Self { bytes })
    }

    /// Widen a channel message; its bytes are copied unchanged after the id
    pub fn from_channel(message: &ChannelMessage, channel_id: u64) -> Self {
        Self {
            bytes: widen(&[channel_id], message.bytes()),
        }
    }

    pub fn channel_id(&self) -> Result<u64> {
        layout::read_u64(&self.bytes, Self::CHANNEL_ID_AT)
    }

    /// The channel-scoped record without the leading channel id
    pub fn channel_message(&self) -> Result<ChannelMessage> {
        Ok(ChannelMessage::from_bytes(narrow(&self.bytes, 1)?))
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl ByteChunk for ServerMessage {
    fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

impl MessageRecord for ServerMessage {
    const MESSAGE_ID_AT: usize = 8;
    const USER_ID_AT: usize = 16;
    const TEXT_LEN_AT: usize = 24;
    const ATTACHMENT_COUNT_AT: usize = 26;
    const HEADER_LEN: usize = 27;
}
