// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Message record shapes
//!
//! Three nested layouts share one body. Each wider shape is the narrower one
//! with identifiers prepended:
//!
//! ```text
//! ChannelMessage:                      [message][user][textLen][count][text][attachments]
//! ServerMessage:              [channel][message][user][textLen][count][text][attachments]
//! Message:            [server][channel][message][user][textLen][count][text][attachments]
//! ```
//!
//! Records own their buffer and decode lazily: construction from bytes does
//! no validation, and every accessor is bounds checked.

mod channel;
mod message;
mod server;

pub use channel::ChannelMessage;
pub use message::Message;
pub use server::ServerMessage;

use crate::attachments;
use crate::chunk::ByteChunk;
use crate::error::{ArchiveError, Result};
use crate::layout;

/// Longest encoded message text the u16 length field can describe
pub const MAX_TEXT_LEN: usize = u16::MAX as usize;

/// Field access common to all three record shapes
///
/// Each shape supplies its own field offsets; the decoding on top of them is
/// shared.
pub trait MessageRecord: ByteChunk {
    const MESSAGE_ID_AT: usize;
    const USER_ID_AT: usize;
    const TEXT_LEN_AT: usize;
    const ATTACHMENT_COUNT_AT: usize;
    /// Size of the fixed part; text starts here
    const HEADER_LEN: usize;

    fn message_id(&self) -> Result<u64> {
        layout::read_u64(self.bytes(), Self::MESSAGE_ID_AT)
    }

    fn user_id(&self) -> Result<u64> {
        layout::read_u64(self.bytes(), Self::USER_ID_AT)
    }

    /// Encoded text length in bytes
    fn text_len(&self) -> Result<u16> {
        layout::read_u16(self.bytes(), Self::TEXT_LEN_AT)
    }

    fn attachment_count(&self) -> Result<u8> {
        layout::read_u8(self.bytes(), Self::ATTACHMENT_COUNT_AT)
    }

    /// Raw UTF-16LE text bytes
    fn text_bytes(&self) -> Result<&[u8]> {
        let len = self.text_len()? as usize;
        layout::slice(self.bytes(), Self::HEADER_LEN, len)
    }

    fn text(&self) -> Result<String> {
        layout::decode_utf16(self.text_bytes()?)
    }

    fn attachments(&self) -> Result<Vec<String>> {
        let count = self.attachment_count()? as usize;
        let start = Self::HEADER_LEN + self.text_len()? as usize;
        let tail = self
            .bytes()
            .get(start..)
            .ok_or_else(|| ArchiveError::out_of_range(start, 0, self.len()))?;
        attachments::decode_attachments(count, tail)
    }
}

/// Lay out `ids` followed by the shared message body
fn encode_record<S: AsRef<str>>(ids: &[u64], text: &str, attachments: &[S]) -> Result<Vec<u8>> {
    let text = layout::encode_utf16(text);
    if text.len() > MAX_TEXT_LEN {
        return Err(ArchiveError::TooLarge {
            what: "message text",
            size: text.len(),
            max: MAX_TEXT_LEN,
        });
    }
    let tail = attachments::encode_attachments(attachments)?;

    let mut buf = Vec::with_capacity(ids.len() * 8 + 3 + text.len() + tail.len());
    for id in ids {
        buf.extend_from_slice(&id.to_le_bytes());
    }
    buf.extend_from_slice(&(text.len() as u16).to_le_bytes());
    buf.push(attachments.len() as u8);
    buf.extend_from_slice(&text);
    buf.extend_from_slice(&tail);
    Ok(buf)
}

/// Prepend `ids` to an already encoded record, copying it verbatim
fn widen(ids: &[u64], inner: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(ids.len() * 8 + inner.len());
    for id in ids {
        buf.extend_from_slice(&id.to_le_bytes());
    }
    buf.extend_from_slice(inner);
    buf
}

/// Strip `ids` leading identifiers, copying the rest
fn narrow(bytes: &[u8], ids: usize) -> Result<Vec<u8>> {
    let start = ids * 8;
    bytes
        .get(start..)
        .map(<[u8]>::to_vec)
        .ok_or_else(|| ArchiveError::out_of_range(0, start, bytes.len()))
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
