// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Attachment list codec
//!
//! A record's tail holds exactly `attachmentCount` entries, each
//! `{ length: u16, text: length bytes of UTF-16LE }`. The count lives in the
//! record header, so the tail carries no terminator.

use crate::error::{ArchiveError, Result};
use crate::layout;

/// Attachment count is stored in a single header byte
pub const MAX_ATTACHMENTS: usize = u8::MAX as usize;

/// Longest encoded attachment the u16 entry prefix can describe
pub const MAX_ATTACHMENT_LEN: usize = u16::MAX as usize;

/// Encode attachment entries (without the count byte)
pub fn encode_attachments<S: AsRef<str>>(attachments: &[S]) -> Result<Vec<u8>> {
    if attachments.len() > MAX_ATTACHMENTS {
        return Err(ArchiveError::TooLarge {
            what: "attachment count",
            size: attachments.len(),
            max: MAX_ATTACHMENTS,
        });
    }

    let mut buf = Vec::new();
    for attachment in attachments {
        let encoded = layout::encode_utf16(attachment.as_ref());
        if encoded.len() > MAX_ATTACHMENT_LEN {
            return Err(ArchiveError::TooLarge {
                what: "attachment",
                size: encoded.len(),
                max: MAX_ATTACHMENT_LEN,
            });
        }
        buf.extend_from_slice(&(encoded.len() as u16).to_le_bytes());
        buf.extend_from_slice(&encoded);
    }
    Ok(buf)
}

/// Decode exactly `count` entries from the start of `tail`
///
/// Bytes after the last entry are ignored.
pub fn decode_attachments(count: usize, tail: &[u8]) -> Result<Vec<String>> {
    let mut attachments = Vec::with_capacity(count);
    let mut offset = 0;
    for _ in 0..count {
        let len = layout::read_u16(tail, offset)? as usize;
        offset += 2;
        attachments.push(layout::decode_utf16(layout::slice(tail, offset, len)?)?);
        offset += len;
    }
    Ok(attachments)
}

/// Decode a standalone `{ count: u8, entries… }` string list
pub fn decode_string_list(bytes: &[u8]) -> Result<Vec<String>> {
    let count = layout::read_u8(bytes, 0)? as usize;
    decode_attachments(count, &bytes[1..])
}

/// Encode a standalone `{ count: u8, entries… }` string list
pub fn encode_string_list<S: AsRef<str>>(entries: &[S]) -> Result<Vec<u8>> {
    let body = encode_attachments(entries)?;
    let mut buf = Vec::with_capacity(body.len() + 1);
    buf.push(entries.len() as u8);
    buf.extend_from_slice(&body);
    Ok(buf)
}

#[cfg(test)]
#[path = "attachments_tests.rs"]
mod tests;
