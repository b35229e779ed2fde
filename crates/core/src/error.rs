// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy shared by the record codecs, the channel log and the
//! indexed store.

use std::io;
use thiserror::Error;

/// Errors raised while encoding, decoding or navigating archive files
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("malformed chunk: expected {expected} bytes, got {actual}")]
    MalformedSize { expected: usize, actual: usize },
    #[error("end of stream: {0}")]
    EndOfStream(String),
    #[error("length mismatch: range is {expected} bytes, source is {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("out of range: {len} bytes at offset {offset} exceeds buffer of {size}")]
    OutOfRange {
        offset: usize,
        len: usize,
        size: usize,
    },
    #[error("{what} too large: {size} exceeds {max}")]
    TooLarge {
        what: &'static str,
        size: usize,
        max: usize,
    },
    #[error("malformed length prefix: {0}")]
    MalformedLength(i32),
    #[error("text is not valid UTF-16")]
    InvalidText,
    #[error("IO error: {0}")]
    Io(#[source] io::Error),
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl From<io::Error> for ArchiveError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            ArchiveError::EndOfStream(err.to_string())
        } else {
            ArchiveError::Io(err)
        }
    }
}

impl ArchiveError {
    pub(crate) fn out_of_range(offset: usize, len: usize, size: usize) -> Self {
        ArchiveError::OutOfRange { offset, len, size }
    }

    /// True for errors caused by the underlying stream ending early
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, ArchiveError::EndOfStream(_))
    }
}

pub type Result<T> = std::result::Result<T, ArchiveError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
