// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! archive-storage: file access for chat archives
//!
//! Two independent access modes share the record formats from
//! `archive-core`:
//! - `ChannelLog`: append-only, one file per channel
//! - `IndexedStore`: server → channel → message random access, produced by
//!   `StoreBuilder`

pub mod builder;
pub mod channel_log;
pub mod file;
pub mod store;

pub use builder::{ChannelEntry, ServerEntry, StoreBuilder};
pub use channel_log::{ChannelLog, LogMessages};
pub use file::ArchiveFile;
pub use store::{ChannelMessages, IndexedStore, ServerMessages};
