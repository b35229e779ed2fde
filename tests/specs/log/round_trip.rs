//! Channel log specs
//!
//! A log written through one handle reads back through another.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[test]
fn log_round_trips_three_messages() {
    let archive = Archive::empty();
    let path = archive.path("general.log");
    let written = vec![msg(1, "first"), msg(2, "second"), msg(3, "third")];

    {
        let mut log = ChannelLog::create(&path, &StorageConfig::default()).unwrap();
        log.initialize().unwrap();
        log.write_channel(42, 7).unwrap();
        for m in &written {
            log.dump_message(m).unwrap();
        }
        log.sync().unwrap();
    }

    let mut log = ChannelLog::open(&path, &StorageConfig::default()).unwrap();
    assert_eq!(log.channel().unwrap(), (42, 7));
    let read: Vec<_> = log
        .read_messages()
        .unwrap()
        .map(|m| fields(&m.unwrap()))
        .collect();
    let expected: Vec<_> = written.iter().map(fields).collect();
    assert_eq!(read, expected);
}

#[test]
fn initialize_empties_an_existing_log() {
    let archive = Archive::empty();
    archive.write("old.log", &[1u8; 100]);

    let mut log = ChannelLog::open(&archive.path("old.log"), &StorageConfig::default()).unwrap();
    log.initialize().unwrap();
    drop(log);

    assert_eq!(archive.size("old.log"), 0);
}

#[test]
fn header_only_log_is_end_of_stream() {
    let archive = Archive::empty();
    let path = archive.path("header.log");
    let mut log = ChannelLog::create(&path, &StorageConfig::default()).unwrap();
    log.write_channel(42, 7).unwrap();
    log.sync().unwrap();

    assert_eq!(archive.size("header.log"), 16);
    assert!(log.read_messages().err().unwrap().is_end_of_stream());
}

#[test]
fn header_and_sentinel_is_an_empty_log() {
    let archive = Archive::empty();
    let path = archive.path("sentinel.log");
    let mut log = ChannelLog::create(&path, &StorageConfig::default()).unwrap();
    log.write_channel(42, 7).unwrap();
    log.write_sentinel().unwrap();
    log.sync().unwrap();

    assert_eq!(archive.size("sentinel.log"), 20);
    assert_eq!(log.read_messages().unwrap().count(), 0);
}

#[test]
fn moving_a_log_to_another_channel_keeps_messages() {
    let archive = Archive::empty();
    let path = archive.path("moved.log");
    let mut log = ChannelLog::create(&path, &StorageConfig::default()).unwrap();
    log.write_channel(1, 1).unwrap();
    log.append_message(&msg(9, "kept")).unwrap();

    log.set_channel(2, 3).unwrap();

    assert_eq!(log.channel().unwrap(), (2, 3));
    let read: Vec<_> = log.read_messages().unwrap().map(|m| m.unwrap()).collect();
    assert_eq!(read, vec![msg(9, "kept")]);
}
