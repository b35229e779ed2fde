//! Indexed store specs
//!
//! Stores built on disk navigate server → channel → message.

use crate::prelude::*;
use similar_asserts::assert_eq;

fn build(archive: &Archive) -> PathBuf {
    let path = archive.path("archive.bin");
    let mut builder = StoreBuilder::new();
    builder
        .server(1)
        .channel(10)
        .push(msg(1, "m1"))
        .push(msg(2, "m2"));
    builder.server(2).channel(20).push(msg(3, "m3"));
    builder.write_file(&path, &StorageConfig::default()).unwrap();
    path
}

#[test]
fn server_messages_walk_every_channel() {
    let archive = Archive::empty();
    let mut store = IndexedStore::open(&build(&archive), &StorageConfig::default()).unwrap();

    let first: Vec<_> = store
        .server_messages(1)
        .unwrap()
        .map(|item| item.unwrap())
        .collect();
    assert_eq!(first, vec![(msg(1, "m1"), 10), (msg(2, "m2"), 10)]);

    let second: Vec<_> = store
        .server_messages(2)
        .unwrap()
        .map(|item| item.unwrap())
        .collect();
    assert_eq!(second, vec![(msg(3, "m3"), 20)]);
}

#[test]
fn unknown_ids_are_empty_not_errors() {
    let archive = Archive::empty();
    let mut store = IndexedStore::open(&build(&archive), &StorageConfig::default()).unwrap();

    assert!(store.channel_list(77).unwrap().is_empty());
    assert!(store.message_list(1, 77).unwrap().is_empty());
    assert_eq!(store.server_messages(77).unwrap().count(), 0);
}

#[test]
fn store_records_widen_to_fully_qualified_messages() {
    let archive = Archive::empty();
    let mut store = IndexedStore::open(&build(&archive), &StorageConfig::default()).unwrap();

    let full: Vec<_> = store
        .server_messages_widened(2)
        .unwrap()
        .map(|m| Message::from_server(&m.unwrap(), 2))
        .collect();

    assert_eq!(full.len(), 1);
    assert_eq!(full[0].server_id().unwrap(), 2);
    assert_eq!(full[0].channel_id().unwrap(), 20);
    assert_eq!(fields(&full[0]), fields(&msg(3, "m3")));
}

#[test]
fn log_contents_can_be_indexed_into_a_store() {
    let archive = Archive::empty();
    let log_path = archive.path("channel.log");
    let mut log = ChannelLog::create(&log_path, &StorageConfig::default()).unwrap();
    log.write_channel(5, 50).unwrap();
    log.dump_messages(&[msg(1, "a"), msg(2, "b")]).unwrap();

    let (server, channel) = log.channel().unwrap();
    let mut builder = StoreBuilder::new();
    for m in log.read_messages().unwrap() {
        builder.server(server).channel(channel).push(m.unwrap());
    }
    let store_path = archive.path("store.bin");
    builder
        .write_file(&store_path, &StorageConfig::default())
        .unwrap();

    let mut store = IndexedStore::open(&store_path, &StorageConfig::default()).unwrap();
    let texts: Vec<_> = store
        .channel_messages(5, 50)
        .unwrap()
        .map(|m| m.unwrap().text().unwrap())
        .collect();
    assert_eq!(texts, vec!["a".to_string(), "b".to_string()]);
}
