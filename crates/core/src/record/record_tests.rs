// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

fn sample_channel_message() -> ChannelMessage {
    ChannelMessage::encode(
        1001,
        77,
        "hello there",
        &["https://cdn.example/cat.png", "notes.txt"],
    )
    .unwrap()
}

#[test]
fn channel_message_layout_is_fixed_offset() {
    let msg = ChannelMessage::encode(0x0102, 0x0304, "hi", &["a"]).unwrap();
    let bytes = msg.bytes();

    assert_eq!(&bytes[0..8], &0x0102u64.to_le_bytes());
    assert_eq!(&bytes[8..16], &0x0304u64.to_le_bytes());
    assert_eq!(&bytes[16..18], &4u16.to_le_bytes());
    assert_eq!(bytes[18], 1);
    assert_eq!(&bytes[19..23], &[b'h', 0, b'i', 0]);
    assert_eq!(&bytes[23..], &[2, 0, b'a', 0]);
    // header + text + one attachment entry, no padding
    assert_eq!(msg.len(), 19 + 4 + 2 + 2);
}

#[test]
fn channel_message_decodes_its_fields() {
    let msg = sample_channel_message();
    assert_eq!(msg.message_id().unwrap(), 1001);
    assert_eq!(msg.user_id().unwrap(), 77);
    assert_eq!(msg.text_len().unwrap(), 22);
    assert_eq!(msg.attachment_count().unwrap(), 2);
    assert_eq!(msg.text().unwrap(), "hello there");
    assert_eq!(
        msg.attachments().unwrap(),
        vec!["https://cdn.example/cat.png", "notes.txt"]
    );
}

#[test]
fn non_empty_text_is_not_decoded_as_empty() {
    let msg = ChannelMessage::encode(1, 2, "body", &[] as &[&str]).unwrap();
    assert_eq!(msg.text().unwrap(), "body");
}

#[test]
fn attachments_start_right_after_text() {
    // each attachment is read from its u16 prefix, not one byte later
    let msg = ChannelMessage::encode(1, 2, "x", &["first", "second"]).unwrap();
    let tail = &msg.bytes()[ChannelMessage::HEADER_LEN + 2..];
    assert_eq!(&tail[0..2], &10u16.to_le_bytes());
    assert_eq!(msg.attachments().unwrap(), vec!["first", "second"]);
}

#[test]
fn from_bytes_round_trips_raw_buffers() {
    let msg = sample_channel_message();
    let copy = ChannelMessage::from_bytes(msg.clone().into_bytes());
    assert_eq!(copy, msg);
    assert_eq!(copy.text().unwrap(), "hello there");
}

#[test]
fn server_message_decodes_its_fields() {
    let msg = ServerMessage::encode(10, 1001, 77, "hey", &["a.png"]).unwrap();
    assert_eq!(msg.channel_id().unwrap(), 10);
    assert_eq!(msg.message_id().unwrap(), 1001);
    assert_eq!(msg.user_id().unwrap(), 77);
    assert_eq!(msg.text().unwrap(), "hey");
    assert_eq!(msg.attachments().unwrap(), vec!["a.png"]);
    assert_eq!(msg.bytes()[26], 1);
}

#[test]
fn message_decodes_its_fields() {
    let msg = Message::encode(5, 10, 1001, 77, "full", &["z"]).unwrap();
    assert_eq!(msg.server_id().unwrap(), 5);
    assert_eq!(msg.channel_id().unwrap(), 10);
    assert_eq!(msg.message_id().unwrap(), 1001);
    assert_eq!(msg.user_id().unwrap(), 77);
    assert_eq!(msg.text().unwrap(), "full");
    assert_eq!(msg.attachments().unwrap(), vec!["z"]);
    assert_eq!(msg.bytes()[34], 1);
}

#[test]
fn widening_to_server_preserves_inner_bytes() {
    let inner = sample_channel_message();
    let widened = ServerMessage::from_channel(&inner, 10);

    assert_eq!(widened.len(), inner.len() + 8);
    assert_eq!(&widened.bytes()[8..], inner.bytes());
    assert_eq!(widened.channel_id().unwrap(), 10);
    assert_eq!(widened.message_id().unwrap(), 1001);
    assert_eq!(widened.user_id().unwrap(), 77);
    assert_eq!(widened.text().unwrap(), inner.text().unwrap());
    assert_eq!(widened.attachments().unwrap(), inner.attachments().unwrap());
}

#[test]
fn widening_matches_direct_encoding() {
    let inner = sample_channel_message();
    let direct = ServerMessage::encode(
        10,
        1001,
        77,
        "hello there",
        &["https://cdn.example/cat.png", "notes.txt"],
    )
    .unwrap();
    assert_eq!(ServerMessage::from_channel(&inner, 10), direct);

    let full = Message::encode(
        5,
        10,
        1001,
        77,
        "hello there",
        &["https://cdn.example/cat.png", "notes.txt"],
    )
    .unwrap();
    assert_eq!(Message::from_channel(&inner, 5, 10), full);
    assert_eq!(Message::from_server(&direct, 5), full);
}

#[test]
fn narrowing_recovers_inner_shapes() {
    let inner = sample_channel_message();
    let full = Message::from_channel(&inner, 5, 10);

    assert_eq!(full.channel_message().unwrap(), inner);
    assert_eq!(
        full.server_message().unwrap(),
        ServerMessage::from_channel(&inner, 10)
    );
    assert_eq!(
        ServerMessage::from_channel(&inner, 10)
            .channel_message()
            .unwrap(),
        inner
    );
}

#[test]
fn narrowing_a_short_buffer_fails() {
    let stub = Message::from_bytes(vec![0; 12]);
    assert!(stub.channel_message().is_err());
    assert!(stub.server_message().is_ok());
}

#[parameterized(
    empty = { vec![] },
    ids_only = { vec![0; 16] },
    missing_count = { vec![0; 18] },
)]
fn truncated_header_is_out_of_range(bytes: Vec<u8>) {
    let msg = ChannelMessage::from_bytes(bytes);
    assert!(matches!(
        msg.attachment_count(),
        Err(ArchiveError::OutOfRange { .. })
    ));
}

#[test]
fn lying_text_length_is_out_of_range() {
    let mut msg = ChannelMessage::encode(1, 2, "ab", &[] as &[&str]).unwrap();
    msg.set_range(16, 2, &200u16.to_le_bytes()).unwrap();
    assert!(matches!(msg.text(), Err(ArchiveError::OutOfRange { .. })));
    assert!(msg.attachments().is_err());
}

#[test]
fn lying_attachment_count_is_out_of_range() {
    let mut msg = ChannelMessage::encode(1, 2, "ab", &["x"]).unwrap();
    msg.set_byte(18, 3).unwrap();
    assert!(matches!(
        msg.attachments(),
        Err(ArchiveError::OutOfRange { .. })
    ));
}

#[test]
fn range_writes_patch_fields_in_place() {
    let mut msg = sample_channel_message();
    msg.set_range(8, 8, &99u64.to_le_bytes()).unwrap();
    assert_eq!(msg.user_id().unwrap(), 99);
    assert_eq!(msg.range(8, 8).unwrap(), &99u64.to_le_bytes());

    let err = msg.set_range(8, 8, &[1, 2]).unwrap_err();
    assert!(matches!(err, ArchiveError::LengthMismatch { .. }));
}

#[test]
fn oversized_text_is_rejected() {
    let text = "a".repeat(MAX_TEXT_LEN / 2 + 1);
    let err = ChannelMessage::encode(1, 2, &text, &[] as &[&str]).unwrap_err();
    assert!(matches!(
        err,
        ArchiveError::TooLarge {
            what: "message text",
            ..
        }
    ));
}

#[test]
fn empty_message_is_just_a_header() {
    let msg = Message::encode(1, 2, 3, 4, "", &[] as &[&str]).unwrap();
    assert_eq!(msg.len(), Message::HEADER_LEN);
    assert_eq!(msg.text().unwrap(), "");
    assert!(msg.attachments().unwrap().is_empty());
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_attachments() -> impl Strategy<Value = Vec<String>> {
        proptest::collection::vec(".{0,40}", 0..8)
    }

    proptest! {
        #[test]
        fn channel_message_round_trips(
            message_id in any::<u64>(),
            user_id in any::<u64>(),
            text in ".{0,200}",
            attachments in arb_attachments(),
        ) {
            let encoded = ChannelMessage::encode(message_id, user_id, &text, &attachments).unwrap();
            let decoded = ChannelMessage::from_bytes(encoded.into_bytes());
            prop_assert_eq!(decoded.message_id().unwrap(), message_id);
            prop_assert_eq!(decoded.user_id().unwrap(), user_id);
            prop_assert_eq!(decoded.text().unwrap(), text);
            prop_assert_eq!(decoded.attachments().unwrap(), attachments);
        }

        #[test]
        fn server_message_round_trips(
            channel_id in any::<u64>(),
            message_id in any::<u64>(),
            user_id in any::<u64>(),
            text in ".{0,200}",
            attachments in arb_attachments(),
        ) {
            let encoded =
                ServerMessage::encode(channel_id, message_id, user_id, &text, &attachments).unwrap();
            let decoded = ServerMessage::from_bytes(encoded.into_bytes());
            prop_assert_eq!(decoded.channel_id().unwrap(), channel_id);
            prop_assert_eq!(decoded.message_id().unwrap(), message_id);
            prop_assert_eq!(decoded.user_id().unwrap(), user_id);
            prop_assert_eq!(decoded.text().unwrap(), text);
            prop_assert_eq!(decoded.attachments().unwrap(), attachments);
        }

        #[test]
        fn message_round_trips(
            server_id in any::<u64>(),
            channel_id in any::<u64>(),
            message_id in any::<u64>(),
            user_id in any::<u64>(),
            text in ".{0,200}",
            attachments in arb_attachments(),
        ) {
            let encoded = Message::encode(
                server_id, channel_id, message_id, user_id, &text, &attachments,
            )
            .unwrap();
            let decoded = Message::from_bytes(encoded.into_bytes());
            prop_assert_eq!(decoded.server_id().unwrap(), server_id);
            prop_assert_eq!(decoded.channel_id().unwrap(), channel_id);
            prop_assert_eq!(decoded.message_id().unwrap(), message_id);
            prop_assert_eq!(decoded.user_id().unwrap(), user_id);
            prop_assert_eq!(decoded.text().unwrap(), text);
            prop_assert_eq!(decoded.attachments().unwrap(), attachments);
        }

        #[test]
        fn widening_keeps_every_field(
            channel_id in any::<u64>(),
            message_id in any::<u64>(),
            user_id in any::<u64>(),
            text in ".{0,100}",
            attachments in arb_attachments(),
        ) {
            let inner = ChannelMessage::encode(message_id, user_id, &text, &attachments).unwrap();
            let widened = ServerMessage::from_channel(&inner, channel_id);
            prop_assert_eq!(widened.channel_id().unwrap(), channel_id);
            prop_assert_eq!(widened.message_id().unwrap(), message_id);
            prop_assert_eq!(widened.user_id().unwrap(), user_id);
            prop_assert_eq!(widened.text().unwrap(), text);
            prop_assert_eq!(widened.attachments().unwrap(), attachments);
        }
    }
}
