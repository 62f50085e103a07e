//! Tests for payload and received-message types.

use crate::transport::domain::{PartitionId, Payload, ReceivedMessage};
use chrono::{TimeZone, Utc};
use rstest::rstest;

#[rstest]
#[case(Payload::from("héllo"), 6, Some("héllo"))]
#[case(Payload::from(vec![1_u8, 2, 3]), 3, None)]
#[case(Payload::from(String::new()), 0, Some(""))]
fn payload_reports_size_and_text(
    #[case] payload: Payload,
    #[case] expected_len: usize,
    #[case] expected_text: Option<&str>,
) {
    assert_eq!(payload.len(), expected_len);
    assert_eq!(payload.is_empty(), expected_len == 0);
    assert_eq!(payload.as_text(), expected_text);
}

#[test]
fn payload_mut_rewrites_only_the_body() {
    let enqueued = Utc
        .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
        .single()
        .expect("valid timestamp");
    let mut message =
        ReceivedMessage::new(Payload::from("raw"), PartitionId::from("7"), 42, enqueued);

    *message.payload_mut() = Payload::from("formatted");

    assert_eq!(message.payload(), &Payload::from("formatted"));
    assert_eq!(message.partition_id().as_str(), "7");
    assert_eq!(message.sequence_number(), 42);
    assert_eq!(message.enqueued_time(), enqueued);
}

#[test]
fn received_message_serialises_with_camel_case_keys() {
    let enqueued = Utc
        .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
        .single()
        .expect("valid timestamp");
    let message = ReceivedMessage::new(Payload::from("x"), PartitionId::from("1"), 9, enqueued);

    let json = serde_json::to_value(&message).expect("message serialises");

    assert_eq!(json["partitionId"], "1");
    assert_eq!(json["sequenceNumber"], 9);
    assert_eq!(json["payload"]["kind"], "text");
    assert_eq!(json["payload"]["body"], "x");
}
