//! Tests for the channel module

use trackalign::channel::{
    accumulate, decode, encode, forward_fill, ALTITUDE, GAIT, HEART_RATE, NO_VALUE, POSITION, TIME,
};
use trackalign::ExportError;

#[test]
fn test_decode_tuple_channel() {
    let hr = decode("heart_rate", "0,10;5,20;5,30", HEART_RATE).unwrap();
    assert_eq!(hr.time_deltas, vec![0, 5, 5]);
    assert_eq!(hr.column(0), &[Some(10), Some(20), Some(30)]);
    assert_eq!(accumulate(&hr.time_deltas), vec![0, 5, 10]);
}

#[test]
fn test_decode_empty_string() {
    let hr = decode("heart_rate", "", HEART_RATE).unwrap();
    assert!(hr.is_empty());
    assert!(hr.time_deltas.is_empty());
    assert_eq!(hr.column(0), &[] as &[Option<i64>]);
}

#[test]
fn test_decode_discards_empty_fields() {
    let hr = decode("heart_rate", ";0,10;;5,20;", HEART_RATE).unwrap();
    assert_eq!(hr.len(), 2);
    assert_eq!(hr.time_deltas, vec![0, 5]);
}

#[test]
fn test_decode_empty_delta_defaults_to_one() {
    let hr = decode("heart_rate", ",75;,77", HEART_RATE).unwrap();
    assert_eq!(hr.time_deltas, vec![1, 1]);
    assert_eq!(hr.column(0), &[Some(75), Some(77)]);
}

#[test]
fn test_decode_bare_time_channel() {
    let time = decode("time", "1;2;3", TIME).unwrap();
    assert_eq!(time.time_deltas, vec![1, 2, 3]);
    assert!(time.columns.is_empty());
    assert_eq!(time.len(), 3);
}

#[test]
fn test_decode_position_pairs() {
    let pos = decode("longitude_latitude", "123,456;789,12", POSITION).unwrap();
    assert!(pos.time_deltas.is_empty());
    assert_eq!(pos.column(0), &[Some(123), Some(789)]);
    assert_eq!(pos.column(1), &[Some(456), Some(12)]);
}

#[test]
fn test_decode_gait_skips_unused_subfield() {
    let gait = decode("gait", "2,9,60,80;3,9,62,84", GAIT).unwrap();
    assert_eq!(gait.time_deltas, vec![2, 3]);
    assert_eq!(gait.column(0), &[Some(60), Some(62)]);
    assert_eq!(gait.column(1), &[Some(80), Some(84)]);
}

#[test]
fn test_decode_malformed_token_is_fatal() {
    let err = decode("heart_rate", "abc,10", HEART_RATE).unwrap_err();
    match err {
        ExportError::MalformedChannel { channel, token } => {
            assert_eq!(channel, "heart_rate");
            assert_eq!(token, "abc");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_decode_short_field_is_fatal() {
    let err = decode("heart_rate", "5", HEART_RATE).unwrap_err();
    assert!(matches!(err, ExportError::ShortField { index: 1, .. }));
}

#[test]
fn test_decode_maps_sentinel_to_none() {
    let alt = decode("altitude", "-2000000;100", ALTITUDE).unwrap();
    assert_eq!(alt.column(0), &[None, Some(100)]);
}

#[test]
fn test_round_trip_preserves_timestamps_and_values() {
    let original = decode("heart_rate", "0,10;5,20;5,30", HEART_RATE).unwrap();
    let reencoded = encode(&original, HEART_RATE);
    let decoded = decode("heart_rate", &reencoded, HEART_RATE).unwrap();
    assert_eq!(decoded, original);
    assert_eq!(
        accumulate(&decoded.time_deltas),
        accumulate(&original.time_deltas)
    );
}

#[test]
fn test_round_trip_gait_with_unused_subfield() {
    let original = decode("gait", "2,9,60,80;3,9,62,84", GAIT).unwrap();
    let decoded = decode("gait", &encode(&original, GAIT), GAIT).unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn test_round_trip_keeps_missing_samples() {
    let original = decode("altitude", "-2000000;100", ALTITUDE).unwrap();
    let decoded = decode("altitude", &encode(&original, ALTITUDE), ALTITUDE).unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn test_forward_fill_mid_gap() {
    let filled = forward_fill(&[Some(5), None, None, Some(7), None]);
    assert_eq!(filled, vec![5, 5, 5, 7, 7]);
}

#[test]
fn test_forward_fill_leading_gap_uses_first_valid_value() {
    let filled = forward_fill(&[None, None, Some(5), None, Some(7)]);
    assert_eq!(filled, vec![5, 5, 5, 5, 7]);
}

#[test]
fn test_forward_fill_all_missing_does_not_crash() {
    let filled = forward_fill(&[None, None, None]);
    assert_eq!(filled, vec![NO_VALUE, NO_VALUE, NO_VALUE]);
}

#[test]
fn test_forward_fill_is_idempotent() {
    let once = forward_fill(&[None, Some(5), None, Some(7), None]);
    let again: Vec<Option<i64>> = once.iter().copied().map(Some).collect();
    assert_eq!(forward_fill(&again), once);
}

#[test]
fn test_accumulate() {
    assert_eq!(accumulate(&[0, 5, 5]), vec![0, 5, 10]);
    assert_eq!(accumulate(&[3, -1, 2]), vec![3, 2, 4]);
    assert_eq!(accumulate(&[]), Vec::<i64>::new());
}
