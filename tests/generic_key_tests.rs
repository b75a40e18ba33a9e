// Generic key tests
// Ordering per type, sentinels, decode round-trips and text buffer reuse.

use std::cmp::Ordering;
use std::sync::Arc;

use native_index_key::values::{
    DateTimeValue, DateValue, DurationValue, LocalDateTimeValue, LocalTimeValue, NumberValue, TimeValue, Zone,
};
use native_index_key::{GenericKey, IndexKey, KeyType, Slots, Value};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

fn key(entity_id: i64, value: impl Into<Value>) -> GenericKey {
    GenericKey::from_value(entity_id, &value.into()).unwrap()
}

fn zoned(epoch_second: i64, nano: i64, zone: Zone) -> Value {
    Value::DateTime(DateTimeValue::new(epoch_second, nano, zone))
}

fn named(name: &str) -> Zone {
    Zone::named(name).unwrap()
}

fn offset(seconds: i32) -> Zone {
    Zone::offset(seconds).unwrap()
}

fn number(v: NumberValue) -> Value {
    Value::Number(v)
}

/// Strictly ascending samples for each key type.
fn ordered_samples() -> Vec<(KeyType, Vec<Value>)> {
    vec![
        (
            KeyType::ZonedDateTime,
            vec![
                zoned(-86_400, 0, named("UTC")),
                zoned(0, 0, offset(3600)),
                zoned(0, 0, offset(0)),
                zoned(0, 0, offset(-3600)),
                zoned(0, 0, named("Europe/Berlin")),
                zoned(0, 0, named("UTC")),
                zoned(0, 1, offset(0)),
                zoned(1_700_000_000, 500, named("Asia/Tokyo")),
            ],
        ),
        (
            KeyType::LocalDateTime,
            vec![
                LocalDateTimeValue::new(-1, 999_999_999).into(),
                LocalDateTimeValue::new(0, 0).into(),
                LocalDateTimeValue::new(0, 1).into(),
                LocalDateTimeValue::new(10, 0).into(),
            ],
        ),
        (
            KeyType::Date,
            vec![DateValue::new(-365).into(), DateValue::new(0).into(), DateValue::new(19_000).into()],
        ),
        (
            KeyType::ZonedTime,
            vec![
                TimeValue::from_utc_nanos(0, 3600).into(),
                TimeValue::from_utc_nanos(0, 7200).into(),
                TimeValue::from_utc_nanos(1_000, -3600).into(),
                TimeValue::from_utc_nanos(86_399_000_000_000, 0).into(),
            ],
        ),
        (
            KeyType::LocalTime,
            vec![
                LocalTimeValue::new(0).into(),
                LocalTimeValue::new(1).into(),
                LocalTimeValue::new(43_200_000_000_000).into(),
            ],
        ),
        (
            KeyType::Duration,
            vec![
                DurationValue::new(0, 0, -10, 0).into(),
                DurationValue::new(0, 0, 0, 0).into(),
                DurationValue::new(0, 0, 0, 1).into(),
                DurationValue::new(0, 1, 0, 0).into(),
                DurationValue::new(0, 0, 86_401, 0).into(),
                DurationValue::new(1, 0, 0, 0).into(),
                DurationValue::new(0, 31, 0, 0).into(),
            ],
        ),
        (
            KeyType::Text,
            vec![
                Value::from(""),
                Value::from("A"),
                Value::from("a"),
                Value::from("ab"),
                Value::from("abc"),
                Value::from("b"),
                Value::from("é"),
            ],
        ),
        (KeyType::Boolean, vec![Value::from(false), Value::from(true)]),
        (
            KeyType::Number,
            vec![
                Value::from(f64::NEG_INFINITY),
                number(NumberValue::Int64(i64::MIN)),
                number(NumberValue::Float32(-1.5)),
                number(NumberValue::Int8(-1)),
                Value::from(0i32),
                number(NumberValue::Float64(0.25)),
                number(NumberValue::Int16(300)),
                number(NumberValue::Int64(i64::MAX)),
                Value::from(f64::INFINITY),
                Value::from(f64::NAN),
            ],
        ),
    ]
}

// =============================================================================
// Test 1: Shuffled samples sort back into their order
// =============================================================================
#[test]
fn test_sorting_restores_sample_order() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for (key_type, values) in ordered_samples() {
        let mut keys: Vec<(usize, GenericKey)> =
            values.iter().enumerate().map(|(i, v)| (i, key(1, v.clone()))).collect();
        keys.shuffle(&mut rng);
        keys.sort_by(|a, b| a.1.compare_to(&b.1));
        let order: Vec<usize> = keys.iter().map(|(i, _)| *i).collect();
        let expected: Vec<usize> = (0..values.len()).collect();
        assert_eq!(order, expected, "{:?}", key_type);
    }
}

// =============================================================================
// Test 2: Ordering laws over every pair and triple of samples
// =============================================================================
#[test]
fn test_ordering_is_total_within_a_type() {
    for (key_type, values) in ordered_samples() {
        let keys: Vec<GenericKey> = values.iter().map(|v| key(7, v.clone())).collect();
        for a in &keys {
            assert_eq!(a.compare_to(a), Ordering::Equal, "{:?} reflexive", key_type);
            for b in &keys {
                assert_eq!(a.compare_to(b), b.compare_to(a).reverse(), "{:?} antisymmetric", key_type);
                for c in &keys {
                    if a.compare_to(b) != Ordering::Greater && b.compare_to(c) != Ordering::Greater {
                        assert_ne!(a.compare_to(c), Ordering::Greater, "{:?} transitive", key_type);
                    }
                }
            }
        }
    }
}

// =============================================================================
// Test 3: Sentinels enclose every value of their type
// =============================================================================
#[test]
fn test_sentinels_enclose_values() {
    for (key_type, values) in ordered_samples() {
        let mut low = GenericKey::new();
        low.init_as_lowest(key_type);
        let mut high = GenericKey::new();
        high.init_as_highest(key_type);

        assert_eq!(low.compare_to(&high), Ordering::Less, "{:?}", key_type);
        assert_eq!(high.compare_to(&low), Ordering::Greater, "{:?}", key_type);
        assert_eq!(low.compare_to(&low.clone()), Ordering::Equal, "{:?}", key_type);
        for v in values {
            let k = key(0, v);
            assert_eq!(low.compare_to(&k), Ordering::Less, "{:?}", key_type);
            assert_eq!(k.compare_to(&high), Ordering::Less, "{:?}", key_type);
        }
    }
}

#[test]
fn test_sentinels_on_reused_key_reset_identity() {
    for key_type in KeyType::ALL {
        let mut reused = key(5, "m");
        reused.set_compare_by_entity_id(false);
        reused.init_as_highest(key_type);
        assert!(reused.compare_by_entity_id(), "{:?}", key_type);
        assert_eq!(reused.entity_id(), i64::MAX);
    }

    // A cursor key that was used for a uniqueness check becomes a bound.
    let mut reused = key(5, "m");
    reused.set_compare_by_entity_id(false);
    reused.init_as_highest(KeyType::Text);
    assert_eq!(reused.compare_value(&key(0, "a")), Ordering::Greater);
    assert_eq!(reused.compare_value(&key(0, "zzz")), Ordering::Greater);

    reused.set_compare_by_entity_id(false);
    reused.init_as_lowest(KeyType::Text);
    assert_eq!(reused.compare_value(&key(0, "")), Ordering::Less);
}

#[test]
fn test_sentinels_do_not_decode() {
    for key_type in KeyType::ALL {
        let mut low = GenericKey::new();
        low.init_as_lowest(key_type);
        assert!(low.is_bound(), "{:?}", key_type);
        assert_eq!(low.as_value(), Value::NoValue, "{:?}", key_type);

        let mut high = GenericKey::new();
        high.init_as_highest(key_type);
        assert!(high.is_bound(), "{:?}", key_type);
        assert_eq!(high.as_value(), Value::NoValue, "{:?}", key_type);
    }
    assert!(!key(0, 1i64).is_bound());
}

// =============================================================================
// Test 4: Entity id breaks value ties only when both keys opt in
// =============================================================================
#[test]
fn test_entity_id_tie_break() {
    let a = key(1, "same");
    let b = key(2, "same");
    assert_eq!(a.compare_to(&b), Ordering::Less);
    assert_eq!(a.compare_value_to(&b), Ordering::Equal);

    let mut search = key(99, "same");
    search.set_compare_by_entity_id(false);
    assert_eq!(search.compare_to(&a), Ordering::Equal);
    assert_eq!(b.compare_to(&search), Ordering::Equal);

    // Value order wins over entity order.
    assert_eq!(key(100, 1i64).compare_to(&key(1, 2i64)), Ordering::Less);
}

// =============================================================================
// Test 5: Every value decodes back to itself
// =============================================================================
#[test]
fn test_decode_round_trip() {
    let values = [
        zoned(1_600_000_000, 123_456_789, named("America/New_York")),
        zoned(-5, 0, offset(-18 * 3600)),
        LocalDateTimeValue::new(42, 7).into(),
        DateValue::new(-1).into(),
        TimeValue::from_utc_nanos(3_600_000_000_000, 5400).into(),
        LocalTimeValue::new(999).into(),
        DurationValue::new(14, -3, 3_600, 500).into(),
        Value::from("hello, world"),
        Value::from(true),
        number(NumberValue::Int8(-128)),
        number(NumberValue::Float32(2.5)),
        Value::from(-0.0),
    ];
    for v in values {
        let mut k = key(3, v.clone());
        assert_eq!(k.as_value(), v);
        assert_eq!(k.key_type(), KeyType::of(&v));
    }
}

#[test]
fn test_decode_from_slots() {
    let v = GenericKey::decode(
        KeyType::Number,
        Slots {
            slot0: 5,
            slot1: 2,
            ..Slots::default()
        },
        None,
    );
    assert_eq!(v, number(NumberValue::Int32(5)));

    let v = GenericKey::decode(
        KeyType::Text,
        Slots {
            slot0: 3,
            ..Slots::default()
        },
        Some(b"abc"),
    );
    assert_eq!(v, Value::from("abc"));
}

#[test]
fn test_decode_text_stops_at_recorded_length() {
    let slots = Slots {
        slot0: 3,
        ..Slots::default()
    };
    assert_eq!(GenericKey::decode(KeyType::Text, slots, Some(b"abcX")), Value::from("abc"));

    // Lengths past the buffer are clamped, negative ones read as empty.
    let slots = Slots {
        slot0: 10,
        ..Slots::default()
    };
    assert_eq!(GenericKey::decode(KeyType::Text, slots, Some(b"ab")), Value::from("ab"));
    let slots = Slots {
        slot0: -4,
        ..Slots::default()
    };
    assert_eq!(GenericKey::decode(KeyType::Text, slots, Some(b"ab")), Value::from(""));
}

// =============================================================================
// Test 6: Malformed zone fields decode to NO_VALUE instead of panicking
// =============================================================================
#[test]
fn test_zoned_time_with_bad_offset_is_no_value() {
    let slots = Slots {
        slot0: 1_000,
        slot1: 100_000,
        ..Slots::default()
    };
    assert_eq!(GenericKey::decode(KeyType::ZonedTime, slots, None), Value::NoValue);
}

#[test]
fn test_zoned_date_time_with_bad_zone_is_no_value() {
    let slots = Slots {
        slot0: 0,
        slot1: 0,
        slot2: 30_000,
        slot3: 90_000,
    };
    assert_eq!(GenericKey::decode(KeyType::ZonedDateTime, slots, None), Value::NoValue);

    // A bad zone code falls back to a valid offset.
    let slots = Slots { slot3: 3600, ..slots };
    assert_eq!(GenericKey::decode(KeyType::ZonedDateTime, slots, None), zoned(0, 0, offset(3600)));
}

#[test]
fn test_zoned_date_time_with_bad_offset_still_compares() {
    let mut a = GenericKey::new();
    a.set_slots(
        KeyType::ZonedDateTime,
        Slots {
            slot0: 10,
            slot1: 0,
            slot2: -1,
            slot3: 1_000_000,
        },
    );
    let b = key(0, zoned(10, 0, offset(0)));
    assert_eq!(a.compare_value(&b), Ordering::Equal);
    assert_eq!(a.compare_value(&key(0, zoned(11, 0, offset(0)))), Ordering::Less);
}

// =============================================================================
// Test 7: Zoned date-time storage of named vs offset zones
// =============================================================================
#[test]
fn test_zoned_date_time_slot_encoding() {
    let (_, slots) = key(0, zoned(5, 6, named("UTC"))).slots().unwrap();
    assert_eq!((slots.slot0, slots.slot1, slots.slot2, slots.slot3), (5, 6, 0, 0));

    let (_, slots) = key(0, zoned(5, 6, offset(-7200))).slots().unwrap();
    assert_eq!((slots.slot2, slots.slot3), (-1, -7200));
}

// =============================================================================
// Test 8: Duration ordering by average length
// =============================================================================
#[test]
fn test_duration_ordering_by_average_length() {
    // 30 days is shorter than the average month, 31 days longer.
    let month = key(0, DurationValue::new(1, 0, 0, 0));
    assert_eq!(key(0, DurationValue::new(0, 30, 0, 0)).compare_to(&month), Ordering::Less);
    assert_eq!(key(0, DurationValue::new(0, 31, 0, 0)).compare_to(&month), Ordering::Greater);

    // Same average length, different split: the components break the tie.
    let day_as_seconds = key(0, DurationValue::new(0, 0, 86_400, 0));
    let day = key(0, DurationValue::new(0, 1, 0, 0));
    assert_eq!(day_as_seconds.compare_to(&day), Ordering::Less);
    assert_ne!(day.compare_to(&day_as_seconds), Ordering::Equal);
}

// =============================================================================
// Test 9: Text buffer reuse and dereferencing
// =============================================================================
#[test]
fn test_buffer_reused_until_dereferenced() {
    let mut k = key(0, "abcdef");
    let first = Arc::as_ptr(k.buffer().unwrap());

    k.write_value(&Value::from("xy")).unwrap();
    assert_eq!(Arc::as_ptr(k.buffer().unwrap()), first);
    assert_eq!(k.text_bytes(), Some(&b"xy"[..]));

    let Value::Text(decoded) = k.as_value() else {
        panic!("expected text");
    };
    assert!(k.is_dereferenced());
    assert!(decoded.shares_buffer(k.buffer().unwrap()));

    k.write_value(&Value::from("zz")).unwrap();
    assert!(!k.is_dereferenced());
    assert!(!decoded.shares_buffer(k.buffer().unwrap()));
    assert_eq!(decoded.as_bytes(), b"xy");
    assert_eq!(k.text_bytes(), Some(&b"zz"[..]));
}

#[test]
fn test_dereferenced_buffer_replaced_even_when_unshared() {
    let mut k = key(0, "abcdef");
    let before = Arc::as_ptr(k.buffer().unwrap());
    drop(k.as_value());
    assert!(k.is_dereferenced());
    assert_eq!(Arc::strong_count(k.buffer().unwrap()), 1);

    // Fits the old buffer, but a decoded value may have been handed out.
    k.set_buffer_length(2);
    assert_ne!(Arc::as_ptr(k.buffer().unwrap()), before);
    assert!(!k.is_dereferenced());
}

#[test]
fn test_buffer_grows_with_slack() {
    let mut k = key(0, "ab");
    k.set_buffer_length(10);
    assert_eq!(k.buffer().unwrap().len(), 15);
    assert_eq!(k.text_bytes().unwrap().len(), 10);
}

#[test]
fn test_clone_does_not_alias_writes() {
    let mut k = key(0, "left");
    let copy = k.clone();
    k.write_value(&Value::from("rite")).unwrap();
    assert_eq!(copy.text_bytes(), Some(&b"left"[..]));
    assert_eq!(k.text_bytes(), Some(&b"rite"[..]));
}

#[test]
fn test_same_buffer_compares_equal() {
    let k = key(0, "shared");
    let copy = k.clone();
    assert!(Arc::ptr_eq(k.buffer().unwrap(), copy.buffer().unwrap()));
    assert_eq!(k.compare_value(&copy), Ordering::Equal);
}

// =============================================================================
// Test 10: Copying text
// =============================================================================
#[test]
fn test_copy_text_from_prefix_and_padding() {
    let source = key(0, "hello");
    let mut target = GenericKey::new();

    target.copy_text_from(&source, 3);
    assert_eq!(target.text_bytes(), Some(&b"hel"[..]));

    target.copy_text_from(&source, 7);
    assert_eq!(target.text_bytes(), Some(&b"hello\0\0"[..]));
}

#[test]
fn test_copy_from_copies_identity_and_value() {
    let source = key(77, "value");
    let mut target = key(1, 5i64);
    target.copy_from(&source);
    assert_eq!(target.entity_id(), 77);
    assert_eq!(target.compare_to(&source), Ordering::Equal);
    assert!(!Arc::ptr_eq(target.buffer().unwrap(), source.buffer().unwrap()));
}

// =============================================================================
// Test 11: Prefix bounds for STARTS WITH scans
// =============================================================================
#[test]
fn test_prefix_bounds() {
    let mut low = GenericKey::new();
    low.init_as_prefix_low("ab");
    let mut high = GenericKey::new();
    high.init_as_prefix_high("ab");

    for inside in ["ab", "abc", "abzzz"] {
        let k = key(5, inside);
        assert_eq!(low.compare_to(&k), Ordering::Less, "{inside}");
        assert_eq!(k.compare_to(&high), Ordering::Less, "{inside}");
    }
    assert_eq!(key(5, "aa").compare_to(&low), Ordering::Less);
    assert_eq!(key(5, "b").compare_to(&high), Ordering::Greater);
}

#[test]
fn test_truncated_text_compares_by_common_prefix() {
    let mut full = GenericKey::new();
    full.load_text(b"abc", false);
    let mut truncated = GenericKey::new();
    truncated.load_text(b"ab", true);
    assert_eq!(full.compare_value(&truncated), Ordering::Equal);
    assert_eq!(truncated.compare_value(&full), Ordering::Equal);

    truncated.set_ignore_length(false);
    assert_eq!(full.compare_value(&truncated), Ordering::Greater);
}

// =============================================================================
// Test 12: Misuse panics
// =============================================================================
#[test]
#[should_panic(expected = "no type set")]
fn test_compare_unset_panics() {
    GenericKey::new().compare_value(&key(0, 1i64));
}

#[test]
fn test_no_value_is_rejected() {
    let mut k = GenericKey::new();
    assert!(k.write_value(&Value::NoValue).is_err());
    assert_eq!(k.key_type(), None);
}
