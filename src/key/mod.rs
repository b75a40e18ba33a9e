//! The generic index key.
//!
//! One [`GenericKey`] is owned by each cursor or comparison slot and is
//! overwritten for every entry it visits: loaded from page bytes, copied
//! from another key, or set to a sentinel bound. Internally the value lives
//! in a per-type enum; [`Slots`] is the flat four-slot view shared with other
//! layers.
//!
//! ```
//! use std::cmp::Ordering;
//! use native_index_key::{GenericKey, IndexKey, KeyType, Value};
//!
//! let mut a = GenericKey::new();
//! a.initialize(1);
//! a.write_value(&Value::from(42i64)).unwrap();
//!
//! let mut hi = GenericKey::new();
//! hi.init_as_highest(KeyType::Number);
//! assert_eq!(a.compare_to(&hi), Ordering::Less);
//! assert_eq!(a.as_value(), Value::from(42i64));
//! ```

mod compare;
mod state;
mod text;
mod write;

use std::cmp::Ordering;
use std::sync::Arc;

use crate::compare::NumberType;
use crate::index_key::{IndexKey, KeyIdentity};
use crate::timezone::NamedZone;
use crate::types::{EntityId, KeyType};
use crate::values::{
    DateTimeValue, DateValue, DurationValue, LocalDateTimeValue, LocalTimeValue, NumberValue, TimeValue,
    Value, Zone,
};

pub(crate) use state::KeyState;
pub use state::Slots;

#[derive(Debug, Clone, Default)]
pub struct GenericKey {
    identity: KeyIdentity,
    state: KeyState,
    /// Text bytes, `[0, length)` valid. Kept across non-text values so a
    /// cursor reuses one allocation; only grown, never shrunk.
    bytes: Option<Arc<Vec<u8>>>,
}

impl GenericKey {
    pub fn new() -> Self {
        Self::default()
    }

    /// A key for `value` owned by `entity_id`.
    pub fn from_value(entity_id: EntityId, value: &Value) -> crate::Result<Self> {
        let mut key = GenericKey::new();
        key.initialize(entity_id);
        key.write_value(value)?;
        Ok(key)
    }

    /// Decode a flat slot image, as handed over by a page load step.
    ///
    /// Never panics on malformed zone fields; those decode to
    /// [`Value::NoValue`].
    pub fn decode(key_type: KeyType, slots: Slots, bytes: Option<&[u8]>) -> Value {
        let mut key = GenericKey::new();
        key.set_slots(key_type, slots);
        if let (KeyType::Text, Some(bytes)) = (key_type, bytes) {
            // The buffer may carry slack past the recorded length.
            let length = usize::try_from(slots.slot0).unwrap_or(0).min(bytes.len());
            let ignore_length = slots.slot2 == 1;
            key.load_text(&bytes[..length], ignore_length);
        }
        key.as_value()
    }

    pub fn key_type(&self) -> Option<KeyType> {
        self.state.key_type()
    }

    /// The flat slot view, `None` while no type is set.
    pub fn slots(&self) -> Option<(KeyType, Slots)> {
        self.state.to_slots()
    }

    /// Overwrite the value part from a flat slot image.
    ///
    /// For text this sets the length and flags but not the bytes, see
    /// [`load_text`](Self::load_text).
    pub fn set_slots(&mut self, key_type: KeyType, slots: Slots) {
        self.state = KeyState::from_slots(key_type, slots);
    }

    /// Set up the lowest possible key of `key_type`, below every value.
    ///
    /// The identity is reset with entity id `EntityId::MIN`, so the bound
    /// also sorts first among keys with an equal value part.
    pub fn init_as_lowest(&mut self, key_type: KeyType) {
        self.initialize(EntityId::MIN);
        self.init_value_as(key_type, Slots::LOWEST);
    }

    /// Set up the highest possible key of `key_type`, above every value.
    pub fn init_as_highest(&mut self, key_type: KeyType) {
        self.initialize(EntityId::MAX);
        self.init_value_as(key_type, Slots::HIGHEST);
    }

    /// Whether this key is a lowest or highest bound rather than a value.
    pub fn is_bound(&self) -> bool {
        let Some(key_type) = self.key_type() else {
            return false;
        };
        self.state == KeyState::from_slots(key_type, Slots::LOWEST)
            || self.state == KeyState::from_slots(key_type, Slots::HIGHEST)
    }

    fn init_value_as(&mut self, key_type: KeyType, slots: Slots) {
        self.state = KeyState::from_slots(key_type, slots);
        self.bytes = None;
    }

    /// Copy identity and value of `other` into this key, reusing this key's
    /// buffer where possible.
    pub fn copy_from(&mut self, other: &GenericKey) {
        self.identity = other.identity;
        match other.state {
            KeyState::Text {
                ignore_length, ..
            } if other.bytes.is_some() => {
                self.copy_text_from(other, other.text_len());
                self.set_ignore_length(ignore_length);
            }
            KeyState::Text { .. } => {
                self.state = other.state;
                self.bytes = None;
            }
            state => self.state = state,
        }
    }

    /// Decode to a typed value.
    ///
    /// Text values share this key's buffer, which is then marked as
    /// dereferenced so the next write allocates a fresh one.
    ///
    /// # Panics
    /// Panics if no type has been set, or if a number carries an unknown
    /// representation tag.
    pub fn as_value(&mut self) -> Value {
        match self.state {
            KeyState::Text { .. } => self.text_as_value(),
            _ => self.value_of_state(),
        }
    }

    /// Decode everything except text, which needs `&mut self`. Bounds have
    /// no value and decode to [`Value::NoValue`].
    fn value_of_state(&self) -> Value {
        if self.is_bound() {
            return Value::NoValue;
        }
        match self.state {
            KeyState::Unset => panic!("cannot decode a key with no type set"),
            KeyState::ZonedDateTime {
                epoch_second,
                nano,
                zone_id,
                zone_offset,
            } => zoned_date_time_value(epoch_second, nano, zone_id, zone_offset),
            KeyState::LocalDateTime { nano, epoch_second } => {
                Value::LocalDateTime(LocalDateTimeValue::new(epoch_second, nano))
            }
            KeyState::Date { epoch_day } => Value::Date(DateValue::new(epoch_day)),
            KeyState::ZonedTime {
                nanos_of_day_utc,
                zone_offset,
            } => match Zone::offset(zone_offset as i32) {
                Some(_) => Value::Time(TimeValue::from_utc_nanos(nanos_of_day_utc, zone_offset as i32)),
                None => Value::NoValue,
            },
            KeyState::LocalTime { nanos_of_day } => Value::LocalTime(LocalTimeValue::new(nanos_of_day)),
            KeyState::Duration {
                average_seconds,
                nanos,
                months,
                days,
            } => Value::Duration(DurationValue::from_average_seconds(average_seconds, nanos, months, days)),
            KeyState::Text { .. } => Value::NoValue,
            KeyState::Boolean { value } => Value::Boolean(value == 1),
            KeyState::Number { bits, number_type } => {
                if number_type == i64::MIN || number_type == i64::MAX {
                    // Sentinel bound, not a real number.
                    return Value::NoValue;
                }
                let tag = u8::try_from(number_type).unwrap_or(u8::MAX);
                Value::Number(NumberValue::from_raw_bits(bits, NumberType::expect_tag(tag)))
            }
        }
    }

    /// Order by value part only.
    ///
    /// Keys of different types order by type tag; that ordering is only a
    /// stable fallback, callers are expected to compare within one type.
    ///
    /// # Panics
    /// Panics if either key has no type set.
    pub fn compare_value(&self, other: &GenericKey) -> Ordering {
        match (&self.state, &other.state) {
            (KeyState::Unset, _) | (_, KeyState::Unset) => {
                panic!("cannot compare a key with no type set")
            }
            (
                &KeyState::ZonedDateTime {
                    epoch_second,
                    nano,
                    zone_offset,
                    ..
                },
                &KeyState::ZonedDateTime {
                    epoch_second: other_epoch_second,
                    nano: other_nano,
                    zone_offset: other_zone_offset,
                    ..
                },
            ) => self.compare_zoned_date_time(
                other,
                (epoch_second, nano, zone_offset),
                (other_epoch_second, other_nano, other_zone_offset),
            ),
            (
                &KeyState::LocalDateTime { nano, epoch_second },
                &KeyState::LocalDateTime {
                    nano: other_nano,
                    epoch_second: other_epoch_second,
                },
            ) => compare::local_date_time((epoch_second, nano), (other_epoch_second, other_nano)),
            (&KeyState::Date { epoch_day }, &KeyState::Date { epoch_day: other }) => epoch_day.cmp(&other),
            (
                &KeyState::ZonedTime {
                    nanos_of_day_utc,
                    zone_offset,
                },
                &KeyState::ZonedTime {
                    nanos_of_day_utc: other_nanos,
                    zone_offset: other_offset,
                },
            ) => compare::zoned_time((nanos_of_day_utc, zone_offset), (other_nanos, other_offset)),
            (&KeyState::LocalTime { nanos_of_day }, &KeyState::LocalTime { nanos_of_day: other }) => {
                nanos_of_day.cmp(&other)
            }
            (
                &KeyState::Duration {
                    average_seconds,
                    nanos,
                    months,
                    days,
                },
                &KeyState::Duration {
                    average_seconds: o_average_seconds,
                    nanos: o_nanos,
                    months: o_months,
                    days: o_days,
                },
            ) => compare::duration(
                [average_seconds, nanos, months, days],
                [o_average_seconds, o_nanos, o_months, o_days],
            ),
            (KeyState::Text { .. }, KeyState::Text { .. }) => self.compare_text(other),
            (&KeyState::Boolean { value }, &KeyState::Boolean { value: other }) => value.cmp(&other),
            (
                &KeyState::Number { bits, number_type },
                &KeyState::Number {
                    bits: other_bits,
                    number_type: other_type,
                },
            ) => compare::number((bits, number_type), (other_bits, other_type)),
            (a, b) => a.key_type().cmp(&b.key_type()),
        }
    }
}

impl IndexKey for GenericKey {
    fn identity(&self) -> &KeyIdentity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut KeyIdentity {
        &mut self.identity
    }

    fn compare_value_to(&self, other: &Self) -> Ordering {
        self.compare_value(other)
    }
}

/// Named zone if the code is valid, else the offset if that is valid, else
/// the absent value. Page bytes may be garbage, so nothing here may panic.
fn zoned_date_time_value(epoch_second: i64, nano: i64, zone_id: i64, zone_offset: i64) -> Value {
    let zone = NamedZone::from_code(zone_id as i16)
        .map(Zone::Named)
        .or_else(|| Zone::offset(zone_offset as i32));
    match zone {
        Some(zone) => Value::DateTime(DateTimeValue::new(epoch_second, nano, zone)),
        None => Value::NoValue,
    }
}
