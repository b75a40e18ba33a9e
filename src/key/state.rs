use crate::types::KeyType;

const TRUE: i64 = 1;
const FALSE: i64 = 0;

/// The flat four-slot view of a key, as other layers see it.
///
/// | Type           | slot0              | slot1         | slot2        | slot3          |
/// |----------------|--------------------|---------------|--------------|----------------|
/// | zoned datetime | epoch second (UTC) | nano of second| zone code    | offset seconds |
/// | local datetime | nano of second     | epoch second  |              |                |
/// | date           | epoch day          |               |              |                |
/// | zoned time     | nanos of day (UTC) | offset seconds|              |                |
/// | local time     | nanos of day       |               |              |                |
/// | duration       | average seconds    | nanos         | months       | days           |
/// | text           | length             | dereferenced  | ignore length|                |
/// | boolean        | 0 / 1              |               |              |                |
/// | number         | raw bits           | number tag    |              |                |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slots {
    pub slot0: i64,
    pub slot1: i64,
    pub slot2: i64,
    pub slot3: i64,
}

impl Slots {
    pub const LOWEST: Slots = Slots::filled(i64::MIN);
    pub const HIGHEST: Slots = Slots::filled(i64::MAX);

    pub const fn filled(v: i64) -> Self {
        Slots {
            slot0: v,
            slot1: v,
            slot2: v,
            slot3: v,
        }
    }
}

/// Typed view of the slots under the active type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum KeyState {
    #[default]
    Unset,
    ZonedDateTime {
        epoch_second: i64,
        nano: i64,
        zone_id: i64,
        zone_offset: i64,
    },
    LocalDateTime {
        nano: i64,
        epoch_second: i64,
    },
    Date {
        epoch_day: i64,
    },
    ZonedTime {
        nanos_of_day_utc: i64,
        zone_offset: i64,
    },
    LocalTime {
        nanos_of_day: i64,
    },
    Duration {
        average_seconds: i64,
        nanos: i64,
        months: i64,
        days: i64,
    },
    Text {
        length: i64,
        dereferenced: bool,
        ignore_length: bool,
    },
    Boolean {
        value: i64,
    },
    Number {
        bits: i64,
        number_type: i64,
    },
}

impl KeyState {
    pub(crate) fn key_type(&self) -> Option<KeyType> {
        Some(match self {
            KeyState::Unset => return None,
            KeyState::ZonedDateTime { .. } => KeyType::ZonedDateTime,
            KeyState::LocalDateTime { .. } => KeyType::LocalDateTime,
            KeyState::Date { .. } => KeyType::Date,
            KeyState::ZonedTime { .. } => KeyType::ZonedTime,
            KeyState::LocalTime { .. } => KeyType::LocalTime,
            KeyState::Duration { .. } => KeyType::Duration,
            KeyState::Text { .. } => KeyType::Text,
            KeyState::Boolean { .. } => KeyType::Boolean,
            KeyState::Number { .. } => KeyType::Number,
        })
    }

    pub(crate) fn from_slots(key_type: KeyType, s: Slots) -> Self {
        match key_type {
            KeyType::ZonedDateTime => KeyState::ZonedDateTime {
                epoch_second: s.slot0,
                nano: s.slot1,
                zone_id: s.slot2,
                zone_offset: s.slot3,
            },
            KeyType::LocalDateTime => KeyState::LocalDateTime {
                nano: s.slot0,
                epoch_second: s.slot1,
            },
            KeyType::Date => KeyState::Date { epoch_day: s.slot0 },
            KeyType::ZonedTime => KeyState::ZonedTime {
                nanos_of_day_utc: s.slot0,
                zone_offset: s.slot1,
            },
            KeyType::LocalTime => KeyState::LocalTime { nanos_of_day: s.slot0 },
            KeyType::Duration => KeyState::Duration {
                average_seconds: s.slot0,
                nanos: s.slot1,
                months: s.slot2,
                days: s.slot3,
            },
            KeyType::Text => KeyState::Text {
                length: s.slot0,
                dereferenced: s.slot1 == TRUE,
                ignore_length: s.slot2 == TRUE,
            },
            KeyType::Boolean => KeyState::Boolean { value: s.slot0 },
            KeyType::Number => KeyState::Number {
                bits: s.slot0,
                number_type: s.slot1,
            },
        }
    }

    /// Flatten back to slots. Unused slots read as zero; text flags as 0/1.
    pub(crate) fn to_slots(self) -> Option<(KeyType, Slots)> {
        let key_type = self.key_type()?;
        let (slot0, slot1, slot2, slot3) = match self {
            KeyState::Unset => return None,
            KeyState::ZonedDateTime {
                epoch_second,
                nano,
                zone_id,
                zone_offset,
            } => (epoch_second, nano, zone_id, zone_offset),
            KeyState::LocalDateTime { nano, epoch_second } => (nano, epoch_second, 0, 0),
            KeyState::Date { epoch_day } => (epoch_day, 0, 0, 0),
            KeyState::ZonedTime {
                nanos_of_day_utc,
                zone_offset,
            } => (nanos_of_day_utc, zone_offset, 0, 0),
            KeyState::LocalTime { nanos_of_day } => (nanos_of_day, 0, 0, 0),
            KeyState::Duration {
                average_seconds,
                nanos,
                months,
                days,
            } => (average_seconds, nanos, months, days),
            KeyState::Text {
                length,
                dereferenced,
                ignore_length,
            } => (length, flag(dereferenced), flag(ignore_length), 0),
            KeyState::Boolean { value } => (value, 0, 0, 0),
            KeyState::Number { bits, number_type } => (bits, number_type, 0, 0),
        };
        Some((
            key_type,
            Slots {
                slot0,
                slot1,
                slot2,
                slot3,
            },
        ))
    }
}

fn flag(b: bool) -> i64 {
    if b { TRUE } else { FALSE }
}
