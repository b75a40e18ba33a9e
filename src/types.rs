use crate::error::{Error, Result};
use crate::values::{Value, ValueGroup};

/// Identifier of the entity (node or relationship) owning an index entry.
pub type EntityId = i64;

/// Which kind of value a [`GenericKey`](crate::key::GenericKey) currently holds.
///
/// The discriminant is the type byte written to pages, so variants may only
/// ever be appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyType {
    ZonedDateTime = 0,
    LocalDateTime = 1,
    Date = 2,
    ZonedTime = 3,
    LocalTime = 4,
    Duration = 5,
    Text = 6,
    Boolean = 7,
    Number = 8,
}

impl KeyType {
    /// Every supported type tag, in on-page code order.
    pub const ALL: [KeyType; 9] = [
        KeyType::ZonedDateTime,
        KeyType::LocalDateTime,
        KeyType::Date,
        KeyType::ZonedTime,
        KeyType::LocalTime,
        KeyType::Duration,
        KeyType::Text,
        KeyType::Boolean,
        KeyType::Number,
    ];

    pub fn from_u8(byte: u8) -> Result<Self> {
        Self::ALL
            .get(byte as usize)
            .copied()
            .ok_or_else(|| Error::Corruption(format!("invalid key type: {}", byte)))
    }

    /// The type tag used for keys of a value group, if the group is indexable.
    pub fn for_group(group: ValueGroup) -> Option<Self> {
        match group {
            ValueGroup::ZonedDateTime => Some(KeyType::ZonedDateTime),
            ValueGroup::LocalDateTime => Some(KeyType::LocalDateTime),
            ValueGroup::Date => Some(KeyType::Date),
            ValueGroup::ZonedTime => Some(KeyType::ZonedTime),
            ValueGroup::LocalTime => Some(KeyType::LocalTime),
            ValueGroup::Duration => Some(KeyType::Duration),
            ValueGroup::Text => Some(KeyType::Text),
            ValueGroup::Boolean => Some(KeyType::Boolean),
            ValueGroup::Number => Some(KeyType::Number),
            ValueGroup::NoValue => None,
        }
    }

    pub fn of(value: &Value) -> Option<Self> {
        Self::for_group(value.group())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_byte_roundtrip() {
        for t in KeyType::ALL {
            assert_eq!(KeyType::from_u8(t as u8).unwrap(), t);
        }
        assert!(KeyType::from_u8(9).is_err());
        assert!(KeyType::from_u8(0xFF).is_err());
    }

    #[test]
    fn no_value_has_no_key_type() {
        assert_eq!(KeyType::of(&Value::NoValue), None);
        assert_eq!(KeyType::of(&Value::Boolean(true)), Some(KeyType::Boolean));
    }
}
