//! Typed property values produced and consumed by index keys.
//!
//! Keys decode into [`Value`] and are written from it. [`Value::compare`] is
//! the general comparator; keys fall back to it only for the rare tie of
//! two zoned date-times at the same instant.

pub mod number;
pub mod temporal;
pub mod text;

use std::cmp::Ordering;
use std::fmt;

pub use number::NumberValue;
pub use temporal::{
    AVG_DAY_SECONDS, AVG_MONTH_SECONDS, DateTimeValue, DateValue, DurationValue, LocalDateTimeValue,
    LocalTimeValue, TimeValue, Zone,
};
pub use text::TextValue;

/// Coarse grouping of values; values of different groups never compare by
/// content. Declaration order is the cross-group order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueGroup {
    ZonedDateTime,
    LocalDateTime,
    Date,
    ZonedTime,
    LocalTime,
    Duration,
    Text,
    Boolean,
    Number,
    NoValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value, also what malformed key bytes decode to.
    NoValue,
    DateTime(DateTimeValue),
    LocalDateTime(LocalDateTimeValue),
    Date(DateValue),
    Time(TimeValue),
    LocalTime(LocalTimeValue),
    Duration(DurationValue),
    Text(TextValue),
    Boolean(bool),
    Number(NumberValue),
}

impl Value {
    pub fn group(&self) -> ValueGroup {
        match self {
            Value::NoValue => ValueGroup::NoValue,
            Value::DateTime(_) => ValueGroup::ZonedDateTime,
            Value::LocalDateTime(_) => ValueGroup::LocalDateTime,
            Value::Date(_) => ValueGroup::Date,
            Value::Time(_) => ValueGroup::ZonedTime,
            Value::LocalTime(_) => ValueGroup::LocalTime,
            Value::Duration(_) => ValueGroup::Duration,
            Value::Text(_) => ValueGroup::Text,
            Value::Boolean(_) => ValueGroup::Boolean,
            Value::Number(_) => ValueGroup::Number,
        }
    }

    pub fn is_no_value(&self) -> bool {
        matches!(self, Value::NoValue)
    }

    /// Total order over all values: by group first, then by content.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            (Value::LocalDateTime(a), Value::LocalDateTime(b)) => a.cmp(b),
            (Value::Date(a), Value::Date(b)) => a.cmp(b),
            (Value::Time(a), Value::Time(b)) => a.cmp(b),
            (Value::LocalTime(a), Value::LocalTime(b)) => a.cmp(b),
            (Value::Duration(a), Value::Duration(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.as_bytes().cmp(b.as_bytes()),
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::Number(a), Value::Number(b)) => a.compare(b),
            _ => self.group().cmp(&other.group()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(NumberValue::Int32(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Number(NumberValue::Int64(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(NumberValue::Float64(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(TextValue::new(v))
    }
}

impl From<DateTimeValue> for Value {
    fn from(v: DateTimeValue) -> Self {
        Value::DateTime(v)
    }
}

impl From<LocalDateTimeValue> for Value {
    fn from(v: LocalDateTimeValue) -> Self {
        Value::LocalDateTime(v)
    }
}

impl From<DateValue> for Value {
    fn from(v: DateValue) -> Self {
        Value::Date(v)
    }
}

impl From<TimeValue> for Value {
    fn from(v: TimeValue) -> Self {
        Value::Time(v)
    }
}

impl From<LocalTimeValue> for Value {
    fn from(v: LocalTimeValue) -> Self {
        Value::LocalTime(v)
    }
}

impl From<DurationValue> for Value {
    fn from(v: DurationValue) -> Self {
        Value::Duration(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::NoValue => f.write_str("NO_VALUE"),
            Value::DateTime(v) => write!(f, "{v}"),
            Value::LocalDateTime(v) => write!(f, "{v}"),
            Value::Date(v) => write!(f, "{v}"),
            Value::Time(v) => write!(f, "{v}"),
            Value::LocalTime(v) => write!(f, "{v}"),
            Value::Duration(v) => write!(f, "{v}"),
            Value::Text(v) => write!(f, "{v:?}"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Number(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_order_before_content() {
        assert_eq!(Value::from("a").compare(&Value::from(true)), Ordering::Less);
        assert_eq!(Value::from(1i64).compare(&Value::NoValue), Ordering::Less);
        assert_eq!(Value::NoValue.compare(&Value::NoValue), Ordering::Equal);
    }

    #[test]
    fn numbers_compare_across_widths() {
        assert_eq!(Value::from(5i32).compare(&Value::from(5.0)), Ordering::Equal);
        assert_eq!(Value::from(5i64).compare(&Value::from(5.5)), Ordering::Less);
    }

    #[test]
    fn text_orders_by_utf8_bytes() {
        assert_eq!(Value::from("é").compare(&Value::from("z")), Ordering::Greater);
        assert_eq!(Value::from("ab").compare(&Value::from("abc")), Ordering::Less);
    }
}
