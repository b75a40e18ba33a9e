use super::{GenericKey, KeyState};
use crate::error::{Error, Result};
use crate::timezone::OFFSET_ZONE_CODE;
use crate::values::{Value, Zone};

impl GenericKey {
    /// Overwrite the value part with `value`. The identity part is kept.
    ///
    /// Named zones store their code and a zero offset; fixed offsets store
    /// [`OFFSET_ZONE_CODE`] and the offset.
    pub fn write_value(&mut self, value: &Value) -> Result<()> {
        self.state = match value {
            Value::NoValue => {
                return Err(Error::UnsupportedValue("NO_VALUE cannot be indexed".into()));
            }
            Value::DateTime(v) => {
                let (zone_id, zone_offset) = match v.zone {
                    Zone::Named(zone) => (zone.code() as i64, 0),
                    Zone::Offset(seconds) => (OFFSET_ZONE_CODE as i64, seconds as i64),
                };
                KeyState::ZonedDateTime {
                    epoch_second: v.epoch_second,
                    nano: v.nano,
                    zone_id,
                    zone_offset,
                }
            }
            Value::LocalDateTime(v) => KeyState::LocalDateTime {
                nano: v.nano,
                epoch_second: v.epoch_second,
            },
            Value::Date(v) => KeyState::Date {
                epoch_day: v.epoch_day,
            },
            Value::Time(v) => KeyState::ZonedTime {
                nanos_of_day_utc: v.nanos_of_day_utc,
                zone_offset: v.offset_seconds as i64,
            },
            Value::LocalTime(v) => KeyState::LocalTime {
                nanos_of_day: v.nanos_of_day,
            },
            Value::Duration(v) => KeyState::Duration {
                average_seconds: v.average_seconds(),
                nanos: v.nanos,
                months: v.months,
                days: v.days,
            },
            Value::Text(v) => {
                self.write_text(v.as_bytes());
                return Ok(());
            }
            Value::Boolean(v) => KeyState::Boolean { value: *v as i64 },
            Value::Number(v) => KeyState::Number {
                bits: v.raw_bits(),
                number_type: v.number_type() as i64,
            },
        };
        Ok(())
    }
}
