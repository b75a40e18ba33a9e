use std::cmp::Ordering;
use std::fmt;

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Timelike, Utc,
};

use crate::timezone::{self, NamedZone};

pub const NANOS_PER_SECOND: i64 = 1_000_000_000;
pub const SECONDS_PER_DAY: i64 = 86_400;
pub const NANOS_PER_DAY: i64 = SECONDS_PER_DAY * NANOS_PER_SECOND;

/// Average length of a Gregorian month (365.25 / 12 days), in seconds.
pub const AVG_MONTH_SECONDS: i64 = 2_629_800;
/// Length of a day used when comparing durations, in seconds.
pub const AVG_DAY_SECONDS: i64 = SECONDS_PER_DAY;

/// chrono counts days from 0001-01-01; 1970-01-01 is day 719_163.
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

/// The zone a date-time or time is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Offset(i32),
    Named(NamedZone),
}

impl Zone {
    /// A fixed offset, if it is within ±18 hours.
    pub fn offset(seconds: i32) -> Option<Self> {
        timezone::valid_zone_offset(seconds).then_some(Zone::Offset(seconds))
    }

    /// A named zone, if the codex knows it.
    pub fn named(name: &str) -> Option<Self> {
        NamedZone::of(name).map(Zone::Named)
    }

    /// Ordering between two zones of the same instant: fixed offsets before
    /// named zones, larger offsets first, names alphabetically.
    fn compare_same_instant(self, other: Zone) -> Ordering {
        match (self, other) {
            (Zone::Offset(a), Zone::Offset(b)) => b.cmp(&a),
            (Zone::Offset(_), Zone::Named(_)) => Ordering::Less,
            (Zone::Named(_), Zone::Offset(_)) => Ordering::Greater,
            (Zone::Named(a), Zone::Named(b)) => a.name().cmp(b.name()),
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Offset(seconds) => f.write_str(&timezone::format_offset(*seconds)),
            Zone::Named(zone) => write!(f, "[{zone}]"),
        }
    }
}

/// An instant plus the zone it was expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTimeValue {
    pub epoch_second: i64,
    pub nano: i64,
    pub zone: Zone,
}

impl DateTimeValue {
    pub fn new(epoch_second: i64, nano: i64, zone: Zone) -> Self {
        DateTimeValue { epoch_second, nano, zone }
    }

    pub fn from_chrono(dt: &DateTime<FixedOffset>) -> Self {
        DateTimeValue {
            epoch_second: dt.timestamp(),
            nano: dt.timestamp_subsec_nanos() as i64,
            zone: Zone::Offset(dt.offset().local_minus_utc()),
        }
    }

    /// The instant in UTC.
    pub fn to_utc(&self) -> Option<NaiveDateTime> {
        utc_from_epoch(self.epoch_second, self.nano)
    }

    /// Calendar view for fixed-offset values. Named zones have no offset
    /// rules here, so they yield `None`.
    pub fn to_chrono(&self) -> Option<DateTime<FixedOffset>> {
        match self.zone {
            Zone::Offset(seconds) => {
                let offset = FixedOffset::east_opt(seconds)?;
                Some(self.to_utc()?.and_utc().with_timezone(&offset))
            }
            Zone::Named(_) => None,
        }
    }
}

impl Ord for DateTimeValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch_second
            .cmp(&other.epoch_second)
            .then(self.nano.cmp(&other.nano))
            .then_with(|| self.zone.compare_same_instant(other.zone))
    }
}

impl PartialOrd for DateTimeValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for DateTimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(dt) = self.to_chrono() {
            return f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true));
        }
        match self.to_utc() {
            Some(utc) => write!(f, "{}Z{}", utc.format("%Y-%m-%dT%H:%M:%S%.f"), self.zone),
            None => write!(f, "{}.{:09}s{}", self.epoch_second, self.nano, self.zone),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalDateTimeValue {
    pub epoch_second: i64,
    pub nano: i64,
}

impl LocalDateTimeValue {
    pub fn new(epoch_second: i64, nano: i64) -> Self {
        LocalDateTimeValue { epoch_second, nano }
    }

    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        utc_from_epoch(self.epoch_second, self.nano)
    }
}

impl From<NaiveDateTime> for LocalDateTimeValue {
    fn from(dt: NaiveDateTime) -> Self {
        let utc = dt.and_utc();
        LocalDateTimeValue::new(utc.timestamp(), utc.timestamp_subsec_nanos() as i64)
    }
}

impl fmt::Display for LocalDateTimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_naive() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            None => write!(f, "{}.{:09}s", self.epoch_second, self.nano),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateValue {
    pub epoch_day: i64,
}

impl DateValue {
    pub fn new(epoch_day: i64) -> Self {
        DateValue { epoch_day }
    }

    pub fn to_naive(&self) -> Option<NaiveDate> {
        let days = i32::try_from(self.epoch_day.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?).ok()?;
        NaiveDate::from_num_days_from_ce_opt(days)
    }
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        DateValue::new(date.num_days_from_ce() as i64 - UNIX_EPOCH_DAYS_FROM_CE)
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_naive() {
            Some(date) => write!(f, "{date}"),
            None => write!(f, "epoch-day {}", self.epoch_day),
        }
    }
}

/// A time of day with a fixed offset, held as nanoseconds of day in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeValue {
    pub nanos_of_day_utc: i64,
    pub offset_seconds: i32,
}

impl TimeValue {
    pub fn from_utc_nanos(nanos_of_day_utc: i64, offset_seconds: i32) -> Self {
        TimeValue { nanos_of_day_utc, offset_seconds }
    }

    /// A local wall-clock time at `offset_seconds` east of UTC.
    pub fn from_local(time: NaiveTime, offset_seconds: i32) -> Self {
        let local = LocalTimeValue::from(time).nanos_of_day;
        let utc = (local - offset_seconds as i64 * NANOS_PER_SECOND).rem_euclid(NANOS_PER_DAY);
        TimeValue::from_utc_nanos(utc, offset_seconds)
    }

    pub fn local_nanos_of_day(&self) -> i64 {
        self.nanos_of_day_utc
            .wrapping_add(self.offset_seconds as i64 * NANOS_PER_SECOND)
            .rem_euclid(NANOS_PER_DAY)
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let local = LocalTimeValue::new(self.local_nanos_of_day());
        write!(f, "{}{}", local, timezone::format_offset(self.offset_seconds))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalTimeValue {
    pub nanos_of_day: i64,
}

impl LocalTimeValue {
    pub fn new(nanos_of_day: i64) -> Self {
        LocalTimeValue { nanos_of_day }
    }

    pub fn to_naive(&self) -> Option<NaiveTime> {
        if !(0..NANOS_PER_DAY).contains(&self.nanos_of_day) {
            return None;
        }
        let seconds = (self.nanos_of_day / NANOS_PER_SECOND) as u32;
        let nanos = (self.nanos_of_day % NANOS_PER_SECOND) as u32;
        NaiveTime::from_num_seconds_from_midnight_opt(seconds, nanos)
    }
}

impl From<NaiveTime> for LocalTimeValue {
    fn from(time: NaiveTime) -> Self {
        // Leap seconds are folded into the last second of the minute.
        let nanos = (time.nanosecond() as i64).min(NANOS_PER_SECOND - 1);
        LocalTimeValue::new(time.num_seconds_from_midnight() as i64 * NANOS_PER_SECOND + nanos)
    }
}

impl fmt::Display for LocalTimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_naive() {
            Some(time) => write!(f, "{}", time.format("%H:%M:%S%.f")),
            None => write!(f, "{}ns", self.nanos_of_day),
        }
    }
}

/// An amount of time split into calendar months, days and exact seconds.
///
/// Months and days have no fixed length, so durations order by their
/// average length first (see [`average_seconds`](Self::average_seconds)) and
/// only fall back to the individual components to break ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DurationValue {
    pub months: i64,
    pub days: i64,
    pub seconds: i64,
    /// Always within `0..1_000_000_000`.
    pub nanos: i64,
}

impl DurationValue {
    /// Build a duration, carrying whole seconds out of `nanos`.
    pub fn new(months: i64, days: i64, seconds: i64, nanos: i64) -> Self {
        DurationValue {
            months,
            days,
            seconds: seconds.wrapping_add(nanos.div_euclid(NANOS_PER_SECOND)),
            nanos: nanos.rem_euclid(NANOS_PER_SECOND),
        }
    }

    /// Seconds with months and days converted at their calendar averages.
    pub fn average_seconds(&self) -> i64 {
        self.seconds
            .wrapping_add(self.months.wrapping_mul(AVG_MONTH_SECONDS))
            .wrapping_add(self.days.wrapping_mul(AVG_DAY_SECONDS))
    }

    /// Inverse of [`average_seconds`](Self::average_seconds).
    pub fn from_average_seconds(average_seconds: i64, nanos: i64, months: i64, days: i64) -> Self {
        let seconds = average_seconds
            .wrapping_sub(months.wrapping_mul(AVG_MONTH_SECONDS))
            .wrapping_sub(days.wrapping_mul(AVG_DAY_SECONDS));
        DurationValue::new(months, days, seconds, nanos)
    }
}

impl Ord for DurationValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.average_seconds()
            .cmp(&other.average_seconds())
            .then(self.nanos.cmp(&other.nanos))
            .then(self.months.cmp(&other.months))
            .then(self.days.cmp(&other.days))
    }
}

impl PartialOrd for DurationValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for DurationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}M{}DT{}", self.months, self.days, self.seconds)?;
        if self.nanos != 0 {
            write!(f, ".{:09}", self.nanos)?;
        }
        f.write_str("S")
    }
}

fn utc_from_epoch(epoch_second: i64, nano: i64) -> Option<NaiveDateTime> {
    let nano = u32::try_from(nano).ok()?;
    DateTime::<Utc>::from_timestamp(epoch_second, nano).map(|dt| dt.naive_utc())
}
