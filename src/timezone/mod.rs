//! Compact codes for time zones stored inside keys.
//!
//! Named zones are persisted as an `i16` index into [`ZONE_IDS`]. Fixed
//! offsets are persisted as signed seconds. Every check here is total over
//! arbitrary input: the fields come straight off pages that may be half
//! written or not yet recovered.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

mod zone_ids;

pub use zone_ids::ZONE_IDS;

/// Largest offset from UTC accepted for a fixed-offset zone, in seconds.
pub const MAX_ZONE_OFFSET_SECONDS: i32 = 18 * 60 * 60;
/// Smallest offset from UTC accepted for a fixed-offset zone, in seconds.
pub const MIN_ZONE_OFFSET_SECONDS: i32 = -MAX_ZONE_OFFSET_SECONDS;

/// Zone code written for values carrying a fixed offset instead of a name.
pub const OFFSET_ZONE_CODE: i16 = -1;

static CODE_BY_NAME: LazyLock<HashMap<&'static str, i16>> = LazyLock::new(|| {
    ZONE_IDS
        .iter()
        .enumerate()
        .map(|(code, name)| (*name, code as i16))
        .collect()
});

/// Whether `seconds` is a legal fixed offset from UTC.
#[inline]
pub fn valid_zone_offset(seconds: i32) -> bool {
    (MIN_ZONE_OFFSET_SECONDS..=MAX_ZONE_OFFSET_SECONDS).contains(&seconds)
}

/// Whether `code` names an entry of [`ZONE_IDS`].
#[inline]
pub fn valid_zone_id(code: i16) -> bool {
    code >= 0 && (code as usize) < ZONE_IDS.len()
}

/// Zone identifier for a persisted code.
pub fn map(code: i16) -> Option<&'static str> {
    if valid_zone_id(code) {
        Some(ZONE_IDS[code as usize])
    } else {
        None
    }
}

/// Persisted code for a zone identifier.
pub fn zone_id_of(name: &str) -> Option<i16> {
    CODE_BY_NAME.get(name).copied()
}

/// A named time zone known to the codex.
///
/// Only constructible from a valid code or a known name, so [`name`](Self::name)
/// never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NamedZone(i16);

impl NamedZone {
    pub fn of(name: &str) -> Option<Self> {
        zone_id_of(name).map(NamedZone)
    }

    pub fn from_code(code: i16) -> Option<Self> {
        valid_zone_id(code).then_some(NamedZone(code))
    }

    pub fn code(self) -> i16 {
        self.0
    }

    pub fn name(self) -> &'static str {
        ZONE_IDS[self.0 as usize]
    }
}

impl fmt::Display for NamedZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Format an offset the way ISO-8601 does: `Z`, `+01:00`, `-03:30:15`.
pub fn format_offset(seconds: i32) -> String {
    if seconds == 0 {
        return "Z".to_string();
    }
    let sign = if seconds < 0 { '-' } else { '+' };
    let abs = seconds.unsigned_abs();
    let (h, m, s) = (abs / 3600, (abs / 60) % 60, abs % 60);
    if s == 0 {
        format!("{sign}{h:02}:{m:02}")
    } else {
        format!("{sign}{h:02}:{m:02}:{s:02}")
    }
}
