//! Per-type comparison routines. Slot pairs come in as plain integers so
//! the routines stay independent of the enum layout.
//!
//! Nanosecond and offset tie-breaks compare the low 32 bits only, matching
//! the width those fields have on a page.

use std::cmp::Ordering;

use super::GenericKey;
use crate::compare::compare_numeric;
use crate::timezone::valid_zone_offset;

impl GenericKey {
    /// `(epoch_second, nano, zone_offset)` for each side.
    pub(super) fn compare_zoned_date_time(
        &self,
        other: &GenericKey,
        this: (i64, i64, i64),
        that: (i64, i64, i64),
    ) -> Ordering {
        let compare = this.0.cmp(&that.0).then_with(|| (this.1 as i32).cmp(&(that.1 as i32)));
        // Same instant. Offsets are checked first because the page may hold
        // garbage; only then is it safe to build full values.
        if compare == Ordering::Equal
            && valid_zone_offset(this.2 as i32)
            && valid_zone_offset(that.2 as i32)
        {
            return self.value_of_state().compare(&other.value_of_state());
        }
        compare
    }
}

/// `(epoch_second, nano)` for each side.
pub(super) fn local_date_time(this: (i64, i64), that: (i64, i64)) -> Ordering {
    this.0.cmp(&that.0).then_with(|| (this.1 as i32).cmp(&(that.1 as i32)))
}

/// `(nanos_of_day_utc, zone_offset)` for each side.
pub(super) fn zoned_time(this: (i64, i64), that: (i64, i64)) -> Ordering {
    this.0.cmp(&that.0).then_with(|| (this.1 as i32).cmp(&(that.1 as i32)))
}

/// `[average_seconds, nanos, months, days]` for each side.
pub(super) fn duration(this: [i64; 4], that: [i64; 4]) -> Ordering {
    this[0]
        .cmp(&that[0])
        .then_with(|| (this[1] as i32).cmp(&(that[1] as i32)))
        .then_with(|| this[2].cmp(&that[2]))
        .then_with(|| this[3].cmp(&that[3]))
}

/// `(bits, number_type)` for each side. Sentinel keys fill the tag slot with
/// `i64::MIN` / `i64::MAX`; those sort outside every real number.
pub(super) fn number(this: (i64, i64), that: (i64, i64)) -> Ordering {
    let (this_bound, that_bound) = (bound_rank(this.1), bound_rank(that.1));
    if this_bound != 0 || that_bound != 0 {
        return this_bound.cmp(&that_bound);
    }
    compare_numeric(this.0, number_tag(this.1), that.0, number_tag(that.1))
}

fn bound_rank(number_type: i64) -> i8 {
    match number_type {
        i64::MIN => -1,
        i64::MAX => 1,
        _ => 0,
    }
}

/// Out-of-range tags map to one `compare_numeric` rejects.
fn number_tag(number_type: i64) -> u8 {
    u8::try_from(number_type).unwrap_or(u8::MAX)
}
