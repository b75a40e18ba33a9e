use std::cmp::Ordering;

/// Lexicographic comparison of two byte sequences as unsigned bytes.
///
/// The shorter sequence sorts first when it is a prefix of the longer one,
/// unless `ignore_length` is set. That flag marks at least one side as
/// truncated (or a prefix bound), so only the common prefix may decide and a
/// full tie is reported as `Equal` for an outer layer to break.
///
/// Offsets and lengths are expressed by slicing:
///
/// ```
/// use std::cmp::Ordering;
/// use native_index_key::compare::unsigned_byte_compare;
///
/// let page = b"..abc..ab";
/// assert_eq!(unsigned_byte_compare(&page[2..5], &page[7..9], false), Ordering::Greater);
/// assert_eq!(unsigned_byte_compare(&page[2..5], &page[7..9], true), Ordering::Equal);
/// ```
#[inline]
pub fn unsigned_byte_compare(a: &[u8], b: &[u8], ignore_length: bool) -> Ordering {
    if std::ptr::eq(a, b) {
        return Ordering::Equal;
    }
    let common = a.len().min(b.len());
    // [u8] orders like memcmp: unsigned, byte by byte.
    match a[..common].cmp(&b[..common]) {
        Ordering::Equal if ignore_length => Ordering::Equal,
        Ordering::Equal => a.len().cmp(&b.len()),
        decided => decided,
    }
}

/// Index of the first byte where `a` and `b` differ, or the length of the
/// shorter one when it is a prefix of the other.
#[inline]
pub fn first_difference(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}
