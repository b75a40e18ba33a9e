use std::cmp::Ordering;

/// Original width/kind of a number stored as a raw 64-bit pattern.
///
/// Integers are stored sign-extended to 64 bits. Floats are stored as their
/// IEEE bit pattern, `f32` in the low 32 bits. The discriminant is the tag
/// persisted next to the bits, so variants may only ever be appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberType {
    Int8 = 0,
    Int16 = 1,
    Int32 = 2,
    Int64 = 3,
    Float32 = 4,
    Float64 = 5,
}

impl NumberType {
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(NumberType::Int8),
            1 => Some(NumberType::Int16),
            2 => Some(NumberType::Int32),
            3 => Some(NumberType::Int64),
            4 => Some(NumberType::Float32),
            5 => Some(NumberType::Float64),
            _ => None,
        }
    }

    /// Like [`from_tag`](Self::from_tag), for callers that have already
    /// validated the tag.
    ///
    /// # Panics
    /// Panics on a tag outside the closed set.
    pub fn expect_tag(tag: u8) -> Self {
        match Self::from_tag(tag) {
            Some(t) => t,
            None => panic!("unknown number representation tag: {}", tag),
        }
    }

    pub fn is_floating(self) -> bool {
        matches!(self, NumberType::Float32 | NumberType::Float64)
    }

    /// Reinterpret `bits` as a float of this representation.
    pub fn bits_as_f64(self, bits: i64) -> f64 {
        match self {
            NumberType::Float32 => f32::from_bits(bits as u32) as f64,
            NumberType::Float64 => f64::from_bits(bits as u64),
            _ => bits as f64,
        }
    }
}

/// Compare two stored numbers by mathematical value, whatever their
/// representation.
///
/// NaN sorts above every other number and equals itself; `-0.0` equals `0.0`
/// and the integer `0`. Integer/float pairs are compared exactly, without
/// rounding the integer to the nearest double.
///
/// # Panics
/// Panics when either tag is not a known [`NumberType`].
pub fn compare_numeric(lhs_bits: i64, lhs_tag: u8, rhs_bits: i64, rhs_tag: u8) -> Ordering {
    let lhs_type = NumberType::expect_tag(lhs_tag);
    let rhs_type = NumberType::expect_tag(rhs_tag);

    match (lhs_type.is_floating(), rhs_type.is_floating()) {
        (false, false) => lhs_bits.cmp(&rhs_bits),
        (true, true) => compare_f64(lhs_type.bits_as_f64(lhs_bits), rhs_type.bits_as_f64(rhs_bits)),
        (false, true) => compare_i64_f64(lhs_bits, rhs_type.bits_as_f64(rhs_bits)),
        (true, false) => compare_i64_f64(rhs_bits, lhs_type.bits_as_f64(lhs_bits)).reverse(),
    }
}

fn compare_f64(lhs: f64, rhs: f64) -> Ordering {
    match lhs.partial_cmp(&rhs) {
        Some(ordering) => ordering,
        // At least one NaN.
        None => lhs.is_nan().cmp(&rhs.is_nan()),
    }
}

/// 2^63, the first double above `i64::MAX`.
const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

fn compare_i64_f64(lhs: i64, rhs: f64) -> Ordering {
    if rhs.is_nan() || rhs >= TWO_POW_63 {
        return Ordering::Less;
    }
    if rhs < -TWO_POW_63 {
        return Ordering::Greater;
    }
    // |rhs| < 2^63 here, so its integral part is exact in an i64.
    let whole = rhs.trunc();
    match lhs.cmp(&(whole as i64)) {
        Ordering::Equal => {
            let fraction = rhs - whole;
            if fraction > 0.0 {
                Ordering::Less
            } else if fraction < 0.0 {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }
        decided => decided,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(v: i64) -> (i64, u8) {
        (v, NumberType::Int64 as u8)
    }

    fn double(v: f64) -> (i64, u8) {
        (v.to_bits() as i64, NumberType::Float64 as u8)
    }

    fn cmp(a: (i64, u8), b: (i64, u8)) -> Ordering {
        compare_numeric(a.0, a.1, b.0, b.1)
    }

    #[test]
    fn large_integers_are_not_rounded() {
        // 2^53 + 1 is not representable as a double; it must still sort above 2^53.
        let big = (1i64 << 53) + 1;
        assert_eq!(cmp(int(big), double((1u64 << 53) as f64)), Ordering::Greater);
        assert_eq!(cmp(int(i64::MAX), double(TWO_POW_63)), Ordering::Less);
        assert_eq!(cmp(int(i64::MIN), double(-TWO_POW_63)), Ordering::Equal);
    }

    #[test]
    fn fractions_break_integer_ties() {
        assert_eq!(cmp(int(1), double(1.5)), Ordering::Less);
        assert_eq!(cmp(int(-1), double(-1.5)), Ordering::Greater);
        assert_eq!(cmp(double(1.5), int(1)), Ordering::Greater);
    }

    #[test]
    fn nan_and_signed_zero() {
        assert_eq!(cmp(double(f64::NAN), double(f64::INFINITY)), Ordering::Greater);
        assert_eq!(cmp(double(f64::NAN), double(f64::NAN)), Ordering::Equal);
        assert_eq!(cmp(int(i64::MAX), double(f64::NAN)), Ordering::Less);
        assert_eq!(cmp(double(-0.0), double(0.0)), Ordering::Equal);
        assert_eq!(cmp(double(-0.0), int(0)), Ordering::Equal);
    }

    #[test]
    #[should_panic(expected = "unknown number representation tag")]
    fn unknown_tag_is_fatal() {
        compare_numeric(0, 9, 0, NumberType::Int8 as u8);
    }
}
