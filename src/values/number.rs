use std::cmp::Ordering;
use std::fmt;

use crate::compare::{NumberType, compare_numeric};

/// A number in the representation it was written with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberValue {
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
}

impl NumberValue {
    pub fn number_type(&self) -> NumberType {
        match self {
            NumberValue::Int8(_) => NumberType::Int8,
            NumberValue::Int16(_) => NumberType::Int16,
            NumberValue::Int32(_) => NumberType::Int32,
            NumberValue::Int64(_) => NumberType::Int64,
            NumberValue::Float32(_) => NumberType::Float32,
            NumberValue::Float64(_) => NumberType::Float64,
        }
    }

    /// The 64-bit pattern stored in a key: integers sign-extended, floats as
    /// their IEEE bits.
    pub fn raw_bits(&self) -> i64 {
        match *self {
            NumberValue::Int8(v) => v as i64,
            NumberValue::Int16(v) => v as i64,
            NumberValue::Int32(v) => v as i64,
            NumberValue::Int64(v) => v,
            NumberValue::Float32(v) => v.to_bits() as i64,
            NumberValue::Float64(v) => v.to_bits() as i64,
        }
    }

    pub fn from_raw_bits(bits: i64, number_type: NumberType) -> Self {
        match number_type {
            NumberType::Int8 => NumberValue::Int8(bits as i8),
            NumberType::Int16 => NumberValue::Int16(bits as i16),
            NumberType::Int32 => NumberValue::Int32(bits as i32),
            NumberType::Int64 => NumberValue::Int64(bits),
            NumberType::Float32 => NumberValue::Float32(f32::from_bits(bits as u32)),
            NumberType::Float64 => NumberValue::Float64(f64::from_bits(bits as u64)),
        }
    }

    /// Order by mathematical value across representations.
    pub fn compare(&self, other: &NumberValue) -> Ordering {
        compare_numeric(
            self.raw_bits(),
            self.number_type() as u8,
            other.raw_bits(),
            other.number_type() as u8,
        )
    }
}

impl fmt::Display for NumberValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberValue::Int8(v) => write!(f, "{v}"),
            NumberValue::Int16(v) => write!(f, "{v}"),
            NumberValue::Int32(v) => write!(f, "{v}"),
            NumberValue::Int64(v) => write!(f, "{v}"),
            NumberValue::Float32(v) => write!(f, "{v:?}"),
            NumberValue::Float64(v) => write!(f, "{v:?}"),
        }
    }
}
