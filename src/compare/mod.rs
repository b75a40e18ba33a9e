//! Stateless comparators shared by keys and values.
//!
//! Both return [`std::cmp::Ordering`] and neither allocates: they run inside
//! every binary-search step over a B+tree page.

pub mod bytes;
pub mod numeric;

pub use bytes::{first_difference, unsigned_byte_compare};
pub use numeric::{NumberType, compare_numeric};
