use thiserror::Error;

use crate::types::KeyType;

/// Unified error type for key encoding and page layout.
///
/// Only boundary operations return it. Comparing and decoding keys never
/// fail: malformed zone fields decode to `Value::NoValue`, and an unset type
/// tag is a programming error that panics.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Page bytes could not be interpreted (short read, bad tag, bad length).
    #[error("Corruption: {0}")]
    Corruption(String),
    /// The value has no key representation.
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),
    /// The encoded key does not fit the configured per-entry cap.
    #[error("Key of type {key_type:?} needs {size} bytes, cap is {max}")]
    KeyTooLarge {
        key_type: KeyType,
        size: usize,
        max: usize,
    },
    /// Layout options that cannot describe a usable page.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
