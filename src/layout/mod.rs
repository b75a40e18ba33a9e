//! On-page encoding of generic keys.
//!
//! Every entry starts with the entity id and a type byte, followed by a
//! payload whose shape depends on the type. All integers little endian.
//!
//! ```text
//! ┌───────────────┬─────────┬──────────────────────────────────────────────┐
//! │ entity id (8B)│ type(1B)│ payload                                      │
//! └───────────────┴─────────┴──────────────────────────────────────────────┘
//!   zoned datetime  epoch second i64 │ nanos i32 │ zone code i16 │ offset i32
//!   local datetime  epoch second i64 │ nanos i32
//!   date            epoch day i64
//!   zoned time      nanos of day (UTC) i64 │ offset i32
//!   local time      nanos of day i64
//!   duration        average seconds i64 │ nanos i32 │ months i64 │ days i64
//!   text            length u16 (high bit = truncated) │ bytes
//!   boolean         u8
//!   number          tag u8 │ raw bits i64
//! ```
//!
//! Reading never panics: a short buffer, unknown type byte, unknown number
//! tag or impossible text length is reported as [`Error::Corruption`]. Zone
//! fields are not checked here; decode and compare validate them lazily.

mod options;

pub use options::{DEFAULT_PAGE_SIZE, LayoutOptions, MIN_ENTRIES_PER_PAGE, PAGE_HEADER_SIZE};

use crate::compare::{NumberType, first_difference};
use crate::error::{Error, Result};
use crate::index_key::IndexKey;
use crate::key::{GenericKey, Slots};
use crate::tracing_helpers::{debug_log, warn_log};
use crate::types::KeyType;

pub const ENTITY_ID_SIZE: usize = 8;
pub const TYPE_ID_SIZE: usize = 1;
const TEXT_LENGTH_SIZE: usize = 2;
const TEXT_TRUNCATED_FLAG: u16 = 0x8000;
/// Longest text the length field can express.
pub const MAX_TEXT_LENGTH: usize = (TEXT_TRUNCATED_FLAG - 1) as usize;

/// Payload size of every type except text.
fn fixed_payload_size(key_type: KeyType) -> Option<usize> {
    Some(match key_type {
        KeyType::ZonedDateTime => 8 + 4 + 2 + 4,
        KeyType::LocalDateTime => 8 + 4,
        KeyType::Date => 8,
        KeyType::ZonedTime => 8 + 4,
        KeyType::LocalTime => 8,
        KeyType::Duration => 8 + 4 + 8 + 8,
        KeyType::Text => return None,
        KeyType::Boolean => 1,
        KeyType::Number => 1 + 8,
    })
}

/// Reads and writes [`GenericKey`]s in tree pages.
#[derive(Debug, Clone, Default)]
pub struct GenericLayout {
    options: LayoutOptions,
}

impl GenericLayout {
    pub fn new(options: LayoutOptions) -> Result<Self> {
        options.validate()?;
        Ok(GenericLayout { options })
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Longest text stored untruncated.
    pub fn max_text_length(&self) -> usize {
        (self.options.max_key_size - ENTITY_ID_SIZE - TYPE_ID_SIZE - TEXT_LENGTH_SIZE).min(MAX_TEXT_LENGTH)
    }

    /// Encoded size of `key`, after truncation. Zero for a key with no type.
    pub fn key_size(&self, key: &GenericKey) -> usize {
        let payload = match key.key_type() {
            None => return 0,
            Some(KeyType::Text) => {
                let len = key.text_bytes().map_or(0, |b| b.len());
                TEXT_LENGTH_SIZE + len.min(self.max_text_length())
            }
            Some(t) => fixed_payload_size(t).unwrap_or(0),
        };
        ENTITY_ID_SIZE + TYPE_ID_SIZE + payload
    }

    /// Append the encoding of `key` to `out`, returning the bytes written.
    ///
    /// Text longer than [`max_text_length`](Self::max_text_length) is cut
    /// and flagged as truncated, so reads compare it by prefix only. With
    /// `truncate_text` off it is rejected instead.
    pub fn write_key(&self, key: &GenericKey, out: &mut Vec<u8>) -> Result<usize> {
        let Some((key_type, slots)) = key.slots() else {
            return Err(Error::UnsupportedValue("key has no type".into()));
        };
        let start = out.len();
        out.extend_from_slice(&key.entity_id().to_le_bytes());
        out.push(key_type as u8);

        match key_type {
            KeyType::ZonedDateTime => {
                out.extend_from_slice(&slots.slot0.to_le_bytes());
                out.extend_from_slice(&(slots.slot1 as i32).to_le_bytes());
                out.extend_from_slice(&(slots.slot2 as i16).to_le_bytes());
                out.extend_from_slice(&(slots.slot3 as i32).to_le_bytes());
            }
            KeyType::LocalDateTime => {
                out.extend_from_slice(&slots.slot1.to_le_bytes());
                out.extend_from_slice(&(slots.slot0 as i32).to_le_bytes());
            }
            KeyType::Date | KeyType::LocalTime => {
                out.extend_from_slice(&slots.slot0.to_le_bytes());
            }
            KeyType::ZonedTime => {
                out.extend_from_slice(&slots.slot0.to_le_bytes());
                out.extend_from_slice(&(slots.slot1 as i32).to_le_bytes());
            }
            KeyType::Duration => {
                out.extend_from_slice(&slots.slot0.to_le_bytes());
                out.extend_from_slice(&(slots.slot1 as i32).to_le_bytes());
                out.extend_from_slice(&slots.slot2.to_le_bytes());
                out.extend_from_slice(&slots.slot3.to_le_bytes());
            }
            KeyType::Text => {
                let Some(bytes) = key.text_bytes() else {
                    out.truncate(start);
                    return Err(Error::UnsupportedValue("absent text cannot be stored".into()));
                };
                let max = self.max_text_length();
                let truncated = bytes.len() > max;
                if truncated && !self.options.truncate_text {
                    out.truncate(start);
                    return Err(Error::KeyTooLarge {
                        key_type,
                        size: ENTITY_ID_SIZE + TYPE_ID_SIZE + TEXT_LENGTH_SIZE + bytes.len(),
                        max: self.options.max_key_size,
                    });
                }
                let stored = &bytes[..bytes.len().min(max)];
                if truncated {
                    debug_log!(length = bytes.len(), max, "truncating text key");
                }
                let mut length = stored.len() as u16;
                if truncated || key.ignore_length() {
                    length |= TEXT_TRUNCATED_FLAG;
                }
                out.extend_from_slice(&length.to_le_bytes());
                out.extend_from_slice(stored);
            }
            KeyType::Boolean => out.push(slots.slot0 as u8),
            KeyType::Number => {
                out.push(slots.slot1 as u8);
                out.extend_from_slice(&slots.slot0.to_le_bytes());
            }
        }
        Ok(out.len() - start)
    }

    /// Load `key` from the entry at the start of `data`, returning the bytes
    /// consumed. On error `key` is left untouched.
    pub fn read_key(&self, key: &mut GenericKey, data: &[u8]) -> Result<usize> {
        let result = self.read_entry(data);
        match result {
            Ok((entry, consumed)) => {
                key.initialize(entry.entity_id);
                match entry.payload {
                    Payload::Slots(key_type, slots) => key.set_slots(key_type, slots),
                    Payload::Text { bytes, truncated } => key.load_text(bytes, truncated),
                }
                Ok(consumed)
            }
            Err(e) => {
                warn_log!(error = %e, "unreadable index key");
                Err(e)
            }
        }
    }

    fn read_entry<'a>(&self, data: &'a [u8]) -> Result<(Entry<'a>, usize)> {
        let mut r = PageReader { data, offset: 0 };
        let entity_id = r.i64()?;
        let key_type = KeyType::from_u8(r.u8()?)?;

        let payload = match key_type {
            KeyType::ZonedDateTime => Payload::Slots(
                key_type,
                Slots {
                    slot0: r.i64()?,
                    slot1: r.i32()? as i64,
                    slot2: r.i16()? as i64,
                    slot3: r.i32()? as i64,
                },
            ),
            KeyType::LocalDateTime => {
                let epoch_second = r.i64()?;
                let nano = r.i32()? as i64;
                Payload::Slots(
                    key_type,
                    Slots {
                        slot0: nano,
                        slot1: epoch_second,
                        ..Slots::default()
                    },
                )
            }
            KeyType::Date | KeyType::LocalTime => Payload::Slots(
                key_type,
                Slots {
                    slot0: r.i64()?,
                    ..Slots::default()
                },
            ),
            KeyType::ZonedTime => Payload::Slots(
                key_type,
                Slots {
                    slot0: r.i64()?,
                    slot1: r.i32()? as i64,
                    ..Slots::default()
                },
            ),
            KeyType::Duration => Payload::Slots(
                key_type,
                Slots {
                    slot0: r.i64()?,
                    slot1: r.i32()? as i64,
                    slot2: r.i64()?,
                    slot3: r.i64()?,
                },
            ),
            KeyType::Text => {
                let raw = r.u16()?;
                let truncated = raw & TEXT_TRUNCATED_FLAG != 0;
                let length = (raw & !TEXT_TRUNCATED_FLAG) as usize;
                if length > self.max_text_length() {
                    return Err(Error::Corruption(format!(
                        "text length {} exceeds {}",
                        length,
                        self.max_text_length()
                    )));
                }
                Payload::Text {
                    bytes: r.bytes(length)?,
                    truncated,
                }
            }
            KeyType::Boolean => {
                let value = r.u8()?;
                if value > 1 {
                    return Err(Error::Corruption(format!("invalid boolean: {}", value)));
                }
                Payload::Slots(
                    key_type,
                    Slots {
                        slot0: value as i64,
                        ..Slots::default()
                    },
                )
            }
            KeyType::Number => {
                let tag = r.u8()?;
                if NumberType::from_tag(tag).is_none() {
                    return Err(Error::Corruption(format!("invalid number type: {}", tag)));
                }
                Payload::Slots(
                    key_type,
                    Slots {
                        slot0: r.i64()?,
                        slot1: tag as i64,
                        ..Slots::default()
                    },
                )
            }
        };
        Ok((Entry { entity_id, payload }, r.offset))
    }

    /// Build into `into` the shortest key that sorts after `left` and not
    /// after `right`, to be used as the separator when a leaf splits.
    ///
    /// For text that is the shortest prefix of `right` that differs from
    /// `left`; every other type is fixed size, so `right` is copied as is.
    pub fn minimal_splitter(&self, left: &GenericKey, right: &GenericKey, into: &mut GenericKey) {
        match (left.text_bytes(), right.text_bytes()) {
            (Some(l), Some(r)) => {
                let target = (first_difference(l, r) + 1).min(r.len());
                into.copy_text_from(right, target);
                into.set_ignore_length(false);
                *into.identity_mut() = *right.identity();
            }
            _ => into.copy_from(right),
        }
    }
}

struct Entry<'a> {
    entity_id: i64,
    payload: Payload<'a>,
}

enum Payload<'a> {
    Slots(KeyType, Slots),
    Text { bytes: &'a [u8], truncated: bool },
}

/// Bounds-checked little-endian reads over one entry.
struct PageReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> PageReader<'a> {
    fn bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.offset.checked_add(n).filter(|&end| end <= self.data.len());
        let Some(end) = end else {
            return Err(Error::Corruption(format!(
                "key truncated: need {} bytes at offset {}, have {}",
                n,
                self.offset,
                self.data.len()
            )));
        };
        let slice = &self.data[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.bytes(N)?);
        Ok(buf)
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.array::<1>()?[0])
    }

    fn u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.array()?))
    }

    fn i16(&mut self) -> Result<i16> {
        Ok(i16::from_le_bytes(self.array()?))
    }

    fn i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.array()?))
    }

    fn i64(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.array()?))
    }
}
