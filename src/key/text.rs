use std::cmp::Ordering;
use std::sync::Arc;

use super::{GenericKey, KeyState};
use crate::compare::unsigned_byte_compare;
use crate::index_key::IndexKey;
use crate::tracing_helpers::trace_log;
use crate::types::EntityId;
use crate::values::{TextValue, Value};

impl GenericKey {
    /// Make room for `length` text bytes and switch the key to text.
    ///
    /// The current buffer is reused when it is large enough and nobody else
    /// can observe it. Otherwise a new one with 50% slack is allocated, so
    /// that later, longer values of the same scan still fit.
    pub fn set_buffer_length(&mut self, length: usize) {
        let (dereferenced, ignore_length) = match self.state {
            KeyState::Text {
                dereferenced,
                ignore_length,
                ..
            } => (dereferenced, ignore_length),
            _ => (false, false),
        };
        let reusable = match &self.bytes {
            Some(buf) => !dereferenced && buf.len() >= length && Arc::strong_count(buf) == 1,
            None => false,
        };
        if !reusable {
            trace_log!(length, dereferenced, "allocating text key buffer");
            self.bytes = Some(Arc::new(vec![0u8; length + length / 2]));
        }
        self.state = KeyState::Text {
            length: length as i64,
            dereferenced: false,
            ignore_length,
        };
    }

    /// The text bytes `[0, length)`, if this key holds text.
    pub fn text_bytes(&self) -> Option<&[u8]> {
        match self.state {
            KeyState::Text { .. } => self.bytes.as_ref().map(|buf| &buf[..self.text_len()]),
            _ => None,
        }
    }

    /// Mutable text bytes `[0, length)`, to be filled after
    /// [`set_buffer_length`](Self::set_buffer_length).
    pub fn text_bytes_mut(&mut self) -> &mut [u8] {
        let len = self.text_len();
        match self.bytes.as_mut() {
            // Unique after set_buffer_length, so make_mut never clones here.
            Some(buf) => &mut Arc::make_mut(buf)[..len],
            None => Default::default(),
        }
    }

    /// Load text bytes read from a page.
    pub fn load_text(&mut self, bytes: &[u8], ignore_length: bool) {
        self.set_buffer_length(bytes.len());
        self.text_bytes_mut().copy_from_slice(bytes);
        self.set_ignore_length(ignore_length);
    }

    /// Replace this key's text with the first `length` bytes of `other`'s
    /// buffer. Bytes `other` does not have are left zeroed.
    pub fn copy_text_from(&mut self, other: &GenericKey, length: usize) {
        self.set_buffer_length(length);
        let source = other.bytes.as_ref().map(|buf| buf.as_slice()).unwrap_or_default();
        let n = length.min(source.len());
        let target = self.text_bytes_mut();
        target[..n].copy_from_slice(&source[..n]);
        target[n..].fill(0);
    }

    /// Whether only the common prefix decides comparisons with this key.
    pub fn ignore_length(&self) -> bool {
        matches!(self.state, KeyState::Text { ignore_length: true, .. })
    }

    pub fn set_ignore_length(&mut self, ignore: bool) {
        if let KeyState::Text { ignore_length, .. } = &mut self.state {
            *ignore_length = ignore;
        }
    }

    /// Whether the buffer has been handed out by [`as_value`](Self::as_value).
    pub fn is_dereferenced(&self) -> bool {
        matches!(self.state, KeyState::Text { dereferenced: true, .. })
    }

    /// The text buffer, for identity checks.
    pub fn buffer(&self) -> Option<&Arc<Vec<u8>>> {
        self.bytes.as_ref()
    }

    /// Lower bound of a `STARTS WITH prefix` scan.
    ///
    /// Entries shorter than the prefix that match it up to their own length
    /// also fall inside the bounds; the scan filters those out.
    pub fn init_as_prefix_low(&mut self, prefix: &str) {
        self.init_as_prefix(prefix, EntityId::MIN);
    }

    /// Upper bound of a `STARTS WITH prefix` scan.
    pub fn init_as_prefix_high(&mut self, prefix: &str) {
        self.init_as_prefix(prefix, EntityId::MAX);
    }

    fn init_as_prefix(&mut self, prefix: &str, entity_id: EntityId) {
        self.initialize(entity_id);
        self.load_text(prefix.as_bytes(), true);
    }

    pub(super) fn write_text(&mut self, bytes: &[u8]) {
        self.load_text(bytes, false);
    }

    /// Length clamped to what the buffer holds; page bytes may lie.
    pub(super) fn text_len(&self) -> usize {
        let length = match self.state {
            KeyState::Text { length, .. } => length,
            _ => 0,
        };
        let capacity = self.bytes.as_ref().map_or(0, |buf| buf.len());
        usize::try_from(length).unwrap_or(0).min(capacity)
    }

    pub(super) fn text_as_value(&mut self) -> Value {
        let Some(buf) = &self.bytes else {
            return Value::NoValue;
        };
        let value = TextValue::shared(Arc::clone(buf), self.text_len());
        if let KeyState::Text { dereferenced, .. } = &mut self.state {
            *dereferenced = true;
        }
        Value::Text(value)
    }

    /// A text key without bytes is a sentinel: the highest one when it is
    /// the upper bound of a range, otherwise the lowest.
    fn is_highest_text(&self) -> bool {
        self.compare_by_entity_id() && self.entity_id() == EntityId::MAX && self.bytes.is_none()
    }

    pub(super) fn compare_text(&self, other: &GenericKey) -> Ordering {
        let (this, that) = match (&self.bytes, &other.bytes) {
            (Some(a), Some(b)) if Arc::ptr_eq(a, b) => return Ordering::Equal,
            (None, None) => return self.is_highest_text().cmp(&other.is_highest_text()),
            (None, Some(_)) => {
                return if self.is_highest_text() { Ordering::Greater } else { Ordering::Less };
            }
            (Some(_), None) => {
                return if other.is_highest_text() { Ordering::Less } else { Ordering::Greater };
            }
            (Some(a), Some(b)) => (&a[..self.text_len()], &b[..other.text_len()]),
        };
        unsigned_byte_compare(this, that, self.ignore_length() || other.ignore_length())
    }
}
