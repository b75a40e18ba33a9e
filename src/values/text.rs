use std::fmt;
use std::str::Utf8Error;
use std::sync::Arc;

/// UTF-8 text, possibly a zero-copy view of a key's byte buffer.
///
/// Decoding a text key hands out a clone of the key's `Arc` instead of
/// copying the bytes; the key then treats its buffer as dereferenced and
/// allocates a fresh one before its next write.
#[derive(Clone)]
pub struct TextValue {
    bytes: Arc<Vec<u8>>,
    len: usize,
}

impl TextValue {
    pub fn new(text: &str) -> Self {
        Self::from_utf8_bytes(text.as_bytes().to_vec())
    }

    /// Wrap bytes that are expected to be UTF-8. Validation is deferred to
    /// [`to_str`](Self::to_str).
    pub fn from_utf8_bytes(bytes: Vec<u8>) -> Self {
        let len = bytes.len();
        TextValue { bytes: Arc::new(bytes), len }
    }

    /// View the first `len` bytes of a shared buffer.
    pub(crate) fn shared(bytes: Arc<Vec<u8>>, len: usize) -> Self {
        let len = len.min(bytes.len());
        TextValue { bytes, len }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn to_str(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(self.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether this value is a view of `buffer`.
    pub fn shares_buffer(&self, buffer: &Arc<Vec<u8>>) -> bool {
        Arc::ptr_eq(&self.bytes, buffer)
    }
}

impl PartialEq for TextValue {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for TextValue {}

impl From<&str> for TextValue {
    fn from(text: &str) -> Self {
        TextValue::new(text)
    }
}

impl From<String> for TextValue {
    fn from(text: String) -> Self {
        TextValue::from_utf8_bytes(text.into_bytes())
    }
}

impl fmt::Debug for TextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(self.as_bytes()))
    }
}

impl fmt::Display for TextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_bytes()))
    }
}
