use crate::error::{Error, Result};

/// Default page size of the index file.
pub const DEFAULT_PAGE_SIZE: usize = 8192;

/// Bytes at the start of every tree page not available to entries.
pub const PAGE_HEADER_SIZE: usize = 64;

/// A leaf must fit at least this many maximum-size entries, or splits could
/// produce a page that holds a single key.
pub const MIN_ENTRIES_PER_PAGE: usize = 2;

/// Entry id + type byte + the largest fixed payload (duration).
pub(crate) const MIN_KEY_SIZE_CAP: usize = super::ENTITY_ID_SIZE + super::TYPE_ID_SIZE + 28;

/// Sizing of the page an index is stored in.
///
/// Trade-off: a larger `max_key_size` keeps more text untruncated, but fewer
/// worst-case entries fit a page and the tree gets deeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    pub page_size: usize,
    /// Largest encoded entry, entity id and type byte included. Longer text
    /// is truncated to fit.
    pub max_key_size: usize,
    /// Cut over-long text instead of rejecting it with
    /// [`Error::KeyTooLarge`].
    pub truncate_text: bool,
}

impl LayoutOptions {
    /// Options for `page_size` with the largest key cap the page allows.
    pub fn from_page_size(page_size: usize) -> Result<Self> {
        let options = LayoutOptions {
            page_size,
            max_key_size: max_key_size_for(page_size),
            truncate_text: true,
        };
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size <= PAGE_HEADER_SIZE {
            return Err(Error::InvalidOptions(format!(
                "page size {} does not exceed the {} byte header",
                self.page_size, PAGE_HEADER_SIZE
            )));
        }
        let cap = max_key_size_for(self.page_size);
        if self.max_key_size > cap {
            return Err(Error::InvalidOptions(format!(
                "max key size {} exceeds {} for {} byte pages",
                self.max_key_size, cap, self.page_size
            )));
        }
        if self.max_key_size < MIN_KEY_SIZE_CAP {
            return Err(Error::InvalidOptions(format!(
                "max key size {} cannot hold fixed-size keys ({} bytes)",
                self.max_key_size, MIN_KEY_SIZE_CAP
            )));
        }
        Ok(())
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            page_size: DEFAULT_PAGE_SIZE,
            max_key_size: max_key_size_for(DEFAULT_PAGE_SIZE),
            truncate_text: true,
        }
    }
}

fn max_key_size_for(page_size: usize) -> usize {
    page_size.saturating_sub(PAGE_HEADER_SIZE) / MIN_ENTRIES_PER_PAGE
}
