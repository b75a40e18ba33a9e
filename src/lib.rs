//! # Native index generic key
//!
//! The key format of a B+tree schema index: one fixed-shape key that can
//! hold any indexable property value (temporal, text, boolean or numeric)
//! plus the id of the entity that owns it.
//!
//! ## Core idea
//! A key is a type tag, four `i64` slots and an optional byte buffer. Page
//! bytes are loaded into the slots without building a value, and keys are
//! compared straight from the slots. Only the page layer allocates, and a
//! cursor reuses one key (and one text buffer) for every entry it visits.
//!
//! Ordering is total within a type: value first, then entity id. Sentinel
//! keys sort below or above every real value of their type and serve as
//! open range bounds.

mod tracing_helpers;

pub mod compare;
pub mod error;
pub mod index_key;
pub mod key;
pub mod layout;
pub mod timezone;
pub mod types;
pub mod values;

// Public re-exports for the top-level API
pub use error::{Error, Result};
pub use index_key::{IndexKey, KeyIdentity};
pub use key::{GenericKey, Slots};
pub use layout::{GenericLayout, LayoutOptions};
pub use types::{EntityId, KeyType};
pub use values::Value;
