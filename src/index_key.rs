use std::cmp::Ordering;

use crate::types::EntityId;

/// Entity id and tie-break flag carried by every index key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyIdentity {
    pub entity_id: EntityId,
    pub compare_by_entity_id: bool,
}

impl Default for KeyIdentity {
    fn default() -> Self {
        KeyIdentity {
            entity_id: 0,
            compare_by_entity_id: true,
        }
    }
}

/// A B+tree key made of a property value and the owning entity.
///
/// Ordering: value first, then entity id ascending when both keys compare by
/// entity id. Turning the flag off on a search key makes it equal to every
/// entry with the same value, which is how uniqueness checks search a tree.
pub trait IndexKey {
    fn identity(&self) -> &KeyIdentity;

    fn identity_mut(&mut self) -> &mut KeyIdentity;

    /// Order by value only. Both keys are expected to hold the same type.
    fn compare_value_to(&self, other: &Self) -> Ordering;

    fn entity_id(&self) -> EntityId {
        self.identity().entity_id
    }

    fn set_entity_id(&mut self, entity_id: EntityId) {
        self.identity_mut().entity_id = entity_id;
    }

    fn compare_by_entity_id(&self) -> bool {
        self.identity().compare_by_entity_id
    }

    fn set_compare_by_entity_id(&mut self, compare: bool) {
        self.identity_mut().compare_by_entity_id = compare;
    }

    /// Reset the identity part before the value part is written.
    fn initialize(&mut self, entity_id: EntityId) {
        *self.identity_mut() = KeyIdentity {
            entity_id,
            compare_by_entity_id: true,
        };
    }

    /// Full key order: value, then entity id.
    fn compare_to(&self, other: &Self) -> Ordering {
        match self.compare_value_to(other) {
            Ordering::Equal if self.compare_by_entity_id() && other.compare_by_entity_id() => {
                self.entity_id().cmp(&other.entity_id())
            }
            decided => decided,
        }
    }
}
