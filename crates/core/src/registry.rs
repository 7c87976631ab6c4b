use std::collections::HashMap;

use tracing::debug;

/// Surrogate identifier handed out by a [`Registry`].
pub type EntityId = u32;

/// First identifier a registry assigns. Identifiers are dense from here on.
pub const FIRST_ID: EntityId = 1;

/// An entity that is deduplicated by a natural key and written as one row.
pub trait Entity {
    /// Natural key used for deduplication.
    fn key(&self) -> String;

    /// Insert statement for this entity under the given surrogate ID.
    fn insert_statement(&self, id: EntityId) -> String;
}

/// Outcome of [`Registry::add_or_get`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    pub id: EntityId,
    /// True when the entity was created by this call and still needs its row written.
    pub is_new: bool,
}

struct Slot<T> {
    entity: T,
    dumped: bool,
}

/// Deduplicating store keyed by natural key.
///
/// IDs follow first-seen order starting at [`FIRST_ID`] and are never reused.
/// Entries live as long as the registry and can be mutated in place until
/// their statement is taken.
pub struct Registry<T> {
    label: &'static str,
    index: HashMap<String, EntityId>,
    slots: Vec<Slot<T>>,
}

impl<T: Entity> Registry<T> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            index: HashMap::new(),
            slots: Vec::new(),
        }
    }

    /// Register `entity`, or resolve it to the entry that already owns its key.
    /// A repeat is dropped and reported through a debug event.
    pub fn add_or_get(&mut self, entity: T) -> Registration {
        let key = entity.key();
        if let Some(&id) = self.index.get(&key) {
            debug!(registry = self.label, key = %key, id, "found existing item");
            return Registration { id, is_new: false };
        }

        let id = FIRST_ID + self.slots.len() as EntityId;
        self.index.insert(key, id);
        self.slots.push(Slot {
            entity,
            dumped: false,
        });
        Registration { id, is_new: true }
    }

    /// Find an entry by natural key.
    pub fn lookup(&self, key: &str) -> Option<(EntityId, &T)> {
        let id = *self.index.get(key)?;
        self.get(id).map(|entity| (id, entity))
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.slot_index(id)
            .and_then(|i| self.slots.get(i))
            .map(|slot| &slot.entity)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.slot_index(id)
            .and_then(|i| self.slots.get_mut(i))
            .map(|slot| &mut slot.entity)
    }

    /// Build the insert statement for `id` the first time it is asked for.
    /// Later calls return `None`, so each entry is written exactly once.
    pub fn take_insert(&mut self, id: EntityId) -> Option<String> {
        let i = self.slot_index(id)?;
        let slot = self.slots.get_mut(i)?;
        if slot.dumped {
            return None;
        }
        slot.dumped = true;
        Some(slot.entity.insert_statement(id))
    }

    pub fn is_dumped(&self, id: EntityId) -> bool {
        self.slot_index(id)
            .and_then(|i| self.slots.get(i))
            .is_some_and(|slot| slot.dumped)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Entries in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (FIRST_ID + i as EntityId, &slot.entity))
    }

    fn slot_index(&self, id: EntityId) -> Option<usize> {
        id.checked_sub(FIRST_ID).map(|i| i as usize)
    }
}
