//! Ordered entity collections with stable tracking keys.
//!
//! Variants, attributes, and informations are all edited through the same
//! abstraction: an ordered list whose rows keep a client-side key that
//! survives edits, independent of server identity. Positions passed to the
//! mutating methods always originate from the currently rendered list, so an
//! out-of-bounds position is a programmer error and panics rather than
//! surfacing to the caller.

use uuid::Uuid;

/// Client-side tracking key for one collection row.
///
/// Fresh on append, preserved across [`EntityCollection::update_at`], and
/// unrelated to the server-assigned entity ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryKey(Uuid);

impl EntryKey {
    fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Soft-delete reconciliation for persisted entities.
///
/// Rows the server already knows about must not silently disappear from an
/// update request: they are flagged instead, and the flag travels to the
/// server as an explicit delete instruction. Rows the server never saw are
/// simply removed.
pub trait SoftDelete {
    /// Whether this entity has a server-assigned identity.
    fn is_persisted(&self) -> bool;
    /// Whether this entity is pending server-side deletion.
    fn is_deleted(&self) -> bool;
    /// Flag this entity for server-side deletion.
    fn mark_deleted(&mut self);
}

/// An ordered sequence of entities of one type.
#[derive(Debug, Clone, Default)]
pub struct EntityCollection<T> {
    entries: Vec<(EntryKey, T)>,
}

impl<T> EntityCollection<T> {
    /// Create an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a collection from loaded values, assigning fresh tracking keys.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = T>) -> Self {
        Self {
            entries: values
                .into_iter()
                .map(|value| (EntryKey::fresh(), value))
                .collect(),
        }
    }

    /// Insert at the end with a fresh tracking key.
    pub fn append(&mut self, value: T) -> EntryKey {
        let key = EntryKey::fresh();
        self.entries.push((key, value));
        key
    }

    /// Replace the entity at `position` wholesale, preserving its tracking
    /// key.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    pub fn update_at(&mut self, position: usize, value: T) {
        let slot = self
            .entries
            .get_mut(position)
            .unwrap_or_else(|| panic!("collection position {position} out of bounds"));
        slot.1 = value;
    }

    /// Physically remove and return the entity at `position`.
    ///
    /// Used only for never-persisted entities; persisted rows go through
    /// [`delete_at`](Self::delete_at) instead.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    pub fn remove_at(&mut self, position: usize) -> T {
        assert!(
            position < self.entries.len(),
            "collection position {position} out of bounds"
        );
        self.entries.remove(position).1
    }

    /// The entity at `position`, if any.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&T> {
        self.entries.get(position).map(|(_, value)| value)
    }

    /// Mutable access to the entity at `position`, if any.
    pub fn get_mut(&mut self, position: usize) -> Option<&mut T> {
        self.entries.get_mut(position).map(|(_, value)| value)
    }

    /// The tracking key at `position`, if any.
    #[must_use]
    pub fn key_at(&self, position: usize) -> Option<EntryKey> {
        self.entries.get(position).map(|(key, _)| *key)
    }

    /// Iterate over `(key, entity)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (EntryKey, &T)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }

    /// Iterate over entities in order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Keep only the first `len` entries.
    pub fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    /// Total number of entries, deleted ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: SoftDelete> EntityCollection<T> {
    /// Delete-intent for the entity at `position`.
    ///
    /// Persisted entities are flagged and retained so the server can be told
    /// to remove them; never-persisted entities are removed outright.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    pub fn delete_at(&mut self, position: usize) {
        let persisted = self.get(position).map_or_else(
            || panic!("collection position {position} out of bounds"),
            SoftDelete::is_persisted,
        );
        if persisted {
            if let Some(entry) = self.get_mut(position) {
                entry.mark_deleted();
            }
        } else {
            self.entries.remove(position);
        }
    }

    /// Iterate over `(position, entity)` pairs excluding deleted entries.
    ///
    /// Positions index the full collection, so they remain valid arguments
    /// to the mutating methods. This is the view every add/edit affordance
    /// renders from; a deleted entity exists purely as a pending instruction
    /// to the server.
    pub fn active(&self) -> impl Iterator<Item = (usize, &T)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, (_, value))| !value.is_deleted())
            .map(|(position, (_, value))| (position, value))
    }

    /// Number of non-deleted entries.
    #[must_use]
    pub fn active_len(&self) -> usize {
        self.active().count()
    }
}
