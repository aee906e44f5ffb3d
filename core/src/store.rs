use std::fmt;

/// Entities that carry a stable, unique identity.
pub trait Keyed {
    type Key: Eq + Clone + fmt::Debug;

    fn key(&self) -> &Self::Key;
}

/// Outcome of an upsert, for callers that care whether the entity was new.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted {
    Inserted,
    Replaced,
}

/// Ordered, de-duplicated collection keyed by entity identity.
///
/// The sequence is display order: new entities go to the front so they render
/// before older ones. Every operation is idempotent; re-applying an upsert or
/// a remove with the same payload leaves the store in the same state.
#[derive(Debug, Clone)]
pub struct EntityStore<T: Keyed> {
    entries: Vec<T>,
}

impl<T: Keyed> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed> EntityStore<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Swap the full collection for a snapshot. The snapshot is authoritative
    /// for what currently exists: anything absent from it is dropped.
    pub fn replace_all(&mut self, entries: Vec<T>) {
        self.entries = entries;
    }

    /// Replace the entity with a matching key in place, or insert at the
    /// front when the key is new.
    pub fn upsert(&mut self, entity: T) -> Upserted {
        match self.index_of(entity.key()) {
            Some(slot) => {
                self.entries[slot] = entity;
                Upserted::Replaced
            }
            None => {
                self.entries.insert(0, entity);
                Upserted::Inserted
            }
        }
    }

    /// Drop the entity with the given key, returning it. Absent keys are a
    /// no-op: a push-driven remove may land after a local optimistic removal
    /// already did the work.
    pub fn remove(&mut self, key: &T::Key) -> Option<T> {
        self.index_of(key).map(|slot| self.entries.remove(slot))
    }

    /// Reinsert an entity at a prior position, clamping out-of-range indices.
    /// Any entity already holding the key is replaced first.
    pub fn insert_at(&mut self, index: usize, entity: T) {
        self.remove(entity.key());
        let index = index.min(self.entries.len());
        self.entries.insert(index, entity);
    }

    pub fn get(&self, key: &T::Key) -> Option<&T> {
        self.index_of(key).map(|slot| &self.entries[slot])
    }

    pub fn contains(&self, key: &T::Key) -> bool {
        self.index_of(key).is_some()
    }

    pub fn index_of(&self, key: &T::Key) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key() == key)
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Record {
        id: String,
        value: u32,
    }

    impl Record {
        fn new(id: &str, value: u32) -> Self {
            Self {
                id: id.to_owned(),
                value,
            }
        }
    }

    impl Keyed for Record {
        type Key = String;

        fn key(&self) -> &String {
            &self.id
        }
    }

    #[test]
    fn upsert_inserts_new_entries_at_the_front() {
        let mut store = EntityStore::new();
        assert_eq!(store.upsert(Record::new("a", 1)), Upserted::Inserted);
        assert_eq!(store.upsert(Record::new("b", 2)), Upserted::Inserted);

        let ids: Vec<&str> = store.entries().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn upsert_replaces_in_place_without_reordering() {
        let mut store = EntityStore::new();
        store.upsert(Record::new("a", 1));
        store.upsert(Record::new("b", 2));

        assert_eq!(store.upsert(Record::new("a", 9)), Upserted::Replaced);
        let ids: Vec<&str> = store.entries().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(store.get(&"a".to_owned()).unwrap().value, 9);
    }

    #[test]
    fn repeated_upsert_is_idempotent() {
        let mut store = EntityStore::new();
        store.upsert(Record::new("a", 1));
        store.upsert(Record::new("a", 1));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&"a".to_owned()).unwrap().value, 1);
    }

    #[test]
    fn distinct_ids_never_duplicate_regardless_of_order() {
        let mut store = EntityStore::new();
        for round in 0..3 {
            store.upsert(Record::new("a", round));
            store.upsert(Record::new("b", round));
            store.upsert(Record::new("c", round));
        }
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn remove_absent_key_is_a_no_op() {
        let mut store = EntityStore::new();
        store.upsert(Record::new("a", 1));

        assert!(store.remove(&"missing".to_owned()).is_none());
        assert_eq!(store.remove(&"a".to_owned()), Some(Record::new("a", 1)));
        assert!(store.remove(&"a".to_owned()).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn replace_all_drops_entries_absent_from_the_snapshot() {
        let mut store = EntityStore::new();
        store.upsert(Record::new("stale", 0));

        store.replace_all(vec![Record::new("a", 1), Record::new("b", 2)]);
        assert_eq!(store.len(), 2);
        assert!(!store.contains(&"stale".to_owned()));
    }

    #[test]
    fn insert_at_restores_a_prior_position() {
        let mut store = EntityStore::new();
        store.replace_all(vec![
            Record::new("a", 1),
            Record::new("b", 2),
            Record::new("c", 3),
        ]);

        let removed = store.remove(&"b".to_owned()).unwrap();
        store.insert_at(1, removed);

        let ids: Vec<&str> = store.entries().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn insert_at_clamps_out_of_range_indices() {
        let mut store = EntityStore::new();
        store.upsert(Record::new("a", 1));

        store.insert_at(99, Record::new("z", 26));
        let ids: Vec<&str> = store.entries().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "z"]);
    }
}
