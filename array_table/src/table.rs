//! The [ArrayTable] type and its iterators.
use std::fmt;

use slot_store::SlotStore;

use crate::{Comparator, DuplicatePolicy, OrdComparator, TableConfig, TableError};

struct Element<K, V> {
    key: K,
    value: V,
}

struct Destructors<K, V> {
    key: Option<Box<dyn FnMut(K)>>,
    value: Option<Box<dyn FnMut(V)>>,
}

impl<K, V> Default for Destructors<K, V> {
    fn default() -> Self {
        Destructors {
            key: None,
            value: None,
        }
    }
}

impl<K, V> Destructors<K, V> {
    fn destroy(&mut self, key: K, value: V) {
        if let Some(destructor) = &mut self.key {
            destructor(key);
        }
        if let Some(destructor) = &mut self.value {
            destructor(value);
        }
    }
}

/// A key/value table backed by a flat array, see the [crate level documentation](crate).
pub struct ArrayTable<K, V, C = OrdComparator> {
    store: SlotStore<Element<K, V>>,
    comparator: C,
    duplicates: DuplicatePolicy,
    destructors: Destructors<K, V>,
    // `None` iff the table is empty; slots `0..=last_occupied` are all occupied.
    last_occupied: Option<usize>,
}

impl<K, V, C: Default> Default for ArrayTable<K, V, C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for ArrayTable<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C> ArrayTable<K, V, C> {
    /// Returns an empty table using `comparator` to match keys.
    ///
    /// No storage is allocated until the first insertion.
    pub fn new(comparator: C) -> Self {
        ArrayTable {
            store: SlotStore::new(),
            comparator,
            duplicates: DuplicatePolicy::default(),
            destructors: Destructors::default(),
            last_occupied: None,
        }
    }

    /// Returns an empty table with the given configuration, allocating the initial slots up front.
    pub fn with_config(comparator: C, config: TableConfig) -> Result<Self, TableError> {
        let store = SlotStore::with_config(config.store)?;
        log::debug!(
            "created table with {} slots, {:?} duplicates",
            store.capacity(),
            config.duplicates
        );
        Ok(ArrayTable {
            store,
            comparator,
            duplicates: config.duplicates,
            destructors: Destructors::default(),
            last_occupied: None,
        })
    }

    /// Returns the comparator used to match keys.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the policy applied when inserting a key that is already present.
    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicates
    }

    /// Registers a function that is called with every key leaving the table.
    ///
    /// Replaces any previously registered key destructor. Only affects elements removed after
    /// the call.
    pub fn set_key_destructor(&mut self, destructor: impl FnMut(K) + 'static) {
        self.destructors.key = Some(Box::new(destructor));
    }

    /// Registers a function that is called with every value leaving the table.
    ///
    /// Replaces any previously registered value destructor. Only affects elements removed after
    /// the call.
    pub fn set_value_destructor(&mut self, destructor: impl FnMut(V) + 'static) {
        self.destructors.value = Some(Box::new(destructor));
    }

    /// Returns `true` if the table holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        debug_assert_eq!(self.last_occupied.is_none(), !self.store.has_value(0));
        self.last_occupied.is_none()
    }

    /// Returns the number of elements in the table, counting duplicate keys separately.
    #[inline]
    pub fn len(&self) -> usize {
        self.last_occupied.map_or(0, |last| last + 1)
    }

    /// Returns the index of the last occupied slot, or `None` if the table is empty.
    #[inline]
    pub fn last_occupied_index(&self) -> Option<usize> {
        self.last_occupied
    }

    /// Returns the number of slots currently allocated by the backing store.
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Returns references to the key and value stored in slot `index`, if it is occupied.
    pub fn get_index(&self, index: usize) -> Option<(&K, &V)> {
        self.store
            .get(index)
            .map(|element| (&element.key, &element.value))
    }

    /// Removes the element in slot `index` and returns its key and value, if it exists.
    ///
    /// The last element is moved into the vacated slot. No destructors are run.
    pub fn swap_remove_index(&mut self, index: usize) -> Option<(K, V)> {
        let last = self.last_occupied?;
        if index > last {
            return None;
        }
        if index != last {
            self.store.swap(index, last);
            log::trace!("moved slot {last} into vacated slot {index}");
        }
        let element = self.store.take(last)?;
        self.last_occupied = last.checked_sub(1);
        Some((element.key, element.value))
    }

    /// Removes all elements, passing them to the registered destructors, but keeps the allocated
    /// slots.
    pub fn clear(&mut self) {
        for index in 0..self.len() {
            if let Some(element) = self.store.take(index) {
                self.destructors.destroy(element.key, element.value);
            }
        }
        self.last_occupied = None;
    }

    /// Returns an iterator over all key-value pairs in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.store.iter(),
            remaining: self.len(),
        }
    }

    /// Returns an iterator over all keys in slot order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over all values in slot order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }

    /// Destroys the table, passing all remaining elements to the registered destructors.
    ///
    /// Dropping the table has the same effect.
    pub fn free(self) {
        drop(self)
    }
}

impl<K, V, C: Comparator<K>> ArrayTable<K, V, C> {
    /// Returns the slot index of the first element whose key equals `key`.
    pub fn find_index(&self, key: &K) -> Option<usize> {
        (0..self.len()).find(|&index| {
            self.store
                .get(index)
                .is_some_and(|element| self.comparator.equal(&element.key, key))
        })
    }

    /// Returns `true` if an element with a key equal to `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.find_index(key).is_some()
    }

    /// Returns a reference to the value of the first element whose key equals `key`.
    pub fn lookup(&self, key: &K) -> Option<&V> {
        let index = self.find_index(key)?;
        self.store.get(index).map(|element| &element.value)
    }

    /// Returns a mutable reference to the value of the first element whose key equals `key`.
    pub fn lookup_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.find_index(key)?;
        self.store.get_mut(index).map(|element| &mut element.value)
    }

    /// Inserts a key-value pair, taking ownership of both.
    ///
    /// With [`DuplicatePolicy::Append`] the element is always placed in the slot after the last
    /// occupied one, even if an equal key is already present. With [`DuplicatePolicy::Replace`]
    /// an existing element with an equal key is overwritten and its old key and value are passed
    /// to the destructors.
    ///
    /// Fails only if the backing store cannot provide another slot. In that case the table is
    /// unchanged and `key` and `value` are dropped without running the destructors.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), TableError> {
        if self.duplicates == DuplicatePolicy::Replace {
            if let Some(index) = self.find_index(&key) {
                if let Some(element) = self.store.get_mut(index) {
                    let old_key = std::mem::replace(&mut element.key, key);
                    let old_value = std::mem::replace(&mut element.value, value);
                    self.destructors.destroy(old_key, old_value);
                    return Ok(());
                }
            }
        }
        let index = self.len();
        self.store.set(index, Some(Element { key, value }))?;
        self.last_occupied = Some(index);
        Ok(())
    }

    /// Removes the first element whose key equals `key` and passes it to the destructors.
    ///
    /// The last element of the table is moved into the vacated slot, so removal never shifts
    /// more than one element. Returns `false`, leaving the table unchanged, if no key matches.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.take(key) {
            Some((key, value)) => {
                self.destructors.destroy(key, value);
                true
            }
            None => false,
        }
    }

    /// Removes the first element whose key equals `key` and returns it without running the
    /// destructors.
    ///
    /// Moves the last element into the vacated slot like [`remove`](Self::remove).
    pub fn take(&mut self, key: &K) -> Option<(K, V)> {
        let index = self.find_index(key)?;
        self.swap_remove_index(index)
    }
}

impl<K, V, C> Drop for ArrayTable<K, V, C> {
    fn drop(&mut self) {
        if !self.is_empty() {
            log::debug!("releasing table with {} elements", self.len());
        }
        let destructors = &mut self.destructors;
        std::mem::take(&mut self.store)
            .release_with(|element| destructors.destroy(element.key, element.value));
    }
}

#[cfg(test)]
impl<K, V, C> ArrayTable<K, V, C> {
    pub(crate) fn check(&self) {
        let len = self.len();
        assert!(self.store.prefix(len).all(|slot| slot.is_some()));
        assert_eq!(self.store.prefix(len).len(), len);
        assert_eq!(self.store.occupied(), len);
        assert!(!self.store.has_value(len));
    }
}

/// An iterator over the entries of an [`ArrayTable`].
///
/// This struct is created by the [`iter`](`ArrayTable::iter`) method on [`ArrayTable`].
pub struct Iter<'a, K, V> {
    inner: slot_store::Iter<'a, Element<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let (_, element) = self.inner.next()?;
        self.remaining -= 1;
        Some((&element.key, &element.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V, C> IntoIterator for &'a ArrayTable<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[test]
fn test() {
    let mut table: ArrayTable<String, usize> = ArrayTable::default();
    table.insert("adam".into(), 10).unwrap();
    table.insert("eve".into(), 25).unwrap();
    table.insert("mallory".into(), 8).unwrap();
    table.insert("jim".into(), 14).unwrap();
    assert!(table.remove(&"eve".to_string()));
    assert_eq!(format!("{table:?}"), r#"{"adam": 10, "jim": 14, "mallory": 8}"#);
    table.check();
}
