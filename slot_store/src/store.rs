use std::fmt;

use crate::{StoreConfig, StoreError};

type Destructor<T> = Box<dyn FnMut(T)>;

/// A growable sequence of optionally occupied slots.
///
/// See the [crate level documentation](crate) for an overview.
pub struct SlotStore<T> {
    slots: Vec<Option<T>>,
    config: StoreConfig,
    destructor: Option<Destructor<T>>,
}

impl<T> Default for SlotStore<T> {
    fn default() -> Self {
        SlotStore {
            slots: Vec::new(),
            config: StoreConfig::default(),
            destructor: None,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SlotStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<T> SlotStore<T> {
    /// Returns an empty store with the default configuration that has not allocated any slots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an empty store with `config.initial_capacity` allocated slots.
    pub fn with_config(config: StoreConfig) -> Result<Self, StoreError> {
        let mut store = SlotStore {
            slots: Vec::new(),
            config,
            destructor: None,
        };
        store.grow_to(config.clamp(config.initial_capacity))?;
        Ok(store)
    }

    /// Returns the configuration this store was created with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the number of allocated slots.
    ///
    /// Slots at or beyond this index are empty.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of occupied slots.
    ///
    /// This scans all allocated slots.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns a reference to the element at `index`, or `None` if that slot is empty.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)?.as_ref()
    }

    /// Returns a mutable reference to the element at `index`, or `None` if that slot is empty.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)?.as_mut()
    }

    /// Returns `true` if the slot at `index` holds an element.
    #[inline]
    pub fn has_value(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(Some(_)))
    }

    /// Stores `value` at `index` and returns the previous content of that slot.
    ///
    /// Passing `None` clears the slot. Writing an element past the allocation grows the store
    /// according to its growth policy; clearing a slot never grows the store.
    ///
    /// On error the store is left unchanged.
    pub fn set(&mut self, index: usize, value: Option<T>) -> Result<Option<T>, StoreError> {
        if value.is_none() {
            return Ok(self.take(index));
        }
        if index >= self.slots.len() {
            self.grow_for(index)?;
        }
        Ok(std::mem::replace(&mut self.slots[index], value))
    }

    /// Clears the slot at `index` and returns its previous content.
    #[inline]
    pub fn take(&mut self, index: usize) -> Option<T> {
        self.slots.get_mut(index)?.take()
    }

    /// Exchanges the contents of two slots.
    ///
    /// # Panics
    ///
    /// Panics if either index is outside the allocated slots.
    #[inline]
    pub fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
    }

    /// Returns an iterator over all occupied slots as `(index, element)` pairs in index order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.slots.iter().enumerate(),
        }
    }

    /// Returns an iterator over the first `len` slots, including empty ones.
    ///
    /// Slots beyond the allocation are not yielded, so the iterator may be shorter than `len`.
    pub fn prefix(&self, len: usize) -> impl ExactSizeIterator<Item = Option<&T>> + '_ {
        self.slots[..len.min(self.slots.len())]
            .iter()
            .map(Option::as_ref)
    }

    /// Registers a function that is called once for each element still stored when the store is
    /// released or dropped.
    ///
    /// Replaces any previously registered destructor.
    pub fn set_destructor(&mut self, destructor: impl FnMut(T) + 'static) {
        self.destructor = Some(Box::new(destructor));
    }

    /// Runs the registered destructor on every occupied slot in index order and frees the storage.
    ///
    /// Dropping the store has the same effect.
    pub fn release(self) {
        drop(self)
    }

    /// Like [`release`](Self::release), but calls `destructor` instead of the registered one.
    pub fn release_with(mut self, mut destructor: impl FnMut(T)) {
        for value in std::mem::take(&mut self.slots).into_iter().flatten() {
            destructor(value);
        }
    }

    fn grow_for(&mut self, index: usize) -> Result<(), StoreError> {
        if !self.config.admits(index) {
            return Err(StoreError::CapacityExceeded {
                index,
                limit: self.config.max_capacity.unwrap_or(usize::MAX),
            });
        }
        let required = index
            .checked_add(1)
            .ok_or(StoreError::AllocationFailed { requested: index })?;
        let capacity = self
            .config
            .clamp(self.config.growth.next_capacity(self.slots.len(), required));
        self.grow_to(capacity)
    }

    fn grow_to(&mut self, capacity: usize) -> Result<(), StoreError> {
        let current = self.slots.len();
        if capacity <= current {
            return Ok(());
        }
        self.slots
            .try_reserve_exact(capacity - current)
            .map_err(|_| StoreError::AllocationFailed {
                requested: capacity,
            })?;
        self.slots.resize_with(capacity, || None);
        log::trace!("slot store grew from {current} to {capacity} slots");
        Ok(())
    }
}

impl<T> Drop for SlotStore<T> {
    fn drop(&mut self) {
        if let Some(destructor) = &mut self.destructor {
            for value in std::mem::take(&mut self.slots).into_iter().flatten() {
                destructor(value);
            }
        }
    }
}

/// An iterator over the occupied slots of a [`SlotStore`].
///
/// This struct is created by the [`iter`](`SlotStore::iter`) method on [`SlotStore`].
pub struct Iter<'a, T> {
    inner: std::iter::Enumerate<std::slice::Iter<'a, Option<T>>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .by_ref()
            .find_map(|(index, slot)| Some((index, slot.as_ref()?)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

impl<'a, T> IntoIterator for &'a SlotStore<T> {
    type Item = (usize, &'a T);
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
impl<T> SlotStore<T> {
    pub(crate) fn destructor_registered(&self) -> bool {
        self.destructor.is_some()
    }
}
