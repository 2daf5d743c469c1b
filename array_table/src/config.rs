use slot_store::StoreConfig;

/// What [`ArrayTable::insert`](crate::ArrayTable::insert) does when the key is already present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Always append the new element. Equal keys coexist and the earliest inserted one shadows
    /// the others until it is removed.
    #[default]
    Append,
    /// Overwrite the key and value of the first element with an equal key.
    ///
    /// The replaced key and value are passed to the registered destructors.
    Replace,
}

/// Configuration of an [`ArrayTable`](crate::ArrayTable).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableConfig {
    /// Allocation parameters of the backing slot store.
    pub store: StoreConfig,
    /// Handling of keys that are inserted more than once.
    pub duplicates: DuplicatePolicy,
}
