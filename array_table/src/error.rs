use slot_store::StoreError;

/// Errors returned by [`ArrayTable`](crate::ArrayTable) operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// The backing store could not provide a slot for the element.
    #[error("table storage unavailable: {0}")]
    Store(#[from] StoreError),
}
