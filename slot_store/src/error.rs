/// Errors produced when a [`SlotStore`](crate::SlotStore) cannot provide a slot.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The allocator could not provide memory for the requested number of slots.
    #[error("failed to allocate storage for {requested} slots")]
    AllocationFailed {
        /// Total number of slots that was requested.
        requested: usize,
    },
    /// A slot at or above the configured maximum capacity was written.
    #[error("slot {index} is outside the maximum capacity of {limit} slots")]
    CapacityExceeded {
        /// Index of the rejected slot.
        index: usize,
        /// Configured maximum capacity.
        limit: usize,
    },
}
