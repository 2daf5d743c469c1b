/// How a [`SlotStore`](crate::SlotStore) grows when a slot past its allocation is written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Growth {
    /// At least double the number of allocated slots, giving amortized O(1) appends.
    #[default]
    Doubling,
    /// Grow in multiples of the given number of slots. A step of `0` is treated as `1`.
    Linear(usize),
}

impl Growth {
    /// Returns the number of slots to allocate so that `required` slots are available.
    ///
    /// The result is never smaller than `required` and never smaller than `current`.
    pub fn next_capacity(self, current: usize, required: usize) -> usize {
        if required <= current {
            return current;
        }
        match self {
            Growth::Doubling => required.max(current.saturating_mul(2)),
            Growth::Linear(step) => {
                let step = step.max(1);
                let missing = required - current;
                current.saturating_add(missing.div_ceil(step).saturating_mul(step))
            }
        }
    }
}

/// Allocation parameters of a [`SlotStore`](crate::SlotStore).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Number of slots allocated when the store is created.
    pub initial_capacity: usize,
    /// Growth policy used when a slot past the allocation is written.
    pub growth: Growth,
    /// Upper bound on the number of slots, `None` for unbounded.
    ///
    /// Growth is clamped to this bound and writes to indices at or above it fail.
    pub max_capacity: Option<usize>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            initial_capacity: 1,
            growth: Growth::Doubling,
            max_capacity: None,
        }
    }
}

impl StoreConfig {
    /// Returns whether `index` can ever be stored under this configuration.
    pub fn admits(&self, index: usize) -> bool {
        self.max_capacity.map_or(true, |limit| index < limit)
    }

    pub(crate) fn clamp(&self, capacity: usize) -> usize {
        self.max_capacity.map_or(capacity, |limit| capacity.min(limit))
    }
}
