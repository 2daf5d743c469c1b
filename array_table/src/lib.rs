//! [ArrayTable] is a key/value table stored in a flat array of slots and searched by linear scan.
//!
//! Keys are matched with a caller supplied [Comparator]. Only its "equal" outcome is ever used,
//! so keys need neither `Hash` nor `Ord`, but every lookup, insertion and removal is O(n).
//!
//! The occupied slots always form a contiguous prefix of the underlying [`SlotStore`]:
//! insertion appends directly after the last occupied slot, and removal moves the last element
//! into the vacated slot (see [`ArrayTable::remove`]). Removal therefore perturbs the order of
//! the remaining elements, and the table makes no ordering guarantees beyond that.
//!
//! Duplicate keys are allowed by default ([DuplicatePolicy::Append]); a lookup or removal always
//! acts on the matching element in the lowest slot. With [DuplicatePolicy::Replace] inserting an
//! existing key overwrites that element instead.
//!
//! The table owns its keys and values. Elements leaving the table through
//! [`remove`](ArrayTable::remove), [`clear`](ArrayTable::clear), replacement or teardown are
//! passed to the destructors registered with [`ArrayTable::set_key_destructor`] and
//! [`ArrayTable::set_value_destructor`], or simply dropped when none are registered.
//!
//! [`SlotStore`]: slot_store::SlotStore

mod comparator;
mod config;
mod error;

pub use comparator::{Comparator, OrdComparator, SignComparator};
pub use config::{DuplicatePolicy, TableConfig};
pub use error::TableError;
pub use slot_store::{Growth, StoreConfig, StoreError};
pub use table::ArrayTable;

pub mod table;

#[cfg(test)]
mod test_table;
