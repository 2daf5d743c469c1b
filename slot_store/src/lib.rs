//! [SlotStore] is a growable, randomly indexable sequence of slots, each of which is either empty
//! or holds one element.
//!
//! Indices past the current allocation read as empty. Writing to such an index grows the
//! allocation according to the store's [Growth] policy, so callers can treat the store as an
//! unbounded array of `Option<T>`. An optional destructor is run once for every element that is
//! still stored when the store is released or dropped.
//!
//! The store does not track which slots are occupied beyond the slots themselves, so occupancy
//! bookkeeping (e.g. keeping a contiguous prefix of occupied slots) is left to the user.

mod config;
mod error;
mod store;

pub use config::{Growth, StoreConfig};
pub use error::StoreError;
pub use store::{Iter, SlotStore};
