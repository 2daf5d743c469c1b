//! The integer table exercised by the driver and the bookkeeping of its destructors.
use std::{cell::Cell, rc::Rc};

use array_table::{ArrayTable, DuplicatePolicy, SignComparator, StoreConfig, TableConfig};
use color_eyre::eyre::Result;

pub type IntComparator = SignComparator<fn(&i32, &i32) -> i32>;
pub type IntTable = ArrayTable<i32, i32, IntComparator>;

fn compare_int(a: &i32, b: &i32) -> i32 {
    a.cmp(b) as i32
}

/// Counts keys and values passed to a table's destructors.
#[derive(Clone, Default)]
pub struct Released {
    pub keys: Rc<Cell<usize>>,
    pub values: Rc<Cell<usize>>,
}

impl Released {
    pub fn get(&self) -> (usize, usize) {
        (self.keys.get(), self.values.get())
    }
}

pub fn create(store: StoreConfig, duplicates: DuplicatePolicy) -> Result<(IntTable, Released)> {
    let mut table = ArrayTable::with_config(
        SignComparator(compare_int as fn(&i32, &i32) -> i32),
        TableConfig { store, duplicates },
    )?;
    let released = Released::default();
    let keys = released.keys.clone();
    table.set_key_destructor(move |_| keys.set(keys.get() + 1));
    let values = released.values.clone();
    table.set_value_destructor(move |_| values.set(values.get() + 1));
    Ok((table, released))
}
