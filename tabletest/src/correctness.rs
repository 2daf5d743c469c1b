//! Functional checks of the table: simple operations, bulk insert/lookup/remove and duplicate
//! keys.
use array_table::{DuplicatePolicy, StoreConfig};
use color_eyre::eyre::Result;

use crate::{
    report::Report,
    table::{self, IntTable},
};

/// Multiplier used to visit keys in a scrambled but complete order when removing.
pub const REMOVAL_STRIDE: usize = 7652413;

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Returns the position visited in step `i` when scrambling `0..len`.
///
/// For `i` in `0..len` every position is visited exactly once.
pub fn scrambled(i: usize, len: usize) -> usize {
    let mut stride = REMOVAL_STRIDE % len;
    while gcd(stride, len) != 1 {
        stride += 1;
    }
    ((i + 1) * stride) % len
}

fn test_lookups(
    report: &mut Report,
    table: &IntTable,
    keys: &[i32],
    values: &[i32],
    inserted: &[bool],
) -> Result<()> {
    for ((key, value), &inserted) in keys.iter().zip(values).zip(inserted) {
        let found = table.lookup(key);
        if inserted {
            report.silent_check(found.is_some(), "key not found")?;
            report.silent_check(found == Some(value), "looked-up value is incorrect")?;
        } else {
            report.silent_check(
                found.is_none(),
                "found a key in table that was never inserted",
            )?;
        }
    }
    Ok(())
}

fn simple_tests(report: &mut Report, table: &mut IntTable, seq: &[i32]) -> Result<()> {
    report.test("Attempt to lookup a nonexistent item");
    report.check(table.lookup(&seq[0]).is_none())?;

    report.test("Insert an item");
    let (key, value, absent) = (seq[0], seq[1], seq[2]);
    table.insert(key, value)?;
    report.check(true)?;

    report.test("isempty() == False");
    report.check(!table.is_empty())?;

    report.test("Lookup item");
    let found = table.lookup(&key);
    report.check(found.is_some())?;
    report.test("Check value");
    report.check(found == Some(&value))?;

    report.test("Attempt to lookup a nonexistent item");
    report.check(table.lookup(&absent).is_none())?;
    report.test("Attempt to remove a nonexistent item");
    report.check(!table.remove(&absent))?;
    report.test("isempty() == False");
    report.check(!table.is_empty())?;

    report.test("Remove the inserted item");
    report.check(table.remove(&key))?;
    report.test("isempty() == True");
    report.check(table.is_empty())
}

fn bulk_test(report: &mut Report, table: &mut IntTable, seq: &[i32], items: usize) -> Result<()> {
    let keys = &seq[..2 * items];
    let values = keys;
    let mut inserted = vec![false; 2 * items];

    report.test(&format!("Insert {items} items"));
    for i in 0..items {
        table.insert(keys[i], values[i])?;
        inserted[i] = true;
    }
    report.check(true)?;
    report.test("isempty() == False");
    report.check(!table.is_empty())?;

    report.test(&format!("Lookup {} items", 2 * items));
    test_lookups(report, table, keys, values, &inserted)?;
    report.check(true)?;

    report.test("Remove half of the inserted pairs");
    let half = items / 2;
    for i in 0..half {
        let j = scrambled(i, half);
        table.remove(&keys[j]);
        inserted[j] = false;
    }
    report.check(true)?;
    report.test("isempty() == False");
    report.check(!table.is_empty())?;

    report.test("Look up all originally inserted items");
    test_lookups(report, table, &keys[..items], &values[..items], &inserted[..items])?;
    report.check(true)?;

    report.test("Remove remaining items");
    let rest = items - half;
    for i in 0..rest {
        let j = half + scrambled(i, rest);
        table.remove(&keys[j]);
        inserted[j] = false;
    }
    report.check(true)?;
    report.test("isempty() == True");
    report.check(table.is_empty())
}

/// Runs the simple tests followed by bulk tests with 10%, 65% and 100% of `table_size` items.
///
/// `seq` must hold at least `2 * table_size` distinct numbers. The table is empty afterwards.
pub fn correctness_test(
    report: &mut Report,
    table: &mut IntTable,
    seq: &[i32],
    table_size: usize,
) -> Result<()> {
    report.test("isempty() == True");
    report.check(table.is_empty())?;

    report.comprehensive("Simple tests");
    report.indented(|report| simple_tests(report, table, seq))?;

    for items in [table_size / 10, table_size * 65 / 100, table_size] {
        if items == 0 {
            continue;
        }
        report.comprehensive(&format!("Comprehensive test for {items} items"));
        report.indented(|report| bulk_test(report, table, seq, items))?;
        log::debug!(
            "{items} items done, table holds {} slots",
            table.capacity()
        );
    }
    Ok(())
}

/// Inserts the same key three times and checks lookup and removal for the given policy.
pub fn duplicate_test(report: &mut Report, duplicates: DuplicatePolicy) -> Result<()> {
    let (mut table, released) = table::create(StoreConfig::default(), duplicates)?;
    report.comprehensive(&format!(
        "Inserting the same key multiple times ({duplicates:?})"
    ));
    let key = 1;
    for value in 1..=3 {
        table.insert(key, value)?;
    }
    report.indented(|report| {
        match duplicates {
            DuplicatePolicy::Replace => {
                report.test("Attempt to lookup last inserted");
                report.check(table.lookup(&key) == Some(&3))?;
                report.test("Removing key");
                report.check(table.remove(&key))?;
            }
            DuplicatePolicy::Append => {
                report.test("Attempt to lookup first inserted");
                report.check(table.lookup(&key) == Some(&1))?;
                report.test("Removing key three times");
                report.check((0..3).all(|_| table.remove(&key)))?;
            }
        }
        report.test("Attempt to lookup removed");
        report.check(table.lookup(&key).is_none())?;
        report.test("All replaced and removed elements destroyed");
        report.check(released.get() == (3, 3))
    })?;
    table.free();
    Ok(())
}
