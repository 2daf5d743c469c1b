//! Timing of bulk insertion, random and skewed lookups, and removal.
use std::time::Duration;

use color_eyre::eyre::{ensure, Result};
use quanta::Instant;
use rand::Rng;

use crate::{correctness::scrambled, table::IntTable};

fn timed(label: &str, body: impl FnOnce()) -> Duration {
    println!("{label}: ");
    let start = Instant::now();
    body();
    let elapsed = start.elapsed();
    println!("{} ms.", elapsed.as_millis());
    elapsed
}

/// Times the table operations on `table_size` pairs drawn from `seq`.
///
/// `seq` must hold at least `2 * table_size` distinct numbers and the table must be empty.
pub fn speed_test(
    table: &mut IntTable,
    seq: &[i32],
    table_size: usize,
    rng: &mut impl Rng,
) -> Result<()> {
    ensure!(table.is_empty(), "speed test requires an empty table");
    if table_size == 0 {
        return Ok(());
    }
    let (keys, values): (Vec<i32>, Vec<i32>) = seq[..2 * table_size]
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .unzip();
    let accesses = 2 * table_size;

    let mut insert_result = Ok(());
    let insert = timed(&format!("Insert {table_size} items"), || {
        insert_result = keys
            .iter()
            .zip(&values)
            .try_for_each(|(&key, &value)| table.insert(key, value));
    });
    insert_result?;

    let mut hits = 0;
    let random = timed(&format!("{accesses} random lookups"), || {
        for _ in 0..accesses {
            let pos = rng.gen_range(0..table_size);
            hits += table.lookup(&keys[pos]).is_some() as usize;
        }
    });

    let partition = (table_size / 4).max(1);
    let offset = (3 * rng.gen_range(0..partition) + 1).min(table_size - partition);
    let skewed = timed(&format!("{accesses} skewed lookups"), || {
        for _ in 0..accesses {
            let pos = rng.gen_range(0..partition) + offset;
            hits += table.lookup(&keys[pos]).is_some() as usize;
        }
    });
    ensure!(hits == 2 * accesses, "lookups missed {} keys", 2 * accesses - hits);

    let remove = timed("Remove all items", || {
        for i in 0..table_size {
            table.remove(&keys[scrambled(i, table_size)]);
        }
    });
    ensure!(table.is_empty(), "{} items left after removing all", table.len());

    log::info!(
        "insert {insert:?}, random lookups {random:?}, skewed lookups {skewed:?}, remove {remove:?}"
    );
    Ok(())
}
