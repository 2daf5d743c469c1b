//! Correctness and speed test driver for [`array_table::ArrayTable`].
#![allow(unexpected_cfgs)] // for coverage_nightly
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod correctness;
mod report;
mod speed;
mod table;

use array_table::{DuplicatePolicy, Growth, StoreConfig};
use clap::Parser;
use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};

use crate::report::Report;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of items used by the largest correctness test and the speed test.
    #[clap(short = 'n', long, default_value = "10000")]
    table_size: usize,
    /// Seed for the random key sequence, chosen randomly when omitted.
    #[clap(short = 's', long)]
    seed: Option<u64>,
    /// Grow the table by this many slots at a time instead of doubling.
    #[clap(long)]
    growth_step: Option<usize>,
    /// Maximum number of slots the table may allocate.
    #[clap(long)]
    max_capacity: Option<usize>,
    /// Only run the correctness tests.
    #[clap(long)]
    skip_speed: bool,
    /// Do not wait for enter before the speed test.
    #[clap(long)]
    no_pause: bool,
}

/// Returns the numbers `0..n` in random order.
fn random_sample(n: usize, rng: &mut SmallRng) -> color_eyre::Result<Vec<i32>> {
    let mut values: Vec<i32> = (0..i32::try_from(n)?).collect();
    values.shuffle(rng);
    Ok(values)
}

fn wait_for_enter() -> std::io::Result<()> {
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(())
}

#[cfg_attr(coverage_nightly, coverage(off))]
fn main() -> color_eyre::Result<()> {
    let args = Args::parse();

    color_eyre::install()?;
    arraytable_logger::setup();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("using seed {seed}");
    let mut rng = SmallRng::seed_from_u64(seed);

    let store = StoreConfig {
        growth: args.growth_step.map_or(Growth::Doubling, Growth::Linear),
        max_capacity: args.max_capacity,
        ..StoreConfig::default()
    };

    let seq = random_sample(3 * args.table_size, &mut rng)?;
    let (mut table, released) = table::create(store, DuplicatePolicy::Append)?;
    let mut report = Report::default();

    report.comprehensive("Correctness test");
    report.indented(|report| {
        correctness::correctness_test(report, &mut table, &seq, args.table_size)
    })?;

    correctness::duplicate_test(&mut report, DuplicatePolicy::Replace)?;
    correctness::duplicate_test(&mut report, DuplicatePolicy::Append)?;
    println!("All correctness tests succeeded!");
    log::info!("{} checks passed", report.checks());

    if !args.skip_speed {
        if !args.no_pause {
            println!("Press enter to continue!");
            wait_for_enter()?;
        }
        report.comprehensive("Running speed test");
        speed::speed_test(&mut table, &seq, args.table_size, &mut rng)?;
    }

    let remaining = table.len();
    let before = released.get();
    table.free();
    let after = released.get();
    log::debug!("teardown destroyed {remaining} remaining elements, {after:?} keys and values in total");
    color_eyre::eyre::ensure!(
        after == (before.0 + remaining, before.1 + remaining),
        "teardown destroyed {after:?} keys and values, expected {remaining} more than {before:?}"
    );

    println!("Test completed.");
    Ok(())
}
