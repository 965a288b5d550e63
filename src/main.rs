//! Entry point for the sequence walkthrough binary.
//!
//! Exercises the [`Sequence`] API and logs each step. Set `RUST_LOG` to
//! control verbosity (`RUST_LOG=trace` also shows store detachment).

use generic_sequence::{Sequence, SequenceError};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), SequenceError> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting sequence walkthrough...");

    let mut numbers: Sequence<i32> = (1..=5).collect();
    info!(?numbers, count = numbers.count(), "built sequence");

    let sum = numbers.reduce(|acc, v| acc + v);
    let evens = numbers.filter(|v| v % 2 == 0);
    let squares = numbers.map(|v| v * v);
    info!(sum, ?evens, ?squares, "transformations");

    let index_of_3 = numbers.index_of(Some(&3))?;
    let contains_6 = numbers.contains(Some(&6))?;
    info!(?index_of_3, contains_6, "lookups");

    // Shallow handles alias element writes until one side restructures.
    let alias = numbers.clone();
    numbers.for_each(|v| *v *= 10);
    info!(?alias, "alias after in-place mutation");
    numbers.add(60);
    info!(?numbers, ?alias, "after add on original");

    let mut backup = Sequence::new();
    numbers.copy_to(Some(&mut backup))?;
    numbers.reverse();
    numbers.swap(0, 1)?;
    info!(?numbers, ?backup, "reordered original, deep copy unchanged");

    let mut tail: Sequence<i32> = vec![7, 8].into();
    tail.merge(Some(&backup))?;
    info!(?tail, first = tail.first(), last = tail.last(), "merged");

    if let Err(err) = tail.get(100) {
        warn!(%err, "out-of-range access rejected");
    }
    if let Err(err) = tail.remove_by_value(None) {
        warn!(%err, "absent value rejected");
    }

    let empty: Sequence<i32> = Sequence::new();
    info!(
        first = empty.first(),
        reduce = empty.reduce(|acc, v| acc + v),
        all = empty.all(|_| false),
        any = empty.any(|_| true),
        "empty sequence defaults"
    );

    info!("Walkthrough complete");
    Ok(())
}
