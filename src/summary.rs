use std::path::Path;

use crate::aggregate::ByToStats;
use crate::config::{AddressBook, KnownAddress};
use crate::models::{
    AddressCount, ByToSummary, InputSummary, KnownBucket, OtherBucket, Summary, ToAddresses,
};

/// `n / d * 100` rounded to two decimals, or `0.0` when `d` is zero.
///
/// Rounding goes through the two-decimal text form, so exact ties such as
/// `3.125` round to even like the console output does.
pub fn percentage(n: u64, d: u64) -> f64 {
    if d == 0 {
        return 0.0;
    }
    let pct = n as f64 / d as f64 * 100.0;
    format!("{:.2}", pct).parse().unwrap_or(pct)
}

fn known_bucket(known: &KnownAddress, count: u64, total: u64) -> KnownBucket {
    KnownBucket {
        address: known.address.clone(),
        name: known.name.clone(),
        count,
        percentage: percentage(count, total),
    }
}

/// Snapshots the accumulator into the report shape. Pure; no I/O.
pub fn build_summary(
    mode: &str,
    input_path: &Path,
    book: &AddressBook,
    stats: &ByToStats,
) -> Summary {
    let total = stats.total();

    let unique: Vec<String> = stats
        .other_to_frequencies()
        .iter()
        .map(|entry| entry.address.clone())
        .collect();
    let frequencies: Vec<AddressCount> = unique
        .iter()
        .map(|addr| AddressCount {
            address: addr.clone(),
            count: stats.other_to_count(addr),
        })
        .collect();

    Summary {
        mode: mode.to_string(),
        input: InputSummary {
            path: input_path.display().to_string(),
            total_transactions: total,
        },
        by_to: ByToSummary {
            relay: known_bucket(&book.relay, stats.relay(), total),
            weth_helper: known_bucket(&book.weth_helper, stats.weth_helper(), total),
            other: OtherBucket {
                count: stats.other(),
                percentage: percentage(stats.other(), total),
                to_addresses: ToAddresses {
                    unique_count: unique.len(),
                    unique,
                    frequencies,
                },
                transaction_hashes: stats.other_tx_hashes().to_vec(),
            },
        },
    }
}
