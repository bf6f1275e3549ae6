//! Purpose: In-place exchange sort (bubble sort) with early termination.
//! Exports: `bubble_sort`, `SortStats`.
//! Invariants: Output is non-decreasing under `Ord` and a permutation of the input.
//! Invariants: Every pass scans all adjacent pairs; the sort stops after a pass with no swaps.
//! Invariants: No storage beyond the swap itself.

use serde::Serialize;

/// Work performed by one call to [`bubble_sort`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct SortStats {
    pub passes: u64,
    pub comparisons: u64,
    pub swaps: u64,
}

pub fn bubble_sort<T: Ord>(items: &mut [T]) -> SortStats {
    let mut stats = SortStats::default();
    let last = items.len().saturating_sub(1);

    loop {
        stats.passes += 1;
        let mut swapped = false;
        for i in 0..last {
            stats.comparisons += 1;
            if items[i] > items[i + 1] {
                items.swap(i, i + 1);
                stats.swaps += 1;
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }

    stats
}
