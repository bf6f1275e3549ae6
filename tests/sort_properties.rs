//! Purpose: Property coverage for the exchange sort and the load/write round trip.
//! Exports: Integration tests only.
//! Role: Check ordering, permutation, idempotence, and round-trip over generated record sets.
//! Invariants: Inputs come from a seeded generator so failures reproduce exactly.
use std::collections::BTreeMap;
use std::io::Cursor;

use bstr::BString;
use linesort::core::line_reader::LineLimit;
use linesort::core::loader::load;
use linesort::core::record_set::RecordSet;
use linesort::core::sorter::bubble_sort;
use linesort::core::writer::write;

struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

// Small alphabet so duplicates and shared prefixes are common.
fn record_sets(seed: u64, cases: usize) -> Vec<Vec<BString>> {
    let mut rng = XorShift(seed);
    let alphabet = b"aAbZ _\t~";
    (0..cases)
        .map(|_| {
            let len = rng.below(40) as usize + 1;
            (0..len)
                .map(|_| {
                    let width = rng.below(6) as usize;
                    let bytes: Vec<u8> = (0..width)
                        .map(|_| alphabet[rng.below(alphabet.len() as u64) as usize])
                        .collect();
                    BString::from(bytes)
                })
                .collect()
        })
        .collect()
}

fn multiset(items: &[BString]) -> BTreeMap<BString, usize> {
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(item.clone()).or_insert(0) += 1;
    }
    counts
}

#[test]
fn sorted_output_is_ordered_permutation() {
    for original in record_sets(0x5eed_0001, 200) {
        let mut sorted = original.clone();
        bubble_sort(&mut sorted);
        assert!(sorted.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(multiset(&sorted), multiset(&original));

        let mut expected = original.clone();
        expected.sort();
        assert_eq!(sorted, expected);
    }
}

#[test]
fn sorting_twice_changes_nothing() {
    for original in record_sets(0x5eed_0002, 100) {
        let mut once = original;
        bubble_sort(&mut once);
        let mut twice = once.clone();
        let stats = bubble_sort(&mut twice);
        assert_eq!(twice, once);
        assert_eq!(stats.swaps, 0);
        assert_eq!(stats.passes, 1);
    }
}

#[test]
fn write_then_load_round_trips() {
    for original in record_sets(0x5eed_0003, 100) {
        let records = RecordSet::from(original.clone());
        let mut encoded = Vec::new();
        write(&records, &mut encoded).expect("write");

        let loaded = load(Cursor::new(encoded), LineLimit::Unbounded).expect("load");
        assert_eq!(loaded.len(), original.len());
        assert_eq!(multiset(loaded.as_slice()), multiset(&original));
        assert_eq!(loaded.into_inner(), original);
    }
}

#[test]
fn scenario_files_sort_as_documented() {
    let cases = [
        ("3\nbanana\napple\ncherry\n", "3\napple\nbanana\ncherry\n"),
        ("1\nx\n", "1\nx\n"),
        ("3\nb\na\nb\n", "3\na\nb\nb\n"),
    ];
    for (input, expected) in cases {
        let mut records =
            load(Cursor::new(input.as_bytes().to_vec()), LineLimit::Unbounded).expect("load");
        records.sort();
        let mut out = Vec::new();
        write(&records, &mut out).expect("write");
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }
}
