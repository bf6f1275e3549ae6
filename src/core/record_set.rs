//! Purpose: Own the in-memory records of one sort run.
//! Exports: `RecordSet`.
//! Role: Storage handed from loader to sorter to writer.
//! Invariants: Records are owned byte strings compared byte-wise.
//! Invariants: Length is fixed once loading finishes; only order changes afterwards.

use bstr::BString;

use crate::core::error::{Error, ErrorKind};
use crate::core::sorter::{SortStats, bubble_sort};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RecordSet {
    items: Vec<BString>,
}

impl RecordSet {
    /// Reserves room for exactly `count` records without aborting on exhaustion.
    pub fn with_capacity(count: usize) -> Result<Self, Error> {
        let mut items = Vec::new();
        items.try_reserve_exact(count).map_err(|err| {
            Error::new(ErrorKind::Allocation)
                .with_message(format!("cannot allocate storage for {count} records"))
                .with_source(err)
        })?;
        Ok(Self { items })
    }

    pub(crate) fn push(&mut self, record: BString) {
        self.items.push(record);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[BString] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BString> {
        self.items.iter()
    }

    pub fn is_sorted(&self) -> bool {
        self.items.windows(2).all(|pair| pair[0] <= pair[1])
    }

    /// Orders the records in place with the exchange sort.
    pub fn sort(&mut self) -> SortStats {
        bubble_sort(&mut self.items)
    }

    pub fn into_inner(self) -> Vec<BString> {
        self.items
    }
}

impl From<Vec<BString>> for RecordSet {
    fn from(items: Vec<BString>) -> Self {
        Self { items }
    }
}

impl<T: Into<BString>> FromIterator<T> for RecordSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a BString;
    type IntoIter = std::slice::Iter<'a, BString>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
