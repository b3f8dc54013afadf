//! Row sorting for ORDER BY
//!
//! Sorts surviving row indices by a chain of column comparators.

use std::cmp::Ordering;

use crate::columns::Comparator;

/// Sorts row indices
pub struct RowSorter;

impl RowSorter {
    /// Sorts `rows` by `comparators`, first comparator most significant.
    ///
    /// Sort is stable: rows equal under every comparator keep their
    /// ascending row order.
    pub fn sort(rows: &mut [u32], comparators: &[Comparator<'_>]) {
        rows.sort_by(|a, b| Self::compare(comparators, *a, *b));
    }

    /// Compares two rows under the full comparator chain
    pub fn compare(comparators: &[Comparator<'_>], a: u32, b: u32) -> Ordering {
        for comparator in comparators {
            let ordering = comparator(a, b);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}
