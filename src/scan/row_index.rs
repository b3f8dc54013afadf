//! Candidate row set for one scan
//!
//! Starts as "every row in `[start_row, end_row)`" and only materializes
//! state once a constraint narrows it:
//! - `AllRows`: nothing filtered yet
//! - `BitVector`: one flag per row in the range, after `filter_rows`
//! - `RowVector`: explicit sorted row list, after `intersect_rows`

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    AllRows,
    BitVector(Vec<bool>),
    RowVector(Vec<u32>),
}

/// The executor-owned working set of candidate rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIndexFilter {
    start_row: u32,
    end_row: u32,
    mode: Mode,
}

impl RowIndexFilter {
    /// Creates a filter admitting every row in `[start_row, end_row)`
    pub fn new(start_row: u32, end_row: u32) -> Self {
        Self {
            start_row,
            end_row: end_row.max(start_row),
            mode: Mode::AllRows,
        }
    }

    /// First row of the range
    pub fn start_row(&self) -> u32 {
        self.start_row
    }

    /// One past the last row of the range
    pub fn end_row(&self) -> u32 {
        self.end_row
    }

    /// Keeps only the candidate rows for which `predicate` returns true.
    ///
    /// The predicate is called once per current candidate, in ascending row
    /// order, and never for rows already excluded.
    pub fn filter_rows<P>(&mut self, mut predicate: P)
    where
        P: FnMut(u32) -> bool,
    {
        let start = self.start_row;
        match &mut self.mode {
            Mode::AllRows => {
                let bits = (start..self.end_row).map(&mut predicate).collect();
                self.mode = Mode::BitVector(bits);
            }
            Mode::BitVector(bits) => {
                for (offset, keep) in bits.iter_mut().enumerate() {
                    if *keep {
                        *keep = predicate(start + offset as u32);
                    }
                }
            }
            Mode::RowVector(rows) => rows.retain(|row| predicate(*row)),
        }
    }

    /// Intersects the candidate set with `rows`, which must be sorted
    /// ascending. Rows outside the range are ignored.
    pub fn intersect_rows(&mut self, rows: Vec<u32>) {
        let (start, end) = (self.start_row, self.end_row);
        let in_range = rows.into_iter().filter(|row| *row >= start && *row < end);

        let next = match &self.mode {
            Mode::AllRows => in_range.collect(),
            Mode::BitVector(bits) => in_range
                .filter(|row| bits[(row - start) as usize])
                .collect(),
            Mode::RowVector(current) => {
                let mut merged = Vec::with_capacity(current.len());
                let mut existing = current.iter().peekable();
                for row in in_range {
                    while existing.next_if(|r| **r < row).is_some() {}
                    if existing.peek() == Some(&&row) {
                        merged.push(row);
                    }
                }
                merged
            }
        };
        self.mode = Mode::RowVector(next);
    }

    /// Returns true if `row` is still a candidate
    pub fn contains(&self, row: u32) -> bool {
        if row < self.start_row || row >= self.end_row {
            return false;
        }
        match &self.mode {
            Mode::AllRows => true,
            Mode::BitVector(bits) => bits[(row - self.start_row) as usize],
            Mode::RowVector(rows) => rows.binary_search(&row).is_ok(),
        }
    }

    /// Number of candidate rows
    pub fn row_count(&self) -> u32 {
        match &self.mode {
            Mode::AllRows => self.end_row - self.start_row,
            Mode::BitVector(bits) => bits.iter().filter(|b| **b).count() as u32,
            Mode::RowVector(rows) => rows.len() as u32,
        }
    }

    /// Returns true if no row remains
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Consumes the filter, returning the candidate rows in ascending order
    pub fn into_rows(self) -> Vec<u32> {
        let start = self.start_row;
        match self.mode {
            Mode::AllRows => (start..self.end_row).collect(),
            Mode::BitVector(bits) => bits
                .into_iter()
                .enumerate()
                .filter(|(_, keep)| *keep)
                .map(|(offset, _)| start + offset as u32)
                .collect(),
            Mode::RowVector(rows) => rows,
        }
    }
}
