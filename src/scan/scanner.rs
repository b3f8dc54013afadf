//! Table scanner
//!
//! Drives one scan over a [`StorageSchema`]. Order of operations:
//!
//! 1. Snapshot the row count
//! 2. Validate every column index the query names
//! 3. Intersect column bounds into one candidate range (if pruning is on)
//! 4. Filter the range row by row for every constraint bounds did not consume
//! 5. Sort survivors, unless natural row order already satisfies ORDER BY
//! 6. Report requested columns for each surviving row

use crate::columns::{Bounds, Comparator, ResultSink, StorageColumn};
use crate::config::ScanConfig;
use crate::observability::{log_event, Event, Logger, ObservationScope, ScanMetrics, Severity};
use crate::query::{Constraint, Operator};

use super::errors::{ScanError, ScanResult};
use super::query::ScanQuery;
use super::result::ScanStats;
use super::row_index::RowIndexFilter;
use super::schema::StorageSchema;
use super::sorter::RowSorter;

/// Runs scans and keeps counters across them
#[derive(Debug, Default)]
pub struct TableScanner {
    config: ScanConfig,
    metrics: ScanMetrics,
}

impl TableScanner {
    /// Creates a scanner with the given options
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            metrics: ScanMetrics::new(),
        }
    }

    /// Options this scanner runs with
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Counters accumulated over every scan so far
    pub fn metrics(&self) -> &ScanMetrics {
        &self.metrics
    }

    /// Scans `schema` for `query`, reporting rows into `sink`.
    ///
    /// Nothing is reported if the query is rejected or a column contract is
    /// violated: all filtering and sorting finishes before the first row is
    /// written.
    pub fn scan(
        &self,
        schema: &StorageSchema<'_>,
        query: &ScanQuery,
        sink: &mut dyn ResultSink,
    ) -> ScanResult<ScanStats> {
        let scope = ObservationScope::with_fields(
            "SCAN",
            vec![
                ("constraints", query.constraints.len().to_string()),
                ("order_by", query.order_by.len().to_string()),
            ],
        );

        match self.run(schema, query, sink) {
            Ok(stats) => {
                self.record(&stats);
                let considered = stats.rows_considered.to_string();
                let returned = stats.rows_returned.to_string();
                scope.complete(&[
                    ("rows_considered", considered.as_str()),
                    ("rows_returned", returned.as_str()),
                ]);
                Ok(stats)
            }
            Err(err) => {
                self.metrics.increment_scans_failed();
                if let ScanError::Column(ref column_err) = err {
                    if column_err.is_fatal() {
                        log_event(
                            Event::ContractViolation,
                            &[
                                ("column", column_err.column()),
                                ("message", column_err.message()),
                            ],
                        );
                    }
                }
                // CONTRACT_VIOLATION is the one FATAL line for a broken contract
                scope.fail(&err.to_string(), false);
                Err(err)
            }
        }
    }

    fn run(
        &self,
        schema: &StorageSchema<'_>,
        query: &ScanQuery,
        sink: &mut dyn ResultSink,
    ) -> ScanResult<ScanStats> {
        let rows = schema.row_count();
        Self::validate(schema, query)?;

        let mut stats = ScanStats::default();

        // Bounds
        let mut range = Bounds::full(rows);
        let mut residual: Vec<&Constraint> = Vec::with_capacity(query.constraints.len());
        for constraint in &query.constraints {
            if !self.config.bound_pruning {
                residual.push(constraint);
                continue;
            }
            let column = Self::column(schema, constraint.column)?;
            let bounds = column.bound_filter(constraint.op, &constraint.value);
            range = range.intersect(&bounds);
            if bounds.consumed {
                stats.constraints_consumed += 1;
            } else {
                residual.push(constraint);
            }
        }
        stats.rows_considered = range.len();
        trace(Event::BoundsComputed, || {
            vec![
                ("min_idx", range.min_idx.to_string()),
                ("max_idx", range.max_idx.to_string()),
                ("consumed", stats.constraints_consumed.to_string()),
            ]
        });

        // Residual filters
        let mut index = RowIndexFilter::new(range.min_idx, range.max_idx);
        for constraint in residual {
            let column = Self::column(schema, constraint.column)?;
            column.filter(constraint.op, &constraint.value, &mut index)?;
            stats.filters_applied += 1;
            trace(Event::FilterApplied, || {
                vec![
                    ("column", column.name().to_string()),
                    ("op", constraint.op.as_str().to_string()),
                    ("remaining", index.row_count().to_string()),
                ]
            });
        }
        let mut survivors = index.into_rows();

        // Sort
        if !query.is_unordered() && survivors.len() > 1 {
            if self.sort_elided(schema, query)? {
                self.metrics.increment_sorts_skipped();
                trace(Event::SortSkipped, Vec::new);
            } else {
                let comparators = query
                    .order_by
                    .iter()
                    .map(|ob| Ok(Self::column(schema, ob.column)?.sort(ob)))
                    .collect::<ScanResult<Vec<Comparator<'_>>>>()?;
                RowSorter::sort(&mut survivors, &comparators);
                stats.sorted = true;
                self.metrics.increment_sorts_performed();
                trace(Event::SortApplied, || {
                    vec![("rows", survivors.len().to_string())]
                });
            }
        }

        // Report
        let output: Vec<usize> = if query.columns.is_empty() {
            (0..schema.len()).collect()
        } else {
            query.columns.clone()
        };
        for &row in &survivors {
            sink.begin_row(row);
            for &col in &output {
                Self::column(schema, col)?.report_result(row, sink);
            }
        }
        stats.rows_returned = survivors.len() as u32;

        Ok(stats)
    }

    /// Rejects a query naming a column the schema does not have.
    fn validate(schema: &StorageSchema<'_>, query: &ScanQuery) -> ScanResult<()> {
        let width = schema.len();
        if let Some(c) = query.constraints.iter().find(|c| c.column >= width) {
            return Err(ScanError::UnknownConstraintColumn {
                index: c.column,
                width,
            });
        }
        if let Some(ob) = query.order_by.iter().find(|ob| ob.column >= width) {
            return Err(ScanError::UnknownSortColumn {
                index: ob.column,
                width,
            });
        }
        if let Some(&col) = query.columns.iter().find(|col| **col >= width) {
            return Err(ScanError::UnknownOutputColumn { index: col, width });
        }
        Ok(())
    }

    // Indices are validated up front, so this only fails on a schema bug.
    fn column<'s>(schema: &'s StorageSchema<'_>, idx: usize) -> ScanResult<&'s dyn StorageColumn> {
        schema.column(idx).ok_or(ScanError::UnknownConstraintColumn {
            index: idx,
            width: schema.len(),
        })
    }

    /// True when the only ORDER BY term is ascending on a column whose
    /// storage order is already ascending.
    fn sort_elided(&self, schema: &StorageSchema<'_>, query: &ScanQuery) -> ScanResult<bool> {
        if !self.config.natural_order_sort_elision {
            return Ok(false);
        }
        match query.order_by.as_slice() {
            [only] if !only.desc => Ok(Self::column(schema, only.column)?.is_naturally_ordered()),
            _ => Ok(false),
        }
    }

    fn record(&self, stats: &ScanStats) {
        self.metrics.increment_scans_executed();
        self.metrics.add_rows_considered(stats.rows_considered as u64);
        self.metrics.add_rows_returned(stats.rows_returned as u64);
        self.metrics
            .add_constraints_consumed(stats.constraints_consumed as u64);
        self.metrics.add_filters_applied(stats.filters_applied as u64);
    }

    /// Planning cost of a scan with `constraints`.
    ///
    /// Starts at the row count. A narrowing constraint on a naturally
    /// ordered column is answered by binary search: equality costs
    /// `log2(rows + 1)`, a range costs half the rows plus the search.
    /// The cheapest such constraint wins.
    pub fn estimate_cost(schema: &StorageSchema<'_>, constraints: &[Constraint]) -> f64 {
        let rows = f64::from(schema.row_count().max(1));
        let search = (rows + 1.0).log2();

        constraints
            .iter()
            .filter(|c| c.op.is_narrowing())
            .filter(|c| {
                schema
                    .column(c.column)
                    .is_some_and(|col| col.is_naturally_ordered())
            })
            .map(|c| match c.op {
                Operator::Eq => search,
                _ => rows / 2.0 + search,
            })
            .fold(rows, f64::min)
    }
}

/// Logs a TRACE event, building its fields only when TRACE is enabled.
fn trace<F>(event: Event, fields: F)
where
    F: FnOnce() -> Vec<(&'static str, String)>,
{
    if !Logger::enabled(Severity::Trace) {
        return;
    }
    let owned = fields();
    let borrowed: Vec<(&str, &str)> = owned.iter().map(|(k, v)| (*k, v.as_str())).collect();
    log_event(event, &borrowed);
}
