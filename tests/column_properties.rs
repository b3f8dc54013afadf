//! Column Property Tests
//!
//! Tests for column view invariants:
//! - Bounds never exclude a matching row
//! - Consumed bounds are exact
//! - Filter agrees with naive per-row evaluation
//! - Descending comparators are the reverse of ascending ones
//! - Computed end times, row ids and the empty-string-as-null convention

use std::cmp::Ordering;

use aerocolumn::columns::{
    create_row_id, id_column, numeric_column, parse_row_id, string_column, ts_end_column,
    Bounds, ColumnType, ResultSink, StorageColumn, TableId,
};
use aerocolumn::query::{Operator, OrderBy, SqlValue};
use aerocolumn::scan::{RowCollector, RowIndexFilter, ScanQuery, StorageSchema, TableScanner};

// =============================================================================
// Helper Functions
// =============================================================================

const OPERATORS: [Operator; 10] = [
    Operator::Eq,
    Operator::Ne,
    Operator::Lt,
    Operator::Le,
    Operator::Gt,
    Operator::Ge,
    Operator::IsNull,
    Operator::IsNotNull,
    Operator::Glob,
    Operator::Like,
];

/// Every non-decreasing sequence of length `0..=max_len` over `0..=max_value`.
fn sorted_sequences(max_len: usize, max_value: i32) -> Vec<Vec<i32>> {
    fn extend(prefix: &mut Vec<i32>, max_len: usize, max_value: i32, out: &mut Vec<Vec<i32>>) {
        out.push(prefix.clone());
        if prefix.len() == max_len {
            return;
        }
        let start = prefix.last().copied().unwrap_or(0);
        for v in start..=max_value {
            prefix.push(v);
            extend(prefix, max_len, max_value, out);
            prefix.pop();
        }
    }

    let mut out = Vec::new();
    extend(&mut Vec::new(), max_len, max_value, &mut out);
    out
}

fn literals() -> Vec<SqlValue> {
    let mut values: Vec<SqlValue> = (-1..=5).map(SqlValue::Integer).collect();
    values.extend([-0.5, 1.5, 2.0, 4.5].into_iter().map(SqlValue::Float));
    values
}

/// Naive evaluation of `stored op literal`.
fn matches(stored: f64, op: Operator, literal: &SqlValue) -> bool {
    let lit = match literal {
        SqlValue::Integer(v) => *v as f64,
        SqlValue::Float(v) => *v,
        _ => return false,
    };
    op.test(stored, lit)
}

fn filtered_rows(column: &dyn StorageColumn, op: Operator, value: &SqlValue, len: u32) -> Vec<u32> {
    let mut index = RowIndexFilter::new(0, len);
    column.filter(op, value, &mut index).unwrap();
    index.into_rows()
}

fn reported(column: &dyn StorageColumn, row: u32) -> SqlValue {
    let mut sink = RowCollector::new();
    sink.begin_row(row);
    column.report_result(row, &mut sink);
    sink.rows()[0].values[0].clone()
}

// =============================================================================
// Bound Tests
// =============================================================================

/// Rows outside the bound never satisfy the constraint.
#[test]
fn test_bound_soundness_exhaustive() {
    for seq in sorted_sequences(5, 4) {
        let column = numeric_column("v", &seq, false, true);
        for op in OPERATORS {
            for literal in literals() {
                let bounds = column.bound_filter(op, &literal);
                for (row, stored) in seq.iter().enumerate() {
                    if !bounds.contains(row as u32) {
                        assert!(
                            !matches(*stored as f64, op, &literal),
                            "{:?} {} {} excluded matching row {}",
                            seq,
                            op,
                            literal,
                            row
                        );
                    }
                }
            }
        }
    }
}

/// A consumed bound is exactly the matching set.
#[test]
fn test_consumed_bound_tightness_exhaustive() {
    for seq in sorted_sequences(5, 4) {
        let column = numeric_column("v", &seq, false, true);
        for op in OPERATORS {
            for literal in literals() {
                let bounds = column.bound_filter(op, &literal);
                if !bounds.consumed {
                    continue;
                }
                for (row, stored) in seq.iter().enumerate() {
                    assert_eq!(
                        bounds.contains(row as u32),
                        matches(*stored as f64, op, &literal),
                        "{:?} {} {} row {}",
                        seq,
                        op,
                        literal,
                        row
                    );
                }
            }
        }
    }
}

/// Only the five narrowing operators ever consume a bound.
#[test]
fn test_non_narrowing_operators_not_consumed() {
    let values = [1i64, 2, 3];
    let column = numeric_column("v", &values, false, true);
    for op in [Operator::Ne, Operator::IsNull, Operator::IsNotNull, Operator::Like] {
        assert_eq!(column.bound_filter(op, &SqlValue::Integer(2)), Bounds::full(3));
    }
}

/// Unordered columns never narrow.
#[test]
fn test_unordered_column_returns_full_range() {
    let values = [10i32, 20, 20, 30, 40];
    let column = numeric_column("v", &values, false, false);
    assert!(!column.is_naturally_ordered());
    assert_eq!(
        column.bound_filter(Operator::Ge, &SqlValue::Integer(20)),
        Bounds::full(5)
    );
}

/// Inclusive constraints at the type's sentinel do not narrow.
#[test]
fn test_sentinel_constraints_unconsumed() {
    let bytes = [0u8, 7, 255];
    let column = numeric_column("b", &bytes, false, true);
    assert_eq!(
        column.bound_filter(Operator::Ge, &SqlValue::Integer(0)),
        Bounds::full(3)
    );
    assert_eq!(
        column.bound_filter(Operator::Le, &SqlValue::Integer(255)),
        Bounds::full(3)
    );
    assert_eq!(
        column.bound_filter(Operator::Ge, &SqlValue::Integer(-40)),
        Bounds::full(3)
    );
}

/// Unsigned 64-bit storage compares against large literals without wrapping.
#[test]
fn test_u64_storage_exact() {
    let values = [0u64, 1 << 40, u64::MAX];
    let column = numeric_column("u", &values, false, true);

    let bounds = column.bound_filter(Operator::Gt, &SqlValue::Integer(-1));
    assert_eq!((bounds.min_idx, bounds.max_idx, bounds.consumed), (0, 3, true));

    let bounds = column.bound_filter(Operator::Ge, &SqlValue::Integer(i64::MAX));
    assert_eq!((bounds.min_idx, bounds.max_idx), (2, 3));
    assert_eq!(
        filtered_rows(column.as_ref(), Operator::Lt, &SqlValue::Integer(0), 3),
        Vec::<u32>::new()
    );
}

// =============================================================================
// Filter Equivalence Tests
// =============================================================================

/// Filter over the full range equals naive re-evaluation.
#[test]
fn test_filter_equivalence_exhaustive() {
    for seq in sorted_sequences(4, 3) {
        for ordered in [false, true] {
            let column = numeric_column("v", &seq, false, ordered);
            for op in OPERATORS {
                for literal in literals() {
                    let expected: Vec<u32> = seq
                        .iter()
                        .enumerate()
                        .filter(|(_, v)| matches(**v as f64, op, &literal))
                        .map(|(row, _)| row as u32)
                        .collect();
                    assert_eq!(
                        filtered_rows(column.as_ref(), op, &literal, seq.len() as u32),
                        expected,
                        "{:?} {} {}",
                        seq,
                        op,
                        literal
                    );
                }
            }
        }
    }
}

/// Double storage filters with integer and float literals alike.
#[test]
fn test_double_column_filter() {
    let values = [0.5f64, 1.0, 1.5, 2.0];
    let column = numeric_column("d", &values, false, true);

    assert_eq!(
        filtered_rows(column.as_ref(), Operator::Ge, &SqlValue::Integer(1), 4),
        vec![1, 2, 3]
    );
    assert_eq!(
        filtered_rows(column.as_ref(), Operator::Lt, &SqlValue::Float(1.5), 4),
        vec![0, 1]
    );
}

/// Computed end times filter on the sum.
#[test]
fn test_ts_end_filter_equivalence() {
    let ts = [0i64, 10, 20, 30];
    let dur = [50i64, 5, 0, 25];
    let column = ts_end_column("ts_end", &ts, &dur);

    for op in OPERATORS {
        for literal in [15i64, 20, 50, 55] {
            let literal = SqlValue::Integer(literal);
            let expected: Vec<u32> = (0..4u32)
                .filter(|r| matches((ts[*r as usize] + dur[*r as usize]) as f64, op, &literal))
                .collect();
            assert_eq!(filtered_rows(column.as_ref(), op, &literal, 4), expected);
        }
    }
}

/// Row id filter compares against the encoded id.
#[test]
fn test_id_filter() {
    let table = TableId(2);
    let column = id_column("id", table);
    let target = create_row_id(table, 3) as i64;

    assert_eq!(
        filtered_rows(column.as_ref(), Operator::Eq, &SqlValue::Integer(target), 6),
        vec![3]
    );
    assert_eq!(
        filtered_rows(column.as_ref(), Operator::Ge, &SqlValue::Integer(target), 6),
        vec![3, 4, 5]
    );
}

/// Text literals are a fatal contract violation for numeric filtering.
#[test]
fn test_text_literal_is_fatal() {
    let ts = [1i64, 2];
    let dur = [1i64, 1];
    let columns = vec![
        numeric_column("v", &ts, false, true),
        ts_end_column("ts_end", &ts, &dur),
        id_column("id", TableId(0)),
    ];

    for column in &columns {
        let mut index = RowIndexFilter::new(0, 2);
        let err = column
            .filter(Operator::Eq, &SqlValue::text("x"), &mut index)
            .unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(err.code().code(), "COLUMN_INVALID_CONTRACT");
        assert_eq!(err.column(), column.name());

        let err = column
            .filter(Operator::Eq, &SqlValue::Null, &mut index)
            .unwrap_err();
        assert!(err.is_fatal());
    }
}

/// String filter passes every row through.
#[test]
fn test_string_filter_is_pass_through() {
    let ids = [0u16, 1, 0];
    let strings = vec![String::new(), "foo".to_string()];
    let column = string_column("s", &ids, &strings, false);

    for op in OPERATORS {
        assert_eq!(
            filtered_rows(column.as_ref(), op, &SqlValue::text("foo"), 3),
            vec![0, 1, 2]
        );
    }
    assert_eq!(
        column.bound_filter(Operator::Eq, &SqlValue::text("foo")),
        Bounds::full(3)
    );
}

// =============================================================================
// Sort Tests
// =============================================================================

/// Descending is the exact reverse of ascending for every pair.
#[test]
fn test_sort_direction_symmetry() {
    let values = [3i32, 1, 4, 1, 5, 9, 2, 6];
    let ts = [5i64, 1, 3, 3];
    let dur = [0i64, 9, 1, 1];
    let ids = [2u32, 0, 1, 2];
    let strings = vec!["b".to_string(), "".to_string(), "a".to_string()];
    let cases = vec![
        (numeric_column("v", &values, false, false), 8u32),
        (ts_end_column("e", &ts, &dur), 4),
        (string_column("s", &ids, &strings, false), 4),
        (id_column("id", TableId(1)), 4),
    ];

    for (column, len) in &cases {
        let asc = column.sort(&OrderBy::asc(0));
        let desc = column.sort(&OrderBy::desc(0));
        for a in 0..*len {
            for b in 0..*len {
                assert_eq!(asc(a, b), desc(a, b).reverse(), "{} {} {}", column.name(), a, b);
            }
        }
    }
}

/// Sorting by the ascending comparator yields non-decreasing values.
#[test]
fn test_ascending_sort_non_decreasing() {
    let values = [3.5f64, -1.0, 4.0, 1.0, 5.0, -9.5];
    let column = numeric_column("v", &values, false, false);
    let asc = column.sort(&OrderBy::asc(0));

    let mut rows: Vec<u32> = (0..values.len() as u32).collect();
    rows.sort_by(|a, b| asc(*a, *b));
    let sorted: Vec<f64> = rows.iter().map(|r| values[*r as usize]).collect();
    assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
}

/// Doubles containing NaN still sort into a consistent order.
#[test]
fn test_nan_sorts_after_numbers() {
    let mut state = 0x2545_f491u64;
    let values: Vec<f64> = (0..2000)
        .map(|i| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            if i % 3 == 0 {
                f64::NAN
            } else {
                (state >> 33) as f64 / 1024.0 - 1_000_000.0
            }
        })
        .collect();
    let schema = StorageSchema::new(vec![numeric_column("v", &values, false, false)]);
    let scanner = TableScanner::default();

    for order in [OrderBy::asc(0), OrderBy::desc(0)] {
        let mut sink = RowCollector::new();
        scanner
            .scan(&schema, &ScanQuery::new().with_order_by(order), &mut sink)
            .unwrap();
        let sorted: Vec<f64> = sink
            .row_indices()
            .iter()
            .map(|r| values[*r as usize])
            .collect();
        assert_eq!(sorted.len(), values.len());

        let numbers: Vec<f64> = sorted.iter().copied().filter(|v| !v.is_nan()).collect();
        let nan_count = sorted.len() - numbers.len();
        assert_eq!(nan_count, 667);
        if order.desc {
            assert!(numbers.windows(2).all(|w| w[0] >= w[1]));
            assert!(sorted[..nan_count].iter().all(|v| v.is_nan()));
        } else {
            assert!(numbers.windows(2).all(|w| w[0] <= w[1]));
            assert!(sorted[numbers.len()..].iter().all(|v| v.is_nan()));
        }
    }
}

/// Empty strings sort as empty strings, before any other text.
#[test]
fn test_string_sort_lexicographic() {
    let ids = [1u8, 0, 2];
    let strings = vec![String::new(), "foo".to_string(), "bar".to_string()];
    let column = string_column("s", &ids, &strings, false);
    let asc = column.sort(&OrderBy::asc(0));

    assert_eq!(asc(1, 2), Ordering::Less);
    assert_eq!(asc(2, 0), Ordering::Less);
    assert_eq!(asc(0, 0), Ordering::Equal);
}

// =============================================================================
// Reporting Tests
// =============================================================================

/// End time reports start plus duration for every row.
#[test]
fn test_ts_end_reports_sum() {
    let ts: Vec<i64> = (0..50).map(|i| i * 1_000).collect();
    let dur: Vec<i64> = (0..50).map(|i| i * 7).collect();
    let column = ts_end_column("ts_end", &ts, &dur);

    for row in 0..50u32 {
        let expected = ts[row as usize] + dur[row as usize];
        assert_eq!(reported(column.as_ref(), row), SqlValue::Integer(expected));
    }
    assert_eq!(column.column_type(), ColumnType::Ulong);
}

/// Row ids decode back to their table and row.
#[test]
fn test_row_id_round_trip() {
    for raw in [0u8, 3, 255] {
        let table = TableId(raw);
        for row in (0..=1u32 << 20).step_by(997).chain([1 << 20, u32::MAX]) {
            assert_eq!(parse_row_id(create_row_id(table, row)), (table, row));
        }
    }
}

/// The id column reports the encoded id.
#[test]
fn test_id_column_reports_row_id() {
    let column = id_column("id", TableId(3));
    let expected = create_row_id(TableId(3), 7) as i64;
    assert_eq!(reported(column.as_ref(), 7), SqlValue::Integer(expected));
    assert_eq!(column.row_count(), None);
}

/// Empty text reports NULL; everything else reports the exact text.
#[test]
fn test_string_null_convention() {
    let ids = [0u32, 1, 0, 2];
    let strings = vec![String::new(), "foo".to_string(), " ".to_string()];
    let column = string_column("s", &ids, &strings, false);

    assert_eq!(reported(column.as_ref(), 0), SqlValue::Null);
    assert_eq!(reported(column.as_ref(), 1), SqlValue::text("foo"));
    assert_eq!(reported(column.as_ref(), 2), SqlValue::Null);
    assert_eq!(reported(column.as_ref(), 3), SqlValue::text(" "));
    assert_eq!(column.column_type(), ColumnType::String);
}

// =============================================================================
// Example Scenarios
// =============================================================================

/// `>= 20` over `[10, 20, 20, 30, 40]`.
#[test]
fn test_scenario_ge_bound_and_filter() {
    let values = [10i32, 20, 20, 30, 40];
    let column = numeric_column("v", &values, false, true);

    assert_eq!(
        column.bound_filter(Operator::Ge, &SqlValue::Integer(20)),
        Bounds {
            min_idx: 1,
            max_idx: 5,
            consumed: true
        }
    );
    assert_eq!(
        filtered_rows(column.as_ref(), Operator::Ge, &SqlValue::Integer(20), 5),
        vec![1, 2, 3, 4]
    );
    assert_eq!(column.column_type(), ColumnType::Int);
}

/// `= 25` over `[10, 20, 20, 30, 40]` is an empty consumed range.
#[test]
fn test_scenario_eq_missing_value() {
    let values = [10i32, 20, 20, 30, 40];
    let column = numeric_column("v", &values, false, true);

    assert_eq!(
        column.bound_filter(Operator::Eq, &SqlValue::Integer(25)),
        Bounds {
            min_idx: 3,
            max_idx: 3,
            consumed: true
        }
    );
}

/// String ids `[0, 1, 0]` over `["", "foo"]`.
#[test]
fn test_scenario_string_report() {
    let ids = [0u32, 1, 0];
    let strings = vec![String::new(), "foo".to_string()];
    let column = string_column("s", &ids, &strings, false);

    assert_eq!(reported(column.as_ref(), 0), SqlValue::Null);
    assert_eq!(reported(column.as_ref(), 1), SqlValue::text("foo"));
}

/// End times `[100, 200] + [5, 10]`.
#[test]
fn test_scenario_ts_end() {
    let ts = [100i64, 200];
    let dur = [5i64, 10];
    let column = ts_end_column("ts_end", &ts, &dur);

    assert_eq!(reported(column.as_ref(), 0), SqlValue::Integer(105));
    assert_eq!(reported(column.as_ref(), 1), SqlValue::Integer(210));
}

/// Table 3, row 7.
#[test]
fn test_scenario_row_id() {
    assert_eq!(
        parse_row_id(create_row_id(TableId(3), 7)),
        (TableId(3), 7)
    );
}
