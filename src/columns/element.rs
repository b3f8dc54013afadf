//! Element types that columns can be built over
//!
//! `NumericElement` fixes, at compile time, how a stored type is compared,
//! reported and declared. Types without an impl cannot back a numeric
//! column at all.

use std::cmp::Ordering;
use std::fmt::Debug;

use super::errors::{ColumnError, ColumnResult};
use super::sink::ResultSink;
use super::ColumnType;
use crate::query::{Operator, SqlValue};
use crate::scan::RowIndexFilter;

/// A fixed-width numeric type storable in a dense column.
pub trait NumericElement: Copy + PartialOrd + Debug + 'static {
    /// Declared relational type for columns of this element
    const COLUMN_TYPE: ColumnType;
    /// Whether integer literals compare exactly against this type
    const IS_INTEGRAL: bool;
    /// Smallest representable value
    const MIN: Self;
    /// Largest representable value
    const MAX: Self;

    /// Widens the value into the exact integer comparison domain.
    ///
    /// Only called when `IS_INTEGRAL` is true.
    fn to_i128(self) -> i128;

    /// Converts the value into the floating point comparison domain
    fn to_f64(self) -> f64;

    /// Reports the value to the sink
    fn report(self, sink: &mut dyn ResultSink);

    /// Three-way comparison used by sort comparators.
    ///
    /// Must be a total order. Types with incomparable values override it.
    #[inline]
    fn compare(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }
}

macro_rules! integral_element {
    ($ty:ty, $column_type:expr) => {
        impl NumericElement for $ty {
            const COLUMN_TYPE: ColumnType = $column_type;
            const IS_INTEGRAL: bool = true;
            const MIN: Self = <$ty>::MIN;
            const MAX: Self = <$ty>::MAX;

            #[inline]
            fn to_i128(self) -> i128 {
                self as i128
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn report(self, sink: &mut dyn ResultSink) {
                sink.report_long(self as i64);
            }
        }
    };
}

integral_element!(i8, ColumnType::Int);
integral_element!(i32, ColumnType::Int);
integral_element!(u8, ColumnType::Uint);
integral_element!(u32, ColumnType::Uint);
integral_element!(i64, ColumnType::Long);

impl NumericElement for u64 {
    const COLUMN_TYPE: ColumnType = ColumnType::Ulong;
    const IS_INTEGRAL: bool = true;
    const MIN: Self = u64::MIN;
    const MAX: Self = u64::MAX;

    #[inline]
    fn to_i128(self) -> i128 {
        self as i128
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    /// Values past `i64::MAX` have no integer representation in the sink.
    fn report(self, sink: &mut dyn ResultSink) {
        match i64::try_from(self) {
            Ok(v) => sink.report_long(v),
            Err(_) => sink.report_double(self as f64),
        }
    }
}

impl NumericElement for f64 {
    const COLUMN_TYPE: ColumnType = ColumnType::Double;
    const IS_INTEGRAL: bool = false;
    const MIN: Self = f64::MIN;
    const MAX: Self = f64::MAX;

    #[inline]
    fn to_i128(self) -> i128 {
        self as i128
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn report(self, sink: &mut dyn ResultSink) {
        sink.report_double(self);
    }

    /// NaN of either sign sorts after every number; NaNs tie.
    #[inline]
    fn compare(&self, other: &Self) -> Ordering {
        self.is_nan()
            .cmp(&other.is_nan())
            .then_with(|| self.partial_cmp(other).unwrap_or(Ordering::Equal))
    }
}

/// Integer type indexing into a shared string table
pub trait StringId: Copy + 'static {
    fn index(self) -> usize;
}

macro_rules! string_id {
    ($($ty:ty),*) => {
        $(
            impl StringId for $ty {
                #[inline]
                fn index(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

string_id!(u8, u16, u32, u64, usize);

/// A filter literal resolved into the domain it is compared in.
///
/// Integer literals against integral storage compare exactly; every other
/// numeric pairing compares as `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Literal {
    Int(i128),
    Float(f64),
}

impl Literal {
    /// Resolves `value` for storage of type `T`.
    ///
    /// Returns `None` for text and null literals.
    pub(crate) fn for_element<T: NumericElement>(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Integer(v) if T::IS_INTEGRAL => Some(Literal::Int(*v as i128)),
            SqlValue::Integer(v) => Some(Literal::Float(*v as f64)),
            SqlValue::Float(v) => Some(Literal::Float(*v)),
            SqlValue::Text(_) | SqlValue::Null => None,
        }
    }

    /// Applies `op` with the stored value on the left
    #[inline]
    pub(crate) fn test<T: NumericElement>(&self, op: Operator, stored: T) -> bool {
        match *self {
            Literal::Int(lit) => op.test(stored.to_i128(), lit),
            Literal::Float(lit) => op.test(stored.to_f64(), lit),
        }
    }

    /// True when no value of `T` is below the literal
    fn at_or_below_min<T: NumericElement>(&self) -> bool {
        match *self {
            Literal::Int(lit) => lit <= T::MIN.to_i128(),
            Literal::Float(lit) => lit <= T::MIN.to_f64(),
        }
    }

    /// True when no value of `T` is above the literal
    fn at_or_above_max<T: NumericElement>(&self) -> bool {
        match *self {
            Literal::Int(lit) => lit >= T::MAX.to_i128(),
            Literal::Float(lit) => lit >= T::MAX.to_f64(),
        }
    }
}

/// One end of a value range
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Endpoint {
    pub(crate) literal: Literal,
    pub(crate) inclusive: bool,
}

/// The value range implied by one constraint.
///
/// An absent end is open, equivalent to the type's min/max sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ValueRange {
    pub(crate) min: Option<Endpoint>,
    pub(crate) max: Option<Endpoint>,
}

impl ValueRange {
    /// Translates `op` and `literal` into a range over `T`.
    ///
    /// Inclusive ends sitting on the type's sentinel collapse to open ends,
    /// so `>= MIN` resolves to the unbounded range.
    pub(crate) fn resolve<T: NumericElement>(op: Operator, literal: Literal) -> Self {
        let end = |inclusive: bool| Some(Endpoint { literal, inclusive });

        let (mut min, mut max) = match op {
            Operator::Ge => (end(true), None),
            Operator::Gt => (end(false), None),
            Operator::Le => (None, end(true)),
            Operator::Lt => (None, end(false)),
            Operator::Eq => (end(true), end(true)),
            _ => (None, None),
        };

        if matches!(min, Some(e) if e.inclusive && e.literal.at_or_below_min::<T>()) {
            min = None;
        }
        if matches!(max, Some(e) if e.inclusive && e.literal.at_or_above_max::<T>()) {
            max = None;
        }

        Self { min, max }
    }

    /// True when the range still spans every value of the type
    pub(crate) fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// True when `stored` is not below the range
    #[inline]
    pub(crate) fn admits_lower<T: NumericElement>(&self, stored: T) -> bool {
        match self.min {
            None => true,
            Some(Endpoint { literal, inclusive }) => {
                let op = if inclusive { Operator::Ge } else { Operator::Gt };
                literal.test(op, stored)
            }
        }
    }

    /// True when `stored` is not above the range
    #[inline]
    pub(crate) fn admits_upper<T: NumericElement>(&self, stored: T) -> bool {
        match self.max {
            None => true,
            Some(Endpoint { literal, inclusive }) => {
                let op = if inclusive { Operator::Le } else { Operator::Lt };
                literal.test(op, stored)
            }
        }
    }
}

/// Narrows `index` to the rows whose value satisfies `op value`.
///
/// Shared by every column whose values are numeric, stored or computed.
pub(crate) fn filter_numeric<T, F>(
    column: &str,
    op: Operator,
    value: &SqlValue,
    index: &mut RowIndexFilter,
    value_at: F,
) -> ColumnResult<()>
where
    T: NumericElement,
    F: Fn(u32) -> T,
{
    let literal = Literal::for_element::<T>(value)
        .ok_or_else(|| ColumnError::invalid_contract(column, value.kind()))?;
    index.filter_rows(|row| literal.test(op, value_at(row)));
    Ok(())
}
