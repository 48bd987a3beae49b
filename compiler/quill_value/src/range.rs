//! Half-open integer ranges for `for` loops.
//!
//! A [`Range`] only stores its bounds. Each call to [`Range::iter`] starts a
//! fresh [`RangeIter`], so the same range can be walked any number of times.

use std::iter::FusedIterator;

use crate::errors::{type_mismatch, EvalError};
use crate::value::{Kind, Value};

/// End bound used for `start..` ranges with no explicit end.
pub const RANGE_OPEN_END: i64 = 2_147_483_647;

/// `start..end`, stepping by one, end exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Range {
    start: i64,
    end: i64,
}

impl Range {
    /// Build a range from two `Int` values.
    pub fn new(start: &Value, end: &Value) -> Result<Self, EvalError> {
        match (start, end) {
            (Value::Int(start), Value::Int(end)) => Ok(Range::from_bounds(*start, *end)),
            _ => Err(type_mismatch("..", start.kind(), end.kind())),
        }
    }

    /// `..end`: starts at zero.
    pub fn upto(end: &Value) -> Result<Self, EvalError> {
        Range::new(&Value::Int(0), end)
    }

    /// `start..`: ends at [`RANGE_OPEN_END`].
    pub fn starting_at(start: &Value) -> Result<Self, EvalError> {
        match start {
            Value::Int(start) => Ok(Range::from_bounds(*start, RANGE_OPEN_END)),
            other => Err(type_mismatch("..", other.kind(), Kind::Int)),
        }
    }

    #[inline]
    pub const fn from_bounds(start: i64, end: i64) -> Self {
        Range { start, end }
    }

    #[inline]
    pub const fn start(&self) -> i64 {
        self.start
    }

    #[inline]
    pub const fn end(&self) -> i64 {
        self.end
    }

    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            usize::try_from(self.end.abs_diff(self.start)).unwrap_or(usize::MAX)
        }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    #[inline]
    pub const fn contains(&self, n: i64) -> bool {
        self.start <= n && n < self.end
    }

    pub fn iter(&self) -> RangeIter {
        RangeIter {
            next: self.start,
            end: self.end,
        }
    }
}

/// Lazy cursor over a [`Range`], yielding `Int` values.
#[derive(Clone, Debug)]
pub struct RangeIter {
    next: i64,
    end: i64,
}

impl Iterator for RangeIter {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        if self.next >= self.end {
            return None;
        }
        let current = self.next;
        self.next += 1;
        Some(Value::Int(current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = Range::from_bounds(self.next, self.end).len();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RangeIter {}

impl FusedIterator for RangeIter {}

impl IntoIterator for Range {
    type Item = Value;
    type IntoIter = RangeIter;

    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

impl IntoIterator for &Range {
    type Item = Value;
    type IntoIter = RangeIter;

    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}
