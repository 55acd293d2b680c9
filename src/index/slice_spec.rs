use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive};

use serde::{Deserialize, Serialize};

use crate::index_errors::InvalidIndexKindError;

use super::OrdinalSlice;

/// A slice with optional bounds and an optional step of either sign.
///
/// Bounds follow the conventional `start:stop:step` semantics over positions of an axis:
///  - `start` is inclusive and `stop` is exclusive in the direction of `step`,
///  - a missing bound extends to the end of the axis in that direction,
///  - negative bounds count back from the end of the axis, and
///  - a missing step is `1`.
///
/// A [`SliceSpec`] only becomes concrete positions once resolved against an axis extent with [`SliceSpec::indices`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SliceSpec {
    start: Option<i64>,
    stop: Option<i64>,
    step: Option<i64>,
}

impl std::fmt::Display for SliceSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fmt_bound = |bound: Option<i64>| bound.map_or(String::new(), |b| b.to_string());
        write!(f, "{}:{}", fmt_bound(self.start), fmt_bound(self.stop))?;
        if let Some(step) = self.step {
            write!(f, ":{step}")?;
        }
        Ok(())
    }
}

impl SliceSpec {
    /// Create a new slice.
    #[must_use]
    pub const fn new(start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> Self {
        Self { start, stop, step }
    }

    /// Create a slice over an entire axis.
    #[must_use]
    pub const fn full() -> Self {
        Self::new(None, None, None)
    }

    /// Return a copy of the slice with `step`.
    #[must_use]
    pub const fn with_step(mut self, step: i64) -> Self {
        self.step = Some(step);
        self
    }

    /// Return the start of the slice.
    #[must_use]
    pub const fn start(&self) -> Option<i64> {
        self.start
    }

    /// Return the stop of the slice.
    #[must_use]
    pub const fn stop(&self) -> Option<i64> {
        self.stop
    }

    /// Return the step of the slice, if explicitly set.
    #[must_use]
    pub const fn step(&self) -> Option<i64> {
        self.step
    }

    /// Return the effective step of the slice.
    #[must_use]
    pub fn step_or_default(&self) -> i64 {
        self.step.unwrap_or(1)
    }

    /// Returns true if the slice steps backwards.
    #[must_use]
    pub fn is_descending(&self) -> bool {
        self.step_or_default() < 0
    }

    /// Returns true if neither bound is set.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.stop.is_none()
    }

    /// Resolve the slice against an axis with `length` positions.
    ///
    /// Negative bounds are offset by `length` and every bound is clamped to the axis.
    /// The resulting [`OrdinalSlice`] enumerates exactly the positions selected by the slice, in slice order.
    ///
    /// # Errors
    /// Returns [`InvalidIndexKindError`] if the step is zero.
    pub fn indices(&self, length: u64) -> Result<OrdinalSlice, InvalidIndexKindError> {
        let step = self.step_or_default();
        if step == 0 {
            return Err(InvalidIndexKindError::new("slice step cannot be zero"));
        }
        let length = i64::try_from(length)
            .map_err(|_| InvalidIndexKindError::new(format!("axis length {length} is too large")))?;
        let (lower, upper) = if step < 0 {
            (-1, length - 1)
        } else {
            (0, length)
        };
        let adjust = |bound: Option<i64>, default: i64| match bound {
            None => default,
            Some(bound) if bound < 0 => (bound + length).max(lower),
            Some(bound) => bound.min(upper),
        };
        let (start, stop) = if step < 0 {
            (adjust(self.start, upper), adjust(self.stop, lower))
        } else {
            (adjust(self.start, lower), adjust(self.stop, upper))
        };
        OrdinalSlice::new(start, stop, step)
    }
}

/// The exclusive stop after `end`, open if `end` is the largest [`i64`].
fn inclusive_stop(end: i64) -> Option<i64> {
    end.checked_add(1)
}

macro_rules! impl_slice_spec_from_ranges {
    ($int:ty) => {
        impl From<Range<$int>> for SliceSpec {
            fn from(range: Range<$int>) -> Self {
                Self::new(Some(range.start.into()), Some(range.end.into()), None)
            }
        }

        impl From<RangeFrom<$int>> for SliceSpec {
            fn from(range: RangeFrom<$int>) -> Self {
                Self::new(Some(range.start.into()), None, None)
            }
        }

        impl From<RangeTo<$int>> for SliceSpec {
            fn from(range: RangeTo<$int>) -> Self {
                Self::new(None, Some(range.end.into()), None)
            }
        }

        impl From<RangeInclusive<$int>> for SliceSpec {
            fn from(range: RangeInclusive<$int>) -> Self {
                let (start, end) = range.into_inner();
                Self::new(Some(start.into()), inclusive_stop(end.into()), None)
            }
        }

        impl From<RangeToInclusive<$int>> for SliceSpec {
            fn from(range: RangeToInclusive<$int>) -> Self {
                Self::new(None, inclusive_stop(range.end.into()), None)
            }
        }
    };
}

impl_slice_spec_from_ranges!(i32);
impl_slice_spec_from_ranges!(i64);

impl From<RangeFull> for SliceSpec {
    fn from(_: RangeFull) -> Self {
        Self::full()
    }
}
