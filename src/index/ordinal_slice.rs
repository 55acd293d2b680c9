use serde::{Deserialize, Serialize};

use crate::index_errors::InvalidIndexKindError;

use super::SliceSpec;

/// A literal arithmetic progression of integers.
///
/// An ordinal slice enumerates `start, start + step, ...` while strictly before `stop` in the direction of `step`.
/// Unlike a [`SliceSpec`], its bounds are never offset from the end of an axis and never clamped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrdinalSlice {
    start: i64,
    stop: i64,
    step: i64,
}

impl std::fmt::Display for OrdinalSlice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slice({}, {}, {})", self.start, self.stop, self.step)
    }
}

impl OrdinalSlice {
    /// Create a new ordinal slice.
    ///
    /// # Errors
    /// Returns [`InvalidIndexKindError`] if `step` is zero.
    pub fn new(start: i64, stop: i64, step: i64) -> Result<Self, InvalidIndexKindError> {
        if step == 0 {
            Err(InvalidIndexKindError::new("slice step cannot be zero"))
        } else {
            Ok(Self { start, stop, step })
        }
    }

    /// Create an ordinal slice containing only `index`.
    ///
    /// The slice steps backwards if `index` is [`i64::MAX`].
    #[must_use]
    pub const fn new_scalar(index: i64) -> Self {
        match index.checked_add(1) {
            Some(stop) => Self {
                start: index,
                stop,
                step: 1,
            },
            None => Self {
                start: index,
                stop: index - 1,
                step: -1,
            },
        }
    }

    /// Return the start of the slice.
    #[must_use]
    pub const fn start(&self) -> i64 {
        self.start
    }

    /// Return the stop (exclusive) of the slice.
    #[must_use]
    pub const fn stop(&self) -> i64 {
        self.stop
    }

    /// Return the step of the slice.
    #[must_use]
    pub const fn step(&self) -> i64 {
        self.step
    }

    /// Return the number of elements of the slice.
    #[must_use]
    pub fn len(&self) -> u64 {
        let (start, stop, step) = (
            i128::from(self.start),
            i128::from(self.stop),
            i128::from(self.step),
        );
        let span = if step > 0 { stop - start } else { start - stop };
        if span <= 0 {
            0
        } else {
            u64::try_from((span - 1) / step.abs() + 1).unwrap_or(u64::MAX)
        }
    }

    /// Return the `n`th element, where `n` is less than [`len`](OrdinalSlice::len).
    #[allow(clippy::cast_possible_truncation)]
    fn element(&self, n: u64) -> i64 {
        // Elements lie between start and stop
        (i128::from(self.start) + i128::from(self.step) * i128::from(n)) as i64
    }

    /// Returns true if the slice has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the first element of the slice.
    #[must_use]
    pub fn first(&self) -> Option<i64> {
        (!self.is_empty()).then_some(self.start)
    }

    /// Return the last element of the slice.
    #[must_use]
    pub fn last(&self) -> Option<i64> {
        self.len().checked_sub(1).map(|n| self.element(n))
    }

    /// Return the smallest and largest elements of the slice.
    #[must_use]
    pub fn min_max(&self) -> Option<(i64, i64)> {
        let (first, last) = (self.first()?, self.last()?);
        Some((first.min(last), first.max(last)))
    }

    /// Returns an iterator over the elements of the slice, in slice order.
    pub fn iter(&self) -> impl Iterator<Item = i64> {
        let slice = *self;
        (0..self.len()).map(move |n| slice.element(n))
    }

    /// Returns the position of `value` in the slice, if it is an element.
    #[must_use]
    pub fn position(&self, value: i64) -> Option<usize> {
        let offset = i128::from(value) - i128::from(self.start);
        let step = i128::from(self.step);
        if offset % step != 0 {
            return None;
        }
        let n = u64::try_from(offset / step).ok()?;
        if n < self.len() {
            usize::try_from(n).ok()
        } else {
            None
        }
    }

    /// Convert to a [`SliceSpec`] selecting the same positions of an axis at least as long as [`stop`](OrdinalSlice::stop).
    ///
    /// # Errors
    /// Returns [`InvalidIndexKindError`] if the slice has a negative element, which a [`SliceSpec`] would count from the end of an axis.
    pub fn to_slice_spec(&self) -> Result<SliceSpec, InvalidIndexKindError> {
        match self.min_max() {
            Some((min, _)) if min < 0 => Err(InvalidIndexKindError::new(format!(
                "{self} has negative elements"
            ))),
            None => Ok(SliceSpec::new(Some(0), Some(0), Some(1))),
            Some(_) => {
                // A descending stop of -1 would be counted from the end of the axis
                let stop = if self.stop < 0 { None } else { Some(self.stop) };
                Ok(SliceSpec::new(Some(self.start), stop, Some(self.step)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_slice_len() {
        assert_eq!(OrdinalSlice::new(0, 10, 1).unwrap().len(), 10);
        assert_eq!(OrdinalSlice::new(0, 10, 3).unwrap().len(), 4);
        assert_eq!(OrdinalSlice::new(10, 0, -3).unwrap().len(), 4);
        assert_eq!(OrdinalSlice::new(5, 5, 1).unwrap().len(), 0);
        assert_eq!(OrdinalSlice::new(5, 7, -1).unwrap().len(), 0);
        assert!(OrdinalSlice::new(0, 1, 0).is_err());
        assert_eq!(
            OrdinalSlice::new_scalar(4).iter().collect::<Vec<_>>(),
            vec![4]
        );
    }

    #[test]
    fn ordinal_slice_elements() {
        let slice = OrdinalSlice::new(9, -1, -3).unwrap();
        assert_eq!(slice.iter().collect::<Vec<_>>(), vec![9, 6, 3, 0]);
        assert_eq!(slice.first(), Some(9));
        assert_eq!(slice.last(), Some(0));
        assert_eq!(slice.min_max(), Some((0, 9)));
        assert_eq!(slice.position(6), Some(1));
        assert_eq!(slice.position(7), None);
        assert_eq!(slice.position(12), None);
        assert_eq!(slice.position(-3), None);
        assert_eq!(OrdinalSlice::new(2, 2, 1).unwrap().last(), None);
    }

    #[test]
    fn ordinal_slice_extreme_bounds() {
        let slice = OrdinalSlice::new_scalar(i64::MAX);
        assert_eq!(slice.iter().collect::<Vec<_>>(), vec![i64::MAX]);
        assert_eq!(slice.position(i64::MAX), Some(0));
        assert_eq!(
            OrdinalSlice::new_scalar(i64::MIN).min_max(),
            Some((i64::MIN, i64::MIN))
        );

        let slice = OrdinalSlice::new(i64::MAX, i64::MIN, i64::MIN).unwrap();
        assert_eq!(slice.len(), 2);
        assert_eq!(slice.iter().collect::<Vec<_>>(), vec![i64::MAX, -1]);
        assert_eq!(slice.position(-1), Some(1));
        assert_eq!(slice.position(i64::MIN), None);

        let slice = OrdinalSlice::new(i64::MIN, i64::MAX, 1).unwrap();
        assert_eq!(slice.len(), u64::MAX);
        assert_eq!(slice.last(), Some(i64::MAX - 1));
        assert_eq!(
            slice.position(i64::MAX - 1),
            usize::try_from(u64::MAX - 1).ok()
        );
        assert_eq!(OrdinalSlice::new(4, -1, i64::MIN).unwrap().len(), 1);
    }

    #[test]
    fn ordinal_slice_to_slice_spec() {
        let slice = OrdinalSlice::new(2, -1, -1).unwrap();
        let spec = slice.to_slice_spec().unwrap();
        assert_eq!(spec, SliceSpec::new(Some(2), None, Some(-1)));
        assert_eq!(
            spec.indices(10).unwrap().iter().collect::<Vec<_>>(),
            vec![2, 1, 0]
        );
        let slice = OrdinalSlice::new(1, 8, 3).unwrap();
        assert_eq!(
            slice.to_slice_spec().unwrap().indices(10).unwrap(),
            OrdinalSlice::new(1, 8, 3).unwrap()
        );
        assert!(OrdinalSlice::new(-2, 3, 1)
            .unwrap()
            .to_slice_spec()
            .is_err());
    }
}
