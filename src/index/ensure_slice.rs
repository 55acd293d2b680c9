//! Conversion of explicit integer sets to [`OrdinalSlice`]s.

use itertools::Itertools;
use ndarray::{ArrayBase, Data, Dimension};

use crate::{
    data_type::Element,
    index_errors::{IndexError, InvalidIndexKindError, NonRepresentableRangeError},
};

use super::{OrdinalSlice, SliceSpec};

/// Types that may be equivalent to a single [`OrdinalSlice`].
pub trait EnsureSlice {
    /// Convert to the equivalent [`OrdinalSlice`].
    ///
    /// # Errors
    /// Returns [`IndexError::NonRepresentableRange`] if the value is a strictly monotonic but irregularly spaced set of integers.
    /// Returns [`IndexError::InvalidIndexKind`] for any other value that cannot be converted.
    fn ensure_slice(&self) -> Result<OrdinalSlice, IndexError>;
}

/// Convert `value` to the equivalent [`OrdinalSlice`].
///
/// # Errors
/// See [`EnsureSlice::ensure_slice`].
pub fn ensure_slice<T: EnsureSlice + ?Sized>(value: &T) -> Result<OrdinalSlice, IndexError> {
    value.ensure_slice()
}

impl EnsureSlice for i64 {
    fn ensure_slice(&self) -> Result<OrdinalSlice, IndexError> {
        Ok(OrdinalSlice::new_scalar(*self))
    }
}

impl EnsureSlice for OrdinalSlice {
    fn ensure_slice(&self) -> Result<OrdinalSlice, IndexError> {
        Ok(*self)
    }
}

impl EnsureSlice for SliceSpec {
    fn ensure_slice(&self) -> Result<OrdinalSlice, IndexError> {
        match (self.start(), self.stop()) {
            (Some(start), Some(stop)) if start >= 0 && stop >= 0 => {
                Ok(OrdinalSlice::new(start, stop, self.step_or_default())?)
            }
            _ => Err(InvalidIndexKindError::new(format!(
                "{self} needs explicit non-negative bounds to be converted without an axis length"
            ))
            .into()),
        }
    }
}

impl EnsureSlice for [i64] {
    fn ensure_slice(&self) -> Result<OrdinalSlice, IndexError> {
        match self {
            [] => {
                Err(InvalidIndexKindError::new("empty array cannot be converted to slice").into())
            }
            [index] => index.ensure_slice(),
            [first, .., last] => {
                let diffs = self
                    .iter()
                    .tuple_windows()
                    .map(|(a, b)| b.checked_sub(*a))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(|| InvalidIndexKindError::new("array differences overflow"))?;
                if !(diffs.iter().all(|d| *d > 0) || diffs.iter().all(|d| *d < 0)) {
                    return Err(InvalidIndexKindError::new(
                        "non-monotonic array cannot be converted to slice",
                    )
                    .into());
                }
                if !diffs.iter().all_equal() {
                    return Err(NonRepresentableRangeError::from(self.to_vec()).into());
                }
                let step = diffs[0];
                let stop = last.checked_add(step.signum()).ok_or_else(|| {
                    InvalidIndexKindError::new(format!("array ending at {last} has no slice stop"))
                })?;
                Ok(OrdinalSlice::new(*first, stop, step)?)
            }
        }
    }
}

impl EnsureSlice for Vec<i64> {
    fn ensure_slice(&self) -> Result<OrdinalSlice, IndexError> {
        self.as_slice().ensure_slice()
    }
}

impl<S, D, T> EnsureSlice for ArrayBase<S, D>
where
    S: Data<Elem = T>,
    D: Dimension,
    T: Element,
{
    fn ensure_slice(&self) -> Result<OrdinalSlice, IndexError> {
        if !T::DATA_TYPE.is_integer() {
            return Err(InvalidIndexKindError::new(format!(
                "{} array cannot be converted to slice",
                T::DATA_TYPE
            ))
            .into());
        }
        if self.ndim() > 1 {
            return Err(InvalidIndexKindError::new(format!(
                "{}D array cannot be converted to slice",
                self.ndim()
            ))
            .into());
        }
        let values = self
            .iter()
            .map(|value| value.to_index())
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| InvalidIndexKindError::new("array values exceed the index range"))?;
        values.ensure_slice()
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{arr0, arr1, arr2, Array1};

    use super::*;

    #[test]
    fn ensure_slice_scalar() {
        assert_eq!(
            ensure_slice(&5i64).unwrap(),
            OrdinalSlice::new(5, 6, 1).unwrap()
        );
        assert_eq!(
            ensure_slice(&arr0(7u16)).unwrap(),
            OrdinalSlice::new(7, 8, 1).unwrap()
        );
        assert_eq!(
            ensure_slice(&arr1(&[3i32])).unwrap(),
            OrdinalSlice::new(3, 4, 1).unwrap()
        );
        let slice = OrdinalSlice::new(1, 9, 2).unwrap();
        assert_eq!(ensure_slice(&slice).unwrap(), slice);
        assert_eq!(
            ensure_slice(&SliceSpec::from(2..8).with_step(3)).unwrap(),
            OrdinalSlice::new(2, 8, 3).unwrap()
        );
        assert!(ensure_slice(&SliceSpec::from(2..)).is_err());
        assert_eq!(
            ensure_slice(&i64::MAX).unwrap().iter().collect::<Vec<_>>(),
            vec![i64::MAX]
        );
        assert_eq!(
            ensure_slice(&i64::MIN).unwrap().iter().collect::<Vec<_>>(),
            vec![i64::MIN]
        );
    }

    #[test]
    fn ensure_slice_extreme_values() {
        assert_eq!(
            ensure_slice(&vec![i64::MAX, i64::MAX - 1]).unwrap(),
            OrdinalSlice::new(i64::MAX, i64::MAX - 2, -1).unwrap()
        );
        assert_eq!(
            ensure_slice(&vec![i64::MIN, i64::MIN + 2]).unwrap(),
            OrdinalSlice::new(i64::MIN, i64::MIN + 3, 2).unwrap()
        );
        assert!(matches!(
            ensure_slice(&vec![i64::MAX - 1, i64::MAX]),
            Err(IndexError::InvalidIndexKind(_))
        ));
        assert!(matches!(
            ensure_slice(&vec![i64::MIN + 1, i64::MIN]),
            Err(IndexError::InvalidIndexKind(_))
        ));
        assert!(matches!(
            ensure_slice(&vec![i64::MIN, i64::MAX]),
            Err(IndexError::InvalidIndexKind(_))
        ));
    }

    #[test]
    fn ensure_slice_progression() {
        assert_eq!(
            ensure_slice(&vec![2i64, 5, 8, 11]).unwrap(),
            OrdinalSlice::new(2, 12, 3).unwrap()
        );
        assert_eq!(
            ensure_slice(&vec![6i64, 4, 2, 0]).unwrap(),
            OrdinalSlice::new(6, -1, -2).unwrap()
        );
        assert_eq!(
            ensure_slice(&arr1(&[10u8, 11, 12])).unwrap(),
            OrdinalSlice::new(10, 13, 1).unwrap()
        );
    }

    #[test]
    fn ensure_slice_reproduces_progressions() {
        for step in [-7i64, -3, -1, 1, 2, 5] {
            for len in 2..6 {
                let values: Vec<i64> = (0..len).map(|i| 40 + i * step).collect();
                let slice = ensure_slice(&values).unwrap();
                assert_eq!(slice.start(), values[0]);
                assert_eq!(slice.stop(), values[values.len() - 1] + step.signum());
                assert_eq!(slice.step(), step);
                assert_eq!(slice.iter().collect::<Vec<_>>(), values);
            }
        }
    }

    #[test]
    fn ensure_slice_irregular() {
        match ensure_slice(&vec![1i64, 2, 4]) {
            Err(IndexError::NonRepresentableRange(err)) => assert_eq!(err.values(), &[1, 2, 4]),
            _ => panic!("expected a non-representable range error"),
        }
        assert!(matches!(
            ensure_slice(&vec![9i64, 5, 4]),
            Err(IndexError::NonRepresentableRange(_))
        ));
    }

    #[test]
    fn ensure_slice_invalid() {
        assert!(matches!(
            ensure_slice(&Vec::<i64>::new()),
            Err(IndexError::InvalidIndexKind(_))
        ));
        assert!(matches!(
            ensure_slice(&vec![1i64, 3, 2]),
            Err(IndexError::InvalidIndexKind(_))
        ));
        assert!(matches!(
            ensure_slice(&vec![1i64, 1, 2]),
            Err(IndexError::InvalidIndexKind(_))
        ));
        assert!(matches!(
            ensure_slice(&arr1(&[1.0f32, 2.0])),
            Err(IndexError::InvalidIndexKind(_))
        ));
        assert!(matches!(
            ensure_slice(&arr2(&[[1i32, 2], [3, 4]])),
            Err(IndexError::InvalidIndexKind(_))
        ));
        assert!(matches!(
            ensure_slice(&Array1::<i64>::zeros(0)),
            Err(IndexError::InvalidIndexKind(_))
        ));
    }
}
