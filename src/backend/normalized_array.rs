use itertools::Itertools;
use ndarray::{ArrayD, Axis, Slice};

use crate::{
    index::{normalize_index_opt, IndexOptions, LogicalIndex, NormalizedAxis},
    index_errors::{IncompatibleDimensionalityError, IndexError, InvalidIndexKindError},
};

use super::{ArraySelector, ReadableArrayTraits};

/// An array serving reads of [`LogicalIndex`]es from a backend that only reads ascending ranges.
///
/// A logical index is normalized against the array shape, the backend reads the enclosing ascending ranges, and the step, reversal and gather of each axis is applied to the read.
#[derive(Debug)]
pub struct NormalizedArray<'a, TArray: ?Sized> {
    array: &'a TArray,
}

impl<'a, TArray: ?Sized + ReadableArrayTraits> NormalizedArray<'a, TArray> {
    /// Create a new normalized array over `array`.
    #[must_use]
    pub fn new(array: &'a TArray) -> Self {
        Self { array }
    }

    /// Return the underlying array.
    #[must_use]
    pub fn array(&self) -> &'a TArray {
        self.array
    }

    /// Return the shape of the array.
    #[must_use]
    pub fn shape(&self) -> Vec<u64> {
        self.array.shape()
    }

    /// Read the positions of the array selected by `index`.
    ///
    /// The result has one axis per non-scalar axis index, holding the requested positions in request order.
    ///
    /// # Errors
    /// Returns an [`IndexError`] if `index` is invalid for the array or the backend read fails.
    pub fn read(&self, index: &LogicalIndex) -> Result<ArrayD<TArray::Element>, IndexError> {
        self.read_opt(index, &IndexOptions::default())
    }

    /// Explicit options version of [`read`](NormalizedArray::read).
    #[allow(clippy::missing_errors_doc)]
    pub fn read_opt(
        &self,
        index: &LogicalIndex,
        options: &IndexOptions,
    ) -> Result<ArrayD<TArray::Element>, IndexError> {
        let axes = normalize_index_opt(index, &self.array.shape(), options)?;
        let selectors: Vec<ArraySelector> = axes.iter().map(NormalizedAxis::selector).collect();
        tracing::debug!("read {index} as [{}]", selectors.iter().format(", "));
        let data = self.array.read(&selectors)?;
        apply_post_read(data, &axes)
    }
}

/// Apply the step, reversal and gather of `axes` to `data` read with their selectors.
///
/// # Errors
/// Returns an [`IndexError`] if `data` does not have one axis per non-scalar normalized axis.
pub fn apply_post_read<T: Clone>(
    mut data: ArrayD<T>,
    axes: &[NormalizedAxis],
) -> Result<ArrayD<T>, IndexError> {
    let kept = axes
        .iter()
        .filter(|axis| !matches!(axis, NormalizedAxis::Index(_)))
        .collect::<Vec<_>>();
    if kept.len() != data.ndim() {
        return Err(IncompatibleDimensionalityError::new(data.ndim(), kept.len()).into());
    }
    for (axis, normalized) in kept.into_iter().enumerate() {
        match normalized {
            NormalizedAxis::Index(_) => {}
            NormalizedAxis::Range(axis_range) => {
                if axis_range.step() > 1 {
                    let step = isize::try_from(axis_range.step())
                        .map_err(|_| InvalidIndexKindError::new("slice step is too large"))?;
                    data.slice_axis_inplace(Axis(axis), Slice::new(0, None, step));
                }
                if axis_range.reverse() {
                    data.invert_axis(Axis(axis));
                }
            }
            NormalizedAxis::Gather { positions, .. } => {
                data = data.select(Axis(axis), positions);
            }
        }
    }
    Ok(data)
}
