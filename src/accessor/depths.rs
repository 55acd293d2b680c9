use ndarray::ArrayD;

use crate::{
    backend::{NormalizedArray, ReadableArrayTraits},
    index::{LogicalIndex, SliceSpec},
    index_errors::{IncompatibleDimensionalityError, IndexError, InvalidIndexKindError},
};

/// Depth slices of unstructured `(traces, samples)` data, addressed by sample index.
///
/// A read of a single depth returns one value per trace, and a read of multiple depths returns `(samples, traces)`.
pub struct Depths<'a, TArray: ?Sized> {
    data: &'a TArray,
}

impl<'a, TArray: ?Sized + ReadableArrayTraits> Depths<'a, TArray> {
    /// Create depth slices of `data`.
    ///
    /// # Errors
    /// Returns [`IndexError::IncompatibleDimensionality`] if `data` is not 2D.
    pub fn new(data: &'a TArray) -> Result<Self, IndexError> {
        let dimensionality = data.dimensionality();
        if dimensionality == 2 {
            Ok(Self { data })
        } else {
            Err(IncompatibleDimensionalityError::new(dimensionality, 2).into())
        }
    }

    /// Return the number of depth slices.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.data.shape()[1]
    }

    /// Returns true if there are no depth slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the depth slices selected by `index`.
    ///
    /// # Errors
    /// Returns an [`IndexError`] if `index` is not a single axis index or the read fails.
    pub fn get(&self, index: &LogicalIndex) -> Result<ArrayD<TArray::Element>, IndexError> {
        if let LogicalIndex::MultiAxis(_) | LogicalIndex::Ellipsis = index {
            return Err(InvalidIndexKindError::new(format!("{index} is not a depth index")).into());
        }
        let mut data = NormalizedArray::new(self.data).read(&LogicalIndex::MultiAxis(vec![
            LogicalIndex::Range(SliceSpec::full()),
            index.clone(),
        ]))?;
        if data.ndim() == 2 {
            data.swap_axes(0, 1);
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{s, Array, Axis};

    use crate::backend::MemoryArray;

    use super::*;

    #[test]
    fn depths_get() {
        let data = Array::from_shape_vec(vec![3, 4], (0..12).collect::<Vec<u16>>()).unwrap();
        let array = MemoryArray::new(data.clone(), None).unwrap();
        let depths = Depths::new(&array).unwrap();
        assert_eq!(depths.len(), 4);
        assert_eq!(
            depths.get(&LogicalIndex::from(2)).unwrap(),
            data.slice(s![.., 2]).into_dyn()
        );
        assert_eq!(
            depths
                .get(&LogicalIndex::from(SliceSpec::new(Some(3), None, Some(-2))))
                .unwrap(),
            data.select(Axis(1), &[3, 1]).t().into_dyn()
        );
        assert!(depths.get(&LogicalIndex::from((1, 2))).is_err());
        assert!(depths.get(&LogicalIndex::from(4)).is_err());
    }
}
