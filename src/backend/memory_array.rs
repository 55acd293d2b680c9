use ndarray::{ArrayD, Axis, Slice};

use crate::index_errors::IncompatibleDimensionalityError;

use super::{validate_selectors, ArrayReadError, ArraySelector, ReadableArrayTraits};

/// An in-memory array.
#[derive(Clone, Debug)]
pub struct MemoryArray<T> {
    data: ArrayD<T>,
    dimension_names: Option<Vec<String>>,
}

impl<T> MemoryArray<T> {
    /// Create a new memory array from `data`, with optional `dimension_names`.
    ///
    /// # Errors
    /// Returns [`IncompatibleDimensionalityError`] if the number of dimension names does not match the dimensionality of `data`.
    pub fn new(
        data: ArrayD<T>,
        dimension_names: Option<Vec<String>>,
    ) -> Result<Self, IncompatibleDimensionalityError> {
        match &dimension_names {
            Some(names) if names.len() != data.ndim() => Err(IncompatibleDimensionalityError::new(
                names.len(),
                data.ndim(),
            )),
            _ => Ok(Self {
                data,
                dimension_names,
            }),
        }
    }

    /// Return the data of the array.
    #[must_use]
    pub fn data(&self) -> &ArrayD<T> {
        &self.data
    }
}

impl<T: Clone> ReadableArrayTraits for MemoryArray<T> {
    type Element = T;

    fn shape(&self) -> Vec<u64> {
        self.data
            .shape()
            .iter()
            .map(|extent| *extent as u64)
            .collect()
    }

    fn dimension_names(&self) -> Option<Vec<String>> {
        self.dimension_names.clone()
    }

    fn read(&self, selectors: &[ArraySelector]) -> Result<ArrayD<T>, ArrayReadError> {
        validate_selectors(selectors, &self.shape())?;
        let bounds = selectors
            .iter()
            .map(|selector| {
                let (start, extent) = selector.start_and_extent();
                let start = usize::try_from(start).map_err(|_| selector.to_string())?;
                let extent = usize::try_from(extent).map_err(|_| selector.to_string())?;
                Ok((start, start + extent))
            })
            .collect::<Result<Vec<_>, String>>()?;
        let mut view = self.data.slice_each_axis(|axis| {
            let (start, end) = bounds[axis.axis.index()];
            Slice::from(start..end)
        });
        for (axis, selector) in selectors.iter().enumerate().rev() {
            if let ArraySelector::Index(_) = selector {
                view = view.index_axis_move(Axis(axis), 0);
            }
        }
        Ok(view.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{array, Array};

    use super::*;

    #[test]
    fn memory_array_read() {
        let data = Array::from_shape_vec(vec![3, 4, 2], (0..24).collect()).unwrap();
        let array = MemoryArray::new(data.clone(), None).unwrap();
        assert_eq!(array.shape(), vec![3, 4, 2]);
        assert_eq!(array.dimensionality(), 3);

        let read = array
            .read(&[
                ArraySelector::Index(1),
                (1..3).into(),
                ArraySelector::Index(0),
            ])
            .unwrap();
        assert_eq!(read, array![10, 12].into_dyn());

        let read = array.read(&[(0..3).into(), (0..4).into(), (0..2).into()]).unwrap();
        assert_eq!(read, data);

        let read = array.read(&[(1..1).into(), (0..4).into(), ArraySelector::Index(1)]).unwrap();
        assert_eq!(read.shape(), &[0, 4]);

        assert!(array.read(&[ArraySelector::Index(3), (0..4).into(), (0..2).into()]).is_err());
    }

    #[test]
    fn memory_array_dimension_names() {
        let data = ArrayD::<u8>::zeros(vec![2, 2]);
        assert!(MemoryArray::new(data.clone(), Some(vec!["a".to_string()])).is_err());
        let array = MemoryArray::new(data, Some(vec!["a".to_string(), "b".to_string()])).unwrap();
        assert_eq!(
            array.dimension_names(),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }
}
