use std::marker::PhantomData;

use ndarray::{ArrayD, Axis};
use zarrs::{array::Array, array_subset::ArraySubset, storage::ReadableStorageTraits};

use super::{validate_selectors, ArrayReadError, ArraySelector, ReadableArrayTraits};

/// A Zarr array backend with elements of type `T`.
///
/// Selectors are read as a single array subset, which zarrs decodes from the intersecting chunks.
pub struct ZarrsArray<TStorage: ?Sized, T> {
    array: Array<TStorage>,
    _element: PhantomData<T>,
}

impl<TStorage: ?Sized, T> ZarrsArray<TStorage, T> {
    /// Create a new Zarr array backend.
    #[must_use]
    pub fn new(array: Array<TStorage>) -> Self {
        Self {
            array,
            _element: PhantomData,
        }
    }

    /// Return the underlying Zarr array.
    #[must_use]
    pub fn array(&self) -> &Array<TStorage> {
        &self.array
    }
}

impl<TStorage, T> ReadableArrayTraits for ZarrsArray<TStorage, T>
where
    TStorage: ?Sized + ReadableStorageTraits + 'static,
    T: bytemuck::Pod,
{
    type Element = T;

    fn shape(&self) -> Vec<u64> {
        self.array.shape().to_vec()
    }

    fn dimension_names(&self) -> Option<Vec<String>> {
        self.array.dimension_names().as_ref().map(|dimension_names| {
            dimension_names
                .iter()
                .map(|dimension_name| dimension_name.as_str().unwrap_or_default().to_string())
                .collect()
        })
    }

    fn read(&self, selectors: &[ArraySelector]) -> Result<ArrayD<T>, ArrayReadError> {
        validate_selectors(selectors, self.array.shape())?;
        let (start, shape): (Vec<u64>, Vec<u64>) = selectors
            .iter()
            .map(ArraySelector::start_and_extent)
            .unzip();
        let array_subset = ArraySubset::new_with_start_shape(start, shape)
            .map_err(|err| ArrayReadError::Other(err.to_string()))?;
        let mut data = self
            .array
            .retrieve_array_subset_ndarray::<T>(&array_subset)
            .map_err(|err| ArrayReadError::Other(err.to_string()))?;
        for (axis, selector) in selectors.iter().enumerate().rev() {
            if let ArraySelector::Index(_) = selector {
                data = data.index_axis_move(Axis(axis), 0);
            }
        }
        Ok(data)
    }
}
