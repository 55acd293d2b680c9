//! The array backend contract.
//!
//! A backend is an N-dimensional array that can read a single position or an ascending contiguous range of each axis, through [`ReadableArrayTraits`].
//! Anything else a query needs (steps, reversal, gathers, axis reordering) is applied to the result of a read.
//!
//! This module includes:
//!  - [`MemoryArray`]: an in-memory array, and
//!  - [`UsageLogArray`]: an adapter that logs every read of another array.
//!
//! [`NormalizedArray`] wraps a backend to serve reads of [`LogicalIndex`](crate::index::LogicalIndex)es.
//!
//! A `ZarrsArray` backend over a Zarr array is available with the `zarrs` feature.

mod memory_array;
mod normalized_array;
mod usage_log;
#[cfg(feature = "zarrs")]
mod zarrs_array;

use std::{ops::Range, sync::Arc};

use ndarray::ArrayD;
use thiserror::Error;

pub use memory_array::MemoryArray;
pub use normalized_array::{apply_post_read, NormalizedArray};
pub use usage_log::UsageLogArray;
#[cfg(feature = "zarrs")]
pub use zarrs_array::ZarrsArray;

use crate::index_errors::{IncompatibleDimensionalityError, IndexError};

/// A selector of a single axis of a backend read.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArraySelector {
    /// A single position, the axis is removed from the read.
    Index(u64),
    /// An ascending contiguous range of positions.
    Range(Range<u64>),
}

impl std::fmt::Display for ArraySelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Range(range) => write!(f, "{}..{}", range.start, range.end),
        }
    }
}

impl From<u64> for ArraySelector {
    fn from(index: u64) -> Self {
        Self::Index(index)
    }
}

impl From<Range<u64>> for ArraySelector {
    fn from(range: Range<u64>) -> Self {
        Self::Range(range)
    }
}

impl ArraySelector {
    /// Return the number of positions selected, or [`None`] if the axis is removed.
    #[must_use]
    pub fn len(&self) -> Option<u64> {
        match self {
            Self::Index(_) => None,
            Self::Range(range) => Some(range.end.saturating_sub(range.start)),
        }
    }

    /// Return the first position and the number of positions read from the backend.
    #[must_use]
    pub fn start_and_extent(&self) -> (u64, u64) {
        match self {
            Self::Index(index) => (*index, 1),
            Self::Range(range) => (range.start, range.end.saturating_sub(range.start)),
        }
    }
}

/// An array read error.
#[derive(Debug, Error)]
pub enum ArrayReadError {
    /// Incompatible dimensionality.
    #[error(transparent)]
    IncompatibleDimensionality(#[from] IncompatibleDimensionalityError),
    /// A selector is out of bounds.
    #[error("selector {0} is out of bounds for axis with extent {1}")]
    OutOfBounds(ArraySelector, u64),
    /// An IO error.
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    /// Any other error.
    #[error("{0}")]
    Other(String),
}

impl From<&str> for ArrayReadError {
    fn from(err: &str) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<String> for ArrayReadError {
    fn from(err: String) -> Self {
        Self::Other(err)
    }
}

/// Readable array traits.
pub trait ReadableArrayTraits {
    /// The element type of the array.
    type Element: Clone;

    /// Return the shape of the array.
    fn shape(&self) -> Vec<u64>;

    /// Return the dimension names of the array, if it has any.
    fn dimension_names(&self) -> Option<Vec<String>>;

    /// Read the positions of the array selected by `selectors`, one per axis.
    ///
    /// The returned array has one axis per [`ArraySelector::Range`] selector, in axis order.
    ///
    /// # Errors
    /// Returns [`ArrayReadError`] if the selectors are incompatible with the array or the underlying read fails.
    fn read(&self, selectors: &[ArraySelector]) -> Result<ArrayD<Self::Element>, ArrayReadError>;

    /// Return the dimensionality of the array.
    fn dimensionality(&self) -> usize {
        self.shape().len()
    }
}

impl<TArray: ?Sized + ReadableArrayTraits> ReadableArrayTraits for Arc<TArray> {
    type Element = TArray::Element;

    fn shape(&self) -> Vec<u64> {
        (**self).shape()
    }

    fn dimension_names(&self) -> Option<Vec<String>> {
        (**self).dimension_names()
    }

    fn read(&self, selectors: &[ArraySelector]) -> Result<ArrayD<Self::Element>, ArrayReadError> {
        (**self).read(selectors)
    }
}

/// Validate that `selectors` are in bounds of an array with `shape`.
///
/// # Errors
/// Returns [`ArrayReadError`] if the number of selectors does not match the dimensionality of `shape` or a selector is out of bounds.
pub fn validate_selectors(
    selectors: &[ArraySelector],
    shape: &[u64],
) -> Result<(), ArrayReadError> {
    if selectors.len() != shape.len() {
        return Err(IncompatibleDimensionalityError::new(selectors.len(), shape.len()).into());
    }
    for (selector, extent) in std::iter::zip(selectors, shape) {
        let in_bounds = match selector {
            ArraySelector::Index(index) => index < extent,
            ArraySelector::Range(range) => range.start <= range.end && range.end <= *extent,
        };
        if !in_bounds {
            return Err(ArrayReadError::OutOfBounds(selector.clone(), *extent));
        }
    }
    Ok(())
}

/// Find the axis of `array` named `name`.
///
/// # Errors
/// Returns [`IndexError::MissingDimension`] if the array has no dimension names or none match `name`.
pub fn find_dimension<TArray: ?Sized + ReadableArrayTraits>(
    array: &TArray,
    name: &str,
) -> Result<usize, IndexError> {
    let dimension_names = array.dimension_names().unwrap_or_default();
    dimension_names
        .iter()
        .position(|dimension_name| dimension_name == name)
        .ok_or_else(|| IndexError::MissingDimension(name.to_string(), dimension_names.clone()))
}
