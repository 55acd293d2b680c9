use ndarray::ArrayD;

use crate::{
    backend::{find_dimension, NormalizedArray, ReadableArrayTraits},
    index::{LogicalIndex, SliceSpec},
    index_errors::{IndexError, InvalidIndexKindError},
    label_indexer::LabelIndexer,
};

use super::{OFFSETS_DIMENSION, SAMPLES_DIMENSION};

/// Lines of structured data, addressed by line label and offset label.
///
/// A read returns the varying axes first, in the order `(lines, offsets, ...)`, followed by the remaining axes of the array.
/// Reading multiple depth slices returns `(samples, ..., slow, fast)`.
pub struct Lines<'a, TArray: ?Sized> {
    dimension_name: String,
    labels: &'a LabelIndexer,
    offsets: &'a LabelIndexer,
    data: &'a TArray,
    labels_axis: usize,
    offsets_axis: usize,
}

impl<TArray: ?Sized> std::fmt::Display for Lines<'_, TArray> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lines('{}')", self.dimension_name)
    }
}

impl<TArray: ?Sized> std::fmt::Debug for Lines<'_, TArray> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

impl<'a, TArray: ?Sized + ReadableArrayTraits> Lines<'a, TArray> {
    /// Create lines along the dimension `dimension_name` of `data`.
    ///
    /// # Errors
    /// Returns [`IndexError::MissingDimension`] if `data` has no `dimension_name` or `offsets` dimension.
    pub fn new(
        dimension_name: &str,
        labels: &'a LabelIndexer,
        offsets: &'a LabelIndexer,
        data: &'a TArray,
    ) -> Result<Self, IndexError> {
        let labels_axis = find_dimension(data, dimension_name)?;
        let offsets_axis = find_dimension(data, OFFSETS_DIMENSION)?;
        if labels_axis == offsets_axis {
            return Err(InvalidIndexKindError::new(format!(
                "{dimension_name} cannot be indexed as lines"
            ))
            .into());
        }
        Ok(Self {
            dimension_name: dimension_name.to_string(),
            labels,
            offsets,
            data,
            labels_axis,
            offsets_axis,
        })
    }

    /// Return the dimension name of the lines.
    #[must_use]
    pub fn dimension_name(&self) -> &str {
        &self.dimension_name
    }

    /// Return the number of lines.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.data.shape()[self.labels_axis]
    }

    /// Returns true if there are no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the lines selected by `index`.
    ///
    /// `index` is a line label index, or a `(line label index, offset label index)` pair.
    /// The offset defaults to the first offset.
    ///
    /// # Errors
    /// Returns an [`IndexError`] if a label is not found, a label range does not map to a single slice of lines or offsets, or the read fails.
    pub fn get(&self, index: &LogicalIndex) -> Result<ArrayD<TArray::Element>, IndexError> {
        let (labels, offsets) = match index {
            LogicalIndex::MultiAxis(indices) => match indices.as_slice() {
                [labels, offsets] => (labels.clone(), offsets.clone()),
                _ => {
                    return Err(InvalidIndexKindError::new(format!(
                        "{index} is not a line or (line, offset) index"
                    ))
                    .into())
                }
            },
            labels => (labels.clone(), LogicalIndex::Scalar(self.offsets.labels()[0])),
        };

        let label_index = self.labels.lookup_index(&labels)?;
        let offset_index = self.offsets.lookup_index(&offsets)?;
        let multi_labels = label_index.is_range();
        let multi_offsets = offset_index.is_range();

        let mut composite =
            vec![LogicalIndex::Range(SliceSpec::full()); self.data.dimensionality()];
        composite[self.labels_axis] = label_index.into();
        composite[self.offsets_axis] = offset_index.into();
        let mut data =
            NormalizedArray::new(self.data).read(&LogicalIndex::MultiAxis(composite))?;

        let (labels_axis, offsets_axis) = (self.labels_axis, self.offsets_axis);
        let major_axis = match (multi_labels, multi_offsets) {
            (true, true) => labels_axis,
            (true, false) => labels_axis - usize::from(labels_axis > offsets_axis),
            (false, true) => offsets_axis - usize::from(offsets_axis > labels_axis),
            (false, false) => 0,
        };
        if major_axis > 0 {
            data.swap_axes(0, major_axis);
        }
        if multi_labels && multi_offsets {
            let offsets_position = if offsets_axis == 0 {
                major_axis
            } else {
                offsets_axis
            };
            if offsets_position != 1 {
                data.swap_axes(1, offsets_position);
            }
        }
        if self.dimension_name == SAMPLES_DIMENSION && multi_labels && data.ndim() >= 2 {
            let ndim = data.ndim();
            data.swap_axes(ndim - 1, ndim - 2);
        }
        tracing::trace!(
            "{self}[{index}] major axis {major_axis} -> shape {:?}",
            data.shape()
        );
        Ok(data)
    }
}
