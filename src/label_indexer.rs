//! Label-to-ordinal translation.
//!
//! Lines and offsets of a survey are addressed by their labels (e.g. inline numbers `1000, 1002, 1004, ...`), which need not be zero-based, contiguous, or sorted in storage order.
//! A [`LabelIndexer`] maps labels to the dense storage ordinals of an axis.

use crate::{
    data_type::Element,
    index::{AxisIndex, EnsureSlice, LogicalIndex, OrdinalSlice, SliceSpec},
    index_errors::{
        EmptyLabelRangeError, IndexError, InvalidIndexKindError, InvalidLabelsError,
        LabelNotFoundError, NonUniformLabelRangeError,
    },
};

/// A label indexer.
///
/// Labels are literal values: a negative label is a label, it never counts back from the end of the label space.
#[derive(Clone, Debug)]
pub struct LabelIndexer {
    labels: Vec<i64>,
    sorted_labels: Vec<i64>,
    sorter: Vec<usize>,
}

impl LabelIndexer {
    /// Create a new label indexer from `labels` in storage order.
    ///
    /// # Errors
    /// Returns [`InvalidLabelsError`] if the labels are not integers, are empty, or contain a duplicate.
    pub fn new<T: Element>(labels: &[T]) -> Result<Self, InvalidLabelsError> {
        if !T::DATA_TYPE.is_integer() {
            return Err(InvalidLabelsError::NonInteger(T::DATA_TYPE));
        }
        let labels = labels
            .iter()
            .map(|label| label.to_index())
            .collect::<Option<Vec<_>>>()
            .ok_or(InvalidLabelsError::OutOfRange)?;
        if labels.is_empty() {
            return Err(InvalidLabelsError::Empty);
        }
        let mut sorter: Vec<usize> = (0..labels.len()).collect();
        sorter.sort_by_key(|ordinal| labels[*ordinal]);
        let sorted_labels: Vec<i64> = sorter.iter().map(|ordinal| labels[*ordinal]).collect();
        if let Some(window) = sorted_labels
            .windows(2)
            .find(|window| window[0] == window[1])
        {
            return Err(InvalidLabelsError::Duplicate(window[0]));
        }
        Ok(Self {
            labels,
            sorted_labels,
            sorter,
        })
    }

    /// Return the number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if there are no labels. Never true for a constructed indexer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Return the labels in storage order.
    #[must_use]
    pub fn labels(&self) -> &[i64] {
        &self.labels
    }

    /// Return the smallest label.
    #[must_use]
    pub fn min_label(&self) -> i64 {
        self.sorted_labels[0]
    }

    /// Return the largest label.
    #[must_use]
    pub fn max_label(&self) -> i64 {
        self.sorted_labels[self.sorted_labels.len() - 1]
    }

    /// Return the storage ordinal of `label`.
    ///
    /// # Errors
    /// Returns [`LabelNotFoundError`] if `label` is not a label.
    pub fn lookup(&self, label: i64) -> Result<u64, LabelNotFoundError> {
        self.sorted_labels
            .binary_search(&label)
            .map(|rank| self.sorter[rank] as u64)
            .map_err(|_| LabelNotFoundError::from(label))
    }

    /// Return the storage ordinals of the labels selected by `label_slice`, in slice order.
    ///
    /// Open bounds are clamped to the label domain and absent labels are skipped.
    ///
    /// # Errors
    /// Returns [`InvalidIndexKindError`] if the slice step is zero.
    pub fn ordinals(&self, label_slice: &SliceSpec) -> Result<Vec<u64>, InvalidIndexKindError> {
        let step = label_slice.step_or_default();
        if step == 0 {
            return Err(InvalidIndexKindError::new("slice step cannot be zero"));
        }
        let on_progression = |label: i64, start: i64| {
            (i128::from(label) - i128::from(start)) % i128::from(step) == 0
        };
        // An open stop includes the last label, even at the bounds of the label type
        let ranks: Vec<usize> = if step > 0 {
            let start = label_slice
                .start()
                .map_or(self.min_label(), |start| start.max(self.min_label()));
            let lower = self.sorted_labels.partition_point(|label| *label < start);
            let upper = label_slice.stop().map_or(self.sorted_labels.len(), |stop| {
                self.sorted_labels.partition_point(|label| *label < stop)
            });
            (lower..upper.max(lower))
                .filter(|rank| on_progression(self.sorted_labels[*rank], start))
                .collect()
        } else {
            let start = label_slice
                .start()
                .map_or(self.max_label(), |start| start.min(self.max_label()));
            let lower = label_slice.stop().map_or(0, |stop| {
                self.sorted_labels.partition_point(|label| *label <= stop)
            });
            let upper = self.sorted_labels.partition_point(|label| *label <= start);
            (lower..upper.max(lower))
                .rev()
                .filter(|rank| on_progression(self.sorted_labels[*rank], start))
                .collect()
        };
        Ok(ranks
            .into_iter()
            .map(|rank| self.sorter[rank] as u64)
            .collect())
    }

    /// Return the storage ordinals of the labels selected by `label_slice` as an [`OrdinalSlice`].
    ///
    /// # Errors
    /// Returns [`IndexError::EmptyLabelRange`] if no labels are selected.
    /// Returns [`IndexError::NonUniformLabelRange`] if the storage ordinals are not a single arithmetic progression.
    pub fn lookup_range(&self, label_slice: &SliceSpec) -> Result<OrdinalSlice, IndexError> {
        let ordinals = self.ordinals(label_slice)?;
        if ordinals.is_empty() {
            return Err(EmptyLabelRangeError::from(*label_slice).into());
        }
        ordinals_to_slice(*label_slice, ordinals)
    }

    /// Resolve a single axis label index to an index of storage ordinals.
    ///
    /// A scalar label resolves to its ordinal and a label slice or label set resolves to an ordinal slice.
    ///
    /// # Errors
    /// Returns an [`IndexError`] if a label is not found, a label range is empty or non-uniform, or `index` spans multiple axes.
    pub fn lookup_index(&self, index: &LogicalIndex) -> Result<AxisIndex, IndexError> {
        let slice = match index {
            LogicalIndex::Scalar(label) => {
                let ordinal = self.lookup(*label)?;
                return Ok(AxisIndex::Scalar(i64::try_from(ordinal).map_err(|_| {
                    InvalidIndexKindError::new("ordinal exceeds the index range")
                })?));
            }
            LogicalIndex::Range(label_slice) => self.lookup_range(label_slice)?,
            LogicalIndex::Gather(labels) => {
                if labels.is_empty() {
                    return Err(InvalidIndexKindError::new("empty label set").into());
                }
                let ordinals = labels
                    .iter()
                    .map(|label| self.lookup(*label))
                    .collect::<Result<Vec<_>, _>>()?;
                ordinals_to_slice(labels.clone(), ordinals)?
            }
            LogicalIndex::MultiAxis(_) | LogicalIndex::Ellipsis => {
                return Err(InvalidIndexKindError::new(format!(
                    "{index} is not a single axis label index"
                ))
                .into())
            }
        };
        Ok(AxisIndex::Range(slice.to_slice_spec()?))
    }
}

/// Convert the non-empty storage `ordinals` of the requested `labels` to an [`OrdinalSlice`].
fn ordinals_to_slice(
    labels: impl Into<LogicalIndex>,
    ordinals: Vec<u64>,
) -> Result<OrdinalSlice, IndexError> {
    let signed = ordinals
        .iter()
        .map(|ordinal| i64::try_from(*ordinal))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| InvalidIndexKindError::new("ordinal exceeds the index range"))?;
    match signed.ensure_slice() {
        Ok(slice) => Ok(slice),
        Err(IndexError::NonRepresentableRange(_) | IndexError::InvalidIndexKind(_)) => {
            Err(NonUniformLabelRangeError::new(labels, ordinals).into())
        }
        Err(err) => Err(err),
    }
}
