use ndarray::{ArrayD, IxDyn};

use crate::{
    backend::{find_dimension, NormalizedArray, ReadableArrayTraits},
    index::{LogicalIndex, SliceSpec},
    index_errors::{IncompatibleDimensionalityError, IndexError, InvalidIndexKindError},
    trace_indexer::TraceIndexerTraits,
};

use super::SAMPLES_DIMENSION;

/// Traces, addressed by a flat trace index.
///
/// A read of a single trace returns its samples, and a read of multiple traces returns `(traces, samples)`.
pub struct Traces<'a, TArray: ?Sized, TIndexer: ?Sized> {
    data: &'a TArray,
    indexer: &'a TIndexer,
    trace_axes: Vec<usize>,
    samples_axis: Option<usize>,
}

impl<TArray: ?Sized, TIndexer: ?Sized> std::fmt::Debug for Traces<'_, TArray, TIndexer> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Traces(trace_axes={:?}, samples_axis={:?})",
            self.trace_axes, self.samples_axis
        )
    }
}

impl<'a, TArray, TIndexer> Traces<'a, TArray, TIndexer>
where
    TArray: ?Sized + ReadableArrayTraits,
    TIndexer: ?Sized + TraceIndexerTraits,
{
    /// Create traces of `data` laid out as the trace axes of `indexer` followed by a sample axis.
    ///
    /// # Errors
    /// Returns an [`IndexError`] if the shape of `data` is incompatible with `indexer`.
    pub fn new(data: &'a TArray, indexer: &'a TIndexer) -> Result<Self, IndexError> {
        let trace_ndim = indexer.shape().len();
        Self::new_with_axes(data, indexer, (0..trace_ndim).collect(), Some(trace_ndim))
    }

    /// Create traces of `data` with the trace axes of `indexer` along the dimensions named `trace_dimensions` and samples along the `samples` dimension.
    ///
    /// # Errors
    /// Returns an [`IndexError`] if a dimension is missing or the shape of `data` is incompatible with `indexer`.
    pub fn new_with_dimensions(
        data: &'a TArray,
        indexer: &'a TIndexer,
        trace_dimensions: &[&str],
    ) -> Result<Self, IndexError> {
        let trace_axes = trace_dimensions
            .iter()
            .map(|name| find_dimension(data, name))
            .collect::<Result<Vec<_>, _>>()?;
        let samples_axis = find_dimension(data, SAMPLES_DIMENSION)?;
        Self::new_with_axes(data, indexer, trace_axes, Some(samples_axis))
    }

    /// Create per-trace values of `data`, which has the trace axes of `indexer` at `trace_axes` and no sample axis.
    pub(super) fn new_without_samples(
        data: &'a TArray,
        indexer: &'a TIndexer,
        trace_axes: Vec<usize>,
    ) -> Result<Self, IndexError> {
        Self::new_with_axes(data, indexer, trace_axes, None)
    }

    fn new_with_axes(
        data: &'a TArray,
        indexer: &'a TIndexer,
        trace_axes: Vec<usize>,
        samples_axis: Option<usize>,
    ) -> Result<Self, IndexError> {
        let shape = data.shape();
        let ndim = indexer.shape().len() + usize::from(samples_axis.is_some());
        if shape.len() != ndim || trace_axes.len() != indexer.shape().len() {
            return Err(IncompatibleDimensionalityError::new(shape.len(), ndim).into());
        }
        for (axis, extent) in std::iter::zip(&trace_axes, indexer.shape()) {
            if shape[*axis] != *extent {
                return Err(IndexError::IncompatibleExtent(
                    format!("axis {axis}"),
                    shape[*axis],
                    *extent,
                ));
            }
        }
        Ok(Self {
            data,
            indexer,
            trace_axes,
            samples_axis,
        })
    }

    /// Return the number of traces.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.indexer.len()
    }

    /// Returns true if there are no traces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the traces selected by `index`.
    ///
    /// `index` is a trace index, or a `(trace index, sample index)` pair if the traces have samples.
    ///
    /// # Errors
    /// Returns an [`IndexError`] if the index is invalid or the read fails.
    pub fn get(&self, index: &LogicalIndex) -> Result<ArrayD<TArray::Element>, IndexError> {
        let (trace_index, samples) = match index {
            LogicalIndex::MultiAxis(indices) if self.samples_axis.is_some() => {
                match indices.as_slice() {
                    [trace_index, samples] => (trace_index, Some(samples.clone())),
                    _ => {
                        return Err(InvalidIndexKindError::new(format!(
                            "{index} is not a trace or (trace, sample) index"
                        ))
                        .into())
                    }
                }
            }
            LogicalIndex::MultiAxis(_) => {
                return Err(
                    InvalidIndexKindError::new(format!("{index} is not a trace index")).into(),
                )
            }
            trace_index => (
                trace_index,
                self.samples_axis.map(|_| LogicalIndex::Range(SliceSpec::full())),
            ),
        };
        let selection = self.indexer.resolve(trace_index)?;
        let bounding_box = selection.bounding_box();

        let mut composite =
            vec![LogicalIndex::Range(SliceSpec::full()); self.data.dimensionality()];
        let mut kept_axes: Vec<(usize, bool)> = Vec::with_capacity(composite.len());
        for (axis, axis_index) in std::iter::zip(&self.trace_axes, bounding_box.iter()) {
            composite[*axis] = (*axis_index).into();
            kept_axes.push((*axis, axis_index.is_range()));
        }
        if let (Some(samples_axis), Some(samples)) = (self.samples_axis, samples) {
            kept_axes.push((samples_axis, !matches!(samples, LogicalIndex::Scalar(_))));
            composite[samples_axis] = samples;
        }
        let data = NormalizedArray::new(self.data).read(&LogicalIndex::MultiAxis(composite))?;

        // Permute the read to the bounding box axis order followed by samples
        let kept_axes: Vec<usize> = kept_axes
            .into_iter()
            .filter_map(|(axis, kept)| kept.then_some(axis))
            .collect();
        let mut physical_order = kept_axes.clone();
        physical_order.sort_unstable();
        let permutation: Vec<usize> = kept_axes
            .iter()
            .filter_map(|axis| physical_order.iter().position(|physical| physical == axis))
            .collect();
        let data = data.permuted_axes(IxDyn(&permutation));
        selection.apply(data)
    }
}
