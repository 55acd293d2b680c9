//! Trace indexers.
//!
//! Traces are addressed by a flat trace index.
//! Unstructured data stores traces along a single axis, so a trace index is also a storage index.
//! Structured data stores traces on a grid (e.g. `slow x fast x offsets`), so a set of traces is read as the [`BoundingBox`] enclosing their grid cells, from which the requested traces are gathered with a [`PostSelection`].

use itertools::Itertools;
use ndarray::{ArrayD, Axis};
use serde::{Deserialize, Serialize};

use crate::{
    index::{
        normalize_position, AxisIndex, BoundingBox, EnsureSlice, IndexOptions, LogicalIndex,
        OrdinalSlice, SliceSpec,
    },
    index_errors::{IndexError, InvalidIndexKindError},
};

/// Unravel a linearised index to ND indices.
///
/// `index` must be less than the product of `shape`.
#[must_use]
pub fn unravel_index(mut index: u64, shape: &[u64]) -> Vec<u64> {
    let mut indices = vec![0; shape.len()];
    for (indices_i, &dim) in std::iter::zip(indices.iter_mut().rev(), shape.iter().rev()) {
        *indices_i = index % dim;
        index /= dim;
    }
    indices
}

/// Ravel ND indices to a linearised index.
#[must_use]
pub fn ravel_indices(indices: &[u64], shape: &[u64]) -> u64 {
    let mut index: u64 = 0;
    let mut count = 1;
    for (i, s) in std::iter::zip(indices, shape).rev() {
        index += i * count;
        count *= s;
    }
    index
}

/// The selection to apply to a bounding box read, flattened over the bounding box axes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostSelection {
    /// Select the entire bounding box.
    All,
    /// Select the positions of the flattened bounding box, in order.
    Positions(Vec<usize>),
}

/// A resolved trace index: a [`BoundingBox`] to read and the [`PostSelection`] to apply to the read.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraceSelection {
    bounding_box: BoundingBox,
    post_selection: PostSelection,
}

impl TraceSelection {
    /// Create a new trace selection.
    #[must_use]
    pub fn new(bounding_box: BoundingBox, post_selection: PostSelection) -> Self {
        Self {
            bounding_box,
            post_selection,
        }
    }

    /// Return the bounding box.
    #[must_use]
    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    /// Return the post selection.
    #[must_use]
    pub fn post_selection(&self) -> &PostSelection {
        &self.post_selection
    }

    /// Apply the post selection to `data`, a read of the bounding box followed by any trailing axes.
    ///
    /// With [`PostSelection::Positions`], the bounding box axes are flattened into a single axis holding the selected traces.
    ///
    /// # Errors
    /// Returns an [`IndexError`] if `data` does not have an axis per range axis of the bounding box or a position is outside of the bounding box.
    pub fn apply<T: Clone>(&self, data: ArrayD<T>) -> Result<ArrayD<T>, IndexError> {
        let PostSelection::Positions(positions) = &self.post_selection else {
            return Ok(data);
        };
        let box_ndim = self.bounding_box.num_range_axes();
        if data.ndim() < box_ndim {
            return Err(InvalidIndexKindError::new(format!(
                "read with {} axes cannot be selected from bounding box {}",
                data.ndim(),
                self.bounding_box
            ))
            .into());
        }
        let box_len: usize = data.shape()[..box_ndim].iter().product();
        if let Some(position) = positions.iter().find(|position| **position >= box_len) {
            return Err(IndexError::InvalidPostSelection(*position, box_len));
        }
        let shape: Vec<usize> = std::iter::once(box_len)
            .chain(data.shape()[box_ndim..].iter().copied())
            .collect();
        let flattened = data
            .to_shape(shape)
            .map_err(|err| InvalidIndexKindError::new(err.to_string()))?;
        Ok(flattened.select(Axis(0), positions))
    }
}

/// Trace indexer traits.
pub trait TraceIndexerTraits {
    /// Return the shape of the trace axes of the storage.
    fn shape(&self) -> &[u64];

    /// Return the number of traces.
    fn len(&self) -> u64 {
        self.shape().iter().product()
    }

    /// Returns true if there are no traces.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve a trace index to a [`TraceSelection`].
    ///
    /// # Errors
    /// Returns an [`IndexError`] if the trace index is invalid.
    fn resolve(&self, trace_index: &LogicalIndex) -> Result<TraceSelection, IndexError> {
        self.resolve_opt(trace_index, &IndexOptions::default())
    }

    /// Explicit options version of [`resolve`](TraceIndexerTraits::resolve).
    #[allow(clippy::missing_errors_doc)]
    fn resolve_opt(
        &self,
        trace_index: &LogicalIndex,
        options: &IndexOptions,
    ) -> Result<TraceSelection, IndexError>;
}

fn resolve_trace_positions(trace_index: &LogicalIndex, len: u64) -> Result<Vec<u64>, IndexError> {
    match trace_index {
        LogicalIndex::Range(slice) => Ok(slice
            .indices(len)?
            .iter()
            .map(i64::unsigned_abs)
            .collect()),
        LogicalIndex::Gather(indices) => indices
            .iter()
            .map(|index| normalize_position(*index, len))
            .collect(),
        LogicalIndex::Ellipsis => Ok((0..len).collect()),
        LogicalIndex::Scalar(_) | LogicalIndex::MultiAxis(_) => Err(InvalidIndexKindError::new(
            format!("{trace_index} is not a set of trace indices"),
        )
        .into()),
    }
}

/// A trace indexer for unstructured data, with traces along a single axis.
#[derive(Clone, Debug)]
pub struct TraceIndexer {
    shape: Vec<u64>,
}

impl TraceIndexer {
    /// Create a new trace indexer over `len` traces.
    #[must_use]
    pub fn new(len: u64) -> Self {
        Self { shape: vec![len] }
    }
}

impl TraceIndexerTraits for TraceIndexer {
    fn shape(&self) -> &[u64] {
        &self.shape
    }

    fn resolve_opt(
        &self,
        trace_index: &LogicalIndex,
        options: &IndexOptions,
    ) -> Result<TraceSelection, IndexError> {
        let axis_index = match trace_index {
            LogicalIndex::Scalar(index) => AxisIndex::Scalar(*index),
            LogicalIndex::Range(slice) => AxisIndex::Range(*slice),
            LogicalIndex::Ellipsis => AxisIndex::Range(SliceSpec::full()),
            LogicalIndex::Gather(_) => {
                let positions = resolve_trace_positions(trace_index, self.len())?;
                let (slice, post_selection) = gather_axis(&positions, options)?;
                return Ok(TraceSelection::new(
                    BoundingBox::new(vec![AxisIndex::Range(slice.to_slice_spec()?)]),
                    post_selection,
                ));
            }
            LogicalIndex::MultiAxis(_) => {
                return Err(InvalidIndexKindError::new(format!(
                    "{trace_index} is not a trace index"
                ))
                .into())
            }
        };
        Ok(TraceSelection::new(
            BoundingBox::new(vec![axis_index]),
            PostSelection::All,
        ))
    }
}

fn signed_positions(positions: &[u64]) -> Result<Vec<i64>, IndexError> {
    positions
        .iter()
        .map(|position| i64::try_from(*position))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| InvalidIndexKindError::new("position exceeds the index range").into())
}

fn gather_axis(
    positions: &[u64],
    options: &IndexOptions,
) -> Result<(OrdinalSlice, PostSelection), IndexError> {
    if positions.is_empty() {
        return Ok((OrdinalSlice::new(0, 0, 1)?, PostSelection::Positions(vec![])));
    }
    match signed_positions(positions)?.ensure_slice() {
        Ok(slice) => Ok((slice, PostSelection::All)),
        Err(IndexError::NonRepresentableRange(_) | IndexError::InvalidIndexKind(_))
            if options.bounding_box_fallback() =>
        {
            let (lower, upper) = positions
                .iter()
                .copied()
                .minmax()
                .into_option()
                .unwrap_or_default();
            tracing::debug!("widening trace positions to {lower}..{}", upper + 1);
            let slice = widened_slice(lower, upper)?;
            let post_selection = positions
                .iter()
                .map(|position| usize::try_from(position - lower))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| InvalidIndexKindError::new("position exceeds the address space"))?;
            Ok((slice, PostSelection::Positions(post_selection)))
        }
        Err(err) => Err(err),
    }
}

fn widened_slice(lower: u64, upper: u64) -> Result<OrdinalSlice, IndexError> {
    let to_signed = |position: u64| {
        i64::try_from(position)
            .map_err(|_| InvalidIndexKindError::new("position exceeds the index range"))
    };
    Ok(OrdinalSlice::new(to_signed(lower)?, to_signed(upper + 1)?, 1)?)
}

/// A trace indexer for structured data, with traces on a grid.
///
/// Trace indices are raveled over the grid in C order, so the last axis varies fastest.
#[derive(Clone, Debug)]
pub struct StructuredTraceIndexer {
    shape: Vec<u64>,
}

impl StructuredTraceIndexer {
    /// Create a new structured trace indexer over a grid of traces with `shape`.
    #[must_use]
    pub fn new(shape: Vec<u64>) -> Self {
        Self { shape }
    }

    fn resolve_positions(
        &self,
        positions: &[u64],
        options: &IndexOptions,
    ) -> Result<TraceSelection, IndexError> {
        if positions.is_empty() {
            let empty = SliceSpec::new(Some(0), Some(0), Some(1));
            return Ok(TraceSelection::new(
                BoundingBox::new(vec![AxisIndex::Range(empty); self.shape.len()]),
                PostSelection::Positions(vec![]),
            ));
        }

        let coordinates = positions
            .iter()
            .map(|position| unravel_index(*position, &self.shape))
            .collect::<Vec<_>>();

        let axis_slices = (0..self.shape.len())
            .map(|axis| {
                let unique = coordinates
                    .iter()
                    .map(|coordinate| coordinate[axis])
                    .sorted_unstable()
                    .dedup()
                    .collect::<Vec<_>>();
                match signed_positions(&unique)?.ensure_slice() {
                    Err(IndexError::NonRepresentableRange(err))
                        if options.bounding_box_fallback() =>
                    {
                        let (lower, upper) = (unique[0], unique[unique.len() - 1]);
                        tracing::debug!(
                            "widening axis {axis} positions {:?} to {lower}..{}",
                            err.values(),
                            upper + 1
                        );
                        widened_slice(lower, upper)
                    }
                    result => result,
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let box_shape = axis_slices.iter().map(OrdinalSlice::len).collect::<Vec<_>>();
        let post_selection = coordinates
            .iter()
            .map(|coordinate| {
                let ranks = std::iter::zip(coordinate, &axis_slices)
                    .map(|(position, slice)| {
                        i64::try_from(*position)
                            .ok()
                            .and_then(|position| slice.position(position))
                            .map(|rank| rank as u64)
                    })
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(|| {
                        InvalidIndexKindError::new("trace coordinate outside of bounding box")
                    })?;
                usize::try_from(ravel_indices(&ranks, &box_shape)).map_err(|_| {
                    InvalidIndexKindError::new("bounding box exceeds the address space").into()
                })
            })
            .collect::<Result<Vec<_>, IndexError>>()?;

        let bounding_box = axis_slices
            .iter()
            .map(|slice| Ok(AxisIndex::Range(slice.to_slice_spec()?)))
            .collect::<Result<Vec<_>, IndexError>>()?;
        Ok(TraceSelection::new(
            BoundingBox::new(bounding_box),
            PostSelection::Positions(post_selection),
        ))
    }
}

impl TraceIndexerTraits for StructuredTraceIndexer {
    fn shape(&self) -> &[u64] {
        &self.shape
    }

    fn resolve_opt(
        &self,
        trace_index: &LogicalIndex,
        options: &IndexOptions,
    ) -> Result<TraceSelection, IndexError> {
        if let LogicalIndex::Scalar(index) = trace_index {
            let position = normalize_position(*index, self.len())?;
            let bounding_box = unravel_index(position, &self.shape)
                .into_iter()
                .map(|index| {
                    i64::try_from(index)
                        .map(AxisIndex::Scalar)
                        .map_err(|_| InvalidIndexKindError::new("position exceeds the index range"))
                })
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(TraceSelection::new(
                BoundingBox::new(bounding_box),
                PostSelection::All,
            ));
        }
        let positions = resolve_trace_positions(trace_index, self.len())?;
        self.resolve_positions(&positions, options)
    }
}
