//! Normalization of logical indices to ascending backend reads.
//!
//! A backend only reads single positions and ascending contiguous ranges of an axis.
//! [`normalize_index`] maps a [`LogicalIndex`] to one [`NormalizedAxis`] per axis, each being a read selector plus the step, reversal, or gather that must be applied to the read to recover the requested positions in request order.

use std::ops::Range;

use crate::{
    backend::ArraySelector,
    index_errors::{IndexError, IndexOutOfBoundsError, InvalidIndexKindError},
};

use super::{EnsureSlice, IndexOptions, LogicalIndex, OrdinalSlice, SliceSpec};

/// An ascending strided range of positions of an axis, optionally reversed after the read.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AxisRange {
    range: Range<u64>,
    step: u64,
    reverse: bool,
}

impl AxisRange {
    /// Create an axis range reading every `step`th position of `range`, reversed if `reverse`.
    ///
    /// # Errors
    /// Returns [`InvalidIndexKindError`] if `step` is zero.
    pub fn new(range: Range<u64>, step: u64, reverse: bool) -> Result<Self, InvalidIndexKindError> {
        if step == 0 {
            Err(InvalidIndexKindError::new("slice step cannot be zero"))
        } else {
            Ok(Self {
                range,
                step,
                reverse,
            })
        }
    }

    fn empty() -> Self {
        Self {
            range: 0..0,
            step: 1,
            reverse: false,
        }
    }

    /// Return the ascending range read from the backend.
    #[must_use]
    pub fn range(&self) -> &Range<u64> {
        &self.range
    }

    /// Return the step applied to the read.
    #[must_use]
    pub const fn step(&self) -> u64 {
        self.step
    }

    /// Returns true if the read is reversed after stepping.
    #[must_use]
    pub const fn reverse(&self) -> bool {
        self.reverse
    }

    /// Return the number of positions selected.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.range
            .end
            .saturating_sub(self.range.start)
            .div_ceil(self.step)
    }

    /// Returns true if no positions are selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the selected positions in request order.
    #[must_use]
    pub fn positions(&self) -> Vec<u64> {
        let mut positions: Vec<u64> = (self.range.start..self.range.end)
            .step_by(usize::try_from(self.step).unwrap_or(usize::MAX))
            .collect();
        if self.reverse {
            positions.reverse();
        }
        positions
    }
}

/// A normalized index of a single axis.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NormalizedAxis {
    /// A single position, the axis is removed from the read.
    Index(u64),
    /// A strided range of positions.
    Range(AxisRange),
    /// A contiguous range of positions, from which the positions (relative to the range start) are gathered.
    Gather {
        /// The ascending range read from the backend.
        range: Range<u64>,
        /// The positions of the read to gather, in request order.
        positions: Vec<usize>,
    },
}

impl NormalizedAxis {
    /// Return the backend selector of the axis.
    #[must_use]
    pub fn selector(&self) -> ArraySelector {
        match self {
            Self::Index(index) => ArraySelector::Index(*index),
            Self::Range(axis_range) => ArraySelector::Range(axis_range.range.clone()),
            Self::Gather { range, .. } => ArraySelector::Range(range.clone()),
        }
    }

    /// Return the number of positions selected, or [`None`] if the axis is removed.
    #[must_use]
    pub fn len(&self) -> Option<u64> {
        match self {
            Self::Index(_) => None,
            Self::Range(axis_range) => Some(axis_range.len()),
            Self::Gather { positions, .. } => Some(positions.len() as u64),
        }
    }
}

/// Resolve a position of an axis with `extent` positions, negative positions counting from the end.
///
/// # Errors
/// Returns [`IndexError::IndexOutOfBounds`] if the position is outside of the axis.
pub fn normalize_position(index: i64, extent: u64) -> Result<u64, IndexError> {
    let resolved = if index < 0 {
        extent.checked_sub(index.unsigned_abs())
    } else {
        Some(index.unsigned_abs())
    };
    resolved
        .filter(|position| *position < extent)
        .ok_or_else(|| IndexOutOfBoundsError::new(index, extent).into())
}

/// Normalize a slice of an axis with `extent` positions to an ascending read.
///
/// A slice with a negative step is read from the last position it enumerates up to and including its first, then reversed.
///
/// # Errors
/// Returns [`IndexError::InvalidIndexKind`] if the slice step is zero.
pub fn normalize_slice(slice: &SliceSpec, extent: u64) -> Result<AxisRange, IndexError> {
    let positions = slice.indices(extent)?;
    axis_range(&positions, extent)
}

fn axis_range(positions: &OrdinalSlice, extent: u64) -> Result<AxisRange, IndexError> {
    let Some((min, max)) = positions.min_max() else {
        return Ok(AxisRange::empty());
    };
    let lower = normalize_bound(min, extent)?;
    let upper = normalize_bound(max, extent)?;
    Ok(AxisRange::new(
        lower..upper + 1,
        positions.step().unsigned_abs(),
        positions.step() < 0,
    )?)
}

fn normalize_bound(position: i64, extent: u64) -> Result<u64, IndexError> {
    u64::try_from(position)
        .ok()
        .filter(|position| *position < extent)
        .ok_or_else(|| IndexOutOfBoundsError::new(position, extent).into())
}

/// Normalize an explicit set of positions of an axis with `extent` positions.
///
/// A set forming a single arithmetic progression is read as a strided range.
/// Any other set is read as its enclosing range and gathered if the bounding box fallback is enabled.
///
/// # Errors
/// Returns an [`IndexError`] if a position is out of bounds, or if the set is not a progression and the bounding box fallback is disabled.
pub fn normalize_gather(
    values: &[i64],
    extent: u64,
    options: &IndexOptions,
) -> Result<NormalizedAxis, IndexError> {
    if values.is_empty() {
        return Ok(NormalizedAxis::Range(AxisRange::empty()));
    }
    let positions = values
        .iter()
        .map(|value| normalize_position(*value, extent))
        .collect::<Result<Vec<_>, _>>()?;
    let signed = positions
        .iter()
        .map(|position| i64::try_from(*position))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| InvalidIndexKindError::new("position exceeds the index range"))?;
    match signed.ensure_slice() {
        Ok(slice) => Ok(NormalizedAxis::Range(axis_range(&slice, extent)?)),
        Err(IndexError::NonRepresentableRange(_) | IndexError::InvalidIndexKind(_))
            if options.bounding_box_fallback() =>
        {
            let lower = positions.iter().min().copied().unwrap_or_default();
            let upper = positions.iter().max().copied().unwrap_or_default();
            tracing::trace!("gathering {values:?} from {lower}..{}", upper + 1);
            let positions = positions
                .iter()
                .map(|position| usize::try_from(position - lower))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| InvalidIndexKindError::new("gather range exceeds the address space"))?;
            Ok(NormalizedAxis::Gather {
                range: lower..upper + 1,
                positions,
            })
        }
        Err(err) => Err(err),
    }
}

/// Normalize a logical index of an array with `shape` to one [`NormalizedAxis`] per axis.
///
/// # Errors
/// Returns an [`IndexError`] if the index is malformed or incompatible with `shape`.
pub fn normalize_index(
    index: &LogicalIndex,
    shape: &[u64],
) -> Result<Vec<NormalizedAxis>, IndexError> {
    normalize_index_opt(index, shape, &IndexOptions::default())
}

/// Explicit options version of [`normalize_index`].
#[allow(clippy::missing_errors_doc)]
pub fn normalize_index_opt(
    index: &LogicalIndex,
    shape: &[u64],
    options: &IndexOptions,
) -> Result<Vec<NormalizedAxis>, IndexError> {
    index
        .expand(shape.len())?
        .iter()
        .zip(shape)
        .map(|(index, extent)| match index {
            LogicalIndex::Scalar(index) => {
                Ok(NormalizedAxis::Index(normalize_position(*index, *extent)?))
            }
            LogicalIndex::Range(slice) => {
                Ok(NormalizedAxis::Range(normalize_slice(slice, *extent)?))
            }
            LogicalIndex::Gather(values) => normalize_gather(values, *extent, options),
            LogicalIndex::MultiAxis(_) | LogicalIndex::Ellipsis => Err(InvalidIndexKindError::new(
                format!("{index} is not a single axis index"),
            )
            .into()),
        })
        .collect()
}
