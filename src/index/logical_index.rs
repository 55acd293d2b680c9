use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive};

use derive_more::{Deref, From};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::index_errors::{IncompatibleDimensionalityError, IndexError, InvalidIndexKindError};

use super::SliceSpec;

/// A logical index into a dataset view.
///
/// The kind of an index is decided once, when it is constructed, and matched exhaustively by every consumer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalIndex {
    /// A single position or label.
    Scalar(i64),
    /// A slice of positions or labels.
    Range(SliceSpec),
    /// An explicit set of positions or labels.
    Gather(Vec<i64>),
    /// One index per axis.
    MultiAxis(Vec<LogicalIndex>),
    /// Every position of the axes not otherwise indexed.
    Ellipsis,
}

impl std::fmt::Display for LogicalIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar(index) => write!(f, "{index}"),
            Self::Range(slice) => write!(f, "{slice}"),
            Self::Gather(indices) => write!(f, "[{}]", indices.iter().format(", ")),
            Self::MultiAxis(indices) => write!(f, "({})", indices.iter().format(", ")),
            Self::Ellipsis => write!(f, "..."),
        }
    }
}

impl LogicalIndex {
    /// Create an index over every position of every axis.
    #[must_use]
    pub const fn all() -> Self {
        Self::Ellipsis
    }

    /// Expand the index to exactly one [`AxisIndex`]-like index per axis of an array with `dimensionality` axes.
    ///
    /// Nested [`MultiAxis`](LogicalIndex::MultiAxis) indices are flattened, an [`Ellipsis`](LogicalIndex::Ellipsis) expands to full slices over the axes it spans, and trailing axes default to full slices.
    /// The returned indices are never [`MultiAxis`](LogicalIndex::MultiAxis) or [`Ellipsis`](LogicalIndex::Ellipsis).
    ///
    /// # Errors
    /// Returns [`IndexError::IncompatibleDimensionality`] if there are more indices than axes, or [`IndexError::InvalidIndexKind`] if there is more than one ellipsis.
    pub fn expand(&self, dimensionality: usize) -> Result<Vec<LogicalIndex>, IndexError> {
        let mut flat = Vec::new();
        self.flatten_into(&mut flat);
        let ellipses = flat
            .iter()
            .filter(|index| **index == Self::Ellipsis)
            .count();
        if ellipses > 1 {
            return Err(
                InvalidIndexKindError::new("an index can only have a single ellipsis").into(),
            );
        }
        let explicit = flat.len() - ellipses;
        if explicit > dimensionality {
            return Err(IncompatibleDimensionalityError::new(explicit, dimensionality).into());
        }
        let fill = dimensionality - explicit;
        let mut expanded = Vec::with_capacity(dimensionality);
        for index in flat {
            if index == Self::Ellipsis {
                expanded.extend(std::iter::repeat(Self::Range(SliceSpec::full())).take(fill));
            } else {
                expanded.push(index);
            }
        }
        expanded.resize(dimensionality, Self::Range(SliceSpec::full()));
        Ok(expanded)
    }

    fn flatten_into(&self, flat: &mut Vec<LogicalIndex>) {
        match self {
            Self::MultiAxis(indices) => {
                for index in indices {
                    index.flatten_into(flat);
                }
            }
            index => flat.push(index.clone()),
        }
    }
}

/// A single axis of a [`BoundingBox`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, From)]
pub enum AxisIndex {
    /// A single position, the axis is removed from the read.
    Scalar(i64),
    /// A slice of positions.
    Range(SliceSpec),
}

impl std::fmt::Display for AxisIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar(index) => write!(f, "{index}"),
            Self::Range(slice) => write!(f, "{slice}"),
        }
    }
}

impl AxisIndex {
    /// Returns true if the axis is kept in the read.
    #[must_use]
    pub const fn is_range(&self) -> bool {
        matches!(self, Self::Range(_))
    }
}

impl From<AxisIndex> for LogicalIndex {
    fn from(index: AxisIndex) -> Self {
        match index {
            AxisIndex::Scalar(index) => Self::Scalar(index),
            AxisIndex::Range(slice) => Self::Range(slice),
        }
    }
}

/// A bounding box: one [`AxisIndex`] per axis, enclosing every cell needed to answer a query.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Deref, From)]
pub struct BoundingBox(Vec<AxisIndex>);

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.0.iter().format(", "))
    }
}

impl BoundingBox {
    /// Create a bounding box from its axes.
    #[must_use]
    pub fn new(axes: Vec<AxisIndex>) -> Self {
        Self(axes)
    }

    /// Return the axes of the bounding box.
    #[must_use]
    pub fn axes(&self) -> &[AxisIndex] {
        &self.0
    }

    /// Return the number of axes kept in a read of the bounding box.
    #[must_use]
    pub fn num_range_axes(&self) -> usize {
        self.0.iter().filter(|axis| axis.is_range()).count()
    }
}

macro_rules! impl_logical_index_from_int {
    ($($int:ty),*) => {
        $(
            impl From<$int> for LogicalIndex {
                #[allow(clippy::cast_possible_wrap)]
                fn from(index: $int) -> Self {
                    Self::Scalar(index as i64)
                }
            }
        )*
    };
}

impl_logical_index_from_int!(i32, i64, u32, u64, usize);

macro_rules! impl_logical_index_from_range {
    ($($range:ty),*) => {
        $(
            impl From<$range> for LogicalIndex {
                fn from(range: $range) -> Self {
                    Self::Range(range.into())
                }
            }
        )*
    };
}

impl_logical_index_from_range!(
    Range<i32>,
    Range<i64>,
    RangeFrom<i32>,
    RangeFrom<i64>,
    RangeTo<i32>,
    RangeTo<i64>,
    RangeInclusive<i32>,
    RangeInclusive<i64>,
    RangeToInclusive<i32>,
    RangeToInclusive<i64>,
    RangeFull
);

impl From<SliceSpec> for LogicalIndex {
    fn from(slice: SliceSpec) -> Self {
        Self::Range(slice)
    }
}

impl From<Vec<i64>> for LogicalIndex {
    fn from(indices: Vec<i64>) -> Self {
        Self::Gather(indices)
    }
}

impl From<&[i64]> for LogicalIndex {
    fn from(indices: &[i64]) -> Self {
        Self::Gather(indices.to_vec())
    }
}

impl From<Vec<LogicalIndex>> for LogicalIndex {
    fn from(indices: Vec<LogicalIndex>) -> Self {
        Self::MultiAxis(indices)
    }
}

impl<A: Into<LogicalIndex>, B: Into<LogicalIndex>> From<(A, B)> for LogicalIndex {
    fn from((a, b): (A, B)) -> Self {
        Self::MultiAxis(vec![a.into(), b.into()])
    }
}

impl<A: Into<LogicalIndex>, B: Into<LogicalIndex>, C: Into<LogicalIndex>> From<(A, B, C)>
    for LogicalIndex
{
    fn from((a, b, c): (A, B, C)) -> Self {
        Self::MultiAxis(vec![a.into(), b.into(), c.into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logical_index_expand() {
        let full = LogicalIndex::Range(SliceSpec::full());
        assert_eq!(
            LogicalIndex::from(3).expand(3).unwrap(),
            vec![LogicalIndex::Scalar(3), full.clone(), full.clone()]
        );
        assert_eq!(
            LogicalIndex::from((LogicalIndex::Ellipsis, 1))
                .expand(3)
                .unwrap(),
            vec![full.clone(), full.clone(), LogicalIndex::Scalar(1)]
        );
        assert_eq!(
            LogicalIndex::from((1, (2..4, LogicalIndex::Ellipsis), 5))
                .expand(4)
                .unwrap(),
            vec![
                LogicalIndex::Scalar(1),
                LogicalIndex::Range((2..4).into()),
                full.clone(),
                LogicalIndex::Scalar(5)
            ]
        );
        assert_eq!(
            LogicalIndex::all().expand(2).unwrap(),
            vec![full.clone(), full]
        );
        assert!(matches!(
            LogicalIndex::from((1, 2, 3)).expand(2),
            Err(IndexError::IncompatibleDimensionality(_))
        ));
        assert!(matches!(
            LogicalIndex::from((LogicalIndex::Ellipsis, LogicalIndex::Ellipsis)).expand(2),
            Err(IndexError::InvalidIndexKind(_))
        ));
    }

    #[test]
    fn logical_index_display() {
        assert_eq!(LogicalIndex::from((1, 2..5)).to_string(), "(1, 2:5)");
        assert_eq!(LogicalIndex::from(vec![1i64, 4]).to_string(), "[1, 4]");
        let bounding_box =
            BoundingBox::new(vec![AxisIndex::Scalar(2), AxisIndex::Range((0..3).into())]);
        assert_eq!(bounding_box.to_string(), "(2, 0:3)");
        assert_eq!(bounding_box.num_range_axes(), 1);
    }

    #[test]
    fn logical_index_serde() {
        let index = LogicalIndex::from((10, SliceSpec::new(Some(5), None, Some(-1))));
        let json = serde_json::to_string(&index).unwrap();
        assert_eq!(serde_json::from_str::<LogicalIndex>(&json).unwrap(), index);
    }
}
