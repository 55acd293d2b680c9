use derive_more::From;
use thiserror::Error;

use crate::{
    backend::ArrayReadError,
    data_type::DataType,
    index::{LogicalIndex, SliceSpec},
};

/// An invalid label set error.
#[derive(Clone, Debug, Error)]
pub enum InvalidLabelsError {
    /// The labels have a non-integer data type.
    #[error("labels should be integers, got {0}")]
    NonInteger(DataType),
    /// The labels contain a duplicate.
    #[error("labels should not contain duplicates, {0} is repeated")]
    Duplicate(i64),
    /// The label set is empty.
    #[error("labels should not be empty")]
    Empty,
    /// A label is outside of the `int64` range.
    #[error("labels should fit in an int64")]
    OutOfRange,
}

/// A label not found error.
#[derive(Copy, Clone, Debug, Error, From)]
#[error("{0} is not in labels")]
pub struct LabelNotFoundError(i64);

impl LabelNotFoundError {
    /// Return the label that was not found.
    #[must_use]
    pub const fn label(&self) -> i64 {
        self.0
    }
}

/// An empty label range error.
#[derive(Clone, Debug, Error, From)]
#[error("{0} has no overlap with labels")]
pub struct EmptyLabelRangeError(SliceSpec);

/// A non-uniform label range error.
///
/// The requested labels exist, but their storage ordinals are not a single arithmetic progression.
/// Callers restricted to contiguous reads can use [`ordinals`](NonUniformLabelRangeError::ordinals) to read a wider bounding box and filter.
#[derive(Clone, Debug, Error)]
#[error("label indices for {labels} is not a slice: {ordinals:?}")]
pub struct NonUniformLabelRangeError {
    labels: LogicalIndex,
    ordinals: Vec<u64>,
}

impl NonUniformLabelRangeError {
    /// Create a new non-uniform label range error for the label range or label set `labels`.
    #[must_use]
    pub fn new(labels: impl Into<LogicalIndex>, ordinals: Vec<u64>) -> Self {
        Self {
            labels: labels.into(),
            ordinals,
        }
    }

    /// Return the requested label range or label set.
    #[must_use]
    pub const fn labels(&self) -> &LogicalIndex {
        &self.labels
    }

    /// Return the storage ordinals of the requested labels, in request order.
    #[must_use]
    pub fn ordinals(&self) -> &[u64] {
        &self.ordinals
    }
}

/// A non-representable range error.
///
/// The values are strictly monotonic but irregularly spaced, so they cannot be expressed as one [`OrdinalSlice`](crate::index::OrdinalSlice).
#[derive(Clone, Debug, Error, From)]
#[error("array {0:?} is not convertible to a single range")]
pub struct NonRepresentableRangeError(Vec<i64>);

impl NonRepresentableRangeError {
    /// Return the values that could not be converted.
    #[must_use]
    pub fn values(&self) -> &[i64] {
        &self.0
    }
}

/// An invalid index kind error.
#[derive(Clone, Debug, Error, From)]
#[error("invalid index: {0}")]
pub struct InvalidIndexKindError(String);

impl InvalidIndexKindError {
    /// Create a new invalid index kind error.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// An index out of bounds error.
#[derive(Copy, Clone, Debug, Error)]
#[error("index {index} is out of bounds for axis with extent {extent}")]
pub struct IndexOutOfBoundsError {
    index: i64,
    extent: u64,
}

impl IndexOutOfBoundsError {
    /// Create a new index out of bounds error.
    #[must_use]
    pub const fn new(index: i64, extent: u64) -> Self {
        Self { index, extent }
    }
}

/// An incompatible dimensionality error.
#[derive(Copy, Clone, Debug, Error)]
#[error("incompatible dimensionality {0}, expected {1}")]
pub struct IncompatibleDimensionalityError(usize, usize);

impl IncompatibleDimensionalityError {
    /// Create a new incompatible dimensionality error.
    #[must_use]
    pub const fn new(got: usize, expected: usize) -> Self {
        Self(got, expected)
    }
}

/// Index resolution errors.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Invalid labels.
    #[error(transparent)]
    InvalidLabels(#[from] InvalidLabelsError),
    /// A label was not found.
    #[error(transparent)]
    LabelNotFound(#[from] LabelNotFoundError),
    /// A label range resolved to nothing.
    #[error(transparent)]
    EmptyLabelRange(#[from] EmptyLabelRangeError),
    /// A label range is not a single slice of storage ordinals.
    #[error(transparent)]
    NonUniformLabelRange(#[from] NonUniformLabelRangeError),
    /// An integer set is not a single arithmetic progression.
    #[error(transparent)]
    NonRepresentableRange(#[from] NonRepresentableRangeError),
    /// An unsupported index kind or shape.
    #[error(transparent)]
    InvalidIndexKind(#[from] InvalidIndexKindError),
    /// An index is out of bounds.
    #[error(transparent)]
    IndexOutOfBounds(#[from] IndexOutOfBoundsError),
    /// Incompatible dimensionality.
    #[error(transparent)]
    IncompatibleDimensionality(#[from] IncompatibleDimensionalityError),
    /// A named dimension is missing from the array.
    #[error("dimension {0:?} not found in array dimensions {1:?}")]
    MissingDimension(String, Vec<String>),
    /// A named dimension has an unexpected extent.
    #[error("dimension {0:?} has extent {1}, expected {2}")]
    IncompatibleExtent(String, u64, u64),
    /// A trace header field is missing.
    #[error("trace header field {0:?} not found")]
    UnknownHeaderField(String),
    /// The trace sorting format does not define fast and slow lines.
    #[error("the trace sorting format is unknown, fast and slow lines are undefined")]
    UnknownSorting,
    /// A bounding box and trace selection are incompatible.
    #[error("post-selection position {0} is outside of a bounding box with {1} elements")]
    InvalidPostSelection(usize, usize),
    /// A backend read error.
    #[error(transparent)]
    ArrayReadError(#[from] ArrayReadError),
}

