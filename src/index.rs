//! Logical indices and their normalization.
//!
//! A [`LogicalIndex`] is what a caller asks for: scalars, [`SliceSpec`]s with steps of either sign, explicit position sets, and tuples of these over multiple axes.
//! Resolved indices are expressed with literal [`OrdinalSlice`]s, per-axis [`BoundingBox`]es, and [`NormalizedAxis`] reads that a backend restricted to ascending ranges can serve.

mod ensure_slice;
mod logical_index;
mod normalize;
mod options;
mod ordinal_slice;
mod slice_spec;

pub use ensure_slice::{ensure_slice, EnsureSlice};
pub use logical_index::{AxisIndex, BoundingBox, LogicalIndex};
pub use normalize::{
    normalize_gather, normalize_index, normalize_index_opt, normalize_position, normalize_slice,
    AxisRange, NormalizedAxis,
};
pub use options::IndexOptions;
pub use ordinal_slice::OrdinalSlice;
pub use slice_spec::SliceSpec;
