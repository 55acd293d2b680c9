//! Accessors over a backend array.
//!
//! Accessors borrow an array and the indexers of a dataset and serve reads using the SEG-Y conventions:
//!  - [`Lines`]: inlines, crosslines, or depth slices of structured data, addressed by labels,
//!  - [`Traces`]: traces addressed by a flat trace index,
//!  - [`Headers`] and [`Header`]: trace header fields addressed by a flat trace index, and
//!  - [`Depths`]: depth slices of unstructured data.

mod depths;
mod headers;
mod lines;
mod traces;

pub use depths::Depths;
pub use headers::{Header, Headers, TraceHeader};
pub use lines::Lines;
pub use traces::Traces;

/// The dimension name of the inline axis.
pub const ILINES_DIMENSION: &str = "ilines";

/// The dimension name of the crossline axis.
pub const XLINES_DIMENSION: &str = "xlines";

/// The dimension name of the offset axis.
pub const OFFSETS_DIMENSION: &str = "offsets";

/// The dimension name of the sample axis.
pub const SAMPLES_DIMENSION: &str = "samples";

/// The dimension name of the trace axis of unstructured data.
pub const TRACES_DIMENSION: &str = "traces";
