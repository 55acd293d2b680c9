//! A rust library for accessing SEG-Y surveys stored in chunked N-dimensional arrays with the conventions of [segyio](https://github.com/equinor/segyio).
//!
//! Surveys are stored as dense arrays, split into tiles by a chunked array backend such as [Zarr](https://zarr.dev).
//! Seismic users address them differently: traces by a flat trace number, inlines and crosslines by (possibly gapped, non zero-based) labels, offsets by label, and depth slices by sample.
//! Slices may have negative steps, and a set of traces may span an irregular region of the storage grid.
//! This crate translates these logical indices into reads of ascending contiguous ranges that a backend can serve, and reassembles and reorders the retrieved data to the shape and axis order of the logical view.
//!
//! ## Getting Started
//! - Wrap a backend array in a [`segy::StructuredSegy`] or [`segy::UnstructuredSegy`] and read through its accessors.
//! - Implement [`backend::ReadableArrayTraits`] for a new backend. [`backend::MemoryArray`] is an in-memory reference implementation.
//! - Translate indices directly with [`label_indexer::LabelIndexer`], [`trace_indexer::StructuredTraceIndexer`] and [`index::normalize_index`].
//!
//! ## Example
//! ```rust
//! # use tilesegy::{backend::MemoryArray, index::{LogicalIndex, SliceSpec}, segy::{Geometry, StructuredSegy, TraceSortingFormat}};
//! let data = ndarray::ArrayD::<f32>::zeros(vec![3, 4, 2, 10]);
//! let dimension_names = ["ilines", "xlines", "offsets", "samples"].map(String::from).to_vec();
//! let array = MemoryArray::new(data, Some(dimension_names))?;
//!
//! let geometry = Geometry::new(&[100, 102, 104], &[7, 8, 9, 10], &[0, 50], 10, TraceSortingFormat::Inline)?;
//! let segy = StructuredSegy::new(array, geometry)?;
//!
//! // Inlines 104 and 100, all offsets
//! let ilines = SliceSpec::new(Some(104), None, Some(-4));
//! let ilines = segy.iline()?.get(&LogicalIndex::from((ilines, ..)))?;
//! assert_eq!(ilines.shape(), &[2, 2, 4, 10]);
//!
//! // Traces 5 to 9, samples 2 to 4
//! let traces = segy.trace()?.get(&LogicalIndex::from((5..10, 2..5)))?;
//! assert_eq!(traces.shape(), &[5, 3]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Crate Features
//! #### Non-Default
//!  - `zarrs`: a [`zarrs`](https://docs.rs/zarrs) array backend.
//!
//! ## Licence
//! `tilesegy` is licensed under either of
//!  - the Apache License, Version 2.0 [LICENSE-APACHE](https://docs.rs/crate/tilesegy/latest/source/LICENCE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0> or
//!  - the MIT license [LICENSE-MIT](https://docs.rs/crate/tilesegy/latest/source/LICENCE-MIT) or <http://opensource.org/licenses/MIT>, at your option.
//!
//! Unless you explicitly state otherwise, any contribution intentionally submitted for inclusion in the work by you, as defined in the Apache-2.0 license, shall be dual licensed as above, without any additional terms or conditions.

#![warn(unused_variables)]
#![warn(dead_code)]
#![deny(missing_docs)]
// #![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![deny(clippy::missing_panics_doc)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod accessor;
pub mod backend;
pub mod config;
pub mod data_type;
pub mod index;
/// Index resolution errors.
pub mod index_errors;
pub mod label_indexer;
pub mod segy;
pub mod trace_indexer;
