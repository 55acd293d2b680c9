//! SEG-Y views over a backend array.
//!
//! A [`StructuredSegy`] wraps a 4D `(ilines, xlines, offsets, samples)` array in any axis order, identified by dimension name.
//! An [`UnstructuredSegy`] wraps a 2D `(traces, samples)` array.
//! Both are composed over an already opened backend array, and serve the accessors of the [`accessor`](crate::accessor) module.
//! Trace headers are stored as one array per header field over the trace axes of the data, e.g. `(ilines, xlines, offsets)` or `(traces)`.

use std::collections::BTreeMap;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{
    accessor::{
        Depths, Header, Headers, Lines, Traces, ILINES_DIMENSION, OFFSETS_DIMENSION,
        SAMPLES_DIMENSION, XLINES_DIMENSION,
    },
    backend::{find_dimension, ReadableArrayTraits},
    data_type::Element,
    index_errors::{IncompatibleDimensionalityError, IndexError},
    label_indexer::LabelIndexer,
    trace_indexer::{StructuredTraceIndexer, TraceIndexer},
};

/// The trace sorting format of a survey.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum TraceSortingFormat {
    /// The traces are not sorted by line.
    #[display("unknown")]
    Unknown,
    /// The traces are sorted by crossline, inline numbers vary fastest.
    #[display("crossline")]
    Crossline,
    /// The traces are sorted by inline, crossline numbers vary fastest.
    #[display("inline")]
    Inline,
}

/// The geometry of a structured survey.
#[derive(Clone, Debug)]
pub struct Geometry {
    ilines: LabelIndexer,
    xlines: LabelIndexer,
    offsets: LabelIndexer,
    samples: LabelIndexer,
    sorting: TraceSortingFormat,
}

impl Geometry {
    /// Create a new geometry from the inline, crossline and offset labels in storage order.
    ///
    /// Samples are labelled by their position `0..num_samples`.
    ///
    /// # Errors
    /// Returns [`IndexError::InvalidLabels`] if a set of labels is invalid or `num_samples` is zero.
    pub fn new<T: Element>(
        ilines: &[T],
        xlines: &[T],
        offsets: &[T],
        num_samples: u64,
        sorting: TraceSortingFormat,
    ) -> Result<Self, IndexError> {
        let samples: Vec<u64> = (0..num_samples).collect();
        Ok(Self {
            ilines: LabelIndexer::new(ilines)?,
            xlines: LabelIndexer::new(xlines)?,
            offsets: LabelIndexer::new(offsets)?,
            samples: LabelIndexer::new(&samples)?,
            sorting,
        })
    }

    /// Return the inline labels.
    #[must_use]
    pub fn ilines(&self) -> &LabelIndexer {
        &self.ilines
    }

    /// Return the crossline labels.
    #[must_use]
    pub fn xlines(&self) -> &LabelIndexer {
        &self.xlines
    }

    /// Return the offset labels.
    #[must_use]
    pub fn offsets(&self) -> &LabelIndexer {
        &self.offsets
    }

    /// Return the sample labels.
    #[must_use]
    pub fn samples(&self) -> &LabelIndexer {
        &self.samples
    }

    /// Return the trace sorting format.
    #[must_use]
    pub fn sorting(&self) -> TraceSortingFormat {
        self.sorting
    }

    /// Return the shape of the trace grid, slowest axis first.
    ///
    /// Traces of inline sorted (and unsorted) surveys are ordered `(ilines, xlines, offsets)`, crossline sorted surveys `(xlines, ilines, offsets)`.
    #[must_use]
    pub fn trace_shape(&self) -> Vec<u64> {
        let (ilines, xlines, offsets) = (
            self.ilines.len() as u64,
            self.xlines.len() as u64,
            self.offsets.len() as u64,
        );
        match self.sorting {
            TraceSortingFormat::Crossline => vec![xlines, ilines, offsets],
            TraceSortingFormat::Inline | TraceSortingFormat::Unknown => {
                vec![ilines, xlines, offsets]
            }
        }
    }

    fn trace_dimensions(&self) -> [&'static str; 3] {
        match self.sorting {
            TraceSortingFormat::Crossline => {
                [XLINES_DIMENSION, ILINES_DIMENSION, OFFSETS_DIMENSION]
            }
            TraceSortingFormat::Inline | TraceSortingFormat::Unknown => {
                [ILINES_DIMENSION, XLINES_DIMENSION, OFFSETS_DIMENSION]
            }
        }
    }
}

/// A structured survey.
#[derive(Debug)]
pub struct StructuredSegy<TArray> {
    data: TArray,
    headers: BTreeMap<String, TArray>,
    geometry: Geometry,
    trace_indexer: StructuredTraceIndexer,
}

impl<TArray: ReadableArrayTraits> StructuredSegy<TArray> {
    /// Create a new structured survey over `data`.
    ///
    /// # Errors
    /// Returns an [`IndexError`] if `data` is missing a dimension, or its extents do not match `geometry`.
    pub fn new(data: TArray, geometry: Geometry) -> Result<Self, IndexError> {
        let shape = data.shape();
        if shape.len() != 4 {
            return Err(IncompatibleDimensionalityError::new(shape.len(), 4).into());
        }
        for (dimension, labels) in [
            (ILINES_DIMENSION, &geometry.ilines),
            (XLINES_DIMENSION, &geometry.xlines),
            (OFFSETS_DIMENSION, &geometry.offsets),
            (SAMPLES_DIMENSION, &geometry.samples),
        ] {
            let extent = shape[find_dimension(&data, dimension)?];
            if extent != labels.len() as u64 {
                return Err(IndexError::IncompatibleExtent(
                    dimension.to_string(),
                    extent,
                    labels.len() as u64,
                ));
            }
        }
        let trace_indexer = StructuredTraceIndexer::new(geometry.trace_shape());
        Ok(Self {
            data,
            headers: BTreeMap::new(),
            geometry,
            trace_indexer,
        })
    }

    /// Attach the trace header field arrays `headers`, each with the `ilines`, `xlines` and `offsets` dimensions of the data.
    ///
    /// # Errors
    /// Returns an [`IndexError`] if a header array is missing a dimension, or its extents do not match the geometry.
    pub fn with_trace_headers(
        mut self,
        headers: BTreeMap<String, TArray>,
    ) -> Result<Self, IndexError> {
        Headers::new_with_dimensions(
            &headers,
            &self.trace_indexer,
            &self.geometry.trace_dimensions(),
        )?;
        self.headers = headers;
        Ok(self)
    }

    /// Return the backend array.
    #[must_use]
    pub fn data(&self) -> &TArray {
        &self.data
    }

    /// Return the geometry.
    #[must_use]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Return the trace sorting format.
    #[must_use]
    pub fn sorting(&self) -> TraceSortingFormat {
        self.geometry.sorting
    }

    /// Return the inlines.
    ///
    /// # Errors
    /// Returns an [`IndexError`] if the inline or offset dimension is missing.
    pub fn iline(&self) -> Result<Lines<'_, TArray>, IndexError> {
        Lines::new(
            ILINES_DIMENSION,
            &self.geometry.ilines,
            &self.geometry.offsets,
            &self.data,
        )
    }

    /// Return the crosslines.
    ///
    /// # Errors
    /// Returns an [`IndexError`] if the crossline or offset dimension is missing.
    pub fn xline(&self) -> Result<Lines<'_, TArray>, IndexError> {
        Lines::new(
            XLINES_DIMENSION,
            &self.geometry.xlines,
            &self.geometry.offsets,
            &self.data,
        )
    }

    /// Return the depth slices, addressed by sample position.
    ///
    /// # Errors
    /// Returns an [`IndexError`] if the sample or offset dimension is missing.
    pub fn depth_slice(&self) -> Result<Lines<'_, TArray>, IndexError> {
        Lines::new(
            SAMPLES_DIMENSION,
            &self.geometry.samples,
            &self.geometry.offsets,
            &self.data,
        )
    }

    /// Return the lines along the fast axis: inlines of inline sorted surveys, crosslines of crossline sorted surveys.
    ///
    /// # Errors
    /// Returns [`IndexError::UnknownSorting`] if the sorting format is unknown.
    pub fn fast(&self) -> Result<Lines<'_, TArray>, IndexError> {
        match self.geometry.sorting {
            TraceSortingFormat::Inline => self.iline(),
            TraceSortingFormat::Crossline => self.xline(),
            TraceSortingFormat::Unknown => Err(IndexError::UnknownSorting),
        }
    }

    /// Return the lines along the slow axis: crosslines of inline sorted surveys, inlines of crossline sorted surveys.
    ///
    /// # Errors
    /// Returns [`IndexError::UnknownSorting`] if the sorting format is unknown.
    pub fn slow(&self) -> Result<Lines<'_, TArray>, IndexError> {
        match self.geometry.sorting {
            TraceSortingFormat::Inline => self.xline(),
            TraceSortingFormat::Crossline => self.iline(),
            TraceSortingFormat::Unknown => Err(IndexError::UnknownSorting),
        }
    }

    /// Return the traces, in the trace order of the sorting format.
    ///
    /// # Errors
    /// Returns an [`IndexError`] if a dimension is missing.
    pub fn trace(&self) -> Result<Traces<'_, TArray, StructuredTraceIndexer>, IndexError> {
        Traces::new_with_dimensions(
            &self.data,
            &self.trace_indexer,
            &self.geometry.trace_dimensions(),
        )
    }

    /// Return the trace headers, in the trace order of the sorting format.
    ///
    /// # Errors
    /// Returns an [`IndexError`] if a header array is incompatible with the geometry.
    pub fn trace_headers(&self) -> Result<Headers<'_, TArray, StructuredTraceIndexer>, IndexError> {
        Headers::new_with_dimensions(
            &self.headers,
            &self.trace_indexer,
            &self.geometry.trace_dimensions(),
        )
    }

    /// Return the trace header field `name`, in the trace order of the sorting format.
    ///
    /// # Errors
    /// Returns [`IndexError::UnknownHeaderField`] if there is no field `name`.
    pub fn trace_header(
        &self,
        name: &str,
    ) -> Result<Header<'_, TArray, StructuredTraceIndexer>, IndexError> {
        let (name, data) = self
            .headers
            .get_key_value(name)
            .ok_or_else(|| IndexError::UnknownHeaderField(name.to_string()))?;
        Header::new_with_dimensions(
            name,
            data,
            &self.trace_indexer,
            &self.geometry.trace_dimensions(),
        )
    }
}

/// An unstructured survey.
#[derive(Debug)]
pub struct UnstructuredSegy<TArray> {
    data: TArray,
    headers: BTreeMap<String, TArray>,
    trace_indexer: TraceIndexer,
}

impl<TArray: ReadableArrayTraits> UnstructuredSegy<TArray> {
    /// Create a new unstructured survey over `(traces, samples)` data.
    ///
    /// # Errors
    /// Returns [`IndexError::IncompatibleDimensionality`] if `data` is not 2D.
    pub fn new(data: TArray) -> Result<Self, IndexError> {
        let shape = data.shape();
        if shape.len() != 2 {
            return Err(IncompatibleDimensionalityError::new(shape.len(), 2).into());
        }
        Ok(Self {
            trace_indexer: TraceIndexer::new(shape[0]),
            headers: BTreeMap::new(),
            data,
        })
    }

    /// Attach the trace header field arrays `headers`, each 1D with an extent of the number of traces.
    ///
    /// # Errors
    /// Returns an [`IndexError`] if the shape of a header array does not match the traces.
    pub fn with_trace_headers(
        mut self,
        headers: BTreeMap<String, TArray>,
    ) -> Result<Self, IndexError> {
        Headers::new(&headers, &self.trace_indexer)?;
        self.headers = headers;
        Ok(self)
    }

    /// Return the backend array.
    #[must_use]
    pub fn data(&self) -> &TArray {
        &self.data
    }

    /// Return the traces.
    ///
    /// # Errors
    /// Returns an [`IndexError`] if the array shape is incompatible with the trace indexer.
    pub fn trace(&self) -> Result<Traces<'_, TArray, TraceIndexer>, IndexError> {
        Traces::new(&self.data, &self.trace_indexer)
    }

    /// Return the trace headers.
    ///
    /// # Errors
    /// Returns an [`IndexError`] if a header array is incompatible with the traces.
    pub fn trace_headers(&self) -> Result<Headers<'_, TArray, TraceIndexer>, IndexError> {
        Headers::new(&self.headers, &self.trace_indexer)
    }

    /// Return the trace header field `name`.
    ///
    /// # Errors
    /// Returns [`IndexError::UnknownHeaderField`] if there is no field `name`.
    pub fn trace_header(&self, name: &str) -> Result<Header<'_, TArray, TraceIndexer>, IndexError> {
        let (name, data) = self
            .headers
            .get_key_value(name)
            .ok_or_else(|| IndexError::UnknownHeaderField(name.to_string()))?;
        Header::new(name, data, &self.trace_indexer)
    }

    /// Return the depth slices.
    ///
    /// # Errors
    /// Returns an [`IndexError`] if the array is not 2D.
    pub fn depth_slice(&self) -> Result<Depths<'_, TArray>, IndexError> {
        Depths::new(&self.data)
    }
}
