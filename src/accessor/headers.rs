use std::collections::BTreeMap;

use ndarray::ArrayD;

use crate::{
    backend::{find_dimension, ReadableArrayTraits},
    index::LogicalIndex,
    index_errors::IndexError,
    trace_indexer::TraceIndexerTraits,
};

use super::Traces;

/// The header fields of a trace, by field name.
pub type TraceHeader<T> = BTreeMap<String, T>;

/// A single trace header field, addressed by a flat trace index.
///
/// A read of a single trace returns a 0D array, and a read of multiple traces returns a 1D array.
pub struct Header<'a, TArray: ?Sized, TIndexer: ?Sized> {
    name: &'a str,
    values: Traces<'a, TArray, TIndexer>,
}

impl<TArray: ?Sized, TIndexer: ?Sized> std::fmt::Display for Header<'_, TArray, TIndexer> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Header({:?})", self.name)
    }
}

impl<TArray: ?Sized, TIndexer: ?Sized> std::fmt::Debug for Header<'_, TArray, TIndexer> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Header({:?}, {:?})", self.name, self.values)
    }
}

impl<'a, TArray, TIndexer> Header<'a, TArray, TIndexer>
where
    TArray: ?Sized + ReadableArrayTraits,
    TIndexer: ?Sized + TraceIndexerTraits,
{
    /// Create the header field `name` stored in `data`, laid out as the trace axes of `indexer`.
    ///
    /// # Errors
    /// Returns an [`IndexError`] if the shape of `data` is incompatible with `indexer`.
    pub fn new(name: &'a str, data: &'a TArray, indexer: &'a TIndexer) -> Result<Self, IndexError> {
        let trace_axes = (0..indexer.shape().len()).collect();
        Ok(Self {
            name,
            values: Traces::new_without_samples(data, indexer, trace_axes)?,
        })
    }

    /// Create the header field `name` stored in `data`, with the trace axes of `indexer` along the dimensions named `trace_dimensions`.
    ///
    /// # Errors
    /// Returns an [`IndexError`] if a dimension is missing or the shape of `data` is incompatible with `indexer`.
    pub fn new_with_dimensions(
        name: &'a str,
        data: &'a TArray,
        indexer: &'a TIndexer,
        trace_dimensions: &[&str],
    ) -> Result<Self, IndexError> {
        let trace_axes = trace_dimensions
            .iter()
            .map(|dimension| find_dimension(data, dimension))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name,
            values: Traces::new_without_samples(data, indexer, trace_axes)?,
        })
    }

    /// Return the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name
    }

    /// Return the number of traces.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.values.len()
    }

    /// Returns true if there are no traces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Read the field of the traces selected by the trace index `index`.
    ///
    /// # Errors
    /// Returns an [`IndexError`] if the index is invalid or the read fails.
    pub fn get(&self, index: &LogicalIndex) -> Result<ArrayD<TArray::Element>, IndexError> {
        self.values.get(index)
    }
}

/// All header fields of traces, addressed by a flat trace index.
#[derive(Debug)]
pub struct Headers<'a, TArray: ?Sized, TIndexer: ?Sized> {
    fields: Vec<Header<'a, TArray, TIndexer>>,
    len: u64,
}

impl<'a, TArray, TIndexer> Headers<'a, TArray, TIndexer>
where
    TArray: ReadableArrayTraits,
    TIndexer: ?Sized + TraceIndexerTraits,
{
    /// Create headers from the field arrays `fields`, laid out as the trace axes of `indexer`.
    ///
    /// # Errors
    /// Returns an [`IndexError`] if the shape of a field array is incompatible with `indexer`.
    pub fn new(
        fields: &'a BTreeMap<String, TArray>,
        indexer: &'a TIndexer,
    ) -> Result<Self, IndexError> {
        let fields = fields
            .iter()
            .map(|(name, data)| Header::new(name, data, indexer))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            fields,
            len: indexer.len(),
        })
    }

    /// Create headers from the field arrays `fields`, with the trace axes of `indexer` along the dimensions named `trace_dimensions`.
    ///
    /// # Errors
    /// Returns an [`IndexError`] if a dimension is missing or the shape of a field array is incompatible with `indexer`.
    pub fn new_with_dimensions(
        fields: &'a BTreeMap<String, TArray>,
        indexer: &'a TIndexer,
        trace_dimensions: &[&str],
    ) -> Result<Self, IndexError> {
        let fields = fields
            .iter()
            .map(|(name, data)| Header::new_with_dimensions(name, data, indexer, trace_dimensions))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            fields,
            len: indexer.len(),
        })
    }

    /// Return the number of traces.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Returns true if there are no traces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return the field names, in sorted order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(Header::name)
    }

    /// Return the header field `name`.
    ///
    /// # Errors
    /// Returns [`IndexError::UnknownHeaderField`] if there is no field `name`.
    pub fn field(&self, name: &str) -> Result<&Header<'a, TArray, TIndexer>, IndexError> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .ok_or_else(|| IndexError::UnknownHeaderField(name.to_string()))
    }

    /// Read the headers of the trace `trace`.
    ///
    /// # Errors
    /// Returns an [`IndexError`] if `trace` is out of bounds or a read fails.
    pub fn get_one(&self, trace: i64) -> Result<TraceHeader<TArray::Element>, IndexError> {
        let index = LogicalIndex::Scalar(trace);
        self.fields
            .iter()
            .map(|field| {
                let values = field.get(&index)?;
                let Some(value) = values.iter().next().cloned() else {
                    return Err(IndexError::IncompatibleExtent(field.name.to_owned(), 0, 1));
                };
                Ok((field.name.to_string(), value))
            })
            .collect()
    }

    /// Read the headers of the traces selected by the trace index `index`, one per trace.
    ///
    /// A scalar `index` reads a single header.
    /// Headers without fields read nothing.
    ///
    /// # Errors
    /// Returns an [`IndexError`] if the index is invalid or a read fails.
    pub fn get(
        &self,
        index: &LogicalIndex,
    ) -> Result<Vec<TraceHeader<TArray::Element>>, IndexError> {
        let columns = self
            .fields
            .iter()
            .map(|field| Ok((field.name, field.get(index)?)))
            .collect::<Result<Vec<_>, IndexError>>()?;
        let Some(num_traces) = columns.first().map(|(_, values)| values.len()) else {
            return Ok(vec![]);
        };
        let mut headers = vec![TraceHeader::new(); num_traces];
        for (name, values) in columns {
            for (header, value) in std::iter::zip(&mut headers, values.iter()) {
                header.insert(name.to_string(), value.clone());
            }
        }
        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{array, Array, IxDyn};

    use crate::{
        backend::MemoryArray,
        trace_indexer::{StructuredTraceIndexer, TraceIndexer},
    };

    use super::*;

    fn fields() -> BTreeMap<String, MemoryArray<i32>> {
        BTreeMap::from([
            (
                "TraceNumber".to_string(),
                MemoryArray::new(array![1, 2, 3, 4, 5, 6].into_dyn(), None).unwrap(),
            ),
            (
                "offset".to_string(),
                MemoryArray::new(array![0, 50, 0, 50, 0, 50].into_dyn(), None).unwrap(),
            ),
        ])
    }

    #[test]
    fn header_get() {
        let fields = fields();
        let indexer = TraceIndexer::new(6);
        let header = Header::new("TraceNumber", &fields["TraceNumber"], &indexer).unwrap();
        assert_eq!(header.len(), 6);
        assert_eq!(header.to_string(), r#"Header("TraceNumber")"#);
        assert_eq!(
            header.get(&LogicalIndex::from(-2)).unwrap(),
            ndarray::arr0(5).into_dyn()
        );
        assert_eq!(
            header.get(&LogicalIndex::from(1..4)).unwrap(),
            array![2, 3, 4].into_dyn()
        );
        assert!(header.get(&LogicalIndex::from((1, 2))).is_err());
        assert!(header.get(&LogicalIndex::from(6)).is_err());
    }

    #[test]
    fn headers_get() {
        let fields = fields();
        let indexer = TraceIndexer::new(6);
        let headers = Headers::new(&fields, &indexer).unwrap();
        assert_eq!(headers.len(), 6);
        assert_eq!(
            headers.field_names().collect::<Vec<_>>(),
            vec!["TraceNumber", "offset"]
        );

        let header = headers.get_one(3).unwrap();
        assert_eq!(header["TraceNumber"], 4);
        assert_eq!(header["offset"], 50);
        assert_eq!(headers.get(&LogicalIndex::from(3)).unwrap(), vec![header]);

        let read = headers
            .get(&crate::index::SliceSpec::new(Some(4), None, Some(-2)).into())
            .unwrap();
        let trace_numbers: Vec<i32> = read.iter().map(|header| header["TraceNumber"]).collect();
        assert_eq!(trace_numbers, vec![5, 3, 1]);
        assert!(read.iter().all(|header| header["offset"] == 0));

        assert!(matches!(
            headers.field("unknown"),
            Err(IndexError::UnknownHeaderField(_))
        ));
        assert_eq!(headers.field("offset").unwrap().name(), "offset");
    }

    #[test]
    fn headers_structured() {
        // (ilines, offsets, xlines), traces raveled over (ilines, xlines, offsets)
        let data = Array::from_shape_fn(IxDyn(&[3, 2, 4]), |index| {
            (index[0] * 100 + index[2] * 10 + index[1]) as i32
        });
        let names = ["ilines", "offsets", "xlines"].map(String::from).to_vec();
        let fields = BTreeMap::from([(
            "cdp".to_string(),
            MemoryArray::new(data, Some(names)).unwrap(),
        )]);
        let indexer = StructuredTraceIndexer::new(vec![3, 4, 2]);
        let headers =
            Headers::new_with_dimensions(&fields, &indexer, &["ilines", "xlines", "offsets"])
                .unwrap();
        assert_eq!(headers.get_one(11).unwrap()["cdp"], 111);
        let cdps: Vec<i32> = headers
            .get(&LogicalIndex::from(5..8))
            .unwrap()
            .iter()
            .map(|header| header["cdp"])
            .collect();
        assert_eq!(cdps, vec![21, 30, 31]);
        assert!(Headers::new(&fields, &indexer).is_err());
    }
}
