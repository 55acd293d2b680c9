//! An array adapter which prints reads.

use std::{io::Write, sync::Arc};

use itertools::Itertools;
use ndarray::ArrayD;
use parking_lot::Mutex;

use super::{ArrayReadError, ArraySelector, ReadableArrayTraits};

/// The usage log array adapter. Logs array reads.
///
/// It is intended to aid in debugging and optimising performance by revealing the backend reads a query issues.
///
/// ### Example (log to stdout)
/// ```rust
/// # use std::sync::Arc;
/// # use parking_lot::Mutex;
/// # use tilesegy::backend::{MemoryArray, UsageLogArray};
/// let array = Arc::new(MemoryArray::new(ndarray::ArrayD::<f32>::zeros(vec![4, 8]), None).unwrap());
/// let log_writer = Arc::new(Mutex::new(
///     // std::io::BufWriter::new(
///     std::io::stdout(),
///     //    )
/// ));
/// let array = UsageLogArray::new(array, log_writer, || "[tilesegy] ".to_string());
/// ````
///
/// Reading lines through the above [`UsageLogArray`] prints outputs like:
/// ```text
/// [tilesegy] read([1, 0..8]) -> shape=Ok([8])
/// [tilesegy] read([0..4, 0..8]) -> shape=Ok([4, 8])
/// ```
pub struct UsageLogArray<TArray: ?Sized> {
    array: Arc<TArray>,
    handle: Arc<Mutex<dyn Write + Send + Sync>>,
    prefix_func: fn() -> String,
}

impl<TArray: ?Sized> core::fmt::Debug for UsageLogArray<TArray> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        writeln!(f, "usage log")
    }
}

impl<TArray: ?Sized> UsageLogArray<TArray> {
    /// Create a new usage log array adapter.
    pub fn new(
        array: Arc<TArray>,
        handle: Arc<Mutex<dyn Write + Send + Sync>>,
        prefix_func: fn() -> String,
    ) -> Self {
        Self {
            array,
            handle,
            prefix_func,
        }
    }
}

impl<TArray: ?Sized + ReadableArrayTraits> ReadableArrayTraits for UsageLogArray<TArray> {
    type Element = TArray::Element;

    fn shape(&self) -> Vec<u64> {
        self.array.shape()
    }

    fn dimension_names(&self) -> Option<Vec<String>> {
        self.array.dimension_names()
    }

    fn read(&self, selectors: &[ArraySelector]) -> Result<ArrayD<Self::Element>, ArrayReadError> {
        let result = self.array.read(selectors);
        writeln!(
            self.handle.lock(),
            "{}read([{}]) -> shape={:?}",
            (self.prefix_func)(),
            selectors.iter().format(", "),
            result
                .as_ref()
                .map(ArrayD::shape)
                .map_err(ToString::to_string)
        )?;
        result
    }
}
