mod common;

use common::*;
use ndarray::{Array, ArrayD, IxDyn};
use tilesegy::{
    backend::{MemoryArray, UsageLogArray},
    index::{LogicalIndex, SliceSpec},
    segy::UnstructuredSegy,
};

fn traces() -> Array<i64, ndarray::Ix2> {
    Array::from_shape_fn((ILINES.len() * XLINES.len(), NUM_SAMPLES), |(trace, sample)| {
        value(trace / XLINES.len(), trace % XLINES.len(), 0, sample)
    })
}

#[test]
fn unstructured_depth_slices() -> Result<(), Box<dyn std::error::Error>> {
    let data = traces();
    let segy = UnstructuredSegy::new(MemoryArray::new(data.clone().into_dyn(), None)?)?;
    let depths = segy.depth_slice()?;
    assert_eq!(depths.len(), NUM_SAMPLES as u64);

    // (traces)
    let depth = depths.get(&LogicalIndex::from(-2))?;
    assert_eq!(depth, data.column(NUM_SAMPLES - 2).into_dyn());

    // (samples, traces)
    for (index, samples) in [
        (LogicalIndex::from(2..5), vec![2, 3, 4]),
        (SliceSpec::full().with_step(-3).into(), vec![6, 3, 0]),
        (vec![5i64, 1].into(), vec![5, 1]),
    ] {
        let expected = ArrayD::from_shape_fn(IxDyn(&[samples.len(), data.nrows()]), |index| {
            data[[index[1], samples[index[0]]]]
        });
        assert_eq!(depths.get(&index)?, expected, "[{index}]");
    }
    assert!(depths.get(&LogicalIndex::from((1, 2))).is_err());
    Ok(())
}

#[test]
fn usage_log_depth_slice() -> Result<(), Box<dyn std::error::Error>> {
    let log_writer = std::sync::Arc::new(parking_lot::Mutex::new(Vec::<u8>::new()));
    let array = std::sync::Arc::new(MemoryArray::new(traces().into_dyn(), None)?);
    let array = UsageLogArray::new(array, log_writer.clone(), || "depth: ".to_string());
    let segy = UnstructuredSegy::new(array)?;

    // A descending step is read as an ascending range
    segy.depth_slice()?
        .get(&SliceSpec::new(Some(5), Some(0), Some(-2)).into())?;
    let log = String::from_utf8(log_writer.lock().clone())?;
    assert_eq!(log, "depth: read([0..30, 1..6]) -> shape=Ok([30, 5])\n");
    Ok(())
}
