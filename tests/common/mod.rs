#![allow(dead_code)]

use ndarray::{ArrayD, IxDyn};
use tilesegy::{
    backend::MemoryArray,
    segy::{Geometry, StructuredSegy, TraceSortingFormat},
};

pub const ILINES: [i64; 5] = [10, 12, 14, 16, 18];
pub const XLINES: [i64; 6] = [25, 24, 23, 22, 21, 20];
pub const OFFSETS: [i64; 3] = [1, 2, 3];
pub const NUM_SAMPLES: usize = 7;

/// Offsets stored second, as written by the ingestion tool.
pub const LAYOUT_OFFSETS_SECOND: [&str; 4] = ["ilines", "offsets", "xlines", "samples"];
/// Offsets stored third, matching the trace order of inline sorted files.
pub const LAYOUT_OFFSETS_THIRD: [&str; 4] = ["ilines", "xlines", "offsets", "samples"];

/// The value of a sample of the synthetic survey, from the ordinals of its position.
pub fn value(iline: usize, xline: usize, offset: usize, sample: usize) -> i64 {
    (iline * 1000 + xline * 100 + offset * 10 + sample) as i64
}

fn extent(dimension: &str) -> usize {
    match dimension {
        "ilines" => ILINES.len(),
        "xlines" => XLINES.len(),
        "offsets" => OFFSETS.len(),
        _ => NUM_SAMPLES,
    }
}

/// A synthetic survey array with the axes in `layout` order.
pub fn survey_array(layout: [&str; 4]) -> MemoryArray<i64> {
    let shape: Vec<usize> = layout.iter().map(|dimension| extent(dimension)).collect();
    let data = ArrayD::from_shape_fn(IxDyn(&shape), |index| {
        let position = |dimension: &str| {
            index[layout
                .iter()
                .position(|name| *name == dimension)
                .unwrap()]
        };
        value(
            position("ilines"),
            position("xlines"),
            position("offsets"),
            position("samples"),
        )
    });
    MemoryArray::new(data, Some(layout.map(String::from).to_vec())).unwrap()
}

pub fn survey(layout: [&str; 4], sorting: TraceSortingFormat) -> StructuredSegy<MemoryArray<i64>> {
    let geometry = Geometry::new(&ILINES, &XLINES, &OFFSETS, NUM_SAMPLES as u64, sorting).unwrap();
    StructuredSegy::new(survey_array(layout), geometry).unwrap()
}

/// The storage ordinals of `labels`.
pub fn ordinals(all_labels: &[i64], labels: &[i64]) -> Vec<usize> {
    labels
        .iter()
        .map(|label| all_labels.iter().position(|l| l == label).unwrap())
        .collect()
}
