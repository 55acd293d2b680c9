mod common;

use common::*;
use ndarray::{Array, ArrayD, IxDyn};
use tilesegy::{
    backend::MemoryArray,
    index::{IndexOptions, LogicalIndex, SliceSpec},
    index_errors::IndexError,
    segy::{Geometry, StructuredSegy, TraceSortingFormat, UnstructuredSegy},
    trace_indexer::{
        ravel_indices, unravel_index, PostSelection, StructuredTraceIndexer, TraceIndexerTraits,
    },
};

fn trace_cases() -> Vec<(LogicalIndex, Vec<usize>, bool)> {
    let total = ILINES.len() * XLINES.len() * OFFSETS.len();
    vec![
        (17.into(), vec![17], false),
        ((-1).into(), vec![total - 1], false),
        ((5..10).into(), (5..10).collect(), true),
        ((..).into(), (0..total).collect(), true),
        (
            SliceSpec::full().with_step(-3).into(),
            (0..total).rev().step_by(3).collect(),
            true,
        ),
        (
            SliceSpec::new(Some(40), Some(3), Some(-7)).into(),
            (5..=40).rev().step_by(7).collect(),
            true,
        ),
        (vec![7i64, 2, 33].into(), vec![7, 2, 33], true),
        ((30..30).into(), vec![], true),
    ]
}

fn sample_cases() -> Vec<(LogicalIndex, Vec<usize>, bool)> {
    vec![
        ((..).into(), (0..NUM_SAMPLES).collect(), true),
        (3.into(), vec![3], false),
        ((1..5).into(), (1..5).collect(), true),
        (
            SliceSpec::full().with_step(-2).into(),
            (0..NUM_SAMPLES).rev().step_by(2).collect(),
            true,
        ),
    ]
}

/// The grid ordinals `(iline, xline, offset)` of a trace.
fn trace_ordinals(trace: usize, sorting: TraceSortingFormat) -> (usize, usize, usize) {
    let (ilines, xlines, offsets) = (
        ILINES.len() as u64,
        XLINES.len() as u64,
        OFFSETS.len() as u64,
    );
    match sorting {
        TraceSortingFormat::Crossline => {
            let index = unravel_index(trace as u64, &[xlines, ilines, offsets]);
            (index[1] as usize, index[0] as usize, index[2] as usize)
        }
        _ => {
            let index = unravel_index(trace as u64, &[ilines, xlines, offsets]);
            (index[0] as usize, index[1] as usize, index[2] as usize)
        }
    }
}

fn expected_traces(
    traces: &[usize],
    multi_traces: bool,
    samples: &[usize],
    multi_samples: bool,
    sorting: TraceSortingFormat,
) -> ArrayD<i64> {
    let mut shape = vec![];
    if multi_traces {
        shape.push(traces.len());
    }
    if multi_samples {
        shape.push(samples.len());
    }
    ArrayD::from_shape_fn(IxDyn(&shape), |index| {
        let trace = if multi_traces { traces[index[0]] } else { traces[0] };
        let sample = if multi_samples {
            samples[index[shape.len() - 1]]
        } else {
            samples[0]
        };
        let (iline, xline, offset) = trace_ordinals(trace, sorting);
        value(iline, xline, offset, sample)
    })
}

#[test]
fn structured_traces_match_reference_reads() -> Result<(), Box<dyn std::error::Error>> {
    for layout in [LAYOUT_OFFSETS_SECOND, LAYOUT_OFFSETS_THIRD] {
        for sorting in [
            TraceSortingFormat::Inline,
            TraceSortingFormat::Crossline,
            TraceSortingFormat::Unknown,
        ] {
            let segy = survey(layout, sorting);
            let traces = segy.trace()?;
            assert_eq!(
                traces.len(),
                (ILINES.len() * XLINES.len() * OFFSETS.len()) as u64
            );
            for (trace_index, trace_list, multi_traces) in trace_cases() {
                for (sample_index, sample_list, multi_samples) in sample_cases() {
                    let index = LogicalIndex::from((trace_index.clone(), sample_index));
                    let expected = expected_traces(
                        &trace_list,
                        multi_traces,
                        &sample_list,
                        multi_samples,
                        sorting,
                    );
                    assert_eq!(
                        traces.get(&index)?,
                        expected,
                        "{layout:?} {sorting} [{index}]"
                    );
                }
            }
        }
    }
    Ok(())
}

#[test]
fn unstructured_traces_match_reference_reads() -> Result<(), Box<dyn std::error::Error>> {
    let total = ILINES.len() * XLINES.len() * OFFSETS.len();
    let data = Array::from_shape_fn((total, NUM_SAMPLES), |(trace, sample)| {
        let (iline, xline, offset) = trace_ordinals(trace, TraceSortingFormat::Inline);
        value(iline, xline, offset, sample)
    });
    let segy = UnstructuredSegy::new(MemoryArray::new(data.into_dyn(), None)?)?;
    let traces = segy.trace()?;
    for (trace_index, trace_list, multi_traces) in trace_cases() {
        for (sample_index, sample_list, multi_samples) in sample_cases() {
            let index = LogicalIndex::from((trace_index.clone(), sample_index));
            let expected = expected_traces(
                &trace_list,
                multi_traces,
                &sample_list,
                multi_samples,
                TraceSortingFormat::Inline,
            );
            assert_eq!(traces.get(&index)?, expected, "[{index}]");
        }
    }
    Ok(())
}

#[test]
fn structured_traces_equal_flat_traces() -> Result<(), Box<dyn std::error::Error>> {
    let shape = [70usize, 90, 2, 3];
    let data = Array::from_shape_fn(IxDyn(&shape), |index| {
        (index[0] * 100_000 + index[1] * 100 + index[2] * 10 + index[3]) as i32
    });
    let flat = data
        .to_shape((70 * 90 * 2, 3))?
        .to_owned()
        .into_dyn();
    let names = ["ilines", "xlines", "offsets", "samples"]
        .map(String::from)
        .to_vec();
    let ilines: Vec<i32> = (1..=70).collect();
    let xlines: Vec<i32> = (1000..1090).collect();
    let geometry = Geometry::new(&ilines, &xlines, &[0, 1], 3, TraceSortingFormat::Inline)?;
    let structured = StructuredSegy::new(MemoryArray::new(data, Some(names))?, geometry)?;
    let unstructured = UnstructuredSegy::new(MemoryArray::new(flat, None)?)?;

    let (structured, unstructured) = (structured.trace()?, unstructured.trace()?);
    for index in [
        LogicalIndex::from(4321),
        LogicalIndex::from(5000..5100),
        LogicalIndex::from(SliceSpec::new(Some(7), None, Some(37))),
        LogicalIndex::from(SliceSpec::new(None, Some(100), Some(-101))),
        LogicalIndex::from((SliceSpec::new(Some(-1), Some(-400), Some(-13)), 1)),
        LogicalIndex::from(vec![12_599i64, 0, 181, 180, 6000]),
    ] {
        assert_eq!(
            structured.get(&index)?,
            unstructured.get(&index)?,
            "[{index}]"
        );
    }
    Ok(())
}

#[test]
fn structured_recipe_is_cartesian_position() -> Result<(), Box<dyn std::error::Error>> {
    // For ascending requests, every recipe position is the position of the trace in the bounding box
    let shape = vec![4u64, 3, 2];
    let indexer = StructuredTraceIndexer::new(shape.clone());
    let options = IndexOptions::default().with_bounding_box_fallback(true);
    for (start, stop, step) in [(2, 9, 1), (0, 24, 5), (3, 20, 2), (1, 2, 1), (6, 18, 6)] {
        let slice = SliceSpec::new(Some(start), Some(stop), Some(step));
        let selection = indexer.resolve_opt(&slice.into(), &options)?;
        let PostSelection::Positions(positions) = selection.post_selection() else {
            panic!("expected positions");
        };
        let traces: Vec<u64> = (start..stop)
            .step_by(step as usize)
            .map(|t| t as u64)
            .collect();
        assert_eq!(positions.len(), traces.len());

        // The bounding box is contiguous along each axis for these requests
        let lower: Vec<u64> = (0..3)
            .map(|axis| {
                traces
                    .iter()
                    .map(|trace| unravel_index(*trace, &shape)[axis])
                    .min()
                    .unwrap()
            })
            .collect();
        let upper: Vec<u64> = (0..3)
            .map(|axis| {
                traces
                    .iter()
                    .map(|trace| unravel_index(*trace, &shape)[axis])
                    .max()
                    .unwrap()
            })
            .collect();
        let box_shape: Vec<u64> = std::iter::zip(&lower, &upper)
            .map(|(lower, upper)| upper - lower + 1)
            .collect();
        for (trace, position) in std::iter::zip(&traces, positions) {
            let relative: Vec<u64> = std::iter::zip(unravel_index(*trace, &shape), &lower)
                .map(|(index, lower)| index - lower)
                .collect();
            assert_eq!(ravel_indices(&relative, &box_shape), *position as u64);
        }
        assert!(positions.windows(2).all(|window| window[0] < window[1]));
    }
    Ok(())
}

#[test]
fn structured_traces_without_fallback() -> Result<(), Box<dyn std::error::Error>> {
    let indexer = StructuredTraceIndexer::new(vec![4, 5, 1]);
    let options = IndexOptions::default().with_bounding_box_fallback(false);
    // traces 0, 2, 8 are (0, 0, 0), (0, 2, 0), (1, 3, 0): xlines 0, 2, 3 are irregular
    assert!(matches!(
        indexer.resolve_opt(&vec![0i64, 2, 8].into(), &options),
        Err(IndexError::NonRepresentableRange(_))
    ));
    let options = options.with_bounding_box_fallback(true);
    let selection = indexer.resolve_opt(&vec![0i64, 2, 8].into(), &options)?;
    assert_eq!(
        selection.post_selection(),
        &PostSelection::Positions(vec![0, 2, 7])
    );
    Ok(())
}
