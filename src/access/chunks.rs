//! Partition of the time samples into chunks and merge of the per-chunk results.

use std::ops::Range;

use itertools::Itertools;

use super::tables::TimeInterval;

/// Split `num_samples` ordered samples into `num_chunks` contiguous ranges of near-equal length.
///
/// With `len, rem = divmod(N, P)` the first `rem` chunks hold `len + 1` samples and the others
/// `len`. `P` is clamped to `[1, N]`, so every chunk holds at least one sample. No sample is
/// omitted or repeated.
pub fn partition(num_samples: usize, num_chunks: usize) -> Vec<Range<usize>> {
    if num_samples == 0 {
        return Vec::new();
    }

    let num_chunks = num_chunks.clamp(1, num_samples);
    let len = num_samples / num_chunks;
    let rem = num_samples % num_chunks;

    let mut start = 0;
    (0..num_chunks)
        .map(|k| {
            let size = if k < rem { len + 1 } else { len };
            let range = start..start + size;
            start += size;
            range
        })
        .collect()
}

/// Samples a chunk must scan: its own samples plus the first sample of the next chunk.
///
/// The extra sample lets a chunk refine a transition located between its last sample and the
/// first sample of the next chunk. Both chunks then report the shared boundary sample as an
/// interval end and begin respectively, which [`merge_chunk_accesses`] fuses back.
pub fn scan_range(chunk: &Range<usize>, num_samples: usize) -> Range<usize> {
    chunk.start..(chunk.end + 1).min(num_samples)
}

/// Concatenate per-chunk access lists, in chunk order, fusing intervals that touch exactly.
pub fn merge_chunk_accesses(chunks: Vec<Vec<TimeInterval>>) -> Vec<TimeInterval> {
    chunks
        .into_iter()
        .flatten()
        .coalesce(|current, next| {
            if current.end == next.begin {
                Ok(TimeInterval::new(current.begin, next.end))
            } else {
                Err((current, next))
            }
        })
        .collect()
}

/// Complement of ordered, disjoint intervals inside `window`.
///
/// Without any interval the whole window is a single gap. Otherwise there is a leading gap when
/// the first interval starts after the window start, one gap between consecutive intervals and a
/// trailing gap when the last interval ends before the window end.
pub fn complement_intervals(intervals: &[TimeInterval], window: TimeInterval) -> Vec<TimeInterval> {
    let (Some(first), Some(last)) = (intervals.first(), intervals.last()) else {
        return vec![window];
    };

    let mut gaps = Vec::with_capacity(intervals.len() + 1);

    if first.begin != window.begin {
        gaps.push(TimeInterval::new(window.begin, first.begin));
    }

    gaps.extend(
        intervals
            .iter()
            .tuple_windows()
            .map(|(a, b)| TimeInterval::new(a.end, b.begin)),
    );

    if last.end != window.end {
        gaps.push(TimeInterval::new(last.end, window.end));
    }

    gaps
}
