//! Merge step: interleave two record-aligned chunks
//!
//! One step walks both chunks in lockstep, always taking the smaller head
//! record (left on ties), until one chunk runs out. What happens to the rest
//! of the other chunk depends on whether the exhausted chunk was the last one
//! of its stream:
//!
//! - If it was, nothing further can come from that side, so the remainder is
//!   pushed through the single-stream pass.
//! - If it was not, the step stops. The unconsumed records stay behind the
//!   other stream's cursor and are read again next step, alongside the next
//!   chunk of the exhausted stream.

use crate::chunk::Chunk;
use crate::state::RunState;
use xmerge_core::{extract_record, ExtractError, MergeError, Result, Side, Verdict};

/// What one merge step consumed and produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StepOutcome {
    /// Bytes of the left chunk consumed
    pub(crate) left_consumed: usize,
    /// Bytes of the right chunk consumed
    pub(crate) right_consumed: usize,
    /// Bytes appended to the output buffer
    pub(crate) bytes_written: usize,
}

pub(crate) fn merge_step(
    left: &Chunk,
    right: &Chunk,
    state: &mut RunState,
    out: &mut Vec<u8>,
) -> Result<StepOutcome> {
    let start = out.len();
    let mut lo = 0;
    let mut ro = 0;

    while lo < left.len() && ro < right.len() {
        let (lrec, lused) = record_at(left, lo)?;
        let (rrec, rused) = record_at(right, ro)?;

        let verdict = state.comparator.classify_pair(lrec, rrec, &state.last);
        match verdict.side() {
            Side::Left => {
                state.apply(verdict, lrec, left.stream_offset(lo), out)?;
                lo += lused;
            }
            Side::Right => {
                state.apply(verdict, rrec, right.stream_offset(ro), out)?;
                ro += rused;
            }
        }
    }

    if lo >= left.len() && left.is_final() && ro < right.len() {
        ro = drain_chunk(right, ro, state, out)?;
    }
    if ro >= right.len() && right.is_final() && lo < left.len() {
        lo = drain_chunk(left, lo, state, out)?;
    }

    Ok(StepOutcome {
        left_consumed: lo,
        right_consumed: ro,
        bytes_written: out.len() - start,
    })
}

/// Single-stream pass over the records of `chunk` from `from` to its end.
///
/// Returns the offset reached, which is always `chunk.len()` on success.
pub(crate) fn drain_chunk(
    chunk: &Chunk,
    from: usize,
    state: &mut RunState,
    out: &mut Vec<u8>,
) -> Result<usize> {
    let side = chunk.side();
    let mut offset = from;
    while offset < chunk.len() {
        let (record, used) = record_at(chunk, offset)?;
        let verdict: Verdict = state.comparator.classify(record, side, &state.last);
        state.apply(verdict, record, chunk.stream_offset(offset), out)?;
        offset += used;
    }
    Ok(offset)
}

fn record_at(chunk: &Chunk, offset: usize) -> Result<(&[u8], usize)> {
    extract_record(chunk.data(), offset).map_err(|e| match e {
        ExtractError::TooLong { max } => MergeError::RecordTooLong {
            input: chunk.side(),
            offset: chunk.stream_offset(offset),
            max,
        },
        ExtractError::Unterminated { .. } | ExtractError::OutOfBounds { .. } => {
            MergeError::UnterminatedRecord {
                input: chunk.side(),
                offset: chunk.stream_offset(offset),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::StreamCursor;
    use std::io::Cursor;
    use xmerge_core::MergeOptions;

    fn load(side: Side, data: &[u8], capacity: usize) -> Chunk {
        let mut stream = StreamCursor::measure(side, Cursor::new(data.to_vec())).unwrap();
        let mut chunk = Chunk::new(side, capacity);
        stream.read_chunk(&mut chunk).unwrap();
        chunk
    }

    #[test]
    fn test_interleaves_final_chunks() {
        let left = load(Side::Left, b"a\nc\ne\n", 256);
        let right = load(Side::Right, b"b\nd\nf\n", 256);
        let mut state = RunState::new(&MergeOptions::all());
        let mut out = Vec::new();

        let step = merge_step(&left, &right, &mut state, &mut out).unwrap();
        assert_eq!(out, b"a\nb\nc\nd\ne\nf\n");
        assert_eq!(step.left_consumed, 6);
        assert_eq!(step.right_consumed, 6);
        assert_eq!(step.bytes_written, 12);
        assert_eq!(state.records_written, 6);
    }

    #[test]
    fn test_remainder_drained_when_other_side_final() {
        let left = load(Side::Left, b"a\n", 256);
        let right = load(Side::Right, b"b\nc\nd\n", 256);
        let mut state = RunState::new(&MergeOptions::all());
        let mut out = Vec::new();

        let step = merge_step(&left, &right, &mut state, &mut out).unwrap();
        assert_eq!(out, b"a\nb\nc\nd\n");
        assert_eq!(step.right_consumed, 6);
    }

    #[test]
    fn test_remainder_held_back_when_other_side_continues() {
        // Left chunk is cut at 201 bytes, so more left data follows.
        let mut left_data = Vec::new();
        for i in 0..60 {
            left_data.extend_from_slice(format!("a{:02}\n", i).as_bytes());
        }
        let left = load(Side::Left, &left_data, 201);
        assert!(!left.is_final());
        let right = load(Side::Right, b"b\nc\n", 256);
        let mut state = RunState::new(&MergeOptions::all());
        let mut out = Vec::new();

        let step = merge_step(&left, &right, &mut state, &mut out).unwrap();
        assert_eq!(step.left_consumed, left.len());
        assert_eq!(step.right_consumed, 0);
        assert!(!out.windows(2).any(|w| w == b"b\n"));
    }

    #[test]
    fn test_unique_across_both_sides() {
        let left = load(Side::Left, b"a\na\nb\n", 256);
        let right = load(Side::Right, b"a\nc\n", 256);
        let mut state = RunState::new(&MergeOptions::unique());
        let mut out = Vec::new();

        merge_step(&left, &right, &mut state, &mut out).unwrap();
        assert_eq!(out, b"a\nb\nc\n");
        assert_eq!(state.duplicates_skipped, 2);
    }

    #[test]
    fn test_strict_violation_reports_offset() {
        let left = load(Side::Left, b"b\na\n", 256);
        let right = load(Side::Right, b"c\n", 256);
        let mut state = RunState::new(&MergeOptions::all().strict());
        let mut out = Vec::new();

        let err = merge_step(&left, &right, &mut state, &mut out).unwrap_err();
        assert!(matches!(
            err,
            MergeError::OrderViolation {
                input: Side::Left,
                offset: 2
            }
        ));
    }

    #[test]
    fn test_lenient_drops_disordered_record() {
        let left = load(Side::Left, b"b\na\nc\n", 256);
        let right = load(Side::Right, b"d\n", 256);
        let mut state = RunState::new(&MergeOptions::all());
        let mut out = Vec::new();

        merge_step(&left, &right, &mut state, &mut out).unwrap();
        assert_eq!(out, b"b\nc\nd\n");
        assert_eq!(state.disordered_skipped, 1);
    }

    #[test]
    fn test_overlong_record_in_chunk() {
        let mut data = vec![b'x'; 250];
        data.push(b'\n');
        let left = load(Side::Left, &data, 4096);
        let right = load(Side::Right, b"a\n", 256);
        let mut state = RunState::new(&MergeOptions::all());
        let mut out = Vec::new();

        let err = merge_step(&left, &right, &mut state, &mut out).unwrap_err();
        assert!(matches!(
            err,
            MergeError::RecordTooLong {
                input: Side::Left,
                offset: 0,
                ..
            }
        ));
    }
}
