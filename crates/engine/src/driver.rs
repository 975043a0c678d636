//! Streaming driver
//!
//! The driver owns every buffer of a run and moves through three phases:
//!
//! ```text
//! DualMerge ──(one cursor reaches its length)──▶ Drain(side) ──▶ Done
//!     │                                                         ▲
//!     └──────────────(both reach their length)──────────────────┘
//! ```
//!
//! Any read, write, record-format, or strict-order failure ends the run
//! immediately with an error; output already written is the caller's to
//! discard.

use crate::chunk::Chunk;
use crate::drain::drain_tail;
use crate::result::RunResult;
use crate::sink::OutputSink;
use crate::state::RunState;
use crate::step::merge_step;
use crate::stream::StreamCursor;
use std::io::{Read, Seek, Write};
use tracing::debug;
use xmerge_core::limits::output_capacity;
use xmerge_core::{MergeConfig, MergeOptions, Result, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    DualMerge,
    Drain(Side),
    Done,
}

impl Phase {
    fn of<L: Read + Seek, R: Read + Seek>(left: &StreamCursor<L>, right: &StreamCursor<R>) -> Phase {
        match (left.is_exhausted(), right.is_exhausted()) {
            (false, false) => Phase::DualMerge,
            (false, true) => Phase::Drain(Side::Left),
            (true, false) => Phase::Drain(Side::Right),
            (true, true) => Phase::Done,
        }
    }
}

/// Merges two sorted streams under a fixed policy.
#[derive(Debug, Clone, Copy)]
pub struct Merger {
    options: MergeOptions,
    config: MergeConfig,
}

impl Merger {
    /// Merger with default tunables
    pub fn new(options: MergeOptions) -> Self {
        Merger {
            options,
            config: MergeConfig::default(),
        }
    }

    /// Merger with explicit tunables, validated
    pub fn with_config(options: MergeOptions, config: MergeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Merger { options, config })
    }

    /// Merge `left` and `right` into `writer`.
    pub fn run<L, R, W>(
        &self,
        left: &mut StreamCursor<L>,
        right: &mut StreamCursor<R>,
        writer: W,
    ) -> Result<RunResult>
    where
        L: Read + Seek,
        R: Read + Seek,
        W: Write,
    {
        let capacity = self.config.chunk_size;
        let mut state = RunState::new(&self.options);
        let mut sink = OutputSink::new(writer);
        let mut left_chunk = Chunk::new(Side::Left, if left.is_empty() { 0 } else { capacity });
        let mut right_chunk = Chunk::new(Side::Right, if right.is_empty() { 0 } else { capacity });
        let mut out = Vec::with_capacity(output_capacity(capacity));

        debug!(
            options = %self.options,
            chunk_size = capacity,
            left_len = left.len(),
            right_len = right.len(),
            "Starting merge"
        );

        let mut steps = 0u64;
        let mut phase = Phase::of(left, right);
        loop {
            match phase {
                Phase::DualMerge => {
                    left.read_chunk(&mut left_chunk)?;
                    right.read_chunk(&mut right_chunk)?;

                    out.clear();
                    let step = merge_step(&left_chunk, &right_chunk, &mut state, &mut out)?;
                    sink.write_step(&out)?;
                    left.advance(step.left_consumed, &left_chunk);
                    right.advance(step.right_consumed, &right_chunk);

                    steps += 1;
                    debug!(
                        step = steps,
                        left_pos = left.position(),
                        right_pos = right.position(),
                        bytes = step.bytes_written,
                        "Merge step"
                    );
                }
                Phase::Drain(Side::Left) => {
                    drain_tail(left, &mut left_chunk, &mut state, &mut out, &mut sink)?
                }
                Phase::Drain(Side::Right) => {
                    drain_tail(right, &mut right_chunk, &mut state, &mut out, &mut sink)?
                }
                Phase::Done => break,
            }

            let next = Phase::of(left, right);
            if next != phase {
                debug!(from = ?phase, to = ?next, written = sink.bytes_written(), "Phase change");
            }
            phase = next;
        }

        let bytes_written = sink.finish()?;
        Ok(RunResult {
            bytes_written,
            records_written: state.records_written,
            duplicates_skipped: state.duplicates_skipped,
            disordered_skipped: state.disordered_skipped,
            count_requested: self.options.report_count,
        })
    }
}

/// Merge two streams with default tunables.
///
/// Convenience wrapper over [`Merger::run`].
pub fn merge_streams<L, R, W>(
    left: &mut StreamCursor<L>,
    right: &mut StreamCursor<R>,
    writer: W,
    options: MergeOptions,
) -> Result<RunResult>
where
    L: Read + Seek,
    R: Read + Seek,
    W: Write,
{
    Merger::new(options).run(left, right, writer)
}
