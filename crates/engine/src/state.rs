//! Mutable state of one merge run
//!
//! Everything that must survive from one chunk to the next lives here and is
//! owned by the single driver executing the run: the last emitted record and
//! the counters that end up in the [`RunResult`](crate::RunResult).

use tracing::warn;
use xmerge_core::{
    Comparator, LastRecord, MergeError, MergeOptions, OrderPolicy, Result, Side, Verdict,
    TERMINATOR,
};

#[derive(Debug)]
pub(crate) struct RunState {
    pub(crate) comparator: Comparator,
    order: OrderPolicy,
    pub(crate) last: LastRecord,
    pub(crate) records_written: u64,
    pub(crate) duplicates_skipped: u64,
    pub(crate) disordered_skipped: u64,
}

impl RunState {
    pub(crate) fn new(options: &MergeOptions) -> Self {
        RunState {
            comparator: Comparator::new(options),
            order: options.order,
            last: LastRecord::new(),
            records_written: 0,
            duplicates_skipped: 0,
            disordered_skipped: 0,
        }
    }

    /// Act on a verdict for `record`, found at stream offset `offset`.
    ///
    /// On `Ok` the caller advances past the record whether or not it was
    /// emitted. An order violation under strict checking is returned as an
    /// error and nothing is appended.
    pub(crate) fn apply(
        &mut self,
        verdict: Verdict,
        record: &[u8],
        offset: u64,
        out: &mut Vec<u8>,
    ) -> Result<()> {
        match verdict {
            Verdict::Emit(_) => self.emit(record, out),
            Verdict::EmitUnique(_) => {
                if self.comparator.is_duplicate(record, &self.last) {
                    self.duplicates_skipped += 1;
                } else {
                    self.emit(record, out);
                }
            }
            Verdict::Disordered(side) => return self.disordered(side, offset),
        }
        Ok(())
    }

    fn emit(&mut self, record: &[u8], out: &mut Vec<u8>) {
        out.extend_from_slice(record);
        out.push(TERMINATOR);
        self.last.set(record);
        self.records_written += 1;
    }

    fn disordered(&mut self, side: Side, offset: u64) -> Result<()> {
        match self.order {
            OrderPolicy::Strict => Err(MergeError::OrderViolation {
                input: side,
                offset,
            }),
            OrderPolicy::SkipDisordered => {
                warn!(input = %side, offset, "Dropping out-of-order record");
                self.disordered_skipped += 1;
                Ok(())
            }
        }
    }
}
