//! Record ordering and emission verdicts
//!
//! The comparator answers two questions for the merge engine: which of two
//! candidate records comes first, and what to do with that candidate given the
//! last record already emitted.
//!
//! ## Tie-break
//!
//! Equal candidates resolve to [`Side::Left`]. Together with the engine never
//! reordering records within one input, this makes output deterministic.

use crate::options::{CasePolicy, MergeOptions, OutputPolicy};
use crate::record::LastRecord;
use crate::types::Side;
use std::cmp::Ordering;

/// What the engine should do with the chosen candidate record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Append the record unconditionally
    Emit(Side),
    /// Append unless it equals the last emitted record
    EmitUnique(Side),
    /// The record sorts before the last emitted record
    Disordered(Side),
}

impl Verdict {
    /// Input the verdict applies to
    pub fn side(self) -> Side {
        match self {
            Verdict::Emit(side) | Verdict::EmitUnique(side) | Verdict::Disordered(side) => side,
        }
    }
}

/// Orders records under a case policy and classifies emission candidates.
#[derive(Debug, Clone, Copy)]
pub struct Comparator {
    case: CasePolicy,
    output: OutputPolicy,
}

impl Comparator {
    /// Comparator for the given policy
    pub fn new(options: &MergeOptions) -> Self {
        Comparator {
            case: options.case,
            output: options.output,
        }
    }

    /// Compare two records.
    ///
    /// Case-insensitive comparison folds ASCII letters only.
    #[inline]
    pub fn cmp(&self, a: &[u8], b: &[u8]) -> Ordering {
        match self.case {
            CasePolicy::Sensitive => a.cmp(b),
            CasePolicy::Insensitive => a
                .iter()
                .map(u8::to_ascii_lowercase)
                .cmp(b.iter().map(u8::to_ascii_lowercase)),
        }
    }

    /// Equality under the case policy
    #[inline]
    pub fn eq(&self, a: &[u8], b: &[u8]) -> bool {
        match self.case {
            CasePolicy::Sensitive => a == b,
            CasePolicy::Insensitive => a.eq_ignore_ascii_case(b),
        }
    }

    /// True if `record` equals the last emitted record
    pub fn is_duplicate(&self, record: &[u8], last: &LastRecord) -> bool {
        last.get().is_some_and(|prev| self.eq(record, prev))
    }

    /// Pick the smaller of two records and classify it.
    pub fn classify_pair(&self, left: &[u8], right: &[u8], last: &LastRecord) -> Verdict {
        if self.cmp(left, right) != Ordering::Greater {
            self.classify(left, Side::Left, last)
        } else {
            self.classify(right, Side::Right, last)
        }
    }

    /// Classify a single candidate against the last emitted record.
    pub fn classify(&self, candidate: &[u8], side: Side, last: &LastRecord) -> Verdict {
        if let Some(prev) = last.get() {
            if self.cmp(candidate, prev) == Ordering::Less {
                return Verdict::Disordered(side);
            }
        }
        match self.output {
            OutputPolicy::All => Verdict::Emit(side),
            OutputPolicy::Unique => Verdict::EmitUnique(side),
        }
    }
}
