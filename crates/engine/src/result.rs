//! Outcome of a completed merge run

/// Totals of a successful run.
///
/// Failed runs produce a [`MergeError`](xmerge_core::MergeError) instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunResult {
    /// Bytes written to the output
    pub bytes_written: u64,
    /// Records written to the output
    pub records_written: u64,
    /// Records dropped as duplicates under emit-unique
    pub duplicates_skipped: u64,
    /// Records dropped as out of order when not strict
    pub disordered_skipped: u64,
    /// Whether the caller asked for the record count
    pub count_requested: bool,
}

impl RunResult {
    /// Record count, if it was requested
    pub fn record_count(&self) -> Option<u64> {
        self.count_requested.then_some(self.records_written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_count_only_when_requested() {
        let mut result = RunResult {
            records_written: 3,
            ..Default::default()
        };
        assert_eq!(result.record_count(), None);

        result.count_requested = true;
        assert_eq!(result.record_count(), Some(3));
    }
}
