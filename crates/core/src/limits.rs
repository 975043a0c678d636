//! Size limits for records and chunks
//!
//! ## Contract
//!
//! The maximum record length is FROZEN: it bounds the Last-Emitted Record slot
//! and is not configurable. The chunk size is a tunable (see
//! [`MergeConfig`](crate::MergeConfig)) but must stay within
//! [`MIN_CHUNK_SIZE`]..=[`MAX_CHUNK_SIZE`]: below the minimum a legal record
//! could not fit in one chunk, above the maximum the buffers of a run would no
//! longer be bounded.

/// Byte that terminates every record.
pub const TERMINATOR: u8 = b'\n';

/// Maximum record length in bytes, terminator excluded.
pub const MAX_RECORD_LEN: usize = 200;

/// Default chunk capacity: one page.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Smallest chunk that can hold a maximum-length record and its terminator.
pub const MIN_CHUNK_SIZE: usize = MAX_RECORD_LEN + 1;

/// Largest accepted chunk capacity: 64 MiB.
///
/// A run allocates two chunks plus a double-size output buffer, so this caps
/// a run's memory at 256 MiB.
pub const MAX_CHUNK_SIZE: usize = 64 * 1024 * 1024;

/// Output accumulator capacity for a given chunk size.
///
/// One merge step consumes at most one chunk per input and re-emits each
/// record byte for byte, so two chunks bound a step's output.
pub const fn output_capacity(chunk_size: usize) -> usize {
    2 * chunk_size
}
