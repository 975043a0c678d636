//! Fixed-capacity chunks and record-boundary adjustment
//!
//! A chunk is only ever handed to the merge step once it ends exactly after a
//! terminator. A record that straddles the end of a full chunk is cut off here
//! and re-read at the start of the next chunk from the same stream, so the
//! merge step never sees a partial record.

use xmerge_core::{Side, TERMINATOR};

/// Trim or extend a freshly read buffer so it ends on a record boundary.
///
/// `buf` is the whole chunk buffer (its length is the capacity) and `bytes`
/// the number of bytes just read into it. Returns the adjusted valid length:
///
/// - `0` stays `0` (nothing read).
/// - A buffer already ending in a terminator is returned as-is.
/// - With spare capacity (only possible at end of stream), a terminator is
///   appended and the length grows by one.
/// - A full buffer is cut back to just after its last terminator, deferring
///   the partial record. If it holds no terminator at all the result is `0`.
///
/// A `bytes` larger than the buffer is treated as a full buffer.
pub fn adjust_boundary(buf: &mut [u8], bytes: usize) -> usize {
    let bytes = bytes.min(buf.len());
    if bytes == 0 {
        return 0;
    }

    let last = bytes - 1;
    if buf[last] == TERMINATOR {
        return bytes;
    }

    if bytes < buf.len() {
        buf[bytes] = TERMINATOR;
        return bytes + 1;
    }

    buf[..bytes]
        .iter()
        .rposition(|&b| b == TERMINATOR)
        .map_or(0, |pos| pos + 1)
}

/// One record-aligned slice of an input stream.
#[derive(Debug)]
pub struct Chunk {
    side: Side,
    buf: Vec<u8>,
    /// Valid bytes after adjustment
    len: usize,
    /// Stream offset of `buf[0]`
    base: u64,
    /// Last byte is a terminator that is not in the stream
    synthesized: bool,
    /// Chunk reaches the end of its stream
    last: bool,
}

impl Chunk {
    /// Empty chunk of the given capacity for one input
    pub fn new(side: Side, capacity: usize) -> Self {
        Chunk {
            side,
            buf: vec![0; capacity],
            len: 0,
            base: 0,
            synthesized: false,
            last: false,
        }
    }

    /// Input this chunk is read from
    pub fn side(&self) -> Side {
        self.side
    }

    /// Buffer capacity in bytes
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Record-aligned valid bytes
    pub fn data(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Number of valid bytes
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the chunk holds no records
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stream offset of the chunk's first byte
    pub fn base(&self) -> u64 {
        self.base
    }

    /// True if no stream bytes follow this chunk
    pub fn is_final(&self) -> bool {
        self.last
    }

    /// Valid bytes that actually came from the stream
    pub fn source_len(&self) -> usize {
        self.len - usize::from(self.synthesized)
    }

    /// Stream offset of a position inside the chunk
    pub fn stream_offset(&self, offset: usize) -> u64 {
        self.base + offset as u64
    }

    pub(crate) fn raw_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    /// Record the result of a read + adjust at stream offset `base`.
    ///
    /// `stream_len` is the total stream length, used to decide finality.
    pub(crate) fn set_loaded(&mut self, base: u64, bytes: usize, adjusted: usize, stream_len: u64) {
        self.base = base;
        self.len = adjusted;
        self.synthesized = adjusted > bytes;
        self.last = base + self.source_len() as u64 >= stream_len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf_with(cap: usize, content: &[u8]) -> Vec<u8> {
        let mut buf = vec![0u8; cap];
        buf[..content.len()].copy_from_slice(content);
        buf
    }

    #[test]
    fn test_nothing_read() {
        let mut buf = buf_with(8, b"");
        assert_eq!(adjust_boundary(&mut buf, 0), 0);
    }

    #[test]
    fn test_aligned_chunk_untouched() {
        let mut buf = buf_with(8, b"ab\ncd\n");
        assert_eq!(adjust_boundary(&mut buf, 6), 6);
    }

    #[test]
    fn test_end_of_stream_gets_terminator() {
        let mut buf = buf_with(8, b"ab\ncd");
        assert_eq!(adjust_boundary(&mut buf, 5), 6);
        assert_eq!(&buf[..6], b"ab\ncd\n");
    }

    #[test]
    fn test_full_chunk_defers_partial_record() {
        let mut buf = buf_with(8, b"ab\ncd\nef");
        assert_eq!(adjust_boundary(&mut buf, 8), 6);
    }

    #[test]
    fn test_full_chunk_without_terminator() {
        let mut buf = buf_with(4, b"abcd");
        assert_eq!(adjust_boundary(&mut buf, 4), 0);
    }

    #[test]
    fn test_oversized_count_treated_as_full() {
        let mut buf = buf_with(8, b"ab
cd
ef");
        assert_eq!(adjust_boundary(&mut buf, 64), 6);
        let mut buf = buf_with(4, b"abc
");
        assert_eq!(adjust_boundary(&mut buf, 5), 4);
    }

    #[test]
    fn test_set_loaded_tracks_synthesized_terminator() {
        let mut chunk = Chunk::new(Side::Left, 8);
        chunk.raw_mut()[..2].copy_from_slice(b"ab");
        let adjusted = adjust_boundary(chunk.raw_mut(), 2);
        chunk.set_loaded(10, 2, adjusted, 12);

        assert_eq!(chunk.data(), b"ab\n");
        assert_eq!(chunk.len(), 3);
        assert_eq!(chunk.source_len(), 2);
        assert!(chunk.is_final());
        assert_eq!(chunk.stream_offset(1), 11);
    }

    #[test]
    fn test_set_loaded_not_final_when_deferred() {
        let mut chunk = Chunk::new(Side::Right, 4);
        chunk.raw_mut().copy_from_slice(b"a\nbc");
        let adjusted = adjust_boundary(chunk.raw_mut(), 4);
        chunk.set_loaded(0, 4, adjusted, 6);

        assert_eq!(chunk.data(), b"a\n");
        assert!(!chunk.is_final());
        assert_eq!(chunk.side(), Side::Right);
    }
}
