//! Per-input stream cursor
//!
//! The cursor owns one input handle plus its known total length and the
//! offset already consumed. Every chunk read seeks to the consumed offset
//! first, so bytes deferred by boundary adjustment (or left unconsumed by a
//! merge step) are simply read again.

use crate::chunk::{adjust_boundary, Chunk};
use std::io::{self, Read, Seek, SeekFrom};
use tracing::trace;
use xmerge_core::{MergeError, Result, Side, MAX_RECORD_LEN};

/// Readable input of known length with a monotonically advancing cursor.
///
/// Invariant: `position() <= len()`.
#[derive(Debug)]
pub struct StreamCursor<R> {
    side: Side,
    reader: R,
    len: u64,
    position: u64,
}

impl<R: Read + Seek> StreamCursor<R> {
    /// Wrap a reader whose total length is already known
    pub fn new(side: Side, reader: R, len: u64) -> Self {
        StreamCursor {
            side,
            reader,
            len,
            position: 0,
        }
    }

    /// Wrap a reader, measuring its length by seeking to the end
    pub fn measure(side: Side, mut reader: R) -> io::Result<Self> {
        let len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;
        Ok(Self::new(side, reader, len))
    }

    /// Which input this is
    pub fn side(&self) -> Side {
        self.side
    }

    /// Total stream length
    pub fn len(&self) -> u64 {
        self.len
    }

    /// True for a zero-length stream
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes consumed so far
    pub fn position(&self) -> u64 {
        self.position
    }

    /// True once every byte has been consumed
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.len
    }

    /// Load the next record-aligned chunk starting at the cursor.
    ///
    /// Does not move the cursor; call [`advance`](Self::advance) with what the
    /// merge actually consumed.
    pub fn read_chunk(&mut self, chunk: &mut Chunk) -> Result<()> {
        let remaining = self.len - self.position;
        let want = usize::try_from(remaining)
            .map_or(chunk.capacity(), |r| r.min(chunk.capacity()));

        self.reader.seek(SeekFrom::Start(self.position))?;
        let bytes = fill(&mut self.reader, &mut chunk.raw_mut()[..want])?;
        if bytes < want {
            return Err(MergeError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "{} ended at offset {}, expected {} bytes",
                    self.side,
                    self.position + bytes as u64,
                    self.len
                ),
            )));
        }

        let adjusted = adjust_boundary(chunk.raw_mut(), bytes);
        if adjusted == 0 && bytes > 0 {
            return Err(MergeError::RecordTooLong {
                input: self.side,
                offset: self.position,
                max: MAX_RECORD_LEN,
            });
        }
        chunk.set_loaded(self.position, bytes, adjusted, self.len);

        trace!(
            input = %self.side,
            offset = self.position,
            bytes,
            adjusted,
            last = chunk.is_final(),
            "Read chunk"
        );
        Ok(())
    }

    /// Move the cursor past `consumed` bytes of `chunk`.
    ///
    /// A synthesized terminator never counts toward the cursor.
    pub fn advance(&mut self, consumed: usize, chunk: &Chunk) {
        let consumed = consumed.min(chunk.source_len()) as u64;
        self.position = (chunk.base() + consumed).min(self.len);
    }
}

/// Read until `buf` is full or the reader reports end of stream.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
