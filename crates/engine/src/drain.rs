//! Tail drain: finish the one input that still has data
//!
//! Once the other input is fully consumed there is nothing left to compare
//! against, so each chunk of the remaining stream just goes through the
//! single-stream pass (duplicate suppression and order checking still apply,
//! against the record last emitted by the dual merge).

use crate::chunk::Chunk;
use crate::sink::OutputSink;
use crate::state::RunState;
use crate::step::drain_chunk;
use crate::stream::StreamCursor;
use std::io::{Read, Seek, Write};
use tracing::debug;
use xmerge_core::Result;

pub(crate) fn drain_tail<R: Read + Seek, W: Write>(
    stream: &mut StreamCursor<R>,
    chunk: &mut Chunk,
    state: &mut RunState,
    out: &mut Vec<u8>,
    sink: &mut OutputSink<W>,
) -> Result<()> {
    debug!(
        input = %stream.side(),
        offset = stream.position(),
        remaining = stream.len() - stream.position(),
        "Draining tail"
    );

    while !stream.is_exhausted() {
        stream.read_chunk(chunk)?;
        out.clear();
        let consumed = drain_chunk(chunk, 0, state, out)?;
        sink.write_step(out)?;
        stream.advance(consumed, chunk);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use xmerge_core::{MergeOptions, Side};

    #[test]
    fn test_drains_across_chunks_with_dedup() {
        let mut data = Vec::new();
        for i in 0..100 {
            let line = format!("k{:03}\n", i / 2);
            data.extend_from_slice(line.as_bytes());
        }
        let mut stream = StreamCursor::measure(Side::Right, Cursor::new(data)).unwrap();
        let mut chunk = Chunk::new(Side::Right, 201);
        let mut state = RunState::new(&MergeOptions::unique());
        let mut out = Vec::new();
        let mut sink = OutputSink::new(Vec::new());

        drain_tail(&mut stream, &mut chunk, &mut state, &mut out, &mut sink).unwrap();

        assert!(stream.is_exhausted());
        assert_eq!(state.records_written, 50);
        assert_eq!(state.duplicates_skipped, 50);
        assert_eq!(sink.bytes_written(), 250);
    }

    #[test]
    fn test_tail_checked_against_last_emitted() {
        let mut stream =
            StreamCursor::measure(Side::Left, Cursor::new(b"a\nz\n".to_vec())).unwrap();
        let mut chunk = Chunk::new(Side::Left, 256);
        let mut state = RunState::new(&MergeOptions::all());
        state.last.set(b"m");
        let mut out = Vec::new();
        let mut sink = OutputSink::new(Vec::new());

        drain_tail(&mut stream, &mut chunk, &mut state, &mut out, &mut sink).unwrap();
        assert_eq!(state.disordered_skipped, 1);
        assert_eq!(state.records_written, 1);
        assert_eq!(sink.finish().unwrap(), 2);
    }
}
