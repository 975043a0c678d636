//! Output writer with byte accounting

use std::io::{self, Write};
use xmerge_core::{MergeError, Result};

/// Writes step output to the destination and counts what landed there.
#[derive(Debug)]
pub(crate) struct OutputSink<W> {
    writer: W,
    written: u64,
}

impl<W: Write> OutputSink<W> {
    pub(crate) fn new(writer: W) -> Self {
        OutputSink { writer, written: 0 }
    }

    pub(crate) fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Write all of `buf`, failing if the writer stops accepting bytes.
    pub(crate) fn write_step(&mut self, buf: &[u8]) -> Result<()> {
        let mut done = 0;
        while done < buf.len() {
            match self.writer.write(&buf[done..]) {
                Ok(0) => {
                    return Err(MergeError::ShortWrite {
                        expected: buf.len(),
                        written: done,
                    })
                }
                Ok(n) => done += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        self.written += buf.len() as u64;
        Ok(())
    }

    pub(crate) fn finish(mut self) -> Result<u64> {
        self.writer.flush()?;
        Ok(self.written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stingy {
        budget: usize,
    }

    impl Write for Stingy {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let n = buf.len().min(self.budget);
            self.budget -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_counts_bytes() {
        let mut sink = OutputSink::new(Vec::new());
        sink.write_step(b"ab\n").unwrap();
        sink.write_step(b"").unwrap();
        sink.write_step(b"c\n").unwrap();
        assert_eq!(sink.bytes_written(), 5);
        assert_eq!(sink.finish().unwrap(), 5);
    }

    #[test]
    fn test_short_write_detected() {
        let mut sink = OutputSink::new(Stingy { budget: 3 });
        let err = sink.write_step(b"abcdef").unwrap_err();
        assert!(matches!(
            err,
            MergeError::ShortWrite {
                expected: 6,
                written: 3
            }
        ));
    }
}
