use std::io::{self, Write};

use super::tally::Tally;

/// Default size at which buffered output lines are written to the sink.
pub const DEFAULT_FLUSH_THRESHOLD: usize = 64 * 1024;

/// What a [`SortedWriter`] emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Lines written, one per distinct word.
    pub lines: u64,
    /// Bytes handed to the sink.
    pub bytes: u64,
    /// Number of batched `write_all` calls.
    pub flushes: u64,
}

/// Append one `word count\n` line to `out`.
#[inline]
pub fn format_line(word: &str, count: u64, out: &mut Vec<u8>) {
    let mut buf = itoa::Buffer::new();
    out.extend_from_slice(word.as_bytes());
    out.push(b' ');
    out.extend_from_slice(buf.format(count).as_bytes());
    out.push(b'\n');
}

/// Writes a tally as sorted `word count` lines in bounded-size batches.
///
/// Lines accumulate in an in-memory buffer that is written out and emptied
/// each time it reaches the flush threshold, so peak buffer size is one
/// threshold plus one line regardless of how large the output is.
pub struct SortedWriter<W: Write> {
    sink: W,
    buf: Vec<u8>,
    flush_threshold: usize,
}

impl<W: Write> SortedWriter<W> {
    pub fn new(sink: W) -> Self {
        Self::with_flush_threshold(sink, DEFAULT_FLUSH_THRESHOLD)
    }

    /// A threshold of 0 writes after every line.
    pub fn with_flush_threshold(sink: W, flush_threshold: usize) -> Self {
        Self {
            sink,
            buf: Vec::new(),
            flush_threshold,
        }
    }

    pub fn flush_threshold(&self) -> usize {
        self.flush_threshold
    }

    /// Sort `tally` by word and write every entry, then flush the sink.
    pub fn write_tally(mut self, tally: Tally) -> io::Result<WriteSummary> {
        let mut summary = WriteSummary::default();
        for (word, count) in tally.into_sorted() {
            format_line(&word, count, &mut self.buf);
            summary.lines += 1;
            if self.buf.len() >= self.flush_threshold {
                self.write_batch(&mut summary)?;
            }
        }
        if !self.buf.is_empty() {
            self.write_batch(&mut summary)?;
        }
        self.sink.flush()?;
        Ok(summary)
    }

    fn write_batch(&mut self, summary: &mut WriteSummary) -> io::Result<()> {
        self.sink.write_all(&self.buf)?;
        summary.bytes += self.buf.len() as u64;
        summary.flushes += 1;
        log::debug!("wrote batch of {} bytes", self.buf.len());
        self.buf.clear();
        Ok(())
    }
}
