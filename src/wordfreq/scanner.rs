use std::collections::VecDeque;
use std::io::{self, Read};
use std::iter::FusedIterator;

use crate::common::io::read_full;

/// Default number of bytes pulled from the input per read.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Largest accepted chunk size; larger requests are lowered to this.
pub const MAX_CHUNK_SIZE: usize = 64 * 1024 * 1024;

/// Longest possible incomplete UTF-8 sequence carried between chunks.
const MAX_UTF8_CARRY: usize = 3;

/// Word-byte lookup table: ASCII letters and digits.
const fn make_word_table() -> [u8; 256] {
    let mut t = [0u8; 256];
    let mut b = 0;
    while b < 256 {
        let c = b as u8;
        if c.is_ascii_alphanumeric() {
            t[b] = 1;
        }
        b += 1;
    }
    t
}

/// Precomputed lookup: `WORD_TABLE[byte] == 1` if the byte is `[A-Za-z0-9]`.
const WORD_TABLE: [u8; 256] = make_word_table();

/// True if `b` can be part of a word.
/// Bytes of multi-byte UTF-8 sequences are all >= 0x80 and never match,
/// so non-ASCII characters always separate words.
#[inline]
pub fn is_word_byte(b: u8) -> bool {
    WORD_TABLE[b as usize] != 0
}

/// Iterator over maximal `[A-Za-z0-9]+` runs of a byte slice.
pub struct WordRuns<'a> {
    text: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for WordRuns<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let text = self.text;
        let start = self.pos + text[self.pos..].iter().position(|&b| is_word_byte(b))?;
        let end = text[start..]
            .iter()
            .position(|&b| !is_word_byte(b))
            .map_or(text.len(), |n| start + n);
        self.pos = end;
        Some(&text[start..end])
    }
}

impl FusedIterator for WordRuns<'_> {}

/// Split `text` into its maximal alphanumeric runs, left to right.
pub fn word_runs(text: &[u8]) -> WordRuns<'_> {
    WordRuns { text, pos: 0 }
}

/// Decode `input` as UTF-8, appending the valid text to `out` and silently
/// dropping invalid sequences.
///
/// Returns the length of an incomplete sequence at the very end of `input`
/// (0..=3). Those bytes are not appended; the caller prepends them to the
/// next chunk so that a character split by a read boundary still decodes.
pub fn decode_lossy_into(input: &[u8], out: &mut Vec<u8>) -> usize {
    let mut rest = input;
    loop {
        match std::str::from_utf8(rest) {
            Ok(s) => {
                out.extend_from_slice(s.as_bytes());
                return 0;
            }
            Err(e) => {
                let valid = e.valid_up_to();
                out.extend_from_slice(&rest[..valid]);
                match e.error_len() {
                    Some(bad) => rest = &rest[valid + bad..],
                    None => return rest.len() - valid,
                }
            }
        }
    }
}

/// Streaming word tokenizer over a byte source.
///
/// Reads the source in fixed-size chunks and yields lowercased words in input
/// order. A word that runs up to the end of a chunk is held back as the
/// pending tail and re-scanned together with the next chunk, so words that
/// straddle any number of read boundaries come out exactly once, intact.
/// The tally is therefore independent of the chunk size.
///
/// Memory use is bounded by the chunk size plus the length of the longest
/// word in the input.
pub struct ChunkScanner<R> {
    reader: R,
    chunk_size: usize,
    /// Raw bytes: carried incomplete UTF-8 prefix followed by the last read.
    raw: Vec<u8>,
    /// Length of the incomplete UTF-8 sequence at the front of `raw`.
    carry: usize,
    /// Scratch buffer: pending tail + decoded, lowercased chunk text.
    text: Vec<u8>,
    /// Trailing alphanumeric run that may continue in the next chunk.
    tail: Vec<u8>,
    ready: VecDeque<String>,
    bytes_read: u64,
    chunks_read: u64,
    finished: bool,
}

impl<R: Read> ChunkScanner<R> {
    pub fn new(reader: R) -> Self {
        Self::with_chunk_size(reader, DEFAULT_CHUNK_SIZE)
    }

    /// Scanner reading `chunk_size` bytes at a time, clamped to
    /// `1..=MAX_CHUNK_SIZE`.
    pub fn with_chunk_size(reader: R, chunk_size: usize) -> Self {
        let chunk_size = chunk_size.clamp(1, MAX_CHUNK_SIZE);
        Self {
            reader,
            chunk_size,
            raw: vec![0u8; MAX_UTF8_CARRY + chunk_size],
            carry: 0,
            text: Vec::with_capacity(chunk_size.min(DEFAULT_CHUNK_SIZE)),
            tail: Vec::new(),
            ready: VecDeque::new(),
            bytes_read: 0,
            chunks_read: 0,
            finished: false,
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Total bytes consumed from the source so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Number of non-empty chunks consumed so far.
    pub fn chunks_read(&self) -> u64 {
        self.chunks_read
    }

    /// Read one chunk and queue every word it completes.
    fn fill(&mut self) -> io::Result<()> {
        let start = self.carry;
        let n = read_full(&mut self.reader, &mut self.raw[start..start + self.chunk_size])?;
        if n == 0 {
            self.finish();
            return Ok(());
        }
        self.bytes_read += n as u64;
        self.chunks_read += 1;

        // Pending tail first; it is already lowercase.
        self.text.clear();
        self.text.append(&mut self.tail);
        let fresh = self.text.len();

        let end = start + n;
        self.carry = decode_lossy_into(&self.raw[..end], &mut self.text);
        self.raw.copy_within(end - self.carry..end, 0);
        self.text[fresh..].make_ascii_lowercase();

        // A trailing alphanumeric run may continue in the next chunk.
        let split = self
            .text
            .iter()
            .rposition(|&b| !is_word_byte(b))
            .map_or(0, |i| i + 1);
        self.tail.extend_from_slice(&self.text[split..]);

        self.ready
            .extend(word_runs(&self.text[..split]).map(ascii_word));
        Ok(())
    }

    /// End of stream: the pending tail, if any, is a complete word.
    /// An incomplete UTF-8 sequence left in the carry is dropped.
    fn finish(&mut self) {
        if !self.tail.is_empty() {
            self.ready.push_back(ascii_word(&self.tail));
            self.tail.clear();
        }
        self.carry = 0;
        self.finished = true;
        log::debug!(
            "scan finished: {} bytes in {} chunks of {} bytes",
            self.bytes_read,
            self.chunks_read,
            self.chunk_size
        );
    }
}

impl<R: Read> Iterator for ChunkScanner<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(word) = self.ready.pop_front() {
                return Some(Ok(word));
            }
            if self.finished {
                return None;
            }
            if let Err(e) = self.fill() {
                self.finished = true;
                return Some(Err(e));
            }
        }
    }
}

impl<R: Read> FusedIterator for ChunkScanner<R> {}

/// Word bytes are ASCII by construction.
#[inline]
fn ascii_word(run: &[u8]) -> String {
    run.iter().map(|&b| b as char).collect()
}
