use std::path::Path;

use crate::common::io::{create_output, open_input};

use super::error::WordFreqError;
use super::scanner::{ChunkScanner, DEFAULT_CHUNK_SIZE};
use super::tally::Tally;
use super::writer::{DEFAULT_FLUSH_THRESHOLD, SortedWriter, WriteSummary};

/// Configuration for a word frequency run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordFreqConfig {
    /// Bytes read from the input per chunk.
    pub chunk_size: usize,
    /// Output buffer size that triggers a write to the output file.
    pub flush_threshold: usize,
}

impl Default for WordFreqConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            flush_threshold: DEFAULT_FLUSH_THRESHOLD,
        }
    }
}

/// Scan the file at `path` and count its words.
/// The input file is closed before this returns, on success or failure.
pub fn count_words_path(path: &Path, config: &WordFreqConfig) -> Result<Tally, WordFreqError> {
    let file = open_input(path).map_err(|source| WordFreqError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let scanner = ChunkScanner::with_chunk_size(file, config.chunk_size);
    Tally::accumulate(scanner).map_err(|source| WordFreqError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `tally` to `path` as sorted `word count` lines.
/// The file is created if absent and truncated if present. A failure part way
/// through can leave a truncated file behind.
pub fn write_results_path(
    path: &Path,
    tally: Tally,
    config: &WordFreqConfig,
) -> Result<WriteSummary, WordFreqError> {
    let file = create_output(path).map_err(|source| WordFreqError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    SortedWriter::with_flush_threshold(file, config.flush_threshold)
        .write_tally(tally)
        .map_err(|source| WordFreqError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// Count the words of `input` and write the sorted tally to `output`.
///
/// The input is fully read and closed before the output is opened, so an
/// unreadable input never creates or truncates the output file.
pub fn run(
    input: &Path,
    output: &Path,
    config: &WordFreqConfig,
) -> Result<WriteSummary, WordFreqError> {
    let tally = count_words_path(input, config)?;
    log::info!(
        "{}: {} words, {} distinct",
        input.display(),
        tally.total(),
        tally.len()
    );
    let summary = write_results_path(output, tally, config)?;
    log::info!(
        "{}: {} lines, {} bytes in {} writes",
        output.display(),
        summary.lines,
        summary.bytes,
        summary.flushes
    );
    Ok(summary)
}

/// Parse a size argument like "8192", "64K", "1m".
/// Suffixes are binary multiples: K = 1024, M = 1024^2, G = 1024^3.
pub fn parse_size(s: &str) -> Result<usize, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty size".to_string());
    }

    let (num_part, suffix) = if s.ends_with(|c: char| c.is_ascii_alphabetic()) {
        let (n, s) = s.split_at(s.len() - 1);
        (n, s.chars().next())
    } else {
        (s, None)
    };

    let base: usize = num_part
        .parse()
        .map_err(|_| format!("invalid size: '{}'", s))?;

    let multiplier: usize = match suffix {
        Some('K') | Some('k') => 1024,
        Some('M') | Some('m') => 1024 * 1024,
        Some('G') | Some('g') => 1024 * 1024 * 1024,
        Some(c) => return Err(format!("invalid suffix '{}' in size '{}'", c, s)),
        None => 1,
    };

    base.checked_mul(multiplier)
        .ok_or_else(|| format!("size too large: '{}'", s))
}
