mod core;
mod error;
mod scanner;
mod tally;
mod writer;


pub use self::core::{WordFreqConfig, count_words_path, parse_size, run, write_results_path};
pub use self::error::WordFreqError;
pub use self::scanner::{
    ChunkScanner, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE, WordRuns, decode_lossy_into, is_word_byte,
    word_runs,
};
pub use self::tally::Tally;
pub use self::writer::{DEFAULT_FLUSH_THRESHOLD, SortedWriter, WriteSummary, format_line};
