use std::path::PathBuf;
use std::process;

use clap::Parser;

use wordfreq_rs::wordfreq::{
    self, DEFAULT_CHUNK_SIZE, DEFAULT_FLUSH_THRESHOLD, MAX_CHUNK_SIZE, WordFreqConfig, parse_size,
};

#[derive(Parser)]
#[command(
    name = "fwordfreq",
    about = "Count alphanumeric words in INPUT_FILE and write sorted 'word count' lines to OUTPUT_FILE",
    after_help = "Use '--' before the file names if INPUT_FILE starts with '-', e.g. 'fwordfreq -- -notes.txt out.txt'."
)]
struct Cli {
    /// Read the input SIZE bytes at a time (K, M, G suffixes allowed)
    #[arg(long = "chunk-size", value_name = "SIZE", default_value_t = DEFAULT_CHUNK_SIZE, value_parser = parse_chunk_size)]
    chunk_size: usize,

    /// Write output whenever SIZE bytes are buffered (0 writes every line)
    #[arg(long = "flush-threshold", value_name = "SIZE", default_value_t = DEFAULT_FLUSH_THRESHOLD, value_parser = parse_size)]
    flush_threshold: usize,

    /// File to count words in
    #[arg(value_name = "INPUT_FILE")]
    input: PathBuf,

    /// File to write the tally to (created or truncated)
    #[arg(value_name = "OUTPUT_FILE")]
    output: PathBuf,
}

fn parse_chunk_size(s: &str) -> Result<usize, String> {
    match parse_size(s)? {
        0 => Err("chunk size must be at least 1 byte".to_string()),
        n if n > MAX_CHUNK_SIZE => Err(format!(
            "chunk size must be at most {} bytes (64M)",
            MAX_CHUNK_SIZE
        )),
        n => Ok(n),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("FWORDFREQ_LOG", "warn"))
        .init();

    // clap reports a wrong argument count on stderr and exits with status 2.
    let cli = Cli::parse();

    let config = WordFreqConfig {
        chunk_size: cli.chunk_size,
        flush_threshold: cli.flush_threshold,
    };

    if let Err(e) = wordfreq::run(&cli.input, &cli.output, &config) {
        eprintln!("fwordfreq: {}", e);
        process::exit(e.exit_code());
    }
}
