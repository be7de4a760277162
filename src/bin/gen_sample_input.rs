use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use env_logger::Env;
use gpt2_sample::config::{
    DEFAULT_BATCH_SIZE, DEFAULT_INPUT_SEQ_LEN, DEFAULT_MERGES_PATH, DEFAULT_OUTPUT_PATH,
    DEFAULT_SOURCE_PATH, DEFAULT_VOCAB_PATH,
};
use gpt2_sample::{GeneratorConfig, SampleGenerator};
use log::info;

const BANNER_OPEN: &str = "=============== Arguments ===============";
const BANNER_CLOSE: &str = "=========================================";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate a GPT-2 sample input file for inference benchmarks",
    long_about = None
)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (-q, -qq)
    #[arg(short = 'q', long, action = ArgAction::Count)]
    quiet: u8,

    /// Number of repeated output lines
    #[arg(long = "batch_size", value_name = "N", default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Maximum number of tokens kept from the encoded source sentence
    #[arg(long = "input_seq_len", value_name = "N", default_value_t = DEFAULT_INPUT_SEQ_LEN)]
    input_seq_len: usize,

    /// Output file (overwritten if present)
    #[arg(long = "o_file_name", value_name = "PATH", default_value = DEFAULT_OUTPUT_PATH)]
    o_file_name: PathBuf,

    /// GPT-2 vocabulary file
    #[arg(long = "vocab_file", value_name = "PATH", default_value = DEFAULT_VOCAB_PATH)]
    vocab_file: PathBuf,

    /// GPT-2 merges file
    #[arg(long = "merges_file", value_name = "PATH", default_value = DEFAULT_MERGES_PATH)]
    merges_file: PathBuf,

    /// Source sentence file
    #[arg(long = "source_file", value_name = "PATH", default_value = DEFAULT_SOURCE_PATH)]
    source_file: PathBuf,

    /// Print a JSON run summary after writing the output
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config = GeneratorConfig::builder()
        .batch_size(cli.batch_size)
        .input_seq_len(cli.input_seq_len)
        .output_path(cli.o_file_name)
        .vocab_path(cli.vocab_file)
        .merges_path(cli.merges_file)
        .source_path(cli.source_file)
        .build()?;

    println!("\n{BANNER_OPEN}");
    for line in config.echo_lines() {
        println!("{line}");
    }
    println!("{BANNER_CLOSE}\n");

    let generator = SampleGenerator::new(config);
    let report = generator.run().with_context(|| {
        format!(
            "failed to generate {}",
            generator.config().output_path.display()
        )
    })?;
    info!(
        "kept {} of {} source tokens",
        report.kept_tokens, report.source_tokens
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: u8) {
    use log::LevelFilter;

    let level = if quiet > 0 {
        match quiet {
            1 => LevelFilter::Warn,
            _ => LevelFilter::Error,
        }
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_timestamp_millis();
    builder.filter_level(level);
    let _ = builder.try_init();
}
