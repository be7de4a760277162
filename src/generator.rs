//! Sample input generation: encode, truncate, decode, and repeat.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use log::{debug, info, warn};
use serde::Serialize;

use crate::config::GeneratorConfig;
use crate::error::{Result, SampleError};
use crate::tokenizer::{Gpt2Tokenizer, TextTokenizer, TokenId};

/// Summary of a completed generation run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SampleReport {
    /// Configuration the run was executed with.
    pub config: GeneratorConfig,
    /// Number of tokens in the fully encoded source sentence.
    pub source_tokens: usize,
    /// Number of tokens kept after truncation.
    pub kept_tokens: usize,
    /// Text written on every output line (without the trailing newline).
    pub decoded_text: String,
    /// Number of lines written.
    pub lines_written: usize,
    /// Total size of the output file in bytes.
    pub bytes_written: usize,
}

/// Produces a benchmark sample file from a [`GeneratorConfig`].
#[derive(Debug, Clone)]
pub struct SampleGenerator {
    config: GeneratorConfig,
}

impl SampleGenerator {
    /// Creates a generator for the supplied configuration.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration the generator runs with.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Runs the full pipeline with the GPT-2 tokenizer named by the configuration.
    ///
    /// The source sentence and tokenizer are both loaded before the output file
    /// is opened, so a missing input never creates or truncates the output.
    pub fn run(&self) -> Result<SampleReport> {
        let source = load_source(&self.config.source_path)?;
        info!(
            "loading GPT-2 tokenizer from {} and {}",
            self.config.vocab_path.display(),
            self.config.merges_path.display()
        );
        let tokenizer =
            Gpt2Tokenizer::from_files(&self.config.vocab_path, &self.config.merges_path)?;
        debug!("tokenizer vocabulary size {}", tokenizer.vocab_size());
        self.generate(&source, &tokenizer)
    }

    /// Runs the pipeline with a caller-supplied tokenizer.
    pub fn run_with<T: TextTokenizer>(&self, tokenizer: &T) -> Result<SampleReport> {
        let source = load_source(&self.config.source_path)?;
        self.generate(&source, tokenizer)
    }

    fn generate<T: TextTokenizer>(&self, source: &str, tokenizer: &T) -> Result<SampleReport> {
        let cfg = &self.config;
        let ids = tokenizer.encode(source)?;
        let kept = truncate_tokens(&ids, cfg.input_seq_len);
        if kept.len() == ids.len() {
            warn!(
                "input_seq_len {} covers all {} source tokens; nothing truncated",
                cfg.input_seq_len,
                ids.len()
            );
        }
        debug!("kept {} of {} tokens: {:?}", kept.len(), ids.len(), kept);
        let decoded_text = tokenizer.decode(kept)?;

        if cfg.batch_size == 0 {
            warn!("batch_size is 0; {} will be empty", cfg.output_path.display());
        }
        let file = File::create(&cfg.output_path)
            .map_err(|err| SampleError::io(err, Some(cfg.output_path.clone())))?;
        let mut writer = BufWriter::new(file);
        let bytes_written = write_batch(&mut writer, &decoded_text, cfg.batch_size)
            .and_then(|written| writer.flush().map(|()| written))
            .map_err(|err| SampleError::io(err, Some(cfg.output_path.clone())))?;
        info!(
            "wrote {} lines ({} bytes) to {}",
            cfg.batch_size,
            bytes_written,
            cfg.output_path.display()
        );

        Ok(SampleReport {
            config: cfg.clone(),
            source_tokens: ids.len(),
            kept_tokens: kept.len(),
            decoded_text,
            lines_written: cfg.batch_size,
            bytes_written,
        })
    }
}

/// Returns at most the first `max_len` tokens.
#[must_use]
pub fn truncate_tokens(ids: &[TokenId], max_len: usize) -> &[TokenId] {
    &ids[..ids.len().min(max_len)]
}

/// Writes `text` followed by `\n`, `batch_size` times, returning the bytes written.
pub fn write_batch<W: Write>(
    writer: &mut W,
    text: &str,
    batch_size: usize,
) -> std::io::Result<usize> {
    for _ in 0..batch_size {
        writer.write_all(text.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    Ok((text.len() + 1) * batch_size)
}

fn load_source(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path).map_err(|err| SampleError::read(err, path))?;
    info!("read {} bytes of source text from {}", text.len(), path.display());
    Ok(text)
}
