//! Configuration and builder for sample generation runs.

use std::path::{Path, PathBuf};

use crate::error::{Result, SampleError};
use serde::{Deserialize, Serialize};

/// Default number of repeated lines written to the output file.
pub const DEFAULT_BATCH_SIZE: usize = 8;
/// Default number of tokens kept from the encoded source sentence.
pub const DEFAULT_INPUT_SEQ_LEN: usize = 24;
/// Default output file path.
pub const DEFAULT_OUTPUT_PATH: &str = "./sample_input.txt";
/// Default GPT-2 vocabulary file.
pub const DEFAULT_VOCAB_PATH: &str = "../models/gpt2-vocab.json";
/// Default GPT-2 merges file.
pub const DEFAULT_MERGES_PATH: &str = "../models/gpt2-merges.txt";
/// Fixed location of the source sentence relative to the working directory.
pub const DEFAULT_SOURCE_PATH: &str = "../sample/source_sentence.txt";

/// Resolved settings for one sample generation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Number of times the decoded text is written to the output file.
    pub batch_size: usize,
    /// Maximum number of tokens kept from the start of the encoded source.
    pub input_seq_len: usize,
    /// Output file; any existing file at this path is overwritten.
    pub output_path: PathBuf,
    /// GPT-2 `vocab.json` file.
    pub vocab_path: PathBuf,
    /// GPT-2 `merges.txt` file.
    pub merges_path: PathBuf,
    /// Text file holding the source sentence.
    pub source_path: PathBuf,
}

impl GeneratorConfig {
    /// Returns a builder initialised with [`GeneratorConfig::default`].
    #[must_use]
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::default()
    }

    /// Validates that every configured path is non-empty.
    pub fn validate(&self) -> Result<()> {
        let paths: [(&str, &Path); 4] = [
            ("output path", &self.output_path),
            ("vocabulary path", &self.vocab_path),
            ("merges path", &self.merges_path),
            ("source path", &self.source_path),
        ];
        for (label, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(SampleError::InvalidConfig(format!(
                    "{label} must not be empty"
                )));
            }
        }
        Ok(())
    }

    /// Renders the configuration as `key: value` lines keyed by CLI option name.
    #[must_use]
    pub fn echo_lines(&self) -> Vec<String> {
        vec![
            format!("batch_size: {}", self.batch_size),
            format!("input_seq_len: {}", self.input_seq_len),
            format!("o_file_name: {}", self.output_path.display()),
            format!("vocab_file: {}", self.vocab_path.display()),
            format!("merges_file: {}", self.merges_path.display()),
            format!("source_file: {}", self.source_path.display()),
        ]
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            input_seq_len: DEFAULT_INPUT_SEQ_LEN,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            vocab_path: PathBuf::from(DEFAULT_VOCAB_PATH),
            merges_path: PathBuf::from(DEFAULT_MERGES_PATH),
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
        }
    }
}

/// Builder for [`GeneratorConfig`].
#[derive(Debug, Default, Clone)]
pub struct GeneratorBuilder {
    cfg: GeneratorConfig,
}

impl GeneratorBuilder {
    /// Creates a builder with [`GeneratorConfig::default`] settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many lines are written.
    #[must_use]
    pub fn batch_size(mut self, value: usize) -> Self {
        self.cfg.batch_size = value;
        self
    }

    /// Sets the maximum number of tokens kept from the source.
    #[must_use]
    pub fn input_seq_len(mut self, value: usize) -> Self {
        self.cfg.input_seq_len = value;
        self
    }

    /// Sets the output file path.
    #[must_use]
    pub fn output_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.cfg.output_path = path.into();
        self
    }

    /// Sets the vocabulary file path.
    #[must_use]
    pub fn vocab_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.cfg.vocab_path = path.into();
        self
    }

    /// Sets the merges file path.
    #[must_use]
    pub fn merges_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.cfg.merges_path = path.into();
        self
    }

    /// Sets the source sentence path.
    #[must_use]
    pub fn source_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.cfg.source_path = path.into();
        self
    }

    /// Finalises the builder, returning a validated [`GeneratorConfig`].
    pub fn build(self) -> Result<GeneratorConfig> {
        self.cfg.validate()?;
        Ok(self.cfg)
    }
}
