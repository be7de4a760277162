//! Sample input generation for GPT-2 inference benchmarks.
//!
//! The crate reads a source sentence, tokenizes it with a GPT-2 byte-level BPE
//! tokenizer, keeps the first `input_seq_len` tokens, decodes them back to text
//! and writes that text `batch_size` times to an output file.  It exposes both a
//! library API and the `gen-sample-input` command line interface.
//!
//! ```no_run
//! use gpt2_sample::{GeneratorConfig, SampleGenerator};
//!
//! # fn main() -> gpt2_sample::Result<()> {
//! let config = GeneratorConfig::builder()
//!     .batch_size(4)
//!     .input_seq_len(32)
//!     .output_path("sample_input.txt")
//!     .build()?;
//! let report = SampleGenerator::new(config).run()?;
//! println!("wrote {} lines", report.lines_written);
//! # Ok(())
//! # }
//! ```
//!
//! The CLI is enabled by default through the `cli` feature.  Library users can
//! disable default features to drop the CLI dependencies.

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    clippy::all,
    rust_2018_idioms,
    future_incompatible,
    unused_lifetimes,
    unreachable_pub
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::doc_markdown
)]

pub mod config;
pub mod error;
pub mod generator;
pub mod tokenizer;

pub use config::{GeneratorBuilder, GeneratorConfig};
pub use error::{Result, SampleError};
pub use generator::{truncate_tokens, write_batch, SampleGenerator, SampleReport};
pub use tokenizer::{Gpt2Tokenizer, TextTokenizer, TokenId};
