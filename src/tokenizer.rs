//! Tokenizer seam used by the generator and its GPT-2 byte-level BPE implementation.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::debug;
use tokenizers::decoders::byte_level::ByteLevel as ByteLevelDecoder;
use tokenizers::models::bpe::BPE;
use tokenizers::pre_tokenizers::byte_level::ByteLevel;
use tokenizers::Tokenizer;

use crate::error::{Result, SampleError};

/// Token identifier used throughout the crate.
pub type TokenId = u32;

/// Converts text to token ids and back.
pub trait TextTokenizer {
    /// Encodes `text` into token ids without adding special tokens.
    fn encode(&self, text: &str) -> Result<Vec<TokenId>>;

    /// Decodes token ids back into text.
    fn decode(&self, ids: &[TokenId]) -> Result<String>;
}

/// GPT-2 byte-level BPE tokenizer loaded from a `vocab.json` and `merges.txt` pair.
#[must_use]
#[derive(Debug, Clone)]
pub struct Gpt2Tokenizer {
    inner: Tokenizer,
}

impl Gpt2Tokenizer {
    /// Loads the vocabulary and merge rules from disk.
    ///
    /// Missing files yield [`SampleError::FileNotFound`]; files that exist but
    /// cannot be turned into a BPE model yield [`SampleError::Parse`].
    pub fn from_files<V, M>(vocab_path: V, merges_path: M) -> Result<Self>
    where
        V: AsRef<Path>,
        M: AsRef<Path>,
    {
        let vocab_path = vocab_path.as_ref();
        let merges_path = merges_path.as_ref();

        let vocab_json =
            fs::read_to_string(vocab_path).map_err(|err| SampleError::read(err, vocab_path))?;
        fs::metadata(merges_path).map_err(|err| SampleError::read(err, merges_path))?;

        let vocab: HashMap<String, TokenId> =
            serde_json::from_str(&vocab_json).map_err(|err| SampleError::Parse {
                path: vocab_path.to_path_buf(),
                message: err.to_string(),
            })?;
        debug!(
            "vocabulary {} holds {} entries",
            vocab_path.display(),
            vocab.len()
        );

        // The vocabulary parsed above, so builder failures come from the merges file.
        let model = BPE::from_file(
            &vocab_path.to_string_lossy(),
            &merges_path.to_string_lossy(),
        )
        .build()
        .map_err(|err| SampleError::Parse {
            path: merges_path.to_path_buf(),
            message: err.to_string(),
        })?;

        let mut inner = Tokenizer::new(model);
        inner.with_pre_tokenizer(Some(ByteLevel::default().add_prefix_space(false)));
        inner.with_decoder(Some(ByteLevelDecoder::default()));
        Ok(Self { inner })
    }

    /// Provides immutable access to the underlying tokenizer.
    #[must_use]
    pub fn inner(&self) -> &Tokenizer {
        &self.inner
    }

    /// Returns the vocabulary size including added tokens.
    #[must_use]
    pub fn vocab_size(&self) -> usize {
        self.inner.get_vocab_size(true)
    }
}

impl TextTokenizer for Gpt2Tokenizer {
    fn encode(&self, text: &str) -> Result<Vec<TokenId>> {
        let encoding = self.inner.encode(text, false)?;
        Ok(encoding.get_ids().to_vec())
    }

    fn decode(&self, ids: &[TokenId]) -> Result<String> {
        Ok(self.inner.decode(ids, false)?)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::{tempdir, TempDir};

    const MERGES: &[(&str, &str)] = &[("T", "h"), ("Th", "e"), ("Ġ", "q"), ("Ġq", "u")];

    /// Writes a miniature GPT-2 style vocabulary (the full byte-level alphabet
    /// plus a handful of merges) and returns `(dir, vocab_path, merges_path)`.
    pub(crate) fn write_toy_gpt2_files() -> (TempDir, PathBuf, PathBuf) {
        let dir = tempdir().expect("create tempdir");
        let mut symbols: Vec<String> = ByteLevel::alphabet()
            .into_iter()
            .map(|ch| ch.to_string())
            .collect();
        symbols.sort();
        for (left, right) in MERGES {
            symbols.push(format!("{left}{right}"));
        }
        let vocab: HashMap<String, TokenId> = symbols
            .into_iter()
            .enumerate()
            .map(|(idx, token)| (token, idx as TokenId))
            .collect();

        let vocab_path = dir.path().join("vocab.json");
        let merges_path = dir.path().join("merges.txt");
        fs::write(&vocab_path, serde_json::to_string(&vocab).expect("vocab json"))
            .expect("write vocab");
        let mut merges = String::from("#version: 0.2\n");
        for (left, right) in MERGES {
            merges.push_str(&format!("{left} {right}\n"));
        }
        fs::write(&merges_path, merges).expect("write merges");
        (dir, vocab_path, merges_path)
    }

    #[test]
    fn round_trips_full_sentence() {
        let (_dir, vocab, merges) = write_toy_gpt2_files();
        let tokenizer = Gpt2Tokenizer::from_files(&vocab, &merges).expect("tokenizer");
        let text = "The quick brown fox jumps.";
        let ids = tokenizer.encode(text).expect("encode");
        assert!(!ids.is_empty());
        assert_eq!(tokenizer.decode(&ids).expect("decode"), text);
        assert_eq!(tokenizer.vocab_size(), 256 + MERGES.len());
    }

    #[test]
    fn merges_are_applied() {
        let (_dir, vocab, merges) = write_toy_gpt2_files();
        let tokenizer = Gpt2Tokenizer::from_files(&vocab, &merges).expect("tokenizer");
        let ids = tokenizer.encode("The quick").expect("encode");
        let tokens: Vec<String> = ids
            .iter()
            .map(|&id| tokenizer.inner().id_to_token(id).expect("known id"))
            .collect();
        assert_eq!(tokens[..3], ["The", "Ġqu", "i"]);
        assert_eq!(tokenizer.decode(&ids[..2]).expect("decode"), "The qu");
    }

    #[test]
    fn missing_vocab_is_not_found() {
        let (dir, _vocab, merges) = write_toy_gpt2_files();
        let missing = dir.path().join("absent.json");
        let err = Gpt2Tokenizer::from_files(&missing, &merges).expect_err("should fail");
        assert!(matches!(err, SampleError::FileNotFound { ref path } if path == &missing));
    }

    #[test]
    fn missing_merges_is_not_found() {
        let (dir, vocab, _merges) = write_toy_gpt2_files();
        let missing = dir.path().join("absent.txt");
        let err = Gpt2Tokenizer::from_files(&vocab, &missing).expect_err("should fail");
        assert!(matches!(err, SampleError::FileNotFound { ref path } if path == &missing));
    }

    #[test]
    fn malformed_vocab_is_parse_error() {
        let (_dir, vocab, merges) = write_toy_gpt2_files();
        fs::write(&vocab, "not json").expect("overwrite vocab");
        let err = Gpt2Tokenizer::from_files(&vocab, &merges).expect_err("should fail");
        assert!(matches!(err, SampleError::Parse { ref path, .. } if path == &vocab));
    }

    #[test]
    fn merges_outside_vocab_are_parse_error() {
        let (_dir, vocab, merges) = write_toy_gpt2_files();
        fs::write(&merges, "#version: 0.2\nzz yy\n").expect("overwrite merges");
        let err = Gpt2Tokenizer::from_files(&vocab, &merges).expect_err("should fail");
        assert!(matches!(err, SampleError::Parse { ref path, .. } if path == &merges));
    }
}
