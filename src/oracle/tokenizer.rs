use std::path::Path;

use anyhow::{Context, Result};
use tokenizers::Tokenizer;
use tracing::info;

/// Token accounting used to size chunks for the classifier
pub trait TextTokenizer {
    /// Number of tokens in `text`, excluding special tokens
    fn token_length(&self, text: &str) -> Result<usize>;

    /// Keep at most `max_tokens` tokens of `text`
    fn truncate(&self, text: &str, max_tokens: usize) -> Result<String>;
}

/// Tokenizer loaded from a Hugging Face `tokenizer.json`
pub struct HfTokenizer {
    tokenizer: Tokenizer,
}

impl HfTokenizer {
    pub fn from_file(path: &Path) -> Result<Self> {
        info!("Loading tokenizer from {:?}", path);
        let tokenizer = Tokenizer::from_file(path)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("Failed to load tokenizer: {:?}", path))?;
        Ok(Self { tokenizer })
    }

    fn encode_ids(&self, text: &str) -> Result<Vec<u32>> {
        let encoding = self
            .tokenizer
            .encode(text, false)
            .map_err(|e| anyhow::anyhow!("Encoding failed: {}", e))?;
        Ok(encoding.get_ids().to_vec())
    }
}

impl TextTokenizer for HfTokenizer {
    fn token_length(&self, text: &str) -> Result<usize> {
        Ok(self.encode_ids(text)?.len())
    }

    fn truncate(&self, text: &str, max_tokens: usize) -> Result<String> {
        let ids = self.encode_ids(text)?;
        if ids.len() <= max_tokens {
            return Ok(text.to_string());
        }
        self.tokenizer
            .decode(&ids[..max_tokens], true)
            .map_err(|e| anyhow::anyhow!("Decoding failed: {}", e))
    }
}

/// One token per whitespace-separated word
///
/// Used when no model tokenizer is configured. Undercounts subword
/// tokenizers, so chunks may still be cut by the classifier's own truncation.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl TextTokenizer for WhitespaceTokenizer {
    fn token_length(&self, text: &str) -> Result<usize> {
        Ok(text.split_whitespace().count())
    }

    fn truncate(&self, text: &str, max_tokens: usize) -> Result<String> {
        Ok(text
            .split_whitespace()
            .take(max_tokens)
            .collect::<Vec<_>>()
            .join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_token_length() {
        let tok = WhitespaceTokenizer;
        assert_eq!(tok.token_length("").unwrap(), 0);
        assert_eq!(tok.token_length("one two  three").unwrap(), 3);
    }

    #[test]
    fn test_whitespace_truncate() {
        let tok = WhitespaceTokenizer;
        assert_eq!(tok.truncate("a b c d e", 3).unwrap(), "a b c");
        assert_eq!(tok.truncate("a b", 5).unwrap(), "a b");
        assert_eq!(tok.truncate("a b", 0).unwrap(), "");
    }

    #[test]
    fn test_missing_tokenizer_file() {
        let result = HfTokenizer::from_file(Path::new("/nonexistent/tokenizer.json"));
        assert!(result.is_err());
    }
}
