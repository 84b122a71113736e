use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::oracle::TextTokenizer;

/// Tokens kept free for the classifier's special tokens (e.g. CLS/SEP)
pub const RESERVED_SPECIAL_TOKENS: usize = 2;

/// Packing state of the chunk builder
#[derive(Debug)]
enum ChunkState {
    /// Nothing accumulated since the last flush
    Flushed,
    /// Sentences waiting to be joined into a chunk
    Accumulating { sentences: Vec<String>, tokens: usize },
}

impl ChunkState {
    /// Join the accumulated sentences into `chunks` and reset.
    ///
    /// The only place a chunk is emitted.
    fn flush(&mut self, chunks: &mut Vec<String>) {
        let previous = std::mem::replace(self, ChunkState::Flushed);
        if let ChunkState::Accumulating { sentences, .. } = previous {
            chunks.push(sentences.join(" "));
        }
    }
}

/// Greedily pack sentences into chunks of at most `max_tokens - 2` tokens
///
/// Sentences longer than the budget are truncated to it. Chunk order follows
/// sentence order and every chunk is non-empty.
pub fn build_chunks<T: TextTokenizer>(
    sentences: &[String],
    tokenizer: &T,
    max_tokens: usize,
) -> Result<Vec<String>> {
    let budget = max_tokens.saturating_sub(RESERVED_SPECIAL_TOKENS);
    let mut chunks = Vec::new();
    let mut state = ChunkState::Flushed;

    for (index, sentence) in sentences.iter().enumerate() {
        let tokenizer_error = |source| AnalysisError::Tokenizer { index, source };

        let mut sentence_tokens = tokenizer.token_length(sentence).map_err(tokenizer_error)?;
        let mut sentence = sentence.clone();

        if sentence_tokens > budget {
            sentence = tokenizer
                .truncate(&sentence, budget)
                .map_err(tokenizer_error)?;
            sentence_tokens = tokenizer
                .token_length(&sentence)
                .map_err(tokenizer_error)?;
            if sentence_tokens > budget {
                return Err(tokenizer_error(anyhow::anyhow!(
                    "truncated sentence still has {} tokens, budget is {}",
                    sentence_tokens,
                    budget
                )));
            }
            debug!(
                "Sentence {} truncated to {} tokens ({} chars)",
                index,
                sentence_tokens,
                sentence.chars().count()
            );
        }

        if sentence.trim().is_empty() {
            continue;
        }

        if let ChunkState::Accumulating { sentences, tokens } = &mut state {
            if *tokens + sentence_tokens <= budget {
                sentences.push(sentence);
                *tokens += sentence_tokens;
                continue;
            }
        }

        state.flush(&mut chunks);
        state = ChunkState::Accumulating {
            sentences: vec![sentence],
            tokens: sentence_tokens,
        };
    }

    state.flush(&mut chunks);

    debug!("Packed {} sentences into {} chunks", sentences.len(), chunks.len());
    Ok(chunks)
}
