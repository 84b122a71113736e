use tracing::info;

use crate::error::{AnalysisError, Result};
use crate::models::AnalysisResult;
use crate::oracle::{Classifier, TextTokenizer};
use crate::stages::{
    RESERVED_SPECIAL_TOKENS, aggregate, build_chunks, normalize_whitespace, score_chunks,
    split_into_sentences,
};

/// Configuration for transcript analysis
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Classifier input budget in tokens, including special tokens
    pub max_tokens: usize,
    /// Maximum classifier calls in flight per analysis
    pub max_concurrent_chunks: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_tokens: 384,
            max_concurrent_chunks: 1,
        }
    }
}

impl AnalyzerConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_tokens <= RESERVED_SPECIAL_TOKENS {
            anyhow::bail!(
                "max_tokens must exceed the {} reserved special tokens, got {}",
                RESERVED_SPECIAL_TOKENS,
                self.max_tokens
            );
        }
        if self.max_concurrent_chunks == 0 {
            anyhow::bail!("max_concurrent_chunks must be at least 1");
        }
        Ok(())
    }
}

/// Transcript sentiment analyzer
///
/// Stateless between calls; the classifier and tokenizer are shared,
/// read-only collaborators.
pub struct SentimentAnalyzer<C, T> {
    classifier: C,
    tokenizer: T,
    config: AnalyzerConfig,
}

impl<C: Classifier, T: TextTokenizer> SentimentAnalyzer<C, T> {
    pub fn new(classifier: C, tokenizer: T, config: AnalyzerConfig) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self {
            classifier,
            tokenizer,
            config,
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Analyze a transcript end to end
    ///
    /// 1. Normalize whitespace (empty text returns a neutral verdict without
    ///    calling the classifier)
    /// 2. Split into sentences and pack them into token-bounded chunks
    /// 3. Score every chunk
    /// 4. Aggregate the chunk distributions weighted by chunk length
    pub async fn analyze(&self, transcript: &str) -> Result<AnalysisResult> {
        let text = normalize_whitespace(transcript);
        if text.is_empty() {
            info!("Empty transcript, returning neutral verdict");
            return Ok(AnalysisResult::empty());
        }

        let sentences = split_into_sentences(&text);
        let chunks = build_chunks(&sentences, &self.tokenizer, self.config.max_tokens)?;
        info!(
            "Transcript: {} chars, {} sentences, {} chunks",
            text.chars().count(),
            sentences.len(),
            chunks.len()
        );

        let segments = score_chunks(
            &self.classifier,
            &chunks,
            self.config.max_tokens,
            self.config.max_concurrent_chunks,
        )
        .await?;

        if segments.is_empty() {
            return Err(AnalysisError::NoSegments);
        }

        let verdict = aggregate(&segments);
        info!(
            "Verdict: {} (confidence {:.3})",
            verdict.label, verdict.confidence
        );

        Ok(AnalysisResult {
            label: verdict.label,
            confidence: verdict.confidence,
            probs: verdict.probs,
            chunk_count: chunks.len(),
            details: segments,
        })
    }
}
