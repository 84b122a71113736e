use futures::{StreamExt, TryStreamExt, stream};
use tracing::{debug, info};

use crate::error::{AnalysisError, Result};
use crate::models::{Probabilities, SegmentResult, SentimentLabel};
use crate::oracle::Classifier;

/// Score one chunk with the classifier
///
/// The label is the argmax of the raw scores (first maximum wins) and the
/// probabilities are their softmax.
pub async fn score_chunk<C: Classifier>(
    classifier: &C,
    index: usize,
    chunk: &str,
    max_tokens: usize,
) -> Result<SegmentResult> {
    let scores = classifier
        .score(chunk, max_tokens)
        .await
        .map_err(|source| AnalysisError::Classifier { index, source })?;

    let logits = validate_scores(index, &scores)?;

    let mut label = SentimentLabel::Negative;
    for candidate in SentimentLabel::ALL {
        if logits[candidate.index()] > logits[label.index()] {
            label = candidate;
        }
    }

    let result = SegmentResult {
        label,
        probs: Probabilities::from_logits(logits),
        text_len: chunk.chars().count(),
    };
    debug!(
        "Chunk {}: {} ({:.3}), {} chars",
        index,
        result.label,
        result.probs.get(result.label),
        result.text_len
    );
    Ok(result)
}

/// Score every chunk, keeping at most `concurrency` classifier calls in flight
///
/// Results come back in chunk order regardless of completion order. The
/// first failure aborts the whole batch.
pub async fn score_chunks<C: Classifier>(
    classifier: &C,
    chunks: &[String],
    max_tokens: usize,
    concurrency: usize,
) -> Result<Vec<SegmentResult>> {
    info!(
        "Scoring {} chunks (concurrency {})",
        chunks.len(),
        concurrency
    );

    stream::iter(chunks.iter().enumerate())
        .map(|(index, chunk)| score_chunk(classifier, index, chunk, max_tokens))
        .buffered(concurrency.max(1))
        .try_collect()
        .await
}

fn validate_scores(index: usize, scores: &[f64]) -> Result<[f64; 3]> {
    let logits: [f64; 3] = scores.try_into().map_err(|_| AnalysisError::InvalidScores {
        index,
        reason: format!("expected 3 scores, got {}", scores.len()),
    })?;
    if logits.iter().any(|s| !s.is_finite()) {
        return Err(AnalysisError::InvalidScores {
            index,
            reason: format!("non-finite scores {:?}", logits),
        });
    }
    Ok(logits)
}
