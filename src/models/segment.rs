use serde::{Deserialize, Serialize};

use super::{Probabilities, SentimentLabel};

/// Scored chunk of a transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentResult {
    /// Argmax label of the raw classifier scores
    pub label: SentimentLabel,
    /// Softmax-normalized classifier scores
    pub probs: Probabilities,
    /// Chunk length in characters, used as the aggregation weight
    #[serde(rename = "len")]
    pub text_len: usize,
}

/// Transcript-level verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub label: SentimentLabel,
    /// Aggregated probability of `label`
    pub confidence: f64,
    pub probs: Probabilities,
    pub chunk_count: usize,
    /// One entry per chunk, in chunk order
    pub details: Vec<SegmentResult>,
}

impl AnalysisResult {
    /// Verdict for a transcript with no text
    pub fn empty() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            confidence: 0.0,
            probs: Probabilities::certain(SentimentLabel::Neutral),
            chunk_count: 0,
            details: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_is_neutral() {
        let result = AnalysisResult::empty();
        assert_eq!(result.label, SentimentLabel::Neutral);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.probs, Probabilities::new(0.0, 1.0, 0.0));
        assert_eq!(result.chunk_count, 0);
        assert!(result.details.is_empty());
    }
}
