use thiserror::Error;

/// Failure of a single `analyze` call
///
/// Any variant aborts the whole analysis; partial results are never returned.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Tokenizer failed on sentence {index}: {source}")]
    Tokenizer {
        index: usize,
        #[source]
        source: anyhow::Error,
    },

    #[error("Classifier failed on chunk {index}: {source}")]
    Classifier {
        index: usize,
        #[source]
        source: anyhow::Error,
    },

    #[error("Classifier returned invalid scores for chunk {index}: {reason}")]
    InvalidScores { index: usize, reason: String },

    #[error("No scored segments for a non-empty transcript")]
    NoSegments,
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
