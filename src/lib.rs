pub mod analyzer;
pub mod error;
pub mod io;
pub mod llm;
pub mod models;
pub mod oracle;
pub mod recommend;
pub mod stages;

pub use analyzer::{AnalyzerConfig, SentimentAnalyzer};
pub use error::AnalysisError;
pub use io::{AnalysisReport, read_transcript};
pub use llm::{AnthropicClient, AnthropicConfig, TextGenerator};
pub use models::{AnalysisResult, Probabilities, SegmentResult, SentimentLabel};
pub use oracle::{
    Classifier, ClassifierConfig, HfTokenizer, HttpClassifier, TextTokenizer, WhitespaceTokenizer,
};
pub use recommend::{HeuristicRecommender, LlmRecommender, Recommender, RecommenderConfig};
pub use stages::{
    aggregate, build_chunks, normalize_whitespace, score_chunk, score_chunks, split_into_sentences,
};
