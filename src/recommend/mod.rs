pub mod generator;
pub mod heuristic;

pub use generator::*;
pub use heuristic::*;

use std::future::Future;

use crate::models::SentimentLabel;

/// Source of coaching suggestions for an analyzed transcript
///
/// Never fails: implementations degrade to deterministic tips.
pub trait Recommender {
    fn suggest(
        &self,
        transcript: &str,
        label: SentimentLabel,
    ) -> impl Future<Output = Vec<String>> + Send;
}
