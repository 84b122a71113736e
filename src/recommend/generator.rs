use tracing::{debug, warn};

use crate::llm::{SYSTEM_PROMPT, TextGenerator, build_recommendation_prompt, parse_suggestions};
use crate::models::SentimentLabel;

use super::{HeuristicRecommender, Recommender};

/// Configuration for LLM-generated suggestions
#[derive(Debug, Clone)]
pub struct RecommenderConfig {
    /// Transcript characters included in the prompt
    pub prompt_chars: usize,
    /// Maximum suggestions kept from the model reply
    pub max_suggestions: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            prompt_chars: 1500,
            max_suggestions: 2,
        }
    }
}

/// Suggestions from a text generator, with the heuristic as fallback
pub struct LlmRecommender<G> {
    generator: G,
    fallback: HeuristicRecommender,
    config: RecommenderConfig,
}

impl<G: TextGenerator> LlmRecommender<G> {
    pub fn new(generator: G, config: RecommenderConfig) -> Self {
        Self {
            generator,
            fallback: HeuristicRecommender::default(),
            config,
        }
    }
}

impl<G: TextGenerator + Sync> Recommender for LlmRecommender<G> {
    async fn suggest(&self, transcript: &str, label: SentimentLabel) -> Vec<String> {
        let prompt = build_recommendation_prompt(transcript, label, self.config.prompt_chars);

        match self.generator.generate(SYSTEM_PROMPT, &prompt).await {
            Ok(reply) => {
                let suggestions = parse_suggestions(&reply, self.config.max_suggestions);
                if suggestions.is_empty() {
                    warn!("Generator reply had no usable suggestions, using heuristic tips");
                    let mut tips = self.fallback.tips(transcript, label);
                    tips.truncate(self.config.max_suggestions);
                    return tips;
                }
                debug!("Generated {} suggestions", suggestions.len());
                suggestions
            }
            Err(e) => {
                warn!("Suggestion generation failed, using heuristic tips: {}", e);
                self.fallback.tips(transcript, label)
            }
        }
    }
}
