use crate::models::SentimentLabel;

use super::Recommender;

/// Keyword groups that trigger an extra tip
const KEYWORD_TIPS: &[(&[&str], &str)] = &[
    (
        &["interrupt", "let me finish", "stop cutting"],
        "Don't interrupt the customer; wait for a pause before answering.",
    ),
    (
        &["can't hear", "cannot hear", "breaking up", "bad connection", "line is bad"],
        "Check the line quality and restate the key points.",
    ),
    (
        &["expensive", "too much", "price", "cost"],
        "Explain the value and offer alternatives.",
    ),
];

/// Deterministic coaching tips from the label and transcript keywords
#[derive(Debug, Clone)]
pub struct HeuristicRecommender {
    /// Maximum number of tips returned
    pub max_tips: usize,
}

impl Default for HeuristicRecommender {
    fn default() -> Self {
        Self { max_tips: 3 }
    }
}

impl HeuristicRecommender {
    pub fn tips(&self, transcript: &str, label: SentimentLabel) -> Vec<String> {
        let mut tips: Vec<&str> = match label {
            SentimentLabel::Negative => vec![
                "Speak more calmly and confirm that you heard the customer.",
                "Ask clarifying questions and propose a solution.",
            ],
            SentimentLabel::Neutral => vec![
                "Add empathy and thank the customer.",
                "Structure the answer: summary, steps, timeline.",
            ],
            SentimentLabel::Positive => vec![
                "Keep the tone and summarize what was agreed.",
                "Confirm the next step and who owns it.",
            ],
        };

        let lower = transcript.to_lowercase();
        for (keywords, tip) in KEYWORD_TIPS {
            if keywords.iter().any(|k| lower.contains(k)) {
                tips.push(*tip);
            }
        }

        tips.into_iter()
            .take(self.max_tips)
            .map(str::to_string)
            .collect()
    }
}

impl Recommender for HeuristicRecommender {
    async fn suggest(&self, transcript: &str, label: SentimentLabel) -> Vec<String> {
        self.tips(transcript, label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_tips_per_label() {
        let rec = HeuristicRecommender::default();
        for label in SentimentLabel::ALL {
            assert_eq!(rec.tips("Hello there.", label).len(), 2);
        }
        assert_ne!(
            rec.tips("", SentimentLabel::Negative),
            rec.tips("", SentimentLabel::Positive)
        );
    }

    #[test]
    fn test_keyword_tip_is_case_insensitive() {
        let rec = HeuristicRecommender::default();
        let tips = rec.tips("That is way too EXPENSIVE for me.", SentimentLabel::Negative);

        assert_eq!(tips.len(), 3);
        assert_eq!(tips[2], "Explain the value and offer alternatives.");
    }

    #[test]
    fn test_capped_at_max_tips() {
        let rec = HeuristicRecommender::default();
        let transcript = "You keep interrupting me. I can't hear you. And the price is too high.";
        let tips = rec.tips(transcript, SentimentLabel::Neutral);

        assert_eq!(tips.len(), 3);
        assert!(tips[2].starts_with("Don't interrupt"));
    }

    #[tokio::test]
    async fn test_suggest_matches_tips() {
        let rec = HeuristicRecommender::default();
        let suggested = rec.suggest("Bad connection today.", SentimentLabel::Positive).await;
        assert_eq!(suggested, rec.tips("Bad connection today.", SentimentLabel::Positive));
    }
}
