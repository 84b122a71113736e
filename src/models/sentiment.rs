use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sentiment label produced by the classifier
///
/// Variant order matches the classifier's output index order and is the
/// tie-break order used when picking a maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
}

impl SentimentLabel {
    /// All labels in classifier index order
    pub const ALL: [SentimentLabel; 3] = [Self::Negative, Self::Neutral, Self::Positive];

    /// Label for a classifier output index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Classifier output index of this label
    pub fn index(self) -> usize {
        match self {
            Self::Negative => 0,
            Self::Neutral => 1,
            Self::Positive => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Positive => "positive",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = String;

    /// Accepts the names inference servers commonly emit for a
    /// three-class sentiment head.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "negative" | "neg" | "label_0" => Ok(Self::Negative),
            "neutral" | "neu" | "label_1" => Ok(Self::Neutral),
            "positive" | "pos" | "label_2" => Ok(Self::Positive),
            other => Err(format!("Unknown sentiment label: {}", other)),
        }
    }
}

/// Probability for every sentiment label
///
/// Always fully populated; a missing label is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Probabilities {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
}

impl Probabilities {
    pub fn new(negative: f64, neutral: f64, positive: f64) -> Self {
        Self {
            negative,
            neutral,
            positive,
        }
    }

    /// Distribution with all mass on one label
    pub fn certain(label: SentimentLabel) -> Self {
        let mut probs = Self::default();
        probs.set(label, 1.0);
        probs
    }

    /// Normalize raw classifier scores with a numerically stable softmax
    pub fn from_logits(logits: [f64; 3]) -> Self {
        let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps = logits.map(|l| (l - max).exp());
        let sum: f64 = exps.iter().sum();
        Self::new(exps[0] / sum, exps[1] / sum, exps[2] / sum)
    }

    pub fn get(&self, label: SentimentLabel) -> f64 {
        match label {
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::Positive => self.positive,
        }
    }

    pub fn set(&mut self, label: SentimentLabel, value: f64) {
        match label {
            SentimentLabel::Negative => self.negative = value,
            SentimentLabel::Neutral => self.neutral = value,
            SentimentLabel::Positive => self.positive = value,
        }
    }

    /// Iterate `(label, probability)` pairs in label order
    pub fn iter(&self) -> impl Iterator<Item = (SentimentLabel, f64)> + '_ {
        SentimentLabel::ALL.into_iter().map(|l| (l, self.get(l)))
    }

    pub fn sum(&self) -> f64 {
        self.negative + self.neutral + self.positive
    }

    /// Label with the highest probability; the first label in order wins ties
    pub fn argmax(&self) -> SentimentLabel {
        let mut best = SentimentLabel::Negative;
        for (label, p) in self.iter() {
            if p > self.get(best) {
                best = label;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_label_parsing() {
        assert_eq!("NEGATIVE".parse::<SentimentLabel>(), Ok(SentimentLabel::Negative));
        assert_eq!("LABEL_1".parse::<SentimentLabel>(), Ok(SentimentLabel::Neutral));
        assert_eq!(" pos ".parse::<SentimentLabel>(), Ok(SentimentLabel::Positive));
        assert!("angry".parse::<SentimentLabel>().is_err());
    }

    #[test]
    fn test_label_index_round_trip() {
        for label in SentimentLabel::ALL {
            assert_eq!(SentimentLabel::from_index(label.index()), Some(label));
        }
        assert_eq!(SentimentLabel::from_index(3), None);
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let probs = Probabilities::from_logits([2.0, -1.0, 0.5]);
        assert_relative_eq!(probs.sum(), 1.0, epsilon = 1e-12);
        assert!(probs.negative > probs.positive);
        assert!(probs.positive > probs.neutral);
    }

    #[test]
    fn test_softmax_large_logits_stay_finite() {
        let probs = Probabilities::from_logits([1000.0, 999.0, -1000.0]);
        assert!(probs.iter().all(|(_, p)| p.is_finite()));
        assert_relative_eq!(probs.sum(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_argmax_tie_prefers_first_label() {
        let probs = Probabilities::new(0.2, 0.4, 0.4);
        assert_eq!(probs.argmax(), SentimentLabel::Neutral);

        let uniform = Probabilities::new(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0);
        assert_eq!(uniform.argmax(), SentimentLabel::Negative);
    }

    #[test]
    fn test_serializes_as_label_map() {
        let json = serde_json::to_value(Probabilities::certain(SentimentLabel::Neutral)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"negative": 0.0, "neutral": 1.0, "positive": 0.0})
        );
        assert_eq!(
            serde_json::to_value(SentimentLabel::Positive).unwrap(),
            serde_json::json!("positive")
        );
    }
}
