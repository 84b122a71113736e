use crate::models::{Probabilities, SegmentResult, SentimentLabel};

/// Transcript-level distribution and verdict
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    pub label: SentimentLabel,
    /// Aggregated probability of `label`
    pub confidence: f64,
    pub probs: Probabilities,
}

/// Combine segment distributions weighted by chunk length
///
/// `agg[l] = Σ probs[l] * text_len / Σ text_len`. A zero total length uses a
/// denominator of 1, which yields an all-zero distribution and a `negative`
/// label; callers short-circuit empty transcripts before getting here.
pub fn aggregate(segments: &[SegmentResult]) -> Aggregate {
    let total_len = match segments.iter().map(|s| s.text_len).sum::<usize>() {
        0 => 1.0,
        n => n as f64,
    };

    let weighted = segments.iter().fold(Probabilities::default(), |mut acc, segment| {
        for (label, p) in segment.probs.iter() {
            acc.set(label, acc.get(label) + p * segment.text_len as f64);
        }
        acc
    });
    let probs = Probabilities::new(
        weighted.negative / total_len,
        weighted.neutral / total_len,
        weighted.positive / total_len,
    );

    let label = probs.argmax();
    Aggregate {
        label,
        confidence: probs.get(label),
        probs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn segment(negative: f64, neutral: f64, positive: f64, text_len: usize) -> SegmentResult {
        let probs = Probabilities::new(negative, neutral, positive);
        SegmentResult {
            label: probs.argmax(),
            probs,
            text_len,
        }
    }

    #[test]
    fn test_equal_lengths_average() {
        let agg = aggregate(&[segment(0.8, 0.1, 0.1, 10), segment(0.0, 0.0, 1.0, 10)]);

        assert_relative_eq!(agg.probs.negative, 0.4, epsilon = 1e-12);
        assert_relative_eq!(agg.probs.neutral, 0.05, epsilon = 1e-12);
        assert_relative_eq!(agg.probs.positive, 0.55, epsilon = 1e-12);
        assert_eq!(agg.label, SentimentLabel::Positive);
        assert_relative_eq!(agg.confidence, 0.55, epsilon = 1e-12);
    }

    #[test]
    fn test_longer_segments_weigh_more() {
        let agg = aggregate(&[segment(0.9, 0.05, 0.05, 90), segment(0.0, 0.0, 1.0, 10)]);

        assert_relative_eq!(agg.probs.negative, 0.81, epsilon = 1e-12);
        assert_relative_eq!(agg.probs.positive, 0.145, epsilon = 1e-12);
        assert_eq!(agg.label, SentimentLabel::Negative);
    }

    #[test]
    fn test_order_independent() {
        let a = segment(0.2, 0.3, 0.5, 17);
        let b = segment(0.6, 0.3, 0.1, 5);
        let c = segment(0.1, 0.8, 0.1, 40);

        let forward = aggregate(&[a.clone(), b.clone(), c.clone()]);
        let backward = aggregate(&[c, b, a]);

        for label in SentimentLabel::ALL {
            assert_relative_eq!(
                forward.probs.get(label),
                backward.probs.get(label),
                epsilon = 1e-12
            );
        }
        assert_eq!(forward.label, backward.label);
    }

    #[test]
    fn test_sums_to_one() {
        let segments = vec![
            segment(0.7, 0.2, 0.1, 120),
            segment(0.1, 0.6, 0.3, 33),
            segment(0.25, 0.25, 0.5, 1),
        ];
        let agg = aggregate(&segments);
        assert_relative_eq!(agg.probs.sum(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_tie_prefers_enumeration_order() {
        let agg = aggregate(&[segment(0.1, 0.45, 0.45, 10)]);
        assert_eq!(agg.label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_no_segments_is_all_zero() {
        let agg = aggregate(&[]);
        assert_eq!(agg.probs, Probabilities::default());
        assert_eq!(agg.confidence, 0.0);
        assert_eq!(agg.label, SentimentLabel::Negative);
    }
}
