use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{AnalysisResult, Probabilities, SegmentResult, SentimentLabel};

/// Machine-readable analysis report
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub analysis_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub sentiment: SentimentLabel,
    pub confidence: f64,
    pub probs: Probabilities,
    pub chunks: usize,
    pub recommendations: Vec<String>,
    pub details: Vec<SegmentResult>,
}

impl AnalysisReport {
    pub fn new(analysis: AnalysisResult, recommendations: Vec<String>) -> Self {
        Self {
            analysis_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            sentiment: analysis.label,
            confidence: analysis.confidence,
            probs: analysis.probs,
            chunks: analysis.chunk_count,
            recommendations,
            details: analysis.details,
        }
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report")
    }

    /// Format the report as human-readable text, rounded to two decimals
    pub fn format_human(&self) -> String {
        let mut output = String::new();

        output.push_str("Call Sentiment\n");
        output.push_str("==============\n");
        output.push_str(&format!(
            "Sentiment: {} (confidence {:.2})\n",
            self.sentiment, self.confidence
        ));
        output.push_str(&format!(
            "Probabilities: {}\n",
            self.probs
                .iter()
                .map(|(label, p)| format!("{} {:.2}", label, p))
                .collect::<Vec<_>>()
                .join(", ")
        ));
        output.push_str(&format!("Chunks: {}\n", self.chunks));

        if !self.recommendations.is_empty() {
            output.push_str("\nRecommendations\n");
            output.push_str("---------------\n");
            for tip in &self.recommendations {
                output.push_str(&format!("- {}\n", tip));
            }
        }

        output
    }

    /// Write human-readable text to a file
    pub fn write_human(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format_human())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> AnalysisReport {
        let probs = Probabilities::new(0.1, 0.25, 0.65);
        let analysis = AnalysisResult {
            label: SentimentLabel::Positive,
            confidence: 0.65,
            probs,
            chunk_count: 1,
            details: vec![SegmentResult {
                label: SentimentLabel::Positive,
                probs,
                text_len: 42,
            }],
        };
        AnalysisReport::new(analysis, vec!["Confirm the next step.".to_string()])
    }

    #[test]
    fn test_json_field_names() {
        let json: serde_json::Value = serde_json::from_str(&report().to_json().unwrap()).unwrap();

        assert_eq!(json["sentiment"], "positive");
        assert_eq!(json["confidence"], 0.65);
        assert_eq!(json["probs"]["neutral"], 0.25);
        assert_eq!(json["chunks"], 1);
        assert_eq!(json["recommendations"][0], "Confirm the next step.");
        assert_eq!(json["details"][0]["len"], 42);
        assert!(json["analysis_id"].is_string());
        assert!(json["generated_at"].is_string());
    }

    #[test]
    fn test_format_human() {
        let text = report().format_human();
        assert!(text.contains("Sentiment: positive (confidence 0.65)"));
        assert!(text.contains("negative 0.10, neutral 0.25, positive 0.65"));
        assert!(text.contains("- Confirm the next step."));
    }

    #[test]
    fn test_write_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        report().write_json(&path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["sentiment"], "positive");
    }
}
