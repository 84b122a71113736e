use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::SentimentLabel;

/// Sentiment classification oracle
pub trait Classifier {
    /// Raw scores (logits) for `text`, in `SentimentLabel` index order
    ///
    /// The oracle truncates `text` to `max_tokens` model tokens itself.
    fn score(&self, text: &str, max_tokens: usize) -> impl Future<Output = Result<Vec<f64>>> + Send;
}

/// Configuration for the HTTP classifier
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Inference endpoint (from CALLTONE_CLASSIFIER_URL env var)
    pub url: String,
    /// Optional bearer token (from CALLTONE_CLASSIFIER_TOKEN env var)
    pub token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ClassifierConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let url = std::env::var("CALLTONE_CLASSIFIER_URL")
            .context("CALLTONE_CLASSIFIER_URL environment variable not set")?;
        Ok(Self::new(url).with_token(std::env::var("CALLTONE_CLASSIFIER_TOKEN").ok()))
    }

    pub fn new(url: String) -> Self {
        Self {
            url,
            token: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }
}

/// Classifier backed by a text-classification inference endpoint
pub struct HttpClassifier {
    client: Client,
    config: ClassifierConfig,
}

impl HttpClassifier {
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, config })
    }
}

impl Classifier for HttpClassifier {
    async fn score(&self, text: &str, max_tokens: usize) -> Result<Vec<f64>> {
        let request = ClassifyRequest {
            inputs: text,
            parameters: ClassifyParameters {
                truncation: true,
                max_length: max_tokens,
                function_to_apply: "none",
                top_k: None,
            },
        };

        let mut builder = self.client.post(&self.config.url).json(&request);
        if let Some(token) = &self.config.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .context("Failed to send request to classifier")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Classifier error: {} - {}", status, body);
        }

        let response: ClassifyResponse = response
            .json()
            .await
            .context("Failed to parse classifier response")?;

        let scores = response.into_scores()?;
        debug!("Classifier scores: {:?}", scores);
        Ok(scores)
    }
}

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
    parameters: ClassifyParameters,
}

#[derive(Debug, Serialize)]
struct ClassifyParameters {
    truncation: bool,
    max_length: usize,
    function_to_apply: &'static str,
    /// Serialized as `null` so every label is returned
    top_k: Option<usize>,
}

/// Accepted response shapes
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassifyResponse {
    Scores(Vec<f64>),
    Logits { logits: Vec<f64> },
    Labeled(Vec<LabelScore>),
    Batched(Vec<Vec<LabelScore>>),
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

impl ClassifyResponse {
    fn into_scores(self) -> Result<Vec<f64>> {
        match self {
            Self::Scores(scores) | Self::Logits { logits: scores } => Ok(scores),
            Self::Labeled(labeled) => order_labeled(labeled),
            Self::Batched(mut batches) => {
                if batches.len() != 1 {
                    anyhow::bail!("Expected one result batch, got {}", batches.len());
                }
                order_labeled(batches.remove(0))
            }
        }
    }
}

/// Place labeled scores into label index order
fn order_labeled(labeled: Vec<LabelScore>) -> Result<Vec<f64>> {
    let mut scores: [Option<f64>; 3] = [None; 3];
    for entry in labeled {
        let label: SentimentLabel = entry.label.parse().map_err(anyhow::Error::msg)?;
        scores[label.index()] = Some(entry.score);
    }
    scores
        .into_iter()
        .zip(SentimentLabel::ALL)
        .map(|(score, label)| score.with_context(|| format!("Missing score for label {}", label)))
        .collect()
}
