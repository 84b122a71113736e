use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use calltone::stages::RESERVED_SPECIAL_TOKENS;
use calltone::{
    AnalysisReport, AnalyzerConfig, AnthropicClient, AnthropicConfig, ClassifierConfig,
    HeuristicRecommender, HfTokenizer, HttpClassifier, LlmRecommender, Recommender,
    RecommenderConfig, SentimentAnalyzer, SentimentLabel, TextTokenizer, WhitespaceTokenizer,
    build_chunks, read_transcript, split_into_sentences,
};

#[derive(Parser)]
#[command(name = "calltone")]
#[command(author, version, long_about = None)]
#[command(about = "Call transcript sentiment and coaching tips")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the tone of a call transcript and suggest improvements
    Analyze {
        /// Transcript file (plain text, or .json with a "transcript" field); stdin if omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Write the report to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,

        /// Model tokenizer (tokenizer.json); counts words if omitted
        #[arg(long)]
        tokenizer: Option<PathBuf>,

        /// Classifier input budget in tokens
        #[arg(long, default_value = "384")]
        max_tokens: usize,

        /// Maximum classifier calls in flight
        #[arg(long, default_value = "1")]
        concurrency: usize,

        /// Classifier endpoint (defaults to CALLTONE_CLASSIFIER_URL)
        #[arg(long)]
        classifier_url: Option<String>,

        /// Skip LLM suggestions (only keyword heuristics)
        #[arg(long)]
        heuristics_only: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show how a transcript is split into chunks without scoring it
    Chunks {
        /// Transcript file; stdin if omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Model tokenizer (tokenizer.json); counts words if omitted
        #[arg(long)]
        tokenizer: Option<PathBuf>,

        /// Classifier input budget in tokens
        #[arg(long, default_value = "384")]
        max_tokens: usize,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            output,
            json,
            tokenizer,
            max_tokens,
            concurrency,
            classifier_url,
            heuristics_only,
            verbose,
        } => {
            setup_logging(verbose);
            analyze_transcript(
                input,
                output,
                json,
                tokenizer,
                AnalyzerConfig {
                    max_tokens,
                    max_concurrent_chunks: concurrency,
                },
                classifier_url,
                heuristics_only,
            )
            .await
        }
        Commands::Chunks {
            input,
            tokenizer,
            max_tokens,
            verbose,
        } => {
            setup_logging(verbose);
            show_chunks(input, tokenizer, max_tokens)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

/// Model tokenizer when configured, word counting otherwise
enum CliTokenizer {
    Model(HfTokenizer),
    Words(WhitespaceTokenizer),
}

impl CliTokenizer {
    fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Ok(Self::Model(HfTokenizer::from_file(path)?)),
            None => {
                warn!("No tokenizer given, budgeting chunks by word count");
                Ok(Self::Words(WhitespaceTokenizer))
            }
        }
    }
}

impl TextTokenizer for CliTokenizer {
    fn token_length(&self, text: &str) -> Result<usize> {
        match self {
            Self::Model(t) => t.token_length(text),
            Self::Words(t) => t.token_length(text),
        }
    }

    fn truncate(&self, text: &str, max_tokens: usize) -> Result<String> {
        match self {
            Self::Model(t) => t.truncate(text, max_tokens),
            Self::Words(t) => t.truncate(text, max_tokens),
        }
    }
}

async fn analyze_transcript(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    json: bool,
    tokenizer: Option<PathBuf>,
    config: AnalyzerConfig,
    classifier_url: Option<String>,
    heuristics_only: bool,
) -> Result<()> {
    let transcript = read_transcript(input.as_deref()).context("Failed to read transcript")?;
    info!("Loaded transcript: {} chars", transcript.chars().count());

    let classifier_config = match classifier_url {
        Some(url) => ClassifierConfig::new(url)
            .with_token(std::env::var("CALLTONE_CLASSIFIER_TOKEN").ok()),
        None => ClassifierConfig::from_env()?,
    };
    let classifier = HttpClassifier::new(classifier_config)?;
    let tokenizer = CliTokenizer::load(tokenizer.as_deref())?;
    let analyzer = SentimentAnalyzer::new(classifier, tokenizer, config)?;

    let analysis = analyzer
        .analyze(&transcript)
        .await
        .context("Sentiment analysis failed")?;

    let recommendations = recommend(&transcript, analysis.label, heuristics_only).await;
    let report = AnalysisReport::new(analysis, recommendations);

    match output {
        Some(path) => {
            let as_json = json || path.extension().is_some_and(|ext| ext == "json");
            if as_json {
                report.write_json(&path)?;
            } else {
                report.write_human(&path)?;
            }
            info!("Report written to {:?}", path);
        }
        None if json => println!("{}", report.to_json()?),
        None => print!("{}", report.format_human()),
    }

    Ok(())
}

async fn recommend(transcript: &str, label: SentimentLabel, heuristics_only: bool) -> Vec<String> {
    let heuristic = HeuristicRecommender::default();
    if heuristics_only {
        info!("Skipping LLM suggestions (--heuristics-only)");
        return heuristic.suggest(transcript, label).await;
    }

    match AnthropicConfig::from_env().and_then(AnthropicClient::new) {
        Ok(client) => {
            LlmRecommender::new(client, RecommenderConfig::default())
                .suggest(transcript, label)
                .await
        }
        Err(e) => {
            warn!("LLM suggestions unavailable, using heuristics: {}", e);
            heuristic.suggest(transcript, label).await
        }
    }
}

fn show_chunks(
    input: Option<PathBuf>,
    tokenizer: Option<PathBuf>,
    max_tokens: usize,
) -> Result<()> {
    AnalyzerConfig {
        max_tokens,
        ..Default::default()
    }
    .validate()?;

    let transcript = read_transcript(input.as_deref()).context("Failed to read transcript")?;
    let tokenizer = CliTokenizer::load(tokenizer.as_deref())?;

    let sentences = split_into_sentences(&transcript);
    let chunks = build_chunks(&sentences, &tokenizer, max_tokens)?;

    println!("Transcript Chunks");
    println!("=================");
    println!("Sentences: {}", sentences.len());
    println!("Chunks: {}", chunks.len());
    println!("Token budget per chunk: {}", max_tokens - RESERVED_SPECIAL_TOKENS);
    println!();

    for (i, chunk) in chunks.iter().enumerate() {
        println!(
            "[{}] {} tokens, {} chars",
            i,
            tokenizer.token_length(chunk)?,
            chunk.chars().count()
        );
        println!("{}", chunk);
        println!();
    }

    Ok(())
}
