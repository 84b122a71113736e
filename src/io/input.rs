use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Request body shape accepted for `.json` transcript files
#[derive(Debug, Deserialize)]
struct TranscriptRequest {
    #[serde(default)]
    transcript: String,
}

/// Read a transcript from a file, or from stdin when no path is given
///
/// Files ending in `.json` are parsed as `{"transcript": "..."}`; anything
/// else is read as plain text.
pub fn read_transcript(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => read_transcript_file(path),
        None => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read transcript from stdin")?;
            Ok(content)
        }
    }
}

/// Read a transcript file
pub fn read_transcript_file(path: &Path) -> Result<String> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        parse_transcript_json(&content)
    } else {
        Ok(content)
    }
}

/// Parse a `{"transcript": "..."}` document
pub fn parse_transcript_json(json: &str) -> Result<String> {
    let request: TranscriptRequest =
        serde_json::from_str(json).context("Failed to parse transcript JSON")?;
    Ok(request.transcript)
}
