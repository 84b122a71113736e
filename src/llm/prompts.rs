use crate::models::SentimentLabel;

/// System prompt for coaching suggestions
pub const SYSTEM_PROMPT: &str = r#"You are a call-center quality coach. You read a call transcript and its overall tone and suggest how the agent could improve the conversation.

Rules:
- Give 1-2 short recommendations.
- One recommendation per line, no numbering, no preamble.
- Each recommendation is a single imperative sentence."#;

/// Build the user prompt for a transcript, keeping at most `max_chars` of it
pub fn build_recommendation_prompt(
    transcript: &str,
    label: SentimentLabel,
    max_chars: usize,
) -> String {
    let excerpt: String = transcript.chars().take(max_chars).collect();

    let mut prompt = String::new();
    prompt.push_str("Call (transcript):\n");
    prompt.push_str(&excerpt);
    prompt.push_str("\n\n");
    prompt.push_str(&format!("Conversation tone: {}.\n", label));
    prompt.push_str("Give 1-2 short recommendations on how to improve this conversation.\n");
    prompt
}

/// Split a model reply into suggestion strings
///
/// Lines and sentences become separate pieces; bullet markers are stripped
/// and pieces of two characters or fewer are dropped.
pub fn parse_suggestions(reply: &str, max_suggestions: usize) -> Vec<String> {
    reply
        .replace('\n', ". ")
        .split('.')
        .map(|piece| {
            piece
                .trim()
                .trim_matches(|c: char| c == '-' || c == '•' || c.is_whitespace())
        })
        .filter(|piece| piece.chars().count() > 2)
        .take(max_suggestions)
        .map(str::to_string)
        .collect()
}
