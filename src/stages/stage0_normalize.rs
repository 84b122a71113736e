/// Collapse every whitespace run to a single space and trim both ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split text into sentences
///
/// A sentence ends after `.`, `!` or `?` when whitespace follows; the
/// punctuation stays with the sentence. This is a punctuation heuristic, not
/// a parser: abbreviations ("Dr. Smith"), ellipses mid-thought and
/// punctuation inside quotes all end a sentence when a space follows.
pub fn split_into_sentences(text: &str) -> Vec<String> {
    let text = normalize_whitespace(text);
    if text.is_empty() {
        return Vec::new();
    }

    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        // Normalized text has single spaces only
        if let Some(&(space_at, ' ')) = chars.peek() {
            push_trimmed(&mut sentences, &text[start..space_at]);
            start = space_at + 1;
            chars.next();
        }
    }
    push_trimmed(&mut sentences, &text[start..]);

    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        sentences.push(piece.to_string());
    }
}
