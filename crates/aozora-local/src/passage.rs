//! Sentence-aligned excerpt selection for the typing game.

/// Passage grows until it crosses this many characters.
const TARGET_CHARS: usize = 100;

/// Cap when the text has no sentence terminator to align on.
const RAW_CAP_CHARS: usize = 120;

/// Cut a short practice passage off the front of a cleaned text.
///
/// Sentences are whole `。`-terminated spans, accumulated in order until the
/// passage exceeds [`TARGET_CHARS`] characters, so the result always ends on
/// a sentence boundary. A text with no `。` at all has no boundary to align
/// on; rather than returning nothing, the raw text capped at
/// [`RAW_CAP_CHARS`] characters is returned.
pub fn select_passage(text: &str) -> String {
    let mut passage = String::new();
    let mut passage_chars = 0usize;
    for sentence in text.split('。') {
        if sentence.trim().is_empty() {
            continue;
        }
        passage.push_str(sentence);
        passage.push('。');
        passage_chars += sentence.chars().count() + 1;
        if passage_chars > TARGET_CHARS {
            break;
        }
    }
    if passage.is_empty() {
        let capped: String = text.chars().take(RAW_CAP_CHARS).collect();
        return capped.trim().to_string();
    }
    passage.trim().to_string()
}
