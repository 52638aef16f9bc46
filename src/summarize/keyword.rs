//! Keyword-based summarizer.

use super::{SentenceRecord, Summarizer};

/// Keywords kept per sentence.
const MAX_KEYWORDS: usize = 6;
/// Leading keywords forming a sentence's pair.
const PAIR_LEN: usize = 2;
/// Tokens at or below this length are dropped.
const MIN_TOKEN_CHARS: usize = 3;

/// Deterministic keyword extractor: a pure function of the input text.
///
/// Sentences are split on terminal punctuation; each sentence is lowercased,
/// non-alphanumeric characters collapse to spaces, and tokens shorter than
/// three characters are discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordSummarizer;

impl KeywordSummarizer {
    pub fn new() -> Self {
        Self
    }
}

impl Summarizer for KeywordSummarizer {
    fn analyze(&self, text: &str) -> Vec<SentenceRecord> {
        text.split(['.', '!', '?'])
            .map(str::trim)
            .filter(|sentence| !sentence.is_empty())
            .map(|sentence| {
                let keywords = tokenize(sentence);
                let pair = keywords.iter().take(PAIR_LEN).cloned().collect();
                SentenceRecord {
                    text: sentence.to_string(),
                    keywords,
                    pair,
                }
            })
            .collect()
    }
}

fn tokenize(sentence: &str) -> Vec<String> {
    let cleaned: String = sentence
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    cleaned
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .take(MAX_KEYWORDS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_terminal_punctuation() {
        let records = KeywordSummarizer.analyze("First point. Second point! Third point?");
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].text, "First point");
        assert_eq!(records[2].keywords, vec!["third", "point"]);
    }

    #[test]
    fn test_short_tokens_are_dropped() {
        let records = KeywordSummarizer.analyze("it is a big red fox");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].keywords, vec!["big", "red", "fox"]);
        assert_eq!(records[0].pair, vec!["big", "red"]);
    }

    #[test]
    fn test_keywords_cap_at_six() {
        let records =
            KeywordSummarizer.analyze("alpha bravo charlie delta echo foxtrot golf hotel");
        assert_eq!(records[0].keywords.len(), 6);
        assert_eq!(records[0].keywords[5], "foxtrot");
    }

    #[test]
    fn test_punctuation_collapses_to_spaces() {
        let records = KeywordSummarizer.analyze("rust-lang, v1/75: fast");
        assert_eq!(records[0].keywords, vec!["rust", "lang", "fast"]);
    }

    #[test]
    fn test_no_qualifying_tokens_yields_empty_lists() {
        let records = KeywordSummarizer.analyze("a is to be");
        assert_eq!(records.len(), 1);
        assert!(records[0].keywords.is_empty());
        assert!(records[0].pair.is_empty());
    }

    #[test]
    fn test_empty_input_yields_no_records() {
        assert!(KeywordSummarizer.analyze("").is_empty());
        assert!(KeywordSummarizer.analyze(" . ! ? ").is_empty());
    }

    #[test]
    fn test_single_keyword_pair_is_truncated() {
        let records = KeywordSummarizer.analyze("hello");
        assert_eq!(records[0].pair, vec!["hello"]);
    }
}
