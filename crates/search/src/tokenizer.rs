//! Tokenizer for lexical scoring
//!
//! Lowercase, split on anything that is not a Latin letter, Cyrillic letter,
//! or ASCII digit, discard empty tokens. No stemming, no stopwords, no
//! minimum token length: single-character tokens matter in short
//! transaction descriptions.

/// True for characters that belong inside a token
fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ('\u{0400}'..='\u{04FF}').contains(&c)
}

/// Tokenize text into scoring terms
///
/// # Example
///
/// ```
/// use quarry_search::tokenizer::tokenize;
///
/// let tokens = tokenize("Coffee at ACME, 4.50 EUR");
/// assert_eq!(tokens, vec!["coffee", "at", "acme", "4", "50", "eur"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_token_char(c))
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
