//! Built-in preprocessing and tokenization.
//!
//! Deliberately simple: lower-case, drop digits and dashes, split on ASCII punctuation and
//! whitespace. Anything smarter belongs upstream; implement [`Tokenizer`] to plug it in.

/// A preprocess + tokenize pair used to turn raw text into a word sequence.
pub trait Tokenizer {
    /// Normalize raw text before tokenization.
    fn preprocess(&self, text: &str) -> String;

    /// Split (preprocessed) text into tokens.
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Whether this tokenizer accepts raw text at all.
    ///
    /// `false` means the caller supplies tokens directly (see [`Pretokenized`]).
    fn is_enabled(&self) -> bool {
        true
    }
}

/// The built-in tokenizer: [`preprocess`] then [`tokenize`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTokenizer;

impl Tokenizer for DefaultTokenizer {
    fn preprocess(&self, text: &str) -> String {
        preprocess(text)
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        tokenize(text)
    }
}

/// Tokenization disabled: input must already be a token sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pretokenized;

impl Tokenizer for Pretokenized {
    fn preprocess(&self, text: &str) -> String {
        text.to_string()
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Lower-case, remove ASCII digits, remove hyphen / en dash / em dash.
///
/// Dashes are removed rather than split on, so `hyphen-here` becomes `hyphenhere`.
pub fn preprocess(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_digit() && !matches!(c, '-' | '\u{2013}' | '\u{2014}'))
        .collect()
}

/// Preprocess, then split on ASCII punctuation and whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = preprocess(text)
        .chars()
        .map(|c| if c.is_ascii_punctuation() { ' ' } else { c })
        .collect();
    cleaned.split_whitespace().map(str::to_string).collect()
}
