//! The measure engine: one immutable word sequence plus cached counts.

use crate::tokenize::{DefaultTokenizer, Tokenizer};
use crate::Error;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Constructor input: raw text for a tokenizer, or tokens taken as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum TextInput<'a> {
    /// Raw text; requires an enabled tokenizer.
    Text(&'a str),
    /// An ordered token sequence; requires tokenization to be disabled.
    Tokens(Vec<String>),
}

impl<'a> From<&'a str> for TextInput<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for TextInput<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text.as_str())
    }
}

impl From<Vec<String>> for TextInput<'_> {
    fn from(tokens: Vec<String>) -> Self {
        Self::Tokens(tokens)
    }
}

impl From<&[&str]> for TextInput<'_> {
    fn from(tokens: &[&str]) -> Self {
        Self::Tokens(tokens.iter().map(|t| t.to_string()).collect())
    }
}

/// Lexical richness engine over a single text.
///
/// Built once; every measure is a read-only query over the word sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct LexicalRichness {
    words: Vec<String>,
    word_count: usize,
    term_count: usize,
}

impl LexicalRichness {
    /// Tokenize `text` with the built-in [`DefaultTokenizer`].
    pub fn new(text: &str) -> Self {
        let words = DefaultTokenizer.tokenize(&DefaultTokenizer.preprocess(text));
        Self::from_words(words)
    }

    /// Use an already-tokenized, ordered word sequence as-is.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_words(tokens.into_iter().map(Into::into).collect())
    }

    /// General constructor.
    ///
    /// Raw text needs an enabled tokenizer; a token list needs a disabled one
    /// ([`crate::Pretokenized`]). Any other pairing is [`Error::InvalidInput`].
    pub fn with_tokenizer<'a, T>(
        input: impl Into<TextInput<'a>>,
        tokenizer: &T,
    ) -> Result<Self, Error>
    where
        T: Tokenizer + ?Sized,
    {
        match (input.into(), tokenizer.is_enabled()) {
            (TextInput::Text(text), true) => {
                let words = tokenizer.tokenize(&tokenizer.preprocess(text));
                Ok(Self::from_words(words))
            }
            (TextInput::Tokens(tokens), false) => Ok(Self::from_words(tokens)),
            (TextInput::Text(_), false) => Err(Error::InvalidInput(
                "tokenizer is disabled, input must already be a token sequence",
            )),
            (TextInput::Tokens(_), true) => Err(Error::InvalidInput(
                "tokenizer expects raw text, not a token sequence",
            )),
        }
    }

    fn from_words(words: Vec<String>) -> Self {
        let word_count = words.len();
        let term_count = words.iter().map(String::as_str).collect::<HashSet<_>>().len();
        log::debug!("lexical richness over {word_count} words, {term_count} terms");
        Self {
            words,
            word_count,
            term_count,
        }
    }

    /// The word sequence, in text order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Number of tokens.
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Number of distinct tokens.
    pub fn term_count(&self) -> usize {
        self.term_count
    }

    /// Occurrences per distinct term. Built on every call, not cached.
    pub fn term_frequencies(&self) -> HashMap<&str, usize> {
        let mut freqs: HashMap<&str, usize> = HashMap::with_capacity(self.term_count);
        for w in &self.words {
            *freqs.entry(w.as_str()).or_insert(0) += 1;
        }
        freqs
    }

    /// Frequency spectrum: `(i, V(i))` pairs, where `V(i)` counts the terms seen exactly `i` times.
    pub(crate) fn frequency_spectrum(&self) -> HashMap<usize, usize> {
        let mut spectrum = HashMap::new();
        for freq in self.term_frequencies().into_values() {
            *spectrum.entry(freq).or_insert(0) += 1;
        }
        spectrum
    }

    pub(crate) fn degenerate(measure: &'static str, reason: &'static str) -> Error {
        Error::DegenerateInput { measure, reason }
    }
}

impl fmt::Display for LexicalRichness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.words.join(" "))
    }
}

/// Type-token ratio of a token slice. Caller guarantees it is non-empty.
pub(crate) fn slice_ttr<S: AsRef<str>>(tokens: &[S]) -> f64 {
    let distinct: HashSet<&str> = tokens.iter().map(AsRef::as_ref).collect();
    distinct.len() as f64 / tokens.len() as f64
}
