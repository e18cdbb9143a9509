//! Splitting text runs into words and the space between them.
//!
//! A word is a maximal run of ASCII letters and apostrophes (`'`).
//! Everything else, including digits, punctuation, whitespace and non-ASCII letters, is separator text that passes through unchanged.

use core::iter::FusedIterator;

/// One maximal run of a text, as yielded by [`tokenize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
	Word(&'a str),
	Separator(&'a str),
}
impl<'a> Token<'a> {
	#[must_use]
	pub fn as_str(self) -> &'a str {
		match self {
			Token::Word(text) | Token::Separator(text) => text,
		}
	}
}

#[must_use]
pub fn is_word_char(c: char) -> bool {
	c.is_ascii_alphabetic() || c == '\''
}

/// Iterates the words and separators of `text` in order.
///
/// Concatenating the yielded runs reproduces `text` exactly.
#[must_use]
pub fn tokenize(text: &str) -> Tokens<'_> {
	Tokens { rest: text }
}

#[derive(Debug, Clone)]
pub struct Tokens<'a> {
	rest: &'a str,
}
impl<'a> Iterator for Tokens<'a> {
	type Item = Token<'a>;

	fn next(&mut self) -> Option<Self::Item> {
		let first = self.rest.chars().next()?;
		let word = is_word_char(first);
		let end = self.rest.find(|c: char| is_word_char(c) != word).unwrap_or(self.rest.len());
		let (run, rest) = self.rest.split_at(end);
		self.rest = rest;
		Some(if word { Token::Word(run) } else { Token::Separator(run) })
	}
}
impl FusedIterator for Tokens<'_> {}

/// How many leading characters of a word with `word_len` characters are bolded at `percentage` (0–100).
///
/// Words of up to three characters always get exactly one, and longer words at least one.
/// The result never exceeds `word_len` and, for `percentage` above 100, is clamped as if it were 100.
#[must_use]
pub fn bold_length(word_len: usize, percentage: u8) -> usize {
	if word_len <= 3 {
		return 1;
	}
	let percentage = usize::from(percentage.min(100));
	((word_len * percentage + 99) / 100).max(1)
}

/// Splits `word` into its bold head and plain tail at `percentage`.
///
/// Words only ever contain ASCII, so the split is always on a character boundary.
#[must_use]
pub fn split_word(word: &str, percentage: u8) -> (&str, &str) {
	word.split_at(bold_length(word.len(), percentage).min(word.len()))
}
