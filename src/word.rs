//! Fixed-length word value type.
//!
//! A `Word` always holds exactly [`WORD_LENGTH`] uppercase ASCII letters. Length and
//! alphabet are checked once, when text enters the game (keyboard input or word
//! lists); everything past that boundary can index letters without bounds checks.

use std::fmt;
use std::str::FromStr;

use crate::error::WordError;

/// Number of letters in every word of a session.
pub const WORD_LENGTH: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word([u8; WORD_LENGTH]);

impl Word {
    /// Parse a word, ignoring surrounding whitespace and letter case.
    ///
    /// ```
    /// use codlec::word::Word;
    ///
    /// let word = Word::parse(" teste ").unwrap();
    /// assert_eq!(word.to_string(), "TESTE");
    ///
    /// assert!(Word::parse("abc").is_err());
    /// assert!(Word::parse("ab1de").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, WordError> {
        let text = text.trim();
        let len = text.chars().count();
        if len != WORD_LENGTH {
            return Err(WordError::InvalidLength(len));
        }

        let mut letters = [0u8; WORD_LENGTH];
        for (slot, c) in letters.iter_mut().zip(text.chars()) {
            if !c.is_ascii_alphabetic() {
                return Err(WordError::InvalidCharacter(c));
            }
            *slot = c.to_ascii_uppercase() as u8;
        }

        Ok(Self(letters))
    }

    /// Build a word from bytes known to be uppercase ASCII letters.
    pub(crate) const fn from_upper_ascii(letters: [u8; WORD_LENGTH]) -> Self {
        Self(letters)
    }

    /// Build a word from already-collected letters (e.g. the guess buffer).
    pub fn from_letters(letters: &[char]) -> Result<Self, WordError> {
        let text: String = letters.iter().collect();
        Self::parse(&text)
    }

    /// Letter at `position` (0-based).
    ///
    /// # Panics
    /// Panics if `position >= WORD_LENGTH`.
    #[inline]
    pub fn letter(&self, position: usize) -> char {
        self.0[position] as char
    }

    #[inline]
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().map(|&b| b as char)
    }

    /// Number of times `letter` occurs in the word.
    pub fn count(&self, letter: char) -> usize {
        self.letters().filter(|&c| c == letter).count()
    }
}

impl FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.letters() {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
