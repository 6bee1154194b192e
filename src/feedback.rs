//! Per-letter feedback for a guess against the target word.

use std::collections::HashMap;
use std::ops::Index;

use crate::word::{Word, WORD_LENGTH};

/// Quality of a single guessed letter.
///
/// Variants are ordered so that `max` picks the most informative result,
/// which is what the on-screen keyboard shows for a letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Classification {
    /// Letter is not in the target (after accounting for earlier matches).
    Absent,
    /// Letter is in the target, at another position.
    Present,
    /// Letter is in the target at this position.
    Correct,
}

/// Classifications for one guess, aligned positionally with the guessed word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback([Classification; WORD_LENGTH]);

impl Feedback {
    pub fn new(row: [Classification; WORD_LENGTH]) -> Self {
        Self(row)
    }

    /// True when every letter is `Correct`.
    pub fn is_solved(&self) -> bool {
        self.0.iter().all(|&c| c == Classification::Correct)
    }

    pub fn iter(&self) -> impl Iterator<Item = Classification> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[Classification] {
        &self.0
    }
}

impl Index<usize> for Feedback {
    type Output = Classification;

    fn index(&self, position: usize) -> &Self::Output {
        &self.0[position]
    }
}

/// Classify every letter of `guess` against `target`.
///
/// Two passes, exact matches first:
/// 1. Positions where the letters agree are `Correct`; both sides are consumed.
/// 2. Each remaining guess position, left to right, takes the leftmost unconsumed
///    target position holding the same letter and becomes `Present`, otherwise
///    `Absent`.
///
/// A letter is therefore never reported `Present`/`Correct` more often than it
/// occurs in the target, and leftmost duplicates win.
///
/// ```
/// use codlec::feedback::{evaluate, Classification::*};
/// use codlec::word::Word;
///
/// let target = Word::parse("ALLOY").unwrap();
/// let guess = Word::parse("LLAMA").unwrap();
/// assert_eq!(
///     evaluate(&target, &guess).as_slice(),
///     &[Present, Correct, Present, Absent, Absent]
/// );
/// ```
pub fn evaluate(target: &Word, guess: &Word) -> Feedback {
    let mut row = [Classification::Absent; WORD_LENGTH];
    let mut consumed = [false; WORD_LENGTH];

    for i in 0..WORD_LENGTH {
        if guess.letter(i) == target.letter(i) {
            row[i] = Classification::Correct;
            consumed[i] = true;
        }
    }

    for i in 0..WORD_LENGTH {
        if row[i] == Classification::Correct {
            continue;
        }
        let letter = guess.letter(i);
        if let Some(j) = (0..WORD_LENGTH).find(|&j| !consumed[j] && target.letter(j) == letter) {
            row[i] = Classification::Present;
            consumed[j] = true;
        }
    }

    Feedback(row)
}

/// Best classification seen so far for each guessed letter.
pub fn letter_states<'a, I>(rows: I) -> HashMap<char, Classification>
where
    I: IntoIterator<Item = (&'a Word, &'a Feedback)>,
{
    let mut states: HashMap<char, Classification> = HashMap::new();
    for (guess, feedback) in rows {
        for (letter, class) in guess.letters().zip(feedback.iter()) {
            states
                .entry(letter)
                .and_modify(|best| *best = (*best).max(class))
                .or_insert(class);
        }
    }
    states
}
