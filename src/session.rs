use std::collections::HashMap;
use std::time::Instant;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dictionary::{Dictionary, Pool};
use crate::error::SessionError;
use crate::feedback::{evaluate, letter_states, Classification, Feedback};
use crate::word::{Word, WORD_LENGTH};

/// Target word used by [`Difficulty::Demo`].
pub const DEMO_WORD: Word = Word::from_upper_ascii(*b"TESTE");

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Demo,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Demo,
    ];

    pub fn max_attempts(self) -> usize {
        match self {
            Difficulty::Easy => 7,
            Difficulty::Medium => 6,
            Difficulty::Hard | Difficulty::Demo => 5,
        }
    }

    /// Pool that supplies the target word.
    pub fn pool(self) -> Pool {
        match self {
            Difficulty::Hard => Pool::Hard,
            _ => Pool::Normal,
        }
    }

    /// Menu number (1-4) to difficulty.
    pub fn from_choice(choice: char) -> Option<Self> {
        let idx = choice.to_digit(10)?.checked_sub(1)?;
        Self::ALL.get(idx as usize).copied()
    }

    /// Label written to saved results.
    pub fn record_label(self) -> &'static str {
        match self {
            Difficulty::Easy => "FÁCIL",
            Difficulty::Medium => "MÉDIO",
            Difficulty::Hard => "DIFÍCIL",
            Difficulty::Demo => "DEMO",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Won,
    Lost,
}

/// State of the single live game.
///
/// Attempts and feedback rows only ever grow, and only through
/// [`GameSession::submit_guess`]. Hint bookkeeping is mutated by the `hints`
/// module.
#[derive(Debug, Clone)]
pub struct GameSession {
    target: Word,
    difficulty: Difficulty,
    attempts: Vec<Word>,
    feedback: Vec<Feedback>,
    status: Status,
    pub(crate) hints_used: u32,
    pub(crate) last_hint_at: Option<Instant>,
    pub(crate) revealed: [Option<char>; WORD_LENGTH],
}

impl GameSession {
    /// Start a session, drawing the target from the pool the difficulty uses.
    pub fn new<R: Rng + ?Sized>(
        difficulty: Difficulty,
        dictionary: &Dictionary,
        rng: &mut R,
    ) -> Self {
        let target = match difficulty {
            Difficulty::Demo => DEMO_WORD,
            other => dictionary.random_word(other.pool(), rng),
        };
        info!(%difficulty, "new session");
        Self::with_target(difficulty, target)
    }

    pub fn with_target(difficulty: Difficulty, target: Word) -> Self {
        Self {
            target,
            difficulty,
            attempts: Vec::with_capacity(difficulty.max_attempts()),
            feedback: Vec::with_capacity(difficulty.max_attempts()),
            status: Status::InProgress,
            hints_used: 0,
            last_hint_at: None,
            revealed: [None; WORD_LENGTH],
        }
    }

    /// Record a dictionary-checked guess and return its feedback row.
    pub fn submit_guess(&mut self, guess: Word) -> Result<Feedback, SessionError> {
        if self.status != Status::InProgress {
            return Err(SessionError::Finished);
        }

        let row = evaluate(&self.target, &guess);
        self.attempts.push(guess);
        self.feedback.push(row);

        if row.is_solved() {
            self.status = Status::Won;
        } else if self.attempts.len() == self.max_attempts() {
            self.status = Status::Lost;
        }

        debug!(
            %guess,
            attempt = self.attempts.len(),
            status = ?self.status,
            "guess accepted"
        );
        Ok(row)
    }

    /// Throw away this game and start a fresh one.
    pub fn restart<R: Rng + ?Sized>(
        &mut self,
        difficulty: Difficulty,
        dictionary: &Dictionary,
        rng: &mut R,
    ) {
        *self = Self::new(difficulty, dictionary, rng);
    }

    /// True iff some earlier guess got `position` right.
    pub fn is_position_solved(&self, position: usize) -> bool {
        self.feedback
            .iter()
            .any(|row| row[position] == Classification::Correct)
    }

    pub fn target(&self) -> Word {
        self.target
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn max_attempts(&self) -> usize {
        self.difficulty.max_attempts()
    }

    pub fn attempts(&self) -> &[Word] {
        &self.attempts
    }

    pub fn feedback(&self) -> &[Feedback] {
        &self.feedback
    }

    /// Attempts submitted so far, which is also the index of the next row.
    pub fn current_attempt(&self) -> usize {
        self.attempts.len()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != Status::InProgress
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    pub fn last_hint_at(&self) -> Option<Instant> {
        self.last_hint_at
    }

    /// Letter revealed by a hint at `position`, if any.
    pub fn revealed(&self, position: usize) -> Option<char> {
        self.revealed[position]
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().flatten().count()
    }

    /// Best classification per letter, for the on-screen keyboard.
    pub fn letter_states(&self) -> HashMap<char, Classification> {
        letter_states(self.attempts.iter().zip(self.feedback.iter()))
    }
}
