//! Error types for codlec.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::dictionary::{MIN_HARD_WORDS, MIN_NORMAL_WORDS};
use crate::word::WORD_LENGTH;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WordError {
    #[error("word must be exactly {WORD_LENGTH} letters, got {0}")]
    InvalidLength(usize),

    #[error("word must contain only the letters A-Z, found {0:?}")]
    InvalidCharacter(char),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("the game is already over")]
    Finished,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HintError {
    #[error("all {0} hints have already been used")]
    LimitReached(u32),

    #[error("wait {}s before asking for another hint", remaining.as_secs().max(1))]
    CoolingDown { remaining: Duration },

    #[error("every letter is already revealed or solved")]
    NoEligiblePosition,
}

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("failed to read word list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("embedded word list not found: {0}")]
    MissingEmbedded(String),

    #[error(
        "word lists not loaded properly: {normal} words (need {MIN_NORMAL_WORDS}), \
         {hard} hard words (need {MIN_HARD_WORDS})"
    )]
    TooFewWords { normal: usize, hard: usize },
}
