use std::collections::HashSet;
use std::fs;
use std::path::Path;

use include_dir::{include_dir, Dir};
use rand::Rng;
use tracing::{info, warn};

use crate::error::DictionaryError;
use crate::session::Difficulty;
use crate::word::Word;

static WORDS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/words");

pub const MIN_NORMAL_WORDS: usize = 100;
pub const MIN_HARD_WORDS: usize = 10;
pub const MAX_NORMAL_WORDS: usize = 30_000;
pub const MAX_HARD_WORDS: usize = 1_000;

const NORMAL_FILE: &str = "normal.txt";
const HARD_FILE: &str = "hard.txt";

/// Which list a target word is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    Normal,
    Hard,
}

impl Pool {
    fn capacity(self) -> usize {
        match self {
            Pool::Normal => MAX_NORMAL_WORDS,
            Pool::Hard => MAX_HARD_WORDS,
        }
    }
}

/// Read-only word lists, built once at startup and shared by reference.
///
/// Both pools are guaranteed to hold at least [`MIN_NORMAL_WORDS`] /
/// [`MIN_HARD_WORDS`] words.
#[derive(Debug, Clone)]
pub struct Dictionary {
    normal: Vec<Word>,
    hard: Vec<Word>,
    normal_set: HashSet<Word>,
    hard_set: HashSet<Word>,
}

impl Dictionary {
    /// Lists compiled into the binary.
    pub fn embedded() -> Result<Self, DictionaryError> {
        Self::from_pools(
            parse_word_list(embedded_text(NORMAL_FILE)?, Pool::Normal.capacity()),
            parse_word_list(embedded_text(HARD_FILE)?, Pool::Hard.capacity()),
        )
    }

    /// Load from files, falling back to the embedded list for any path not given.
    pub fn load(normal: Option<&Path>, hard: Option<&Path>) -> Result<Self, DictionaryError> {
        let normal = match normal {
            Some(path) => read_word_file(path, Pool::Normal)?,
            None => parse_word_list(embedded_text(NORMAL_FILE)?, Pool::Normal.capacity()),
        };
        let hard = match hard {
            Some(path) => read_word_file(path, Pool::Hard)?,
            None => parse_word_list(embedded_text(HARD_FILE)?, Pool::Hard.capacity()),
        };
        Self::from_pools(normal, hard)
    }

    pub fn from_pools(normal: Vec<Word>, hard: Vec<Word>) -> Result<Self, DictionaryError> {
        if normal.len() < MIN_NORMAL_WORDS || hard.len() < MIN_HARD_WORDS {
            return Err(DictionaryError::TooFewWords {
                normal: normal.len(),
                hard: hard.len(),
            });
        }

        info!(normal = normal.len(), hard = hard.len(), "dictionary ready");
        Ok(Self {
            normal_set: normal.iter().copied().collect(),
            hard_set: hard.iter().copied().collect(),
            normal,
            hard,
        })
    }

    /// Whether `word` is an acceptable guess. Hard games also accept the hard pool.
    pub fn contains(&self, word: &Word, difficulty: Difficulty) -> bool {
        self.normal_set.contains(word)
            || (difficulty == Difficulty::Hard && self.hard_set.contains(word))
    }

    pub fn random_word<R: Rng + ?Sized>(&self, pool: Pool, rng: &mut R) -> Word {
        let words = self.words(pool);
        // never empty: from_pools enforces the minimum sizes
        words[rng.gen_range(0..words.len())]
    }

    pub fn words(&self, pool: Pool) -> &[Word] {
        match pool {
            Pool::Normal => &self.normal,
            Pool::Hard => &self.hard,
        }
    }
}

/// One word per line; lines that are not exactly one valid word are skipped.
pub fn parse_word_list(text: &str, capacity: usize) -> Vec<Word> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| Word::parse(line).ok())
        .take(capacity)
        .collect()
}

fn read_word_file(path: &Path, pool: Pool) -> Result<Vec<Word>, DictionaryError> {
    let text = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let words = parse_word_list(&text, pool.capacity());
    if words.is_empty() {
        warn!(path = %path.display(), "word list has no usable words");
    }
    info!(path = %path.display(), count = words.len(), ?pool, "loaded word list");
    Ok(words)
}

fn embedded_text(name: &str) -> Result<&'static str, DictionaryError> {
    WORDS_DIR
        .get_file(name)
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| DictionaryError::MissingEmbedded(name.to_string()))
}
