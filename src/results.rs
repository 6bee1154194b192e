//! Saved game results: one JSON object per line, appended, never rewritten.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::session::Difficulty;
use crate::util::{mean, std_dev};
use crate::word::Word;

pub const RESULTS_FILE: &str = "resultados.json";

/// One won game.
///
/// Field names on disk are kept compatible with existing `resultados.json` files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(rename = "palavra")]
    pub word: String,
    #[serde(rename = "tentativas")]
    pub attempts: u32,
    #[serde(rename = "dificuldade")]
    pub difficulty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub played_at: Option<DateTime<Utc>>,
}

impl GameRecord {
    pub fn new(word: Word, attempts: usize, difficulty: Difficulty) -> Self {
        Self {
            word: word.to_string(),
            attempts: attempts as u32,
            difficulty: difficulty.record_label().to_string(),
            played_at: Some(Utc::now()),
        }
    }
}

pub trait ResultStore {
    /// Append one record.
    fn record(&mut self, record: &GameRecord) -> io::Result<()>;
    /// Every readable record, oldest first.
    fn load(&self) -> io::Result<Vec<GameRecord>>;
}

#[derive(Debug, Clone)]
pub struct JsonlResultStore {
    path: PathBuf,
}

impl JsonlResultStore {
    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultStore for JsonlResultStore {
    fn record(&mut self, record: &GameRecord) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;

        info!(word = %record.word, attempts = record.attempts, "result saved");
        Ok(())
    }

    fn load(&self) -> io::Result<Vec<GameRecord>> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err),
        };

        let mut records = Vec::new();
        for (n, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<GameRecord>(&line) {
                Ok(record) => records.push(record),
                Err(err) => debug!(line = n + 1, %err, "skipping malformed result"),
            }
        }
        Ok(records)
    }
}

/// In-memory store, handy for tests and for running without a writable disk.
#[derive(Debug, Default, Clone)]
pub struct MemoryResultStore {
    pub records: Vec<GameRecord>,
}

impl ResultStore for MemoryResultStore {
    fn record(&mut self, record: &GameRecord) -> io::Result<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn load(&self) -> io::Result<Vec<GameRecord>> {
        Ok(self.records.clone())
    }
}

/// Save a record, logging instead of failing. Losing a result must not end a game.
pub fn save_quietly(store: &mut dyn ResultStore, record: &GameRecord) -> bool {
    match store.record(record) {
        Ok(()) => true,
        Err(err) => {
            warn!(%err, "could not save result");
            false
        }
    }
}

/// Aggregate figures for the results screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSummary {
    pub wins: usize,
    pub total: usize,
    pub mean_attempts: Option<f64>,
    pub std_dev_attempts: Option<f64>,
    /// attempts -> number of games
    pub distribution: BTreeMap<u32, usize>,
}

impl ResultSummary {
    /// Only won games are ever saved, so every record is a win.
    pub fn from_records(records: &[GameRecord]) -> Self {
        let attempts: Vec<f64> = records.iter().map(|r| r.attempts as f64).collect();
        let mut distribution = BTreeMap::new();
        for record in records {
            *distribution.entry(record.attempts).or_insert(0) += 1;
        }

        Self {
            wins: records.len(),
            total: records.len(),
            mean_attempts: mean(&attempts),
            std_dev_attempts: std_dev(&attempts),
            distribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::tempdir;

    fn record(word: &str, attempts: u32, difficulty: &str) -> GameRecord {
        GameRecord {
            word: word.into(),
            attempts,
            difficulty: difficulty.into(),
            played_at: None,
        }
    }

    #[test]
    fn record_uses_stored_field_names() {
        let line = serde_json::to_string(&record("TESTE", 1, "DEMO")).unwrap();
        assert_eq!(
            line,
            r#"{"palavra":"TESTE","tentativas":1,"dificuldade":"DEMO"}"#
        );
    }

    #[test]
    fn new_record_labels_difficulty() {
        let rec = GameRecord::new(Word::parse("CARRO").unwrap(), 3, Difficulty::Hard);
        assert_eq!(rec.word, "CARRO");
        assert_eq!(rec.attempts, 3);
        assert_eq!(rec.difficulty, "DIFÍCIL");
        assert!(rec.played_at.is_some());
    }

    #[test]
    fn append_then_load() {
        let dir = tempdir().unwrap();
        let mut store = JsonlResultStore::with_path(dir.path().join("nested/resultados.json"));

        store.record(&record("TESTE", 1, "DEMO")).unwrap();
        store.record(&record("CARRO", 4, "MÉDIO")).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].word, "TESTE");
        assert_eq!(loaded[1].difficulty, "MÉDIO");

        let text = fs::read_to_string(store.path()).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = JsonlResultStore::with_path(dir.path().join("none.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("resultados.json");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"{{"palavra": "NOITE", "tentativas": 2, "dificuldade": "FÁCIL"}}"#
        )
        .unwrap();
        writeln!(file, "not json").unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"palavra": "PORTA"}}"#).unwrap();
        writeln!(
            file,
            r#"{{"palavra":"BANCO","tentativas":5,"dificuldade":"DIFÍCIL","played_at":"2024-05-01T10:00:00Z"}}"#
        )
        .unwrap();

        let loaded = JsonlResultStore::with_path(&path).load().unwrap();
        let words: Vec<&str> = loaded.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["NOITE", "BANCO"]);
        assert!(loaded[1].played_at.is_some());
    }

    #[test]
    fn summary_counts_every_record_as_a_win() {
        let records = vec![
            record("TESTE", 1, "DEMO"),
            record("CARRO", 3, "FÁCIL"),
            record("PORTA", 3, "MÉDIO"),
            record("NOITE", 5, "DIFÍCIL"),
        ];
        let summary = ResultSummary::from_records(&records);

        assert_eq!(summary.wins, 4);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.mean_attempts, Some(3.0));
        assert!((summary.std_dev_attempts.unwrap() - 2f64.sqrt()).abs() < 1e-10);
        assert_eq!(summary.distribution.get(&3), Some(&2));
        assert_eq!(summary.distribution.get(&2), None);
    }

    #[test]
    fn empty_summary() {
        let summary = ResultSummary::from_records(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.mean_attempts, None);
        assert!(summary.distribution.is_empty());
    }

    #[test]
    fn memory_store_keeps_order() {
        let mut store = MemoryResultStore::default();
        assert!(save_quietly(&mut store, &record("TESTE", 1, "DEMO")));
        assert!(save_quietly(&mut store, &record("CARRO", 2, "FÁCIL")));
        assert_eq!(store.load().unwrap()[1].word, "CARRO");
    }
}
