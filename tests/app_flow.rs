use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;

use codlec::app::App;
use codlec::dictionary::Dictionary;
use codlec::display::RecordingDisplay;
use codlec::results::{GameRecord, JsonlResultStore, MemoryResultStore, ResultStore};
use codlec::runtime::{Console, FixedTicker, GameEvent, ManualClock, Runner, TestEventSource};

// Whole-app scripts: menus, a game, the end screen, and back out again.

fn key(code: KeyCode) -> GameEvent {
    GameEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn press(c: char) -> GameEvent {
    key(KeyCode::Char(c))
}

fn guess(word: &str) -> Vec<GameEvent> {
    let mut events: Vec<_> = word.chars().map(press).collect();
    events.push(key(KeyCode::Enter));
    events
}

struct Script(Vec<GameEvent>);

impl Script {
    fn new() -> Self {
        Self(Vec::new())
    }

    fn keys(mut self, keys: &str) -> Self {
        self.0.extend(keys.chars().map(press));
        self
    }

    fn key(mut self, code: KeyCode) -> Self {
        self.0.push(key(code));
        self
    }

    fn guess(mut self, word: &str) -> Self {
        self.0.extend(guess(word));
        self
    }

    fn console(self) -> Console<TestEventSource, FixedTicker, RecordingDisplay, ManualClock> {
        let (tx, rx) = mpsc::channel();
        for ev in self.0 {
            tx.send(ev).unwrap();
        }
        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(1)),
        );
        Console::new(runner, RecordingDisplay::new(), ManualClock::new())
    }
}

fn statuses(display: &RecordingDisplay, kind: &str) -> Vec<String> {
    display
        .frames
        .iter()
        .filter(|f| f.kind == kind)
        .filter_map(|f| f.status.clone())
        .collect()
}

#[test]
fn demo_win_is_saved() {
    let dictionary = Dictionary::embedded().unwrap();
    // play, demo, solve, save, continue, quit
    let mut console = Script::new()
        .keys("14")
        .guess("teste")
        .keys("yx4")
        .console();

    let mut app = App::new(&dictionary, MemoryResultStore::default(), StdRng::seed_from_u64(1));
    app.run(&mut console).unwrap();

    let records = &app.store().records;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].word, "TESTE");
    assert_eq!(records[0].attempts, 1);
    assert_eq!(records[0].difficulty, "DEMO");
    assert!(records[0].played_at.is_some());

    let display = console.display();
    // the question, then the confirmation
    assert_eq!(display.count("game_over"), 2);
    assert_eq!(display.count("main_menu"), 2);
    assert_eq!(display.last().unwrap().kind, "main_menu");
}

#[test]
fn portuguese_yes_also_saves() {
    let dictionary = Dictionary::embedded().unwrap();
    let mut console = Script::new()
        .keys("14")
        .guess("teste")
        .keys("Sx4")
        .console();

    let mut app = App::new(&dictionary, MemoryResultStore::default(), StdRng::seed_from_u64(2));
    app.run(&mut console).unwrap();
    assert_eq!(app.store().records.len(), 1);
}

#[test]
fn declined_save_writes_nothing() {
    let dictionary = Dictionary::embedded().unwrap();
    let mut console = Script::new()
        .keys("14")
        .guess("carro")
        .guess("teste")
        .keys("nx4")
        .console();

    let mut app = App::new(&dictionary, MemoryResultStore::default(), StdRng::seed_from_u64(3));
    app.run(&mut console).unwrap();

    assert!(app.store().records.is_empty());
    let over = console
        .display()
        .frames
        .iter()
        .find(|f| f.kind == "game_over")
        .unwrap();
    assert_eq!(over.attempts, 2);
}

#[test]
fn unknown_word_costs_no_attempt() {
    let dictionary = Dictionary::embedded().unwrap();
    let mut console = Script::new()
        .keys("14")
        .guess("zzzzz")
        .guess("teste")
        .keys("yx4")
        .console();

    let mut app = App::new(&dictionary, MemoryResultStore::default(), StdRng::seed_from_u64(4));
    app.run(&mut console).unwrap();

    assert!(statuses(console.display(), "board")
        .iter()
        .any(|s| s == "ZZZZZ is not in the word list. Try another word."));
    assert_eq!(app.store().records[0].attempts, 1);
}

#[test]
fn running_out_of_attempts_offers_no_save() {
    let dictionary = Dictionary::embedded().unwrap();
    let mut script = Script::new().keys("14");
    for word in ["carro", "porta", "noite", "banco", "setas"] {
        script = script.guess(word);
    }
    // any key leaves the end screen; "y" must not save a loss
    let mut console = script.keys("y4").console();

    let mut app = App::new(&dictionary, MemoryResultStore::default(), StdRng::seed_from_u64(5));
    app.run(&mut console).unwrap();

    assert!(app.store().records.is_empty());
    let display = console.display();
    assert_eq!(display.count("game_over"), 1);
    let over = display.frames.iter().find(|f| f.kind == "game_over").unwrap();
    assert_eq!(over.attempts, 5);
    assert_eq!(display.last().unwrap().kind, "main_menu");
}

#[test]
fn giving_up_reveals_the_word() {
    let dictionary = Dictionary::embedded().unwrap();
    let mut console = Script::new()
        .keys("14")
        .key(KeyCode::Esc)
        .keys("3x4")
        .console();

    let mut app = App::new(&dictionary, MemoryResultStore::default(), StdRng::seed_from_u64(6));
    app.run(&mut console).unwrap();

    let notices = statuses(console.display(), "notice");
    assert_eq!(notices.len(), 1);
    assert!(notices[0].contains("The word was: TESTE"));
    assert!(app.store().records.is_empty());
    assert_eq!(console.display().count("game_over"), 0);
}

#[test]
fn restart_then_win_counts_only_new_attempts() {
    let dictionary = Dictionary::embedded().unwrap();
    let mut console = Script::new()
        .keys("14")
        .guess("carro")
        .guess("porta")
        .keys("p")
        .key(KeyCode::Enter)
        .keys("2")
        .guess("teste")
        .keys("yx4")
        .console();

    let mut app = App::new(&dictionary, MemoryResultStore::default(), StdRng::seed_from_u64(7));
    app.run(&mut console).unwrap();

    assert_eq!(app.store().records.len(), 1);
    assert_eq!(app.store().records[0].attempts, 1);
}

#[test]
fn invalid_menu_choice_shows_message() {
    let dictionary = Dictionary::embedded().unwrap();
    let mut console = Script::new().keys("9").key(KeyCode::Enter).keys("4").console();

    let mut app = App::new(&dictionary, MemoryResultStore::default(), StdRng::seed_from_u64(8));
    app.run(&mut console).unwrap();

    let messages = statuses(console.display(), "main_menu");
    assert_eq!(messages.len(), 2);
    assert!(messages
        .iter()
        .all(|m| m == "Invalid choice. Pick an option from 1 to 4."));
}

#[test]
fn invalid_difficulty_returns_to_menu() {
    let dictionary = Dictionary::embedded().unwrap();
    let mut console = Script::new().keys("1x4").console();

    let mut app = App::new(&dictionary, MemoryResultStore::default(), StdRng::seed_from_u64(9));
    app.run(&mut console).unwrap();

    let display = console.display();
    assert_eq!(display.count("difficulty_menu"), 1);
    assert_eq!(display.count("board"), 0);
    assert_eq!(display.count("main_menu"), 2);
}

#[test]
fn how_to_play_and_back() {
    let dictionary = Dictionary::embedded().unwrap();
    let mut console = Script::new().keys("2 4").console();

    let mut app = App::new(&dictionary, MemoryResultStore::default(), StdRng::seed_from_u64(10));
    app.run(&mut console).unwrap();

    assert_eq!(console.display().count("how_to_play"), 1);
}

#[test]
fn results_screen_scrolls_and_returns() {
    let dictionary = Dictionary::embedded().unwrap();
    let mut store = MemoryResultStore::default();
    for (word, attempts) in [("CARRO", 3), ("PORTA", 5), ("NOITE", 2)] {
        store.records.push(GameRecord {
            word: word.to_string(),
            attempts,
            difficulty: "MÉDIO".to_string(),
            played_at: None,
        });
    }
    let mut console = Script::new()
        .keys("3")
        .key(KeyCode::Down)
        .key(KeyCode::Down)
        .key(KeyCode::Down)
        .key(KeyCode::Home)
        .keys("q4")
        .console();

    let mut app = App::new(&dictionary, store, StdRng::seed_from_u64(11));
    app.run(&mut console).unwrap();

    assert_eq!(console.display().count("results"), 5);
    assert_eq!(console.display().last().unwrap().kind, "main_menu");
}

#[test]
fn ctrl_c_quits_from_anywhere() {
    let dictionary = Dictionary::embedded().unwrap();
    let ctrl_c = GameEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

    for prefix in ["", "1", "14", "3", "2"] {
        let mut script = Script::new().keys(prefix);
        script.0.push(ctrl_c.clone());
        let mut console = script.console();

        let mut app = App::new(&dictionary, MemoryResultStore::default(), StdRng::seed_from_u64(12));
        app.run(&mut console).unwrap();
    }
}

#[test]
fn wins_are_appended_to_the_results_file() {
    let dictionary = Dictionary::embedded().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resultados.json");

    for seed in 0..2 {
        let mut console = Script::new()
            .keys("14")
            .guess("setas")
            .guess("teste")
            .keys("yx4")
            .console();
        let mut app = App::new(
            &dictionary,
            JsonlResultStore::with_path(&path),
            StdRng::seed_from_u64(seed),
        );
        app.run(&mut console).unwrap();
    }

    let records = JsonlResultStore::with_path(&path).load().unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.word == "TESTE" && r.attempts == 2));

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(text.contains("\"palavra\":\"TESTE\""));
    assert!(text.contains("\"tentativas\":2"));
    assert!(text.contains("\"dificuldade\":\"DEMO\""));
}

#[test]
fn player_can_play_again_after_a_game() {
    let dictionary = Dictionary::embedded().unwrap();
    let mut console = Script::new()
        .keys("14")
        .guess("teste")
        .keys("yx")
        .keys("14")
        .guess("teste")
        .keys("yx4")
        .console();

    let mut app = App::new(&dictionary, MemoryResultStore::default(), StdRng::seed_from_u64(13));
    app.run(&mut console).unwrap();

    assert_eq!(app.store().records.len(), 2);
}
