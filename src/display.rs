//! What the player sees, decoupled from how it gets drawn.
//!
//! Game loops build a [`View`] describing the whole screen and hand it to a
//! [`Display`]. Every call is a full redraw.

use std::io;
use std::time::Instant;

use ratatui::{backend::Backend, Terminal};

use crate::results::{GameRecord, ResultSummary};
use crate::session::GameSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

/// One-line message shown under the prompt or a menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub tone: Tone,
}

impl StatusLine {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Info)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Success)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Warning)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Error)
    }
}

/// Where the post-game screen is in its save prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavePrompt {
    /// Won, waiting for Y/N.
    Asking,
    Saved,
    Declined,
    /// Lost; nothing to save.
    NotOffered,
}

/// A full screen's worth of state.
#[derive(Debug, Clone)]
pub enum View<'a> {
    MainMenu {
        message: Option<&'a StatusLine>,
    },
    HowToPlay,
    DifficultyMenu,
    Board {
        session: &'a GameSession,
        input: &'a [char],
        status: Option<&'a StatusLine>,
        now: Instant,
    },
    PauseMenu {
        message: Option<&'a StatusLine>,
    },
    Notice {
        title: &'a str,
        lines: Vec<String>,
        tone: Tone,
    },
    GameOver {
        session: &'a GameSession,
        save: SavePrompt,
    },
    Results {
        records: &'a [GameRecord],
        summary: &'a ResultSummary,
        scroll: usize,
    },
}

impl View<'_> {
    /// Short stable name, used in logs and by the recording display.
    pub fn kind(&self) -> &'static str {
        match self {
            View::MainMenu { .. } => "main_menu",
            View::HowToPlay => "how_to_play",
            View::DifficultyMenu => "difficulty_menu",
            View::Board { .. } => "board",
            View::PauseMenu { .. } => "pause_menu",
            View::Notice { .. } => "notice",
            View::GameOver { .. } => "game_over",
            View::Results { .. } => "results",
        }
    }
}

/// Renders a complete view.
pub trait Display {
    fn draw(&mut self, view: &View<'_>) -> io::Result<()>;
}

/// ratatui-backed display used by the binary (and by tests with `TestBackend`).
pub struct TerminalDisplay<B: Backend> {
    terminal: Terminal<B>,
}

impl<B: Backend> TerminalDisplay<B> {
    pub fn new(backend: B) -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new(backend)?,
        })
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend> Display for TerminalDisplay<B> {
    fn draw(&mut self, view: &View<'_>) -> io::Result<()> {
        self.terminal
            .draw(|f| f.render_widget(view, f.area()))
            .map(|_| ())
    }
}

/// What a [`RecordingDisplay`] remembers about each frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub kind: &'static str,
    pub input: String,
    pub status: Option<String>,
    pub attempts: usize,
    pub hints_used: u32,
    pub revealed: usize,
}

/// Headless display that keeps a log of every frame.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub frames: Vec<Snapshot>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.frames.last()
    }

    pub fn count(&self, kind: &str) -> usize {
        self.frames.iter().filter(|f| f.kind == kind).count()
    }
}

impl Display for RecordingDisplay {
    fn draw(&mut self, view: &View<'_>) -> io::Result<()> {
        let (input, status, session) = match view {
            View::Board {
                session,
                input,
                status,
                ..
            } => (
                input.iter().collect(),
                status.map(|s| s.text.clone()),
                Some(*session),
            ),
            View::MainMenu { message } | View::PauseMenu { message } => {
                (String::new(), message.map(|s| s.text.clone()), None)
            }
            View::Notice { lines, .. } => (String::new(), Some(lines.join(" ")), None),
            View::GameOver { session, .. } => (String::new(), None, Some(*session)),
            _ => (String::new(), None, None),
        };

        self.frames.push(Snapshot {
            kind: view.kind(),
            input,
            status,
            attempts: session.map_or(0, |s| s.current_attempt()),
            hints_used: session.map_or(0, |s| s.hints_used()),
            revealed: session.map_or(0, |s| s.revealed_count()),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Difficulty, DEMO_WORD};
    use ratatui::backend::TestBackend;

    #[test]
    fn recording_display_captures_board_state() {
        let session = GameSession::with_target(Difficulty::Demo, DEMO_WORD);
        let status = StatusLine::warning("Word not in the list.");
        let mut display = RecordingDisplay::new();

        display
            .draw(&View::Board {
                session: &session,
                input: &['T', 'E'],
                status: Some(&status),
                now: Instant::now(),
            })
            .unwrap();
        display.draw(&View::DifficultyMenu).unwrap();

        assert_eq!(display.frames.len(), 2);
        assert_eq!(display.frames[0].kind, "board");
        assert_eq!(display.frames[0].input, "TE");
        assert_eq!(
            display.frames[0].status.as_deref(),
            Some("Word not in the list.")
        );
        assert_eq!(display.last().unwrap().kind, "difficulty_menu");
        assert_eq!(display.count("board"), 1);
    }

    #[test]
    fn terminal_display_draws_to_backend() {
        let mut display = TerminalDisplay::new(TestBackend::new(80, 24)).unwrap();
        display.draw(&View::MainMenu { message: None }).unwrap();

        let buffer = display.terminal().backend().buffer();
        let rendered: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(rendered.contains("CODLEC"));
    }
}
