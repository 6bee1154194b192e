//! Collects one guess from the keyboard while keeping the hint countdown fresh.
//!
//! Everything runs on the caller's thread: the console yields a key, a resize,
//! or a tick every [`TICK_RATE_MS`](crate::runtime::TICK_RATE_MS), and ticks
//! repaint the board once per second while a hint countdown is on screen.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::Rng;
use tracing::{debug, info};

use crate::dictionary::Dictionary;
use crate::display::{Display, StatusLine, View};
use crate::error::HintError;
use crate::hints::{self, cooldown_remaining};
use crate::runtime::{is_interrupt, Clock, Console, GameEvent, GameEventSource, Ticker};
use crate::session::GameSession;
use crate::util::ceil_secs;
use crate::word::{Word, WORD_LENGTH};

/// Typed alone and submitted, opens the pause menu.
pub const PAUSE_COMMAND: char = 'P';
/// Typed alone and submitted, asks for a hint.
pub const HINT_COMMAND: char = 'H';

pub const REDRAW_INTERVAL: Duration = Duration::from_secs(1);

pub const RESTART_MESSAGE: &str = "Game restarted! New word selected. Good luck!";

/// How a round of guess entry ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// A full-length word, not yet checked against the dictionary.
    Ready(Word),
    /// Player gave up from the pause menu.
    Forfeited,
    /// Session was restarted from the pause menu; keep playing it.
    Restarted,
    /// Ctrl-C.
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Letter(char),
    Backspace,
    Submit,
    Pause,
    Interrupt,
    Ignore,
}

pub fn classify_key(key: &KeyEvent) -> KeyAction {
    if is_interrupt(key) {
        return KeyAction::Interrupt;
    }
    match key.code {
        KeyCode::Char(c)
            if c.is_ascii_alphabetic()
                && !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            KeyAction::Letter(c.to_ascii_uppercase())
        }
        KeyCode::Backspace => KeyAction::Backspace,
        KeyCode::Enter => KeyAction::Submit,
        KeyCode::Esc => KeyAction::Pause,
        _ => KeyAction::Ignore,
    }
}

/// Letters typed so far for the current guess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuessBuffer {
    letters: Vec<char>,
}

impl GuessBuffer {
    pub fn new() -> Self {
        Self {
            letters: Vec::with_capacity(WORD_LENGTH),
        }
    }

    /// Append an uppercase letter; false when the buffer is full.
    pub fn push(&mut self, letter: char) -> bool {
        if self.is_full() {
            return false;
        }
        self.letters.push(letter.to_ascii_uppercase());
        true
    }

    pub fn pop(&mut self) -> Option<char> {
        self.letters.pop()
    }

    pub fn clear(&mut self) {
        self.letters.clear();
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.letters.len() == WORD_LENGTH
    }

    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// The single buffered letter, if exactly one was typed.
    pub fn command(&self) -> Option<char> {
        match self.letters.as_slice() {
            [c] => Some(*c),
            _ => None,
        }
    }
}

enum PauseChoice {
    Resume,
    Restart,
    Forfeit,
    Quit,
}

/// Guess entry for one session.
///
/// Holds the typed buffer and the status line between calls, so a message set
/// by one round (e.g. after a restart) is still visible in the next.
pub struct InputLoop<'d> {
    dictionary: &'d Dictionary,
    buffer: GuessBuffer,
    status: Option<StatusLine>,
    last_redraw: Option<Instant>,
    showed_countdown: bool,
}

impl<'d> InputLoop<'d> {
    pub fn new(dictionary: &'d Dictionary) -> Self {
        Self {
            dictionary,
            buffer: GuessBuffer::new(),
            status: None,
            last_redraw: None,
            showed_countdown: false,
        }
    }

    pub fn set_status(&mut self, status: StatusLine) {
        self.status = Some(status);
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    pub fn buffer(&self) -> &GuessBuffer {
        &self.buffer
    }

    /// Whether a tick at `now` should repaint the board.
    ///
    /// True while a countdown is running, and once more after it ends so the
    /// "available" state replaces the last frame of the bar.
    pub fn countdown_active(&self, session: &GameSession, now: Instant) -> bool {
        cooldown_remaining(session, now).is_some() || self.showed_countdown
    }

    fn redraw_due(&self, session: &GameSession, now: Instant) -> bool {
        let elapsed = self
            .last_redraw
            .map_or(REDRAW_INTERVAL, |at| now.saturating_duration_since(at));
        elapsed >= REDRAW_INTERVAL && self.countdown_active(session, now)
    }

    fn redraw<E, T, D, C>(
        &mut self,
        console: &mut Console<E, T, D, C>,
        session: &GameSession,
    ) -> io::Result<()>
    where
        E: GameEventSource,
        T: Ticker,
        D: Display,
        C: Clock,
    {
        let now = console.now();
        console.draw(&View::Board {
            session,
            input: self.buffer.letters(),
            status: self.status.as_ref(),
            now,
        })?;
        self.last_redraw = Some(now);
        self.showed_countdown = cooldown_remaining(session, now).is_some();
        Ok(())
    }

    /// Read keys until a full guess is submitted or the session is left.
    pub fn read_guess<E, T, D, C, R>(
        &mut self,
        console: &mut Console<E, T, D, C>,
        session: &mut GameSession,
        rng: &mut R,
    ) -> io::Result<GuessOutcome>
    where
        E: GameEventSource,
        T: Ticker,
        D: Display,
        C: Clock,
        R: Rng + ?Sized,
    {
        self.redraw(console, session)?;

        loop {
            let key = match console.step()? {
                GameEvent::Tick => {
                    if self.redraw_due(session, console.now()) {
                        self.redraw(console, session)?;
                    }
                    continue;
                }
                GameEvent::Resize => {
                    self.redraw(console, session)?;
                    continue;
                }
                GameEvent::Key(key) => key,
            };

            match classify_key(&key) {
                KeyAction::Interrupt => return Ok(GuessOutcome::Quit),
                KeyAction::Letter(c) => {
                    if self.buffer.push(c) {
                        self.redraw(console, session)?;
                    }
                }
                KeyAction::Backspace => {
                    if self.buffer.pop().is_some() {
                        self.redraw(console, session)?;
                    }
                }
                KeyAction::Pause => {
                    if let Some(outcome) = self.pause(console, session, rng)? {
                        return Ok(outcome);
                    }
                }
                KeyAction::Submit => {
                    if let Some(outcome) = self.submit(console, session, rng)? {
                        return Ok(outcome);
                    }
                }
                KeyAction::Ignore => {}
            }
        }
    }

    fn submit<E, T, D, C, R>(
        &mut self,
        console: &mut Console<E, T, D, C>,
        session: &mut GameSession,
        rng: &mut R,
    ) -> io::Result<Option<GuessOutcome>>
    where
        E: GameEventSource,
        T: Ticker,
        D: Display,
        C: Clock,
        R: Rng + ?Sized,
    {
        if self.buffer.is_full() {
            let word = Word::from_letters(self.buffer.letters());
            self.buffer.clear();
            match word {
                Ok(word) => {
                    self.status = None;
                    return Ok(Some(GuessOutcome::Ready(word)));
                }
                Err(err) => self.status = Some(StatusLine::error(err.to_string())),
            }
        } else {
            match self.buffer.command() {
                Some(PAUSE_COMMAND) => return self.pause(console, session, rng),
                Some(HINT_COMMAND) => {
                    self.buffer.clear();
                    let now = console.now();
                    self.request_hint(session, now, rng);
                }
                _ => {
                    debug!(len = self.buffer.len(), "malformed guess");
                    self.buffer.clear();
                    self.status = Some(StatusLine::error(format!(
                        "The word must have exactly {WORD_LENGTH} letters. Try again."
                    )));
                }
            }
        }
        self.redraw(console, session)?;
        Ok(None)
    }

    fn request_hint<R: Rng + ?Sized>(
        &mut self,
        session: &mut GameSession,
        now: Instant,
        rng: &mut R,
    ) {
        self.status = Some(match hints::request(session, now, rng) {
            Ok(hint) => StatusLine::success(format!(
                "Hint revealed! Letter at position {}: {}",
                hint.position + 1,
                hint.letter
            )),
            Err(HintError::LimitReached(max)) => {
                StatusLine::warning(format!("Hint limit reached: all {max} hints used."))
            }
            Err(HintError::CoolingDown { remaining }) => StatusLine::warning(format!(
                "Next hint available in {}s.",
                ceil_secs(remaining)
            )),
            Err(err @ HintError::NoEligiblePosition) => {
                StatusLine::info(format!("No hint possible: {err}."))
            }
        });
    }

    /// Run the pause menu. `None` means play resumes.
    fn pause<E, T, D, C, R>(
        &mut self,
        console: &mut Console<E, T, D, C>,
        session: &mut GameSession,
        rng: &mut R,
    ) -> io::Result<Option<GuessOutcome>>
    where
        E: GameEventSource,
        T: Ticker,
        D: Display,
        C: Clock,
        R: Rng + ?Sized,
    {
        self.buffer.clear();
        info!("paused");

        let outcome = match self.pause_menu(console)? {
            PauseChoice::Resume => None,
            PauseChoice::Restart => {
                session.restart(session.difficulty(), self.dictionary, rng);
                self.status = Some(StatusLine::success(RESTART_MESSAGE));
                Some(GuessOutcome::Restarted)
            }
            PauseChoice::Forfeit => {
                info!(target_word = %session.target(), "forfeited");
                Some(GuessOutcome::Forfeited)
            }
            PauseChoice::Quit => Some(GuessOutcome::Quit),
        };

        if outcome.is_none() {
            self.redraw(console, session)?;
        }
        Ok(outcome)
    }

    fn pause_menu<E, T, D, C>(
        &mut self,
        console: &mut Console<E, T, D, C>,
    ) -> io::Result<PauseChoice>
    where
        E: GameEventSource,
        T: Ticker,
        D: Display,
        C: Clock,
    {
        let mut message: Option<StatusLine> = None;
        loop {
            let key = console.prompt_key(&View::PauseMenu {
                message: message.as_ref(),
            })?;
            if is_interrupt(&key) {
                return Ok(PauseChoice::Quit);
            }
            match key.code {
                KeyCode::Char('1') | KeyCode::Esc => return Ok(PauseChoice::Resume),
                KeyCode::Char('2') => return Ok(PauseChoice::Restart),
                KeyCode::Char('3') => return Ok(PauseChoice::Forfeit),
                _ => message = Some(StatusLine::error("Invalid option. Choose 1, 2 or 3.")),
            }
        }
    }
}
