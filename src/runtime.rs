use std::cell::Cell;
use std::io;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::display::{Display, View};

pub const TICK_RATE_MS: u64 = 100;

/// Unified event type consumed by the game loops
#[derive(Clone, Debug)]
pub enum GameEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait GameEventSource {
    /// Wait up to `timeout` for an event. `Ok(None)` means the timeout expired.
    fn recv_timeout(&mut self, timeout: Duration) -> io::Result<Option<GameEvent>>;
}

/// Production event source: polls crossterm on the calling thread.
#[derive(Debug, Default)]
pub struct CrosstermEventSource;

impl CrosstermEventSource {
    pub fn new() -> Self {
        Self
    }
}

impl GameEventSource for CrosstermEventSource {
    fn recv_timeout(&mut self, timeout: Duration) -> io::Result<Option<GameEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        Ok(match event::read()? {
            // Windows reports releases as well
            CtEvent::Key(key) if key.kind != KeyEventKind::Release => Some(GameEvent::Key(key)),
            CtEvent::Resize(_, _) => Some(GameEvent::Resize),
            _ => None,
        })
    }
}

/// Test event source fed through a channel.
///
/// Once the sender is dropped and the queue is drained, reads fail with
/// `UnexpectedEof` so a scripted test can never wait forever.
pub struct TestEventSource {
    rx: Receiver<GameEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<GameEvent>) -> Self {
        Self { rx }
    }
}

impl GameEventSource for TestEventSource {
    fn recv_timeout(&mut self, timeout: Duration) -> io::Result<Option<GameEvent>> {
        match self.rx.recv_timeout(timeout) {
            Ok(ev) => Ok(Some(ev)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "event source closed",
            )),
        }
    }
}

/// Configurable ticker interface
pub trait Ticker {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_RATE_MS))
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Source of "now" for cooldowns and redraw pacing.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Runner that advances the game one event/tick at a time
pub struct Runner<E: GameEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: GameEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout
    pub fn step(&mut self) -> io::Result<GameEvent> {
        Ok(self
            .event_source
            .recv_timeout(self.ticker.interval())?
            .unwrap_or(GameEvent::Tick))
    }
}

pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Everything a game loop talks to: input, output, and time.
pub struct Console<E: GameEventSource, T: Ticker, D: Display, C: Clock> {
    runner: Runner<E, T>,
    display: D,
    clock: C,
}

impl<E: GameEventSource, T: Ticker, D: Display, C: Clock> Console<E, T, D, C> {
    pub fn new(runner: Runner<E, T>, display: D, clock: C) -> Self {
        Self {
            runner,
            display,
            clock,
        }
    }

    pub fn draw(&mut self, view: &View<'_>) -> io::Result<()> {
        self.display.draw(view)
    }

    pub fn step(&mut self) -> io::Result<GameEvent> {
        self.runner.step()
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Show `view` and block until a key arrives, repainting on resize.
    pub fn prompt_key(&mut self, view: &View<'_>) -> io::Result<KeyEvent> {
        self.draw(view)?;
        loop {
            match self.step()? {
                GameEvent::Key(key) => return Ok(key),
                GameEvent::Resize => self.draw(view)?,
                GameEvent::Tick => {}
            }
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
