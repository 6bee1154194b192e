//! Menus and the game loop that ties a session, the input loop, and the
//! result store together.

use std::io;

use crossterm::event::{KeyCode, KeyEvent};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::dictionary::Dictionary;
use crate::display::{Display, SavePrompt, StatusLine, Tone, View};
use crate::input::{GuessOutcome, InputLoop};
use crate::results::{save_quietly, GameRecord, ResultStore, ResultSummary};
use crate::runtime::{is_interrupt, Clock, Console, GameEventSource, Ticker};
use crate::session::{Difficulty, GameSession, Status};

const RESULTS_PAGE: usize = 10;

/// Where control goes after a screen is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Menu,
    Quit,
}

pub struct App<'a, S: ResultStore, R: Rng> {
    dictionary: &'a Dictionary,
    store: S,
    rng: R,
}

/// Show `view` until a key arrives. `None` means Ctrl-C.
fn wait_key<E, T, D, C>(
    console: &mut Console<E, T, D, C>,
    view: &View<'_>,
) -> io::Result<Option<KeyEvent>>
where
    E: GameEventSource,
    T: Ticker,
    D: Display,
    C: Clock,
{
    let key = console.prompt_key(view)?;
    Ok((!is_interrupt(&key)).then_some(key))
}

fn choice(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c) => Some(c),
        _ => None,
    }
}

impl<'a, S: ResultStore, R: Rng> App<'a, S, R> {
    pub fn new(dictionary: &'a Dictionary, store: S, rng: R) -> Self {
        Self {
            dictionary,
            store,
            rng,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Main menu loop; returns when the player quits.
    pub fn run<E, T, D, C>(&mut self, console: &mut Console<E, T, D, C>) -> io::Result<()>
    where
        E: GameEventSource,
        T: Ticker,
        D: Display,
        C: Clock,
    {
        let mut message: Option<StatusLine> = None;
        loop {
            let Some(key) = wait_key(
                console,
                &View::MainMenu {
                    message: message.as_ref(),
                },
            )?
            else {
                break;
            };
            message = None;

            let flow = match choice(&key) {
                Some('1') => self.choose_and_play(console)?,
                Some('2') => match wait_key(console, &View::HowToPlay)? {
                    Some(_) => Flow::Menu,
                    None => Flow::Quit,
                },
                Some('3') => self.show_results(console)?,
                Some('4') => Flow::Quit,
                _ => {
                    message = Some(StatusLine::error(
                        "Invalid choice. Pick an option from 1 to 4.",
                    ));
                    Flow::Menu
                }
            };

            if flow == Flow::Quit {
                break;
            }
        }
        info!("quit");
        Ok(())
    }

    fn choose_and_play<E, T, D, C>(
        &mut self,
        console: &mut Console<E, T, D, C>,
    ) -> io::Result<Flow>
    where
        E: GameEventSource,
        T: Ticker,
        D: Display,
        C: Clock,
    {
        let Some(key) = wait_key(console, &View::DifficultyMenu)? else {
            return Ok(Flow::Quit);
        };
        match choice(&key).and_then(Difficulty::from_choice) {
            Some(difficulty) => self.play(console, difficulty),
            None => Ok(Flow::Menu),
        }
    }

    /// Play one session from the first guess to its end screen.
    pub fn play<E, T, D, C>(
        &mut self,
        console: &mut Console<E, T, D, C>,
        difficulty: Difficulty,
    ) -> io::Result<Flow>
    where
        E: GameEventSource,
        T: Ticker,
        D: Display,
        C: Clock,
    {
        let dictionary = self.dictionary;
        let mut session = GameSession::new(difficulty, dictionary, &mut self.rng);
        let mut input = InputLoop::new(dictionary);

        loop {
            let word = match input.read_guess(console, &mut session, &mut self.rng)? {
                GuessOutcome::Ready(word) => word,
                GuessOutcome::Restarted => continue,
                GuessOutcome::Forfeited => return self.forfeit(console, &session),
                GuessOutcome::Quit => return Ok(Flow::Quit),
            };

            if !dictionary.contains(&word, session.difficulty()) {
                debug!(%word, "guess rejected: not in word list");
                input.set_status(StatusLine::warning(format!(
                    "{word} is not in the word list. Try another word."
                )));
                continue;
            }

            if let Err(err) = session.submit_guess(word) {
                warn!(%err, "guess after game over");
                return Ok(Flow::Menu);
            }

            if session.is_over() {
                info!(
                    status = ?session.status(),
                    attempts = session.current_attempt(),
                    hints = session.hints_used(),
                    "session ended"
                );
                return self.game_over(console, &session);
            }
        }
    }

    fn forfeit<E, T, D, C>(
        &mut self,
        console: &mut Console<E, T, D, C>,
        session: &GameSession,
    ) -> io::Result<Flow>
    where
        E: GameEventSource,
        T: Ticker,
        D: Display,
        C: Clock,
    {
        let view = View::Notice {
            title: "You gave up",
            lines: vec![
                format!("The word was: {}", session.target()),
                "Better luck next time!".to_string(),
            ],
            tone: Tone::Warning,
        };
        Ok(match wait_key(console, &view)? {
            Some(_) => Flow::Menu,
            None => Flow::Quit,
        })
    }

    fn game_over<E, T, D, C>(
        &mut self,
        console: &mut Console<E, T, D, C>,
        session: &GameSession,
    ) -> io::Result<Flow>
    where
        E: GameEventSource,
        T: Ticker,
        D: Display,
        C: Clock,
    {
        let save = if session.status() == Status::Won {
            let Some(key) = wait_key(
                console,
                &View::GameOver {
                    session,
                    save: SavePrompt::Asking,
                },
            )?
            else {
                return Ok(Flow::Quit);
            };

            // S for "sim" is what older versions asked for
            let wants_save = matches!(
                choice(&key).map(|c| c.to_ascii_uppercase()),
                Some('Y') | Some('S')
            );
            if wants_save {
                let record = GameRecord::new(
                    session.target(),
                    session.current_attempt(),
                    session.difficulty(),
                );
                if save_quietly(&mut self.store, &record) {
                    SavePrompt::Saved
                } else {
                    SavePrompt::Declined
                }
            } else {
                SavePrompt::Declined
            }
        } else {
            SavePrompt::NotOffered
        };

        Ok(match wait_key(console, &View::GameOver { session, save })? {
            Some(_) => Flow::Menu,
            None => Flow::Quit,
        })
    }

    fn show_results<E, T, D, C>(
        &mut self,
        console: &mut Console<E, T, D, C>,
    ) -> io::Result<Flow>
    where
        E: GameEventSource,
        T: Ticker,
        D: Display,
        C: Clock,
    {
        let records = self.store.load().unwrap_or_else(|err| {
            warn!(%err, "could not read results");
            Vec::new()
        });
        let summary = ResultSummary::from_records(&records);
        let last = records.len().saturating_sub(1);
        let mut scroll = 0;

        loop {
            let view = View::Results {
                records: &records,
                summary: &summary,
                scroll,
            };
            let Some(key) = wait_key(console, &view)? else {
                return Ok(Flow::Quit);
            };
            scroll = match key.code {
                KeyCode::Up => scroll.saturating_sub(1),
                KeyCode::Down => (scroll + 1).min(last),
                KeyCode::PageUp => scroll.saturating_sub(RESULTS_PAGE),
                KeyCode::PageDown => (scroll + RESULTS_PAGE).min(last),
                KeyCode::Home => 0,
                _ => return Ok(Flow::Menu),
            };
        }
    }
}
