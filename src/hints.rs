//! Hint policy: how many letters may be revealed, and how often.
//!
//! The first hint of a session is free; every later one waits [`HINT_DELAY`]
//! after the previous grant, up to [`MAX_HINTS`] per session. A hint reveals a
//! random position that is neither revealed already nor solved by a guess.

use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::error::HintError;
use crate::session::GameSession;
use crate::word::WORD_LENGTH;

pub const MAX_HINTS: u32 = 4;
pub const HINT_DELAY: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hint {
    pub position: usize,
    pub letter: char,
}

/// Time left before the next hint may be granted.
///
/// `None` when no countdown applies: no hint taken yet, the limit is reached, or
/// the delay has already passed.
pub fn cooldown_remaining(session: &GameSession, now: Instant) -> Option<Duration> {
    if session.hints_used == 0 || session.hints_used >= MAX_HINTS {
        return None;
    }
    let last = session.last_hint_at?;
    let remaining = HINT_DELAY.saturating_sub(now.saturating_duration_since(last));
    (!remaining.is_zero()).then_some(remaining)
}

/// Why a hint cannot be granted right now, if it cannot.
pub fn eligibility(session: &GameSession, now: Instant) -> Result<(), HintError> {
    if session.hints_used >= MAX_HINTS {
        return Err(HintError::LimitReached(MAX_HINTS));
    }
    match cooldown_remaining(session, now) {
        Some(remaining) => Err(HintError::CoolingDown { remaining }),
        None => Ok(()),
    }
}

pub fn can_grant(session: &GameSession, now: Instant) -> bool {
    eligibility(session, now).is_ok()
}

/// Positions a hint may still reveal.
pub fn eligible_positions(session: &GameSession) -> Vec<usize> {
    (0..WORD_LENGTH)
        .filter(|&i| session.revealed(i).is_none() && !session.is_position_solved(i))
        .collect()
}

/// Reveal one random eligible letter.
///
/// Does not check the count/cooldown policy (see [`request`]). Leaves the
/// session untouched when nothing is left to reveal.
pub fn grant<R: Rng + ?Sized>(
    session: &mut GameSession,
    now: Instant,
    rng: &mut R,
) -> Result<Hint, HintError> {
    let position = *eligible_positions(session)
        .choose(rng)
        .ok_or(HintError::NoEligiblePosition)?;
    let letter = session.target().letter(position);

    session.revealed[position] = Some(letter);
    session.hints_used += 1;
    session.last_hint_at = Some(now);

    info!(position, hints_used = session.hints_used, "hint granted");
    Ok(Hint { position, letter })
}

/// Policy check followed by [`grant`]; what the player's hint command runs.
pub fn request<R: Rng + ?Sized>(
    session: &mut GameSession,
    now: Instant,
    rng: &mut R,
) -> Result<Hint, HintError> {
    eligibility(session, now)
        .and_then(|()| grant(session, now, rng))
        .inspect_err(|err| debug!(%err, "hint denied"))
}
