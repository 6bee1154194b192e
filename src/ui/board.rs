use std::collections::HashMap;
use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::display::StatusLine;
use crate::feedback::Classification;
use crate::hints::{cooldown_remaining, HINT_DELAY, MAX_HINTS};
use crate::session::GameSession;
use crate::util::ceil_secs;
use crate::word::WORD_LENGTH;

pub const TIMER_CELLS: usize = 15;

const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

/// Countdown bar for the next hint, e.g. `[██████████░░░░░] 20s`.
pub fn timer_bar(remaining: Duration) -> String {
    let total = HINT_DELAY.as_secs();
    let secs = ceil_secs(remaining).min(total);
    let filled = (secs as usize * TIMER_CELLS) / total as usize;
    format!(
        "[{}{}] {:02}s",
        "█".repeat(filled),
        "░".repeat(TIMER_CELLS - filled),
        secs
    )
}

pub fn hint_status_text(session: &GameSession, now: Instant) -> String {
    let mut text = format!("Hints: {}/{} used", session.hints_used(), MAX_HINTS);
    if session.hints_used() < MAX_HINTS {
        match cooldown_remaining(session, now) {
            Some(remaining) => {
                text.push_str(" - Next hint: ");
                text.push_str(&timer_bar(remaining));
            }
            None => text.push_str(" - ✓ AVAILABLE"),
        }
    }
    text
}

fn classification_style(class: Classification) -> Style {
    let base = Style::default().add_modifier(Modifier::BOLD).fg(Color::Black);
    match class {
        Classification::Correct => base.bg(Color::Green),
        Classification::Present => base.bg(Color::Yellow),
        Classification::Absent => base.bg(Color::DarkGray).fg(Color::White),
    }
}

fn grid_line(session: &GameSession, row: usize) -> Line<'static> {
    let mut spans = Vec::with_capacity(WORD_LENGTH * 2);
    let played = session.attempts().get(row).zip(session.feedback().get(row));

    for pos in 0..WORD_LENGTH {
        if pos > 0 {
            spans.push(Span::raw(" "));
        }
        let span = match played {
            Some((word, feedback)) => Span::styled(
                format!(" {} ", word.letter(pos)),
                classification_style(feedback[pos]),
            ),
            None => match session.revealed(pos) {
                Some(letter) => Span::styled(
                    format!(" {letter} "),
                    Style::default().add_modifier(Modifier::BOLD).fg(Color::Blue),
                ),
                None => Span::styled(" _ ", Style::default().add_modifier(Modifier::DIM)),
            },
        };
        spans.push(span);
    }
    Line::from(spans)
}

fn keyboard_lines(states: &HashMap<char, Classification>) -> Vec<Line<'static>> {
    KEYBOARD_ROWS
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .chars()
                .map(|c| {
                    let style = match states.get(&c) {
                        Some(Classification::Correct) => {
                            Style::default().fg(Color::Black).bg(Color::Green)
                        }
                        Some(Classification::Present) => {
                            Style::default().fg(Color::Black).bg(Color::Yellow)
                        }
                        Some(Classification::Absent) => Style::default().fg(Color::DarkGray),
                        None => Style::default().add_modifier(Modifier::BOLD),
                    };
                    Span::styled(format!(" {c} "), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn prompt_line(input: &[char]) -> Line<'static> {
    let typed: String = input.iter().collect();
    let rest = "_".repeat(WORD_LENGTH.saturating_sub(input.len()));
    Line::from(vec![
        Span::raw("Your guess: "),
        Span::styled(typed, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(rest, Style::default().add_modifier(Modifier::DIM)),
    ])
}

pub fn render_board(
    session: &GameSession,
    input: &[char],
    status: Option<&StatusLine>,
    now: Instant,
    area: Rect,
    buf: &mut Buffer,
) {
    let rows = session.max_attempts() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),    // title
            Constraint::Length(1),    // commands
            Constraint::Length(1),    // hints
            Constraint::Length(1),    // padding
            Constraint::Length(rows), // grid
            Constraint::Length(1),    // padding
            Constraint::Length(3),    // keyboard
            Constraint::Length(1),    // padding
            Constraint::Length(1),    // prompt
            Constraint::Length(1),    // status
            Constraint::Min(0),
        ])
        .split(area);

    let title = Line::from(vec![
        Span::styled("CODLEC", super::bold().fg(Color::Cyan)),
        Span::raw(format!(
            " - {}   Attempt: {}/{}",
            session.difficulty(),
            (session.current_attempt() + 1).min(session.max_attempts()),
            session.max_attempts()
        )),
    ]);
    Paragraph::new(title)
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    Paragraph::new(Span::styled(
        "Type a 5-letter word and press Enter | P: pause | H: hint",
        super::hint_style(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    let hint_text = hint_status_text(session, now);
    let hint_color = if session.hints_used() >= MAX_HINTS {
        Color::DarkGray
    } else if cooldown_remaining(session, now).is_some() {
        Color::Yellow
    } else {
        Color::Green
    };
    Paragraph::new(Span::styled(hint_text, Style::default().fg(hint_color)))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    let grid: Vec<Line> = (0..session.max_attempts())
        .map(|row| grid_line(session, row))
        .collect();
    Paragraph::new(grid)
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

    Paragraph::new(keyboard_lines(&session.letter_states()))
        .alignment(Alignment::Center)
        .render(chunks[6], buf);

    Paragraph::new(prompt_line(input))
        .alignment(Alignment::Center)
        .render(chunks[8], buf);

    if let Some(status) = status {
        Paragraph::new(Span::styled(status.text.clone(), super::tone_style(status.tone)))
            .alignment(Alignment::Center)
            .render(chunks[9], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::View;
    use crate::session::{Difficulty, DEMO_WORD};
    use crate::ui::render_to_string;
    use crate::word::Word;
    use ratatui::layout::Position;

    fn demo() -> GameSession {
        GameSession::with_target(Difficulty::Demo, DEMO_WORD)
    }

    #[test]
    fn test_timer_bar_proportions() {
        assert_eq!(timer_bar(Duration::from_secs(30)), "[███████████████] 30s");
        assert_eq!(timer_bar(Duration::from_secs(20)), "[██████████░░░░░] 20s");
        assert_eq!(timer_bar(Duration::from_secs(5)), "[██░░░░░░░░░░░░░] 05s");
        assert_eq!(timer_bar(Duration::from_millis(400)), "[░░░░░░░░░░░░░░░] 01s");
    }

    #[test]
    fn test_timer_bar_width_is_fixed() {
        for secs in 0..=30 {
            let bar = timer_bar(Duration::from_secs(secs));
            let cells = bar.chars().filter(|c| *c == '█' || *c == '░').count();
            assert_eq!(cells, TIMER_CELLS);
        }
    }

    #[test]
    fn test_hint_status_text_states() {
        let mut session = demo();
        let t0 = Instant::now();
        assert_eq!(hint_status_text(&session, t0), "Hints: 0/4 used - ✓ AVAILABLE");

        session.hints_used = 1;
        session.last_hint_at = Some(t0);
        assert_eq!(
            hint_status_text(&session, t0 + Duration::from_secs(25)),
            "Hints: 1/4 used - Next hint: [██░░░░░░░░░░░░░] 05s"
        );
        assert_eq!(
            hint_status_text(&session, t0 + HINT_DELAY),
            "Hints: 1/4 used - ✓ AVAILABLE"
        );

        session.hints_used = MAX_HINTS;
        assert_eq!(hint_status_text(&session, t0), "Hints: 4/4 used");
    }

    #[test]
    fn test_board_shows_attempts_and_prompt() {
        let mut session = demo();
        session.submit_guess(Word::parse("SETAS").unwrap()).unwrap();
        let status = StatusLine::warning("Word not in the list.");

        let rendered = render_to_string(
            &View::Board {
                session: &session,
                input: &['C', 'A'],
                status: Some(&status),
                now: Instant::now(),
            },
            80,
            24,
        );

        assert!(rendered.contains("DEMO"));
        assert!(rendered.contains("Attempt: 2/5"));
        assert!(rendered.contains("S   E   T   A   S"));
        assert!(rendered.contains("Your guess: CA___"));
        assert!(rendered.contains("Word not in the list."));
        assert!(rendered.contains("Hints: 0/4 used"));
    }

    #[test]
    fn test_board_colors_feedback_and_hints() {
        let mut session = demo();
        // S E T A S vs T E S T E: S present, E correct, T present, A absent, S absent
        session.submit_guess(Word::parse("SETAS").unwrap()).unwrap();
        session.revealed[4] = Some('E');

        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        render_board(&session, &[], None, Instant::now(), area, &mut buffer);

        let find = |needle: &str| -> Vec<Position> {
            (0..area.height)
                .flat_map(|y| (0..area.width).map(move |x| Position::new(x, y)))
                .filter(|p| buffer[*p].symbol() == needle)
                .collect()
        };

        // first grid row: cells with a background
        let e_cells: Vec<_> = find("E")
            .into_iter()
            .filter(|p| buffer[*p].bg == Color::Green)
            .collect();
        assert!(!e_cells.is_empty());

        let revealed: Vec<_> = find("E")
            .into_iter()
            .filter(|p| buffer[*p].fg == Color::Blue)
            .collect();
        // one per unplayed row
        assert_eq!(revealed.len(), session.max_attempts() - 1);

        // keyboard: A was absent
        assert!(find("A").iter().any(|p| buffer[*p].fg == Color::DarkGray));
    }

    #[test]
    fn test_board_fits_all_easy_rows() {
        let session = GameSession::with_target(Difficulty::Easy, DEMO_WORD);
        let rendered = render_to_string(
            &View::Board {
                session: &session,
                input: &[],
                status: None,
                now: Instant::now(),
            },
            80,
            24,
        );
        let empty_rows = rendered
            .lines()
            .filter(|l| l.trim() == "_   _   _   _   _")
            .count();
        assert_eq!(empty_rows, 7);
    }
}
