use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::display::{SavePrompt, StatusLine, Tone};
use crate::hints::{HINT_DELAY, MAX_HINTS};
use crate::session::{Difficulty, GameSession, Status, DEMO_WORD};

const PRESS_ANY_KEY: &str = "Press any key to continue...";

fn option(number: char, label: &str, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{number}. ")),
        Span::styled(label.to_string(), Style::default().fg(color)),
    ])
}

/// Render `lines` vertically centered inside a bordered box.
fn boxed(title: &str, lines: Vec<Line<'_>>, footer: Option<Line<'_>>, area: Rect, buf: &mut Buffer) {
    let height = (lines.len() as u16 + 2).min(area.height);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(format!(" {title} "), super::bold())),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .render(chunks[1], buf);

    if let Some(footer) = footer {
        Paragraph::new(footer)
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
    }
}

fn message_line(message: Option<&StatusLine>) -> Option<Line<'static>> {
    message.map(|m| Line::from(Span::styled(m.text.clone(), super::tone_style(m.tone))))
}

pub fn render_main_menu(message: Option<&StatusLine>, area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::from(Span::styled(
            "C O D L E C",
            super::bold().fg(Color::Cyan),
        )),
        Line::from(Span::styled(
            "Guess the secret five-letter word",
            super::hint_style(),
        )),
        Line::default(),
        option('1', "Play", Color::Green),
        option('2', "How to play", Color::Yellow),
        option('3', "Results", Color::Cyan),
        option('4', "Quit", Color::Gray),
        Line::default(),
        Line::from("Choose an option (1-4)"),
    ];
    boxed("CODLEC", lines, message_line(message), area, buf);
}

pub fn render_difficulty_menu(area: Rect, buf: &mut Buffer) {
    let lines = vec![
        option('1', "Easy    - 7 attempts", Color::Green),
        option('2', "Medium  - 6 attempts", Color::Yellow),
        option('3', "Hard    - 5 attempts, rarer words", Color::Red),
        option(
            '4',
            &format!("Demo    - 5 attempts, word: {DEMO_WORD}"),
            Color::White,
        ),
        Line::default(),
        Line::from("Choose a difficulty (1-4)"),
    ];
    let footer = Line::from(Span::styled(
        "Any other key goes back to the menu",
        super::hint_style(),
    ));
    boxed("Difficulty", lines, Some(footer), area, buf);
}

pub fn render_how_to_play(area: Rect, buf: &mut Buffer) {
    let swatch = |letter: &str, bg: Color, text: &str| {
        Line::from(vec![
            Span::styled(
                format!(" {letter} "),
                Style::default()
                    .fg(Color::Black)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" {text}")),
        ])
    };
    let attempts = Difficulty::ALL
        .iter()
        .map(|d| format!("{d} {}", d.max_attempts()))
        .join(" | ");

    let lines = vec![
        Line::from(Span::styled(
            "Goal: guess the secret five-letter word.",
            super::bold(),
        )),
        Line::default(),
        Line::from(format!("Attempts per difficulty: {attempts}")),
        Line::from(format!("Demo always uses the word {DEMO_WORD}.")),
        Line::default(),
        swatch("V", Color::Green, "right letter, right place"),
        swatch("A", Color::Yellow, "letter is in the word, wrong place"),
        swatch("X", Color::DarkGray, "letter is not in the word"),
        Line::default(),
        Line::from("Only words from the word list are accepted."),
        Line::from("Letters may appear more than once."),
        Line::from(format!(
            "Type H and Enter for a hint: up to {MAX_HINTS} per game, one every {}s.",
            HINT_DELAY.as_secs()
        )),
        Line::from("Type P and Enter (or press Esc) to pause."),
    ];
    let footer = Line::from(Span::styled(PRESS_ANY_KEY, super::hint_style()));
    boxed("How to play", lines, Some(footer), area, buf);
}

pub fn render_pause_menu(message: Option<&StatusLine>, area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::from(Span::styled("=== GAME PAUSED ===", super::bold())),
        Line::default(),
        option('1', "Resume", Color::Green),
        option('2', "Restart", Color::Yellow),
        option('3', "Give up", Color::Gray),
        Line::default(),
        Line::from("Select an option (1-3)"),
    ];
    boxed("Paused", lines, message_line(message), area, buf);
}

pub fn render_notice(title: &str, lines: &[String], tone: Tone, area: Rect, buf: &mut Buffer) {
    let style = super::tone_style(tone);
    let lines = lines
        .iter()
        .map(|l| Line::from(Span::styled(l.clone(), style)))
        .collect();
    let footer = Line::from(Span::styled(PRESS_ANY_KEY, super::hint_style()));
    boxed(title, lines, Some(footer), area, buf);
}

pub fn render_game_over(session: &GameSession, save: SavePrompt, area: Rect, buf: &mut Buffer) {
    let word = Span::styled(session.target().to_string(), super::bold());
    let mut lines = match session.status() {
        Status::Won => vec![
            Line::from(Span::styled(
                "Congratulations! You won!",
                super::tone_style(Tone::Success),
            )),
            Line::from(vec![Span::raw("The word was: "), word]),
            Line::from(format!(
                "Attempts: {}/{}",
                session.current_attempt(),
                session.max_attempts()
            )),
        ],
        _ => vec![
            Line::from(Span::styled(
                "Out of attempts!",
                super::tone_style(Tone::Error),
            )),
            Line::from(vec![Span::raw("The word was: "), word]),
        ],
    };

    let footer = match save {
        SavePrompt::Asking => {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                "Save result? (Y/N)",
                super::bold().fg(Color::Yellow),
            )));
            None
        }
        SavePrompt::Saved => {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                "Result saved!",
                super::tone_style(Tone::Success),
            )));
            Some(PRESS_ANY_KEY)
        }
        SavePrompt::Declined | SavePrompt::NotOffered => Some(PRESS_ANY_KEY),
    };

    boxed(
        "Game over",
        lines,
        footer.map(|f| Line::from(Span::styled(f, super::hint_style()))),
        area,
        buf,
    );
}
