pub mod board;
pub mod menus;
pub mod results;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use crate::display::{Tone, View};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;

impl Widget for &View<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = inner(area);
        match self {
            View::MainMenu { message } => menus::render_main_menu(*message, area, buf),
            View::HowToPlay => menus::render_how_to_play(area, buf),
            View::DifficultyMenu => menus::render_difficulty_menu(area, buf),
            View::Board {
                session,
                input,
                status,
                now,
            } => board::render_board(session, input, *status, *now, area, buf),
            View::PauseMenu { message } => menus::render_pause_menu(*message, area, buf),
            View::Notice { title, lines, tone } => {
                menus::render_notice(title, lines, *tone, area, buf)
            }
            View::GameOver { session, save } => menus::render_game_over(session, *save, area, buf),
            View::Results {
                records,
                summary,
                scroll,
            } => results::render_results(records, summary, *scroll, area, buf),
        }
    }
}

fn inner(area: Rect) -> Rect {
    let horizontal = HORIZONTAL_MARGIN.min(area.width / 4);
    let vertical = VERTICAL_MARGIN.min(area.height / 4);
    Rect {
        x: area.x + horizontal,
        y: area.y + vertical,
        width: area.width - horizontal * 2,
        height: area.height - vertical * 2,
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Info => Style::default().fg(Color::Cyan),
        Tone::Success => bold().fg(Color::Green),
        Tone::Warning => Style::default().fg(Color::Yellow),
        Tone::Error => bold().fg(Color::Red),
    }
}

fn hint_style() -> Style {
    Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC)
}

#[cfg(test)]
pub(crate) fn render_to_string(view: &View<'_>, width: u16, height: u16) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    view.render(area, &mut buffer);

    (0..height)
        .map(|y| {
            (0..width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
