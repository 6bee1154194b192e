use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget, Wrap},
};

use crate::results::{GameRecord, ResultSummary};

fn difficulty_color(label: &str) -> Color {
    match label {
        "FÁCIL" => Color::Green,
        "MÉDIO" => Color::Yellow,
        "DIFÍCIL" => Color::Red,
        _ => Color::White,
    }
}

/// Pure presenter for one saved result
pub fn present_row(record: &GameRecord) -> Row<'static> {
    let played = record
        .played_at
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());

    Row::new(vec![
        Cell::from(record.word.clone()).style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(record.attempts.to_string()),
        Cell::from(record.difficulty.clone())
            .style(Style::default().fg(difficulty_color(&record.difficulty))),
        Cell::from(played),
    ])
}

fn summary_lines(summary: &ResultSummary) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(format!(
        "Games won: {}   Total games: {}",
        summary.wins, summary.total
    ))];

    if let (Some(mean), Some(sd)) = (summary.mean_attempts, summary.std_dev_attempts) {
        lines.push(Line::from(format!(
            "Average attempts per win: {mean:.2}   sd {sd:.2}"
        )));
    }

    if !summary.distribution.is_empty() {
        let spans: Vec<Span> = summary
            .distribution
            .iter()
            .map(|(attempts, games)| Span::raw(format!("{attempts}: {games}   ")))
            .collect();
        let mut line = vec![Span::styled("Distribution  ", super::bold())];
        line.extend(spans);
        lines.push(Line::from(line));
    }
    lines
}

/// Render the saved results screen. `scroll` is clamped to what fits.
pub fn render_results(
    records: &[GameRecord],
    summary: &ResultSummary,
    scroll: usize,
    area: Rect,
    buf: &mut Buffer,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(0),    // Table
            Constraint::Length(5), // Summary
            Constraint::Length(1), // Instructions
        ])
        .split(area);

    Paragraph::new("Saved results")
        .block(Block::default().borders(Borders::ALL).title("Results"))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    if records.is_empty() {
        Paragraph::new("No results saved yet. Win a game and save it to see it here.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true })
            .render(chunks[1], buf);
    } else {
        let table_height = chunks[1].height.saturating_sub(3) as usize; // borders + header
        let total_rows = records.len();
        let scroll = scroll.min(total_rows.saturating_sub(table_height));

        let header = Row::new(vec![
            Cell::from("Word"),
            Cell::from("Attempts"),
            Cell::from("Difficulty"),
            Cell::from("Played"),
        ])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

        let visible_rows: Vec<Row> = records
            .iter()
            .skip(scroll)
            .take(table_height)
            .map(present_row)
            .collect();

        let scroll_info = if total_rows > table_height {
            format!(
                " ({}/{} rows)",
                scroll + visible_rows.len(),
                total_rows
            )
        } else {
            String::new()
        };

        let widths = [
            Constraint::Length(8),  // Word
            Constraint::Length(10), // Attempts
            Constraint::Length(12), // Difficulty
            Constraint::Min(16),    // Played
        ];

        Widget::render(
            Table::new(visible_rows, widths)
                .header(header)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!("Games{scroll_info}")),
                )
                .column_spacing(2),
            chunks[1],
            buf,
        );
    }

    Paragraph::new(summary_lines(summary))
        .block(Block::default().borders(Borders::ALL).title("Summary"))
        .render(chunks[2], buf);

    Paragraph::new(Span::styled(
        "(↑/↓) scroll  any other key: back to the menu",
        super::hint_style(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);
}
