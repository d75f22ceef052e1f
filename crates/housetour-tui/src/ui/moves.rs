//! Scrollable log of location changes.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use housetour_core::types::Command;

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Moves ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.moves.is_empty() {
        let empty = Paragraph::new("Nowhere yet...")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    // Bottom-up with scroll offset
    let visible_height = inner.height as usize;
    let total = app.moves.len();
    let end = total.saturating_sub(app.scroll_offset);
    let start = end.saturating_sub(visible_height);

    let lines: Vec<Line> = app.moves[start..end]
        .iter()
        .map(|m| {
            let (fg, prefix) = match m.command {
                Command::Retreat => (Color::Magenta, "< "),
                _ => (Color::Green, "> "),
            };
            // Keep only the HH:MM:SS part of the timestamp
            let time = m.timestamp.get(11..19).unwrap_or(&m.timestamp);
            Line::from(vec![
                Span::styled(format!("{} ", time), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{}{} → {}", prefix, m.from, m.to), Style::default().fg(fg)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}
