//! Key hint bar.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use housetour_core::types::Command;

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Keys (Esc to quit) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let bindings = app.tour.bindings();
    let mut spans = Vec::new();
    for command in Command::PRIORITY {
        let key = bindings.primary_key(command).unwrap_or("-");
        spans.push(Span::styled(
            format!(" {} ", key),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ));
        spans.push(Span::raw(format!(" {}  ", command)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}
