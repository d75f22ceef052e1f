//! The current photo: file name plus a strip of the location's slots.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use housetour_core::types::{LocationKind, ViewData};

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App, view: &ViewData, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", view.location))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();

    match app.photo_name(view) {
        Some(name) => {
            let path = app.images.root().join(&name);
            let style = if path.is_file() {
                Style::default().fg(Color::White).bold()
            } else {
                Style::default().fg(Color::Red)
            };
            lines.push(Line::styled(name, style));
            lines.push(Line::styled(
                path.display().to_string(),
                Style::default().fg(Color::DarkGray),
            ));
        }
        None => lines.push(Line::styled(
            "(no photo)",
            Style::default().fg(Color::DarkGray),
        )),
    }
    lines.push(Line::raw(""));
    lines.push(slot_strip(view));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

/// One marker per slot, the visible one highlighted. Turnables wrap around
/// so they read as a ring; paths read as steps.
fn slot_strip(view: &ViewData) -> Line<'static> {
    let (on, off, sep) = match view.kind {
        LocationKind::Turnable => ("●", "○", " "),
        LocationKind::Path => ("■", "□", "─"),
    };

    let mut spans = Vec::with_capacity(view.slot_count * 2);
    for i in 0..view.slot_count {
        if i > 0 {
            spans.push(Span::styled(sep, Style::default().fg(Color::DarkGray)));
        }
        if Some(i) == view.slot {
            spans.push(Span::styled(on, Style::default().fg(Color::Yellow).bold()));
        } else {
            spans.push(Span::styled(off, Style::default().fg(Color::DarkGray)));
        }
    }
    if view.kind == LocationKind::Turnable {
        spans.push(Span::styled(" ↺", Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans)
}
