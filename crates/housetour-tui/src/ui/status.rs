//! Status bar — shows location kind, facing, history depth.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use housetour_core::types::{LocationKind, ViewData};

pub fn draw(frame: &mut Frame, view: &ViewData, area: Rect) {
    let (kind_str, kind_color) = match view.kind {
        LocationKind::Turnable => ("room", Color::Green),
        LocationKind::Path => ("path", Color::Blue),
    };

    let position = match (view.direction, view.path_position) {
        (Some(dir), _) => format!(" facing {}/{} ", dir + 1, view.slot_count),
        (None, Some(pos)) => format!(" step {}/{} ", pos + 1, view.slot_count),
        (None, None) => " - ".to_string(),
    };

    let mut spans = vec![
        Span::styled(
            format!(" {} ", kind_str),
            Style::default().fg(Color::Black).bg(kind_color),
        ),
        Span::raw(position),
        Span::raw(format!(" history: {} ", view.history_depth)),
    ];

    if view.affordances.forward {
        spans.push(Span::styled(
            " way ahead ",
            Style::default().fg(Color::Yellow),
        ));
    }

    let status = Paragraph::new(Line::from(spans));
    frame.render_widget(status, area);
}
