//! On-screen arrows. Clicking one presses it like the bound key.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders};

use housetour_core::input::HitTest;
use housetour_core::types::{Command, ViewData};

/// Columns either side of an arrow glyph that still count as a hit.
const SLACK: u16 = 1;

/// Arrow cells laid out as a cross inside the compass panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compass {
    center: (u16, u16),
}

impl Compass {
    pub fn new(area: Rect) -> Self {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        Compass {
            center: (inner.x + inner.width / 2, inner.y + inner.height / 2),
        }
    }

    /// Cell the glyph for `command` is drawn in.
    pub fn cell(&self, command: Command) -> (u16, u16) {
        let (cx, cy) = self.center;
        match command {
            Command::TurnLeft => (cx.saturating_sub(4), cy),
            Command::TurnRight => (cx + 4, cy),
            Command::Advance => (cx, cy.saturating_sub(1)),
            Command::Retreat => (cx, cy + 1),
        }
    }

    fn glyph(command: Command) -> &'static str {
        match command {
            Command::TurnLeft => "◀",
            Command::TurnRight => "▶",
            Command::Advance => "▲",
            Command::Retreat => "▼",
        }
    }
}

impl HitTest for Compass {
    fn hit(&self, x: f32, y: f32) -> Option<Command> {
        let (col, row) = (x as u16, y as u16);
        Command::PRIORITY.into_iter().find(|command| {
            let (ax, ay) = self.cell(*command);
            row == ay && col.abs_diff(ax) <= SLACK
        })
    }
}

pub fn draw(frame: &mut Frame, compass: &Compass, view: &ViewData, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(block, area);

    for command in Command::PRIORITY {
        let (x, y) = compass.cell(command);
        if !area.contains(Position::new(x, y)) {
            continue;
        }
        // Dim arrows the visitor can't use right now
        let style = if view.affordances.allows(command) {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        frame
            .buffer_mut()
            .set_string(x, y, Compass::glyph(command), style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compass() -> Compass {
        Compass::new(Rect::new(0, 20, 30, 5))
    }

    #[test]
    fn test_arrows_form_a_cross() {
        let compass = compass();
        // inner is (1, 21, 28, 3), centre (15, 22)
        assert_eq!(compass.cell(Command::Advance), (15, 21));
        assert_eq!(compass.cell(Command::Retreat), (15, 23));
        assert_eq!(compass.cell(Command::TurnLeft), (11, 22));
        assert_eq!(compass.cell(Command::TurnRight), (19, 22));
    }

    #[test]
    fn test_hit_on_and_beside_glyph() {
        let compass = compass();
        assert_eq!(compass.hit(15.0, 21.0), Some(Command::Advance));
        assert_eq!(compass.hit(16.0, 23.0), Some(Command::Retreat));
        assert_eq!(compass.hit(10.0, 22.0), Some(Command::TurnLeft));
        assert_eq!(compass.hit(19.0, 22.0), Some(Command::TurnRight));
    }

    #[test]
    fn test_miss() {
        let compass = compass();
        assert_eq!(compass.hit(15.0, 22.0), None);
        assert_eq!(compass.hit(2.0, 2.0), None);
    }
}
