//! TUI layout compositing — assembles all UI panels.

mod compass;
mod help;
mod moves;
mod photo;
mod status;
mod trail;

pub use compass::Compass;

use ratatui::prelude::*;

use crate::app::App;

/// Where each panel goes for a given terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panes {
    pub trail: Rect,
    pub photo: Rect,
    pub compass: Rect,
    pub moves: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Split the terminal into panels. Shared by drawing and mouse hit-testing
/// so both agree on where the compass sits.
pub fn layout(area: Rect) -> Panes {
    // ┌──────────────────────────────────┐
    // │ Trail (history breadcrumb)       │
    // ├──────────────────┬───────────────┤
    // │   Photo          │  Moves log    │
    // │                  │               │
    // ├──────────────────┤               │
    // │   Compass        │               │
    // ├──────────────────┴───────────────┤
    // │ Status bar                       │
    // ├──────────────────────────────────┤
    // │ Help                             │
    // └──────────────────────────────────┘

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // trail
            Constraint::Min(10),   // content
            Constraint::Length(1), // status
            Constraint::Length(3), // help
        ])
        .split(area);

    let content_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(30),    // photo + compass
            Constraint::Length(36), // moves
        ])
        .split(main_layout[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(5)])
        .split(content_layout[0]);

    Panes {
        trail: main_layout[0],
        photo: left[0],
        compass: left[1],
        moves: content_layout[1],
        status: main_layout[2],
        help: main_layout[3],
    }
}

/// Render the full TUI layout.
pub fn draw(frame: &mut Frame, app: &App) {
    let panes = layout(frame.area());
    let view = app.view();

    trail::draw(frame, app, panes.trail);
    photo::draw(frame, app, &view, panes.photo);
    compass::draw(frame, &Compass::new(panes.compass), &view, panes.compass);
    moves::draw(frame, app, panes.moves);
    status::draw(frame, &view, panes.status);
    help::draw(frame, app, panes.help);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_fits_terminal() {
        let area = Rect::new(0, 0, 100, 30);
        let panes = layout(area);
        assert_eq!(panes.trail.height, 1);
        assert_eq!(panes.help.height, 3);
        assert_eq!(panes.compass.height, 5);
        assert_eq!(panes.moves.width, 36);
        assert_eq!(panes.photo.x, 0);
        assert_eq!(panes.compass.y, panes.photo.y + panes.photo.height);
    }
}
