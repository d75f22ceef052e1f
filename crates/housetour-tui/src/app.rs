//! App state, input handling, event draining.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use tokio::sync::broadcast;

use housetour_core::discovery::ImageDirectory;
use housetour_core::events::TourEvent;
use housetour_core::input::HitTest;
use housetour_core::tour::Tour;
use housetour_core::types::*;

/// How many moves the log keeps.
const MAX_MOVES: usize = 200;

/// The main application state.
pub struct App {
    pub tour: Tour,
    pub images: ImageDirectory,
    pub moves: Vec<MoveData>,
    pub scroll_offset: usize,
    pub should_quit: bool,
    events: broadcast::Receiver<TourEvent>,
}

impl App {
    pub fn new(tour: Tour, images: ImageDirectory) -> Self {
        let events = tour.subscribe();
        App {
            tour,
            images,
            moves: Vec::new(),
            scroll_offset: 0,
            should_quit: false,
            events,
        }
    }

    pub fn view(&self) -> ViewData {
        self.tour.view()
    }

    /// File name of the photo currently on screen.
    pub fn photo_name(&self, view: &ViewData) -> Option<String> {
        view.slot
            .map(|slot| self.images.file_name(&view.location, slot))
    }

    /// Pull everything the tour broadcast since the last frame.
    pub fn drain_events(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(TourEvent::Moved(data)) => {
                    self.moves.push(data);
                    if self.moves.len() > MAX_MOVES {
                        self.moves.remove(0);
                    }
                    // Auto-scroll to bottom
                    self.scroll_offset = 0;
                }
                Ok(TourEvent::View(_)) => {}
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }
    }

    /// Feed a key event into the held-key set. Repeats are dropped so a
    /// held key fires once.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let Some(id) = key_id(key.code) else {
            return;
        };
        match key.kind {
            KeyEventKind::Press => self.tour.press(&id),
            KeyEventKind::Release => self.tour.release(&id),
            KeyEventKind::Repeat => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, compass: &dyn HitTest) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.tour
                    .pointer_down_on(compass, mouse.column as f32, mouse.row as f32);
            }
            MouseEventKind::Up(MouseButton::Left) => self.tour.pointer_up(),
            MouseEventKind::ScrollUp => self.scroll_up(),
            MouseEventKind::ScrollDown => self.scroll_down(),
            _ => {}
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self
            .scroll_offset
            .saturating_add(3)
            .min(self.moves.len().saturating_sub(1));
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(3);
    }
}

/// Terminal key to the identifier the key bindings use.
pub fn key_id(code: KeyCode) -> Option<String> {
    match code {
        KeyCode::Char(c) => Some(c.to_lowercase().to_string()),
        KeyCode::Left => Some("arrowleft".into()),
        KeyCode::Right => Some("arrowright".into()),
        KeyCode::Up => Some("arrowup".into()),
        KeyCode::Down => Some("arrowdown".into()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};
    use housetour_core::config::Config;
    use housetour_core::graph::LocationGraph;
    use std::collections::BTreeMap;

    fn app() -> App {
        let config = Config::default();
        let slots: BTreeMap<String, usize> = config
            .house
            .keys()
            .map(|name| (name.clone(), 4))
            .collect();
        let graph = LocationGraph::from_config(&config, &slots).unwrap();
        App::new(Tour::new(graph, &config), ImageDirectory::new("Images", "jpg"))
    }

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_key_ids() {
        assert_eq!(key_id(KeyCode::Char('W')).as_deref(), Some("w"));
        assert_eq!(key_id(KeyCode::Left).as_deref(), Some("arrowleft"));
        assert_eq!(key_id(KeyCode::Enter), None);
    }

    #[test]
    fn test_press_then_tick_moves_and_logs() {
        let mut app = app();
        app.handle_key(key(KeyCode::Up, KeyEventKind::Press));
        app.tour.tick();
        app.drain_events();

        assert_eq!(app.view().location, "kitchen");
        assert_eq!(app.moves.len(), 1);
        assert_eq!(app.moves[0].from, "livingRoom");
        assert_eq!(app.photo_name(&app.view()).as_deref(), Some("kitchen1.jpg"));
    }

    #[test]
    fn test_repeat_is_ignored() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('d'), KeyEventKind::Press));
        app.tour.tick();
        app.handle_key(key(KeyCode::Char('d'), KeyEventKind::Repeat));
        app.tour.tick();
        assert_eq!(app.view().direction, Some(1));
    }
}
