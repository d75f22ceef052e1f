//! TourEvent enum — broadcast from the tour controller to TUI/Web frontends.

use serde::{Deserialize, Serialize};

use crate::types::{MoveData, ViewData};

/// Events broadcast by a `Tour` to all subscribers (TUI, WebSocket clients).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum TourEvent {
    /// The frame changed (turned, stepped, moved or went back)
    #[serde(rename = "view")]
    View(ViewData),

    /// The visitor left one location for another
    #[serde(rename = "moved")]
    Moved(MoveData),
}

impl TourEvent {
    /// Serialize to the JSON format the frontend expects:
    /// `{"event": "...", "data": {...}}`
    pub fn to_ws_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Affordances, Command, LocationKind};

    #[test]
    fn test_view_event_json_shape() {
        let event = TourEvent::View(ViewData {
            location: "hall".into(),
            kind: LocationKind::Path,
            direction: None,
            path_position: Some(2),
            slot_count: 3,
            slot: Some(2),
            affordances: Affordances {
                forward: true,
                back: true,
                ..Default::default()
            },
            history_depth: 1,
        });

        let json = event.to_ws_json();
        assert_eq!(json["event"], "view");
        assert_eq!(json["data"]["location"], "hall");
        assert_eq!(json["data"]["kind"], "path");
        assert_eq!(json["data"]["path_position"], 2);
        assert!(json["data"].get("direction").is_none());
        assert_eq!(json["data"]["affordances"]["left"], false);
    }

    #[test]
    fn test_moved_event_json_shape() {
        let event = TourEvent::Moved(MoveData {
            from: "livingRoom".into(),
            to: "kitchen".into(),
            command: Command::Advance,
            timestamp: "2026-01-01T00:00:00+00:00".into(),
        });

        let json = event.to_ws_json();
        assert_eq!(json["event"], "moved");
        assert_eq!(json["data"]["command"], "advance");
        assert_eq!(json["data"]["to"], "kitchen");
    }
}
