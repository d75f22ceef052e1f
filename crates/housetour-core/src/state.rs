//! Navigation state — where the visitor stands and how to get back.

use serde::{Deserialize, Serialize};

use crate::graph::LocationGraph;

/// One history entry: enough to undo a single advance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub location: String,
    pub direction: usize,
    pub path_position: usize,
    pub is_path: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    pub current_location: String,
    /// Meaningful only at a turnable location.
    pub current_direction: usize,
    /// Meaningful only on a path.
    pub current_path_position: usize,
    pub history: Vec<Snapshot>,
}

impl NavigationState {
    /// Start at the graph's entry, facing its default direction.
    pub fn new(graph: &LocationGraph) -> Self {
        let entry = graph.entry();
        let direction = graph
            .get(entry)
            .map(|location| location.default_direction())
            .unwrap_or(0);
        Self {
            current_location: entry.to_string(),
            current_direction: direction,
            current_path_position: 0,
            history: Vec::new(),
        }
    }

    pub fn history_depth(&self) -> usize {
        self.history.len()
    }

    /// Location names from the oldest history entry to the current location.
    pub fn trail(&self) -> Vec<&str> {
        self.history
            .iter()
            .map(|snapshot| snapshot.location.as_str())
            .chain(std::iter::once(self.current_location.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures;

    #[test]
    fn test_starts_at_entry_with_default_direction() {
        let state = NavigationState::new(&fixtures::house());
        assert_eq!(state.current_location, "livingRoom");
        assert_eq!(state.current_direction, 0);
        assert_eq!(state.current_path_position, 0);
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_trail() {
        let mut state = NavigationState::new(&fixtures::house());
        assert_eq!(state.trail(), vec!["livingRoom"]);

        state.history.push(Snapshot {
            location: "livingRoom".into(),
            direction: 4,
            path_position: 0,
            is_path: false,
        });
        state.current_location = "corridor".into();
        assert_eq!(state.trail(), vec!["livingRoom", "corridor"]);
        assert_eq!(state.history_depth(), 1);
    }
}
