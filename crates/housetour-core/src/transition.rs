//! Transition engine — (state, command) -> state.
//!
//! Every rule is total: a move with no exit, no history or a dead-end path
//! returns the state unchanged. Turnable locations and paths share the same
//! four commands; only this module branches on which one the visitor is
//! standing in.
//!
//! `affordances` and `view` are derived from the state on every call and
//! are never stored, so they cannot go stale after a retreat.

use crate::graph::{Location, LocationGraph};
use crate::state::{NavigationState, Snapshot};
use crate::types::{Affordances, Command, LocationKind, ViewData};

/// Apply one command, returning the next state.
pub fn apply_command(
    state: &NavigationState,
    graph: &LocationGraph,
    command: Command,
) -> NavigationState {
    let mut next = state.clone();
    let Some(location) = graph.get(&state.current_location) else {
        return next;
    };

    match location {
        Location::Turnable { exits, .. } => {
            let count = exits.len();
            match command {
                Command::TurnLeft => {
                    next.current_direction = (state.current_direction % count + count - 1) % count;
                }
                Command::TurnRight => {
                    next.current_direction = (state.current_direction % count + 1) % count;
                }
                Command::Advance => {
                    if let Some(destination) = location.exit(state.current_direction) {
                        let snapshot = Snapshot {
                            location: state.current_location.clone(),
                            direction: state.current_direction,
                            path_position: 0,
                            is_path: false,
                        };
                        enter(&mut next, graph, destination, snapshot);
                    }
                }
                Command::Retreat => restore(&mut next, graph),
            }
        }
        Location::Path {
            slots,
            ending_pointer,
        } => match command {
            Command::TurnLeft | Command::TurnRight => {}
            Command::Advance => {
                if state.current_path_position + 1 < *slots {
                    next.current_path_position += 1;
                } else if let Some(destination) = ending_pointer {
                    let snapshot = Snapshot {
                        location: state.current_location.clone(),
                        direction: state.current_direction,
                        path_position: state.current_path_position,
                        is_path: true,
                    };
                    enter(&mut next, graph, destination, snapshot);
                }
            }
            Command::Retreat => {
                if state.current_path_position > 0 {
                    next.current_path_position -= 1;
                } else {
                    restore(&mut next, graph);
                }
            }
        },
    }

    next
}

fn enter(state: &mut NavigationState, graph: &LocationGraph, destination: &str, from: Snapshot) {
    state.history.push(from);
    state.current_location = destination.to_string();
    match graph.get(destination) {
        // Not clamped: a default beyond the discovered photos is kept as is.
        Some(Location::Turnable {
            default_direction, ..
        }) => state.current_direction = *default_direction,
        Some(Location::Path { .. }) => state.current_path_position = 0,
        None => {}
    }
}

fn restore(state: &mut NavigationState, graph: &LocationGraph) {
    let Some(snapshot) = state.history.pop() else {
        return;
    };

    if snapshot.is_path {
        state.current_path_position = snapshot.path_position;
        state.current_direction = 0;
    } else {
        // The target may have fewer photos than when the snapshot was taken.
        let last = graph
            .get(&snapshot.location)
            .map(|location| location.slot_count().saturating_sub(1))
            .unwrap_or(snapshot.direction);
        state.current_direction = snapshot.direction.min(last);
    }
    state.current_location = snapshot.location;
}

/// Which arrows are legal right now.
pub fn affordances(state: &NavigationState, graph: &LocationGraph) -> Affordances {
    let Some(location) = graph.get(&state.current_location) else {
        return Affordances::default();
    };
    let has_history = !state.history.is_empty();

    match location {
        Location::Turnable { exits, .. } => Affordances {
            left: exits.len() >= 2,
            right: exits.len() >= 2,
            forward: location.exit(state.current_direction).is_some(),
            back: has_history,
        },
        Location::Path {
            slots,
            ending_pointer,
        } => Affordances {
            left: false,
            right: false,
            forward: state.current_path_position + 1 < *slots || ending_pointer.is_some(),
            back: state.current_path_position > 0 || has_history,
        },
    }
}

/// Everything a renderer needs for one frame.
pub fn view(state: &NavigationState, graph: &LocationGraph) -> ViewData {
    let location = graph.get(&state.current_location);
    let kind = location
        .map(Location::kind)
        .unwrap_or(LocationKind::Turnable);
    let slot_count = location.map(Location::slot_count).unwrap_or(0);

    let (direction, path_position, index) = match location {
        Some(Location::Path { .. }) => (
            None,
            Some(state.current_path_position),
            state.current_path_position,
        ),
        _ => (Some(state.current_direction), None, state.current_direction),
    };

    ViewData {
        location: state.current_location.clone(),
        kind,
        direction,
        path_position,
        slot_count,
        slot: (index < slot_count).then_some(index),
        affordances: affordances(state, graph),
        history_depth: state.history_depth(),
    }
}
