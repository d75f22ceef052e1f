//! Core types — Command, LocationKind, Affordances, ViewData, MoveData.

use serde::{Deserialize, Serialize};

// ── Commands ──

/// The whole input vocabulary the transition engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    TurnLeft,
    TurnRight,
    Advance,
    Retreat,
}

impl Command {
    /// Mapper priority order: the first held match wins.
    pub const PRIORITY: [Command; 4] = [
        Command::TurnLeft,
        Command::TurnRight,
        Command::Advance,
        Command::Retreat,
    ];
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::TurnLeft => write!(f, "turn_left"),
            Command::TurnRight => write!(f, "turn_right"),
            Command::Advance => write!(f, "advance"),
            Command::Retreat => write!(f, "retreat"),
        }
    }
}

// ── Location variant tag ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    Turnable,
    Path,
}

impl std::fmt::Display for LocationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationKind::Turnable => write!(f, "turnable"),
            LocationKind::Path => write!(f, "path"),
        }
    }
}

// ── Outbound view (read by renderers every tick) ──

/// Which navigation arrows are currently legal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affordances {
    pub left: bool,
    pub right: bool,
    pub forward: bool,
    pub back: bool,
}

impl Affordances {
    pub fn allows(&self, command: Command) -> bool {
        match command {
            Command::TurnLeft => self.left,
            Command::TurnRight => self.right,
            Command::Advance => self.forward,
            Command::Retreat => self.back,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewData {
    pub location: String,
    pub kind: LocationKind,
    /// Set at a turnable location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<usize>,
    /// Set on a path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_position: Option<usize>,
    pub slot_count: usize,
    /// Index of the photo to show; `None` when the slot has no photo.
    pub slot: Option<usize>,
    pub affordances: Affordances,
    pub history_depth: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveData {
    pub from: String,
    pub to: String,
    pub command: Command,
    pub timestamp: String,
}
