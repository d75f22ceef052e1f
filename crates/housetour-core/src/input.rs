//! Input command mapper — held keys and pointer presses to commands.
//!
//! Input callbacks only ever touch `HeldInputs`. Once per tick the mapper
//! picks at most one command in priority order (left, right, forward, back)
//! and clears the key that produced it, so holding a key fires once. Pointer
//! presses are hit-tested against the on-screen arrows and injected as the
//! arrow's key on the released-to-pressed edge only.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::Command;

/// Key identifiers are compared lowercase, like `KeyboardEvent.key`.
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase()
}

// ── Key bindings ──

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "default_turn_left")]
    pub turn_left: Vec<String>,
    #[serde(default = "default_turn_right")]
    pub turn_right: Vec<String>,
    #[serde(default = "default_advance")]
    pub advance: Vec<String>,
    #[serde(default = "default_retreat")]
    pub retreat: Vec<String>,
}

fn default_turn_left() -> Vec<String> {
    vec!["a".into(), "arrowleft".into()]
}
fn default_turn_right() -> Vec<String> {
    vec!["d".into(), "arrowright".into()]
}
fn default_advance() -> Vec<String> {
    vec!["w".into(), "arrowup".into()]
}
fn default_retreat() -> Vec<String> {
    vec!["s".into(), "arrowdown".into()]
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            turn_left: default_turn_left(),
            turn_right: default_turn_right(),
            advance: default_advance(),
            retreat: default_retreat(),
        }
    }
}

impl KeyBindings {
    pub fn keys_for(&self, command: Command) -> &[String] {
        match command {
            Command::TurnLeft => &self.turn_left,
            Command::TurnRight => &self.turn_right,
            Command::Advance => &self.advance,
            Command::Retreat => &self.retreat,
        }
    }

    /// First key bound to `command`; what a pointer press injects.
    pub fn primary_key(&self, command: Command) -> Option<&str> {
        self.keys_for(command).first().map(String::as_str)
    }

    pub fn command_for(&self, key: &str) -> Option<Command> {
        let key = normalize_key(key);
        Command::PRIORITY
            .into_iter()
            .find(|&command| {
                self.keys_for(command)
                    .iter()
                    .any(|k| normalize_key(k) == key)
            })
    }

    fn normalized(&self) -> Self {
        let norm = |keys: &[String]| -> Vec<String> {
            keys.iter().map(|k| normalize_key(k)).collect()
        };
        Self {
            turn_left: norm(&self.turn_left),
            turn_right: norm(&self.turn_right),
            advance: norm(&self.advance),
            retreat: norm(&self.retreat),
        }
    }
}

// ── Held inputs ──

/// Keys currently held down, as reported by the input-capture side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldInputs {
    keys: HashSet<String>,
}

impl HeldInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: &str) {
        self.keys.insert(normalize_key(key));
    }

    pub fn release(&mut self, key: &str) {
        self.keys.remove(&normalize_key(key));
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.keys.contains(&normalize_key(key))
    }

    /// Clear `key` if held, reporting whether it was.
    pub fn take(&mut self, key: &str) -> bool {
        self.keys.remove(&normalize_key(key))
    }
}

// ── Mapper ──

#[derive(Debug, Clone)]
pub struct InputMapper {
    bindings: KeyBindings,
}

impl InputMapper {
    pub fn new(bindings: &KeyBindings) -> Self {
        Self {
            bindings: bindings.normalized(),
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// At most one command per call. The key that produced it is cleared.
    pub fn next_command(&self, held: &mut HeldInputs) -> Option<Command> {
        for command in Command::PRIORITY {
            for key in self.bindings.keys_for(command) {
                if held.take(key) {
                    return Some(command);
                }
            }
        }
        None
    }

    /// Hold the primary key for `command`, as if it had just been pressed.
    pub fn inject(&self, held: &mut HeldInputs, command: Command) {
        if let Some(key) = self.bindings.primary_key(command) {
            held.press(key);
        }
    }
}

impl Default for InputMapper {
    fn default() -> Self {
        Self::new(&KeyBindings::default())
    }
}

// ── Pointer ──

/// Maps a press position to the arrow under it.
pub trait HitTest {
    fn hit(&self, x: f32, y: f32) -> Option<Command>;
}

/// The four arrows drawn at the bottom centre of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrowLayout {
    pub center_x: f32,
    pub base_y: f32,
    pub spacing: f32,
    pub radius: f32,
}

impl ArrowLayout {
    const BOTTOM_MARGIN: f32 = 50.0;
    const SPACING: f32 = 40.0;
    const RADIUS: f32 = 20.0;

    pub fn for_canvas(width: u32, height: u32) -> Self {
        Self {
            center_x: width as f32 * 0.5,
            base_y: height as f32 - Self::BOTTOM_MARGIN,
            spacing: Self::SPACING,
            radius: Self::RADIUS,
        }
    }

    /// Centre of the arrow for `command`.
    pub fn position(&self, command: Command) -> (f32, f32) {
        let (bx, by, sp) = (self.center_x, self.base_y, self.spacing);
        match command {
            Command::TurnLeft => (bx - sp, by),
            Command::TurnRight => (bx + sp, by),
            Command::Advance => (bx, by - sp),
            Command::Retreat => (bx, by + sp),
        }
    }

    /// Rotation in radians of the arrow, an upward triangle at 0.
    pub fn rotation(command: Command) -> f32 {
        use std::f32::consts::{FRAC_PI_2, PI};
        match command {
            Command::TurnLeft => -FRAC_PI_2,
            Command::TurnRight => FRAC_PI_2,
            Command::Advance => 0.0,
            Command::Retreat => PI,
        }
    }
}

impl HitTest for ArrowLayout {
    fn hit(&self, x: f32, y: f32) -> Option<Command> {
        let radius_sq = self.radius * self.radius;
        Command::PRIORITY
            .into_iter()
            .map(|command| {
                let (ax, ay) = self.position(command);
                (command, (x - ax).powi(2) + (y - ay).powi(2))
            })
            .filter(|(_, dist_sq)| *dist_sq <= radius_sq)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(command, _)| command)
    }
}

/// Tracks press state so a held pointer injects only once.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerTracker {
    pressed: bool,
}

impl PointerTracker {
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Returns the arrow hit on a released-to-pressed transition.
    pub fn press(&mut self, hit_test: &dyn HitTest, x: f32, y: f32) -> Option<Command> {
        if self.pressed {
            return None;
        }
        self.pressed = true;
        hit_test.hit(x, y)
    }

    pub fn release(&mut self) {
        self.pressed = false;
    }
}
