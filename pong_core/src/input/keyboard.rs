use std::collections::HashSet;

use super::Controller;
use crate::state::{GameState, MoveDir};

/// Key identifiers bound to one paddle. Multiple aliases may map to the same
/// direction (e.g. both `ArrowUp` and `w`).
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub up: Vec<String>,
    pub down: Vec<String>,
}

impl KeyBindings {
    fn keys(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|k| k.to_string()).collect()
    }

    /// Arrow keys, the right-side paddle in local two-player games.
    pub fn arrows() -> Self {
        Self {
            up: Self::keys(&["ArrowUp"]),
            down: Self::keys(&["ArrowDown"]),
        }
    }

    /// W/S, the left-side paddle in local two-player games.
    pub fn wasd() -> Self {
        Self {
            up: Self::keys(&["w", "W"]),
            down: Self::keys(&["s", "S"]),
        }
    }

    /// Arrows and W/S as aliases, for single-human modes.
    pub fn combined() -> Self {
        Self {
            up: Self::keys(&["ArrowUp", "w", "W"]),
            down: Self::keys(&["ArrowDown", "s", "S"]),
        }
    }
}

/// Keyboard-driven local control. The embedding driver feeds key-down/key-up
/// events; unbound keys are ignored.
pub struct KeyboardController {
    bindings: KeyBindings,
    pressed: HashSet<String>,
    enabled: bool,
}

impl KeyboardController {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            pressed: HashSet::new(),
            enabled: true,
        }
    }

    fn is_bound(&self, key: &str) -> bool {
        self.bindings.up.iter().any(|k| k == key) || self.bindings.down.iter().any(|k| k == key)
    }

    /// Record a key-down event.
    pub fn press(&mut self, key: &str) {
        if self.is_bound(key) {
            self.pressed.insert(key.to_string());
        }
    }

    /// Record a key-up event.
    pub fn release(&mut self, key: &str) {
        self.pressed.remove(key);
    }
}

impl Controller for KeyboardController {
    fn movement(&mut self, _state: &GameState) -> Option<MoveDir> {
        if !self.enabled {
            return None;
        }
        if self.bindings.up.iter().any(|k| self.pressed.contains(k)) {
            Some(MoveDir::Up)
        } else if self.bindings.down.iter().any(|k| self.pressed.contains(k)) {
            Some(MoveDir::Down)
        } else {
            None
        }
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn destroy(&mut self) {
        self.pressed.clear();
        self.enabled = false;
    }
}
