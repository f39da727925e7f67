//! Input controllers: local keyboard, difficulty-parametrized AI, and the
//! network-fed remote proxy. All three share one capability and are selected
//! by the game mode.

mod ai;
mod keyboard;
mod network;

pub use ai::{AiController, AiParams, Difficulty};
pub use keyboard::{KeyBindings, KeyboardController};
pub use network::NetworkController;

use crate::state::{GameState, MoveDir};

/// Shared capability of every input variant.
pub trait Controller {
    /// Sample the controller's current movement. Disabled controllers always
    /// report no movement.
    fn movement(&mut self, state: &GameState) -> Option<MoveDir>;

    fn set_enabled(&mut self, enabled: bool);

    /// Tear down held resources (pressed keys, timers, buffered snapshots).
    /// Safe to call more than once.
    fn destroy(&mut self);
}

/// Closed set of controller variants, one per game mode role.
pub enum PlayerController {
    Keyboard(KeyboardController),
    Ai(AiController),
    Network(NetworkController),
}

impl PlayerController {
    pub fn is_ai(&self) -> bool {
        matches!(self, PlayerController::Ai(_))
    }

    pub fn as_keyboard_mut(&mut self) -> Option<&mut KeyboardController> {
        match self {
            PlayerController::Keyboard(kb) => Some(kb),
            _ => None,
        }
    }

    pub fn as_network_mut(&mut self) -> Option<&mut NetworkController> {
        match self {
            PlayerController::Network(net) => Some(net),
            _ => None,
        }
    }
}

impl Controller for PlayerController {
    fn movement(&mut self, state: &GameState) -> Option<MoveDir> {
        match self {
            PlayerController::Keyboard(c) => c.movement(state),
            PlayerController::Ai(c) => c.movement(state),
            PlayerController::Network(c) => c.movement(state),
        }
    }

    fn set_enabled(&mut self, enabled: bool) {
        match self {
            PlayerController::Keyboard(c) => c.set_enabled(enabled),
            PlayerController::Ai(c) => c.set_enabled(enabled),
            PlayerController::Network(c) => c.set_enabled(enabled),
        }
    }

    fn destroy(&mut self) {
        match self {
            PlayerController::Keyboard(c) => c.destroy(),
            PlayerController::Ai(c) => c.destroy(),
            PlayerController::Network(c) => c.destroy(),
        }
    }
}
