//! Client-side Pong simulation core.
//!
//! The court is the unit square, with `(0, 0)` top-left. A [`GameManager`]
//! owns the game state and two input controllers, advances the simulation in
//! nominal 60 Hz frames offline, and reconciles against authoritative server
//! snapshots online. It performs no I/O: keyboard events, server snapshots
//! and outbound movement all cross through the embedding driver.

pub mod config;
pub mod input;
pub mod manager;
pub mod params;
pub mod physics;
pub mod state;

pub use config::*;
pub use input::*;
pub use manager::*;
pub use params::*;
pub use state::*;
