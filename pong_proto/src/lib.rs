//! Wire types at the boundary of the Pong client core
//!
//! Uses postcard for efficient binary serialization. The core itself never
//! performs I/O; the transport encodes/decodes these and hands snapshots to
//! the simulation.

use std::collections::BTreeMap;

use postcard::{from_bytes, to_allocvec};
use serde::{Deserialize, Serialize};

/// Ball position in normalized court coordinates ([0,1] x [0,1]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallPos {
    pub x: f32,
    pub y: f32,
}

/// Paddle position in normalized court coordinates. The `x` coordinate
/// doubles as the side discriminator (`x < 0.5` means left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddlePos {
    pub x: f32,
    pub y: f32,
}

/// Authoritative state snapshot pushed by the server.
///
/// Every field is optional: partial snapshots are valid, and a client only
/// applies the fields present. Paddles and scores are keyed by opaque player
/// ids assigned by the server; a client maps an id to a side by the paddle's
/// `x` coordinate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerSnapshot {
    pub ball: Option<BallPos>,
    pub paddles: Option<BTreeMap<String, PaddlePos>>,
    pub scores: Option<BTreeMap<String, u32>>,
}

// ============================================================================
// C2S Messages (Client to Server)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum C2S {
    /// Paddle movement: -1 = up, 1 = down.
    /// seq: client-side sequence number, echoed for ordering diagnostics.
    Input { dir: i8, seq: u32 },
}

// ============================================================================
// S2C Messages (Server to Client)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum S2C {
    /// Authoritative game state snapshot.
    Snapshot(ServerSnapshot),

    /// Match ended.
    GameOver {
        winner: u8, // 0 = left, 1 = right
    },
}

// ============================================================================
// Serialization Helpers
// ============================================================================

impl C2S {
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        to_allocvec(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        from_bytes(bytes)
    }
}

impl S2C {
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        to_allocvec(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        from_bytes(bytes)
    }
}
