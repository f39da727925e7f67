use pong_proto::ServerSnapshot;

use super::Controller;
use crate::params::Params;
use crate::state::{GameState, MoveDir};

/// Remote-player proxy for online mode.
///
/// Outbound: edge-triggered movement sends with a fixed resend cadence while
/// a direction is held. Inbound: a single-slot, last-write-wins snapshot
/// mailbox with a freshness flag. The controller performs no I/O itself; the
/// manager passes the transport's send hook into each outbound call, and the
/// transport pushes snapshots in via `set_server_state`.
pub struct NetworkController {
    enabled: bool,
    held: Option<MoveDir>,
    resend_timer_ms: Option<f32>,
    snapshot: Option<ServerSnapshot>,
    fresh: bool,
    remote_movement: Option<MoveDir>,
}

impl NetworkController {
    pub fn new() -> Self {
        Self {
            enabled: true,
            held: None,
            resend_timer_ms: None,
            snapshot: None,
            fresh: false,
            remote_movement: None,
        }
    }

    /// Edge-triggered outbound movement. Repeats of the held direction are
    /// no-ops; a change cancels any pending resend, sends the new direction
    /// immediately (if any) and arms the resend countdown.
    pub fn send_movement(&mut self, dir: Option<MoveDir>, send: &mut dyn FnMut(MoveDir)) {
        if dir == self.held {
            return;
        }
        self.resend_timer_ms = None;
        self.held = dir;
        if let Some(d) = dir {
            send(d);
            self.resend_timer_ms = Some(Params::RESEND_INTERVAL_MS);
        }
    }

    /// Advance the resend countdown by wall-clock milliseconds, re-sending
    /// the held direction on each cadence boundary crossed.
    pub fn advance(&mut self, elapsed_ms: f32, send: &mut dyn FnMut(MoveDir)) {
        let Some(dir) = self.held else { return };
        let Some(timer) = self.resend_timer_ms.as_mut() else {
            return;
        };
        *timer -= elapsed_ms;
        while *timer <= 0.0 {
            send(dir);
            *timer += Params::RESEND_INTERVAL_MS;
        }
    }

    /// Overwrite the retained snapshot. Last write wins: unread intermediates
    /// are dropped by design, so a slow consumer never processes stale state.
    pub fn set_server_state(&mut self, snapshot: ServerSnapshot) {
        self.snapshot = Some(snapshot);
        self.fresh = true;
    }

    /// Whether a snapshot arrived since the last consumption. Does not clear
    /// the flag.
    pub fn has_new_state(&self) -> bool {
        self.fresh
    }

    /// The retained snapshot, fresh or not.
    pub fn snapshot(&self) -> Option<&ServerSnapshot> {
        self.snapshot.as_ref()
    }

    /// Mark the retained snapshot consumed.
    pub fn mark_consumed(&mut self) {
        self.fresh = false;
    }

    /// Take a copy of the retained snapshot if it is fresh, marking it
    /// consumed.
    pub fn take_fresh(&mut self) -> Option<ServerSnapshot> {
        if !self.fresh {
            return None;
        }
        self.fresh = false;
        self.snapshot.clone()
    }

    /// Drop the retained snapshot and freshness flag (used on reset).
    pub fn clear_snapshot(&mut self) {
        self.snapshot = None;
        self.fresh = false;
    }

    /// Record the most recent movement reported for the remote player.
    pub fn set_remote_movement(&mut self, dir: Option<MoveDir>) {
        self.remote_movement = dir;
    }
}

impl Default for NetworkController {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for NetworkController {
    /// The last movement value received for the remote player. Kept for
    /// capability-shape compatibility; online state updates flow through the
    /// snapshot mailbox, not through this.
    fn movement(&mut self, _state: &GameState) -> Option<MoveDir> {
        if !self.enabled {
            return None;
        }
        self.remote_movement
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn destroy(&mut self) {
        self.held = None;
        self.resend_timer_ms = None;
        self.snapshot = None;
        self.fresh = false;
        self.remote_movement = None;
        self.enabled = false;
    }
}
