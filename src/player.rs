//! Playback controller: the state machine between the track lists and the
//! single audio device.
//!
//! States are `Idle` (nothing selected), `Paused` and `Playing`. Selection
//! captures a snapshot of the list it came from; next/previous wrap around
//! inside that snapshot even if the live list changes afterwards.

mod controller;
mod session;

pub use controller::*;
pub use session::*;
