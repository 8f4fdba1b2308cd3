//! Audio device abstraction and its `rodio` implementation.
//!
//! The controller drives the device through [`AudioDevice`]; the device answers
//! with [`DeviceEvent`]s tagged with the selection generation they belong to.

mod player;
mod sink;
mod thread;
mod types;

pub use player::*;
pub use types::*;

#[cfg(test)]
mod tests;
