//! Settings for the player: where the catalog and songs live, where favorites
//! are persisted, logging, audio timing and key behavior.
//!
//! Loading layers environment variables over an optional TOML file over the
//! struct defaults.

mod load;
mod schema;

pub use schema::*;
