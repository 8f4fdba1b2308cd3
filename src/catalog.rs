//! Catalog module: the read-only list of playable tracks.
//!
//! The catalog is read once at startup from a static JSON resource. Its order is
//! the canonical display and navigation order for the "All Songs" view.

mod load;
mod model;

pub use load::*;
pub use model::*;

#[cfg(test)]
mod tests;
