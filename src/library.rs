//! Library module: the user's persisted favorites.
//!
//! The library is a write-through store: every toggle rewrites the whole set
//! under one storage key. There is no explicit save action.

mod store;

pub use store::*;

#[cfg(test)]
mod tests;
