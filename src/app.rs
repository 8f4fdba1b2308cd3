//! Application module: the explicit view-state container used by the TUI and
//! runtime.
//!
//! The `App` model lives in `app::model` and holds the catalog, the library,
//! the displayed view, the cursor and the playback controller.

mod model;

pub use model::*;
