//! Scene and list lifecycle.
//!
//! Responsibilities:
//! - the per-frame state machine (`Idle → Building → ListOpen → … → Finished`)
//! - the "exactly one list open" rule and the fixed list catalog
//! - ordered submission of headers, vertices, and strips to the device
//!
//! All state lives in an explicitly owned [`Renderer`] session, so illegal
//! sequences are caught at one choke point and independent sessions can
//! coexist (one per test, for instance) without cross-contamination.

mod list;
mod prims;
mod renderer;

pub use list::{LIST_COUNT, ListKind};
pub use renderer::{Renderer, SceneState};
