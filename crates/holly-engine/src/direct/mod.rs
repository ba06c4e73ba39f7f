//! The direct render path.
//!
//! Responsibilities:
//! - own the double-buffered, alignment-validated staging memory
//! - expose the low-latency write/submit surface (`Direct`)
//! - enforce the flush-before-header visibility discipline
//!
//! This is the alternate, lower-level entry into the same per-frame
//! pipeline as the scene/list API, for callers that cannot afford per-call
//! overhead. The two paths share the device and the readiness gate; a
//! direct frame and a scene never overlap.

mod buffer;
mod view;

pub use buffer::{DirectBuffer, DirectCapacity};
pub use view::Direct;
