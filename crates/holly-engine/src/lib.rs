//! Frame-oriented command submission for a tile-based deferred renderer.
//!
//! The device this crate drives does not rasterize primitives as they
//! arrive: a whole frame of geometry is accumulated into ordered primitive
//! lists, then handed over for asynchronous binning and rasterization while
//! the CPU builds the next frame. This crate owns the part with invariants
//! to protect — submission ordering, buffer lifetime, burst alignment, and
//! backpressure — and leaves deciding *what* to draw to higher layers.
//!
//! The shape of a frame:
//!
//! ```no_run
//! use holly_engine::device::SoftSink;
//! use holly_engine::poly::PolyContext;
//! use holly_engine::scene::{ListKind, Renderer};
//!
//! # fn main() -> Result<(), holly_engine::SubmitError> {
//! let mut r = Renderer::with_defaults(SoftSink::new());
//! let hdr = PolyContext::colored(ListKind::OpaquePoly).compile();
//!
//! r.begin_scene()?;
//! r.begin_list(ListKind::OpaquePoly)?;
//! r.submit_header(&hdr)?;
//! r.rect(32.0, 32.0, 64.0, 64.0, 5.0, 0xFFFF_8000)?;
//! r.end_list()?;
//! r.finish_scene()?;
//! r.wait_ready()?;
//! # Ok(())
//! # }
//! ```
//!
//! For minimum per-call overhead the [`direct`] module exposes the same
//! pipeline through a double-buffered staging region with an explicit
//! visibility flush.

pub mod config;
pub mod device;
pub mod direct;
mod error;
pub mod logging;
pub mod poly;
pub mod scene;
mod stats;
pub mod time;
pub mod wire;

pub use config::{BinSize, InitParams};
pub use direct::{Direct, DirectCapacity};
pub use error::{BufferRegion, SubmitError};
pub use scene::{ListKind, Renderer, SceneState};
pub use stats::{FrameStats, ListMask};
