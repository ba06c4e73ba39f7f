//! Fixed binary layouts shared with the device.
//!
//! Responsibilities:
//! - the two 32-byte burst records (`Vertex`, `PolyHeader`)
//! - the command words that tag a burst (vertex, end-of-strip, header)
//! - packed-color construction
//! - strip builders for the common quad/rectangle shapes
//!
//! Everything here is pure data; nothing in this module touches the device.

mod cmd;
mod color;
mod header;
mod strip;
mod vertex;

pub use cmd::{BURST_ALIGN, BURST_SIZE, Burst, CMD_POLYHDR, CMD_VERTEX, CMD_VERTEX_EOL};
pub use color::{pack_argb, pack_argb_f, pack_rgb};
pub use header::PolyHeader;
pub use strip::{quad_strip, rect_strip, triangle_strip};
pub(crate) use strip::is_well_formed;
pub use vertex::Vertex;
