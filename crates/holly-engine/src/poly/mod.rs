//! Polygon rendering-state descriptors and their compiler.
//!
//! Responsibilities:
//! - describe rendering state (`PolyContext`) as a plain comparable value
//! - compile a context into the device's fixed header record, deterministically
//! - provide the conventional per-list defaults
//!
//! Compilation never touches the device; headers are data until submitted.

mod compile;
mod context;
mod enums;

pub use context::{BlendMode, DepthMode, PolyContext, TexAddr, TextureDesc};
pub use enums::{
    BlendFactor, ColorFormat, CullMode, DepthCompare, FogMode, Shading, TexFilter, TexFormat,
    UvFormat, UvWrap,
};
