use crate::scene::ListKind;

use super::enums::{
    BlendFactor, ColorFormat, CullMode, DepthCompare, FogMode, Shading, TexFilter, TexFormat,
    UvFormat, UvWrap,
};

/// Byte offset of a texture in device memory.
///
/// Only bits 23..3 are representable on the wire; the low three bits and
/// anything above 16 MiB are masked off at compile time.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TexAddr(pub u32);

/// Source/destination blend factors.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BlendMode {
    pub src: BlendFactor,
    pub dst: BlendFactor,
}

impl BlendMode {
    /// Opaque replace: `One / Zero`.
    pub const OPAQUE: BlendMode = BlendMode { src: BlendFactor::One, dst: BlendFactor::Zero };

    /// Standard alpha blending: `SrcAlpha / InvSrcAlpha`.
    pub const ALPHA: BlendMode =
        BlendMode { src: BlendFactor::SrcAlpha, dst: BlendFactor::InvSrcAlpha };

    /// Additive blending: `SrcAlpha / One`.
    pub const ADDITIVE: BlendMode =
        BlendMode { src: BlendFactor::SrcAlpha, dst: BlendFactor::One };
}

/// Depth test configuration.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DepthMode {
    pub compare: DepthCompare,
    /// When false the fragment passes the test without updating the buffer.
    pub write: bool,
}

impl Default for DepthMode {
    fn default() -> Self {
        Self { compare: DepthCompare::Greater, write: true }
    }
}

/// A texture binding: format, dimensions, sampling, and device address.
///
/// Dimensions must be powers of two in `8..=1024`; the compiler clamps
/// anything else to the nearest representable size code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureDesc {
    pub format: TexFormat,
    pub width: u32,
    pub height: u32,
    pub filter: TexFilter,
    pub wrap_u: UvWrap,
    pub wrap_v: UvWrap,
    pub mipmapped: bool,
    /// Stored twiddled (Morton order) rather than linear.
    pub twiddled: bool,
    pub base: TexAddr,
}

impl TextureDesc {
    /// A plain bilinear-filtered, twiddled, non-mipmapped binding.
    pub fn new(format: TexFormat, width: u32, height: u32, base: TexAddr) -> Self {
        Self {
            format,
            width,
            height,
            filter: TexFilter::Bilinear,
            wrap_u: UvWrap::Repeat,
            wrap_v: UvWrap::Repeat,
            mipmapped: false,
            twiddled: true,
            base,
        }
    }
}

/// A complete rendering-state description for one or more strips.
///
/// Contexts are plain values: build one, compile it to a
/// [`PolyHeader`](crate::wire::PolyHeader), and reuse the header across
/// frames for as long as the state holds. Compilation is deterministic, so
/// equal contexts always produce byte-identical headers and headers are safe
/// to cache keyed on the context.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct PolyContext {
    /// List the strips under this header are submitted to.
    pub list: ListKind,
    pub culling: CullMode,
    pub shading: Shading,
    pub fog: FogMode,
    /// Blend vertex alpha into the framebuffer.
    pub alpha: bool,
    /// Add the offset color as a specular highlight term.
    pub specular: bool,
    /// Clamp post-blend color to the framebuffer range.
    pub color_clamp: bool,
    pub blend: BlendMode,
    pub depth: DepthMode,
    pub color_format: ColorFormat,
    pub uv_format: UvFormat,
    pub texture: Option<TextureDesc>,
}

impl PolyContext {
    /// An untextured context with the conventional defaults for `list`:
    /// opaque kinds replace, translucent kinds alpha-blend.
    pub fn colored(list: ListKind) -> Self {
        let translucent = list.is_translucent();
        Self {
            list,
            culling: CullMode::Ccw,
            shading: Shading::Gouraud,
            fog: FogMode::Disabled,
            alpha: translucent,
            specular: false,
            color_clamp: false,
            blend: if translucent { BlendMode::ALPHA } else { BlendMode::OPAQUE },
            depth: DepthMode::default(),
            color_format: ColorFormat::ArgbPacked,
            uv_format: UvFormat::ThirtyTwoBit,
            texture: None,
        }
    }

    /// A textured context with the same per-list defaults as [`colored`](Self::colored).
    pub fn textured(list: ListKind, texture: TextureDesc) -> Self {
        Self { texture: Some(texture), ..Self::colored(list) }
    }
}
