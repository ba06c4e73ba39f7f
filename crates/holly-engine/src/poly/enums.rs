//! Rendering-state enumerations.
//!
//! Discriminant values are wire values: each enum encodes directly into its
//! field of the compiled header, so the numbers here are part of the device
//! contract and must not be reordered.

/// Face culling applied during binning.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(u32)]
pub enum CullMode {
    /// No culling.
    None = 0,
    /// Cull triangles below the small-polygon area threshold.
    Small = 1,
    /// Cull counter-clockwise faces.
    #[default]
    Ccw = 2,
    /// Cull clockwise faces.
    Cw = 3,
}

/// Blend factor for either side of the blend equation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u32)]
pub enum BlendFactor {
    Zero = 0,
    One = 1,
    DestColor = 2,
    InvDestColor = 3,
    SrcAlpha = 4,
    InvSrcAlpha = 5,
    DestAlpha = 6,
    InvDestAlpha = 7,
}

/// Depth comparison selecting which fragments survive.
///
/// The device uses an inverse-W depth convention, so `Greater` is the
/// conventional "closer wins" test.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(u32)]
pub enum DepthCompare {
    Never = 0,
    Less = 1,
    Equal = 2,
    LessOrEqual = 3,
    #[default]
    Greater = 4,
    NotEqual = 5,
    GreaterOrEqual = 6,
    Always = 7,
}

/// Fog applied to the strip.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(u32)]
pub enum FogMode {
    /// Look up fog density from the table by depth.
    Table = 0,
    /// Per-vertex fog from the offset color's alpha.
    Vertex = 1,
    #[default]
    Disabled = 2,
    /// Table fog applied to alpha only.
    Table2 = 3,
}

/// Interpolation of vertex colors across a triangle.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(u32)]
pub enum Shading {
    Flat = 0,
    #[default]
    Gouraud = 1,
}

/// Per-vertex color encoding expected by the device.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(u32)]
pub enum ColorFormat {
    /// One packed 32-bit ARGB word per vertex (the [`Vertex`](crate::wire::Vertex) layout).
    #[default]
    ArgbPacked = 0,
    /// Four floats per channel.
    FourFloats = 1,
    /// Intensity modulation of a face color.
    Intensity = 2,
    /// Intensity reusing the previous face color.
    IntensityPrevious = 3,
}

/// Texture coordinate precision.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(u32)]
pub enum UvFormat {
    #[default]
    ThirtyTwoBit = 0,
    SixteenBit = 1,
}

/// Pixel format of a bound texture. The 3-bit code lands in bits 29..27 of
/// the texture control word.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(u32)]
pub enum TexFormat {
    Argb1555 = 0,
    #[default]
    Rgb565 = 1,
    Argb4444 = 2,
    Yuv422 = 3,
    Bumpmap = 4,
    Pal4Bpp = 5,
    Pal8Bpp = 6,
}

/// Texture sampling filter.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(u32)]
pub enum TexFilter {
    /// Point sampling.
    Nearest = 0,
    #[default]
    Bilinear = 2,
    Trilinear1 = 4,
    Trilinear2 = 6,
}

/// Per-axis UV wrap behavior outside `[0, 1]`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(u32)]
pub enum UvWrap {
    /// Repeat the texture.
    #[default]
    Repeat = 0,
    /// Mirror on each repeat.
    Flip = 1,
    /// Clamp to the edge texel.
    Clamp = 2,
}
