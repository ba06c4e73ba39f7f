use bytemuck::{Pod, Zeroable};

use super::cmd::{CMD_VERTEX, CMD_VERTEX_EOL};
use super::color::{pack_argb, pack_argb_f};

/// One strip vertex, laid out exactly as the device consumes it.
///
/// 32 bytes, naturally aligned:
/// `flags, x, y, z, u, v, argb, oargb` — all 32-bit fields. `flags` is the
/// command word ([`CMD_VERTEX`] or [`CMD_VERTEX_EOL`]); `argb` the packed
/// base color; `oargb` the packed offset/specular color.
///
/// Vertices have no identity of their own — they only exist as elements of
/// a strip inside an open list.
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    pub flags: u32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub u: f32,
    pub v: f32,
    pub argb: u32,
    pub oargb: u32,
}

const _: () = assert!(size_of::<Vertex>() == super::cmd::BURST_SIZE);

impl Vertex {
    /// An ordinary colored strip vertex.
    #[inline]
    pub const fn strip(x: f32, y: f32, z: f32, argb: u32) -> Self {
        Self { flags: CMD_VERTEX, x, y, z, u: 0.0, v: 0.0, argb, oargb: 0 }
    }

    /// A colored vertex that terminates its strip.
    #[inline]
    pub const fn strip_end(x: f32, y: f32, z: f32, argb: u32) -> Self {
        Self { flags: CMD_VERTEX_EOL, x, y, z, u: 0.0, v: 0.0, argb, oargb: 0 }
    }

    /// Returns a copy with the given texture coordinates.
    #[inline]
    pub const fn with_uv(mut self, u: f32, v: f32) -> Self {
        self.u = u;
        self.v = v;
        self
    }

    /// Returns a copy with the given packed offset/specular color.
    #[inline]
    pub const fn with_oargb(mut self, oargb: u32) -> Self {
        self.oargb = oargb;
        self
    }

    /// True when this vertex carries the end-of-strip command word.
    #[inline]
    pub const fn ends_strip(&self) -> bool {
        self.flags == CMD_VERTEX_EOL
    }

    /// Sets the base color from 8-bit channels.
    #[inline]
    pub fn set_color(&mut self, a: u8, r: u8, g: u8, b: u8) {
        self.argb = pack_argb(a, r, g, b);
    }

    /// Sets the base color from float channels, clamped to `[0, 1]`.
    #[inline]
    pub fn set_color_f(&mut self, a: f32, r: f32, g: f32, b: f32) {
        self.argb = pack_argb_f(a, r, g, b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_one_burst() {
        assert_eq!(size_of::<Vertex>(), 32);
        assert_eq!(align_of::<Vertex>(), 4);
    }

    #[test]
    fn field_order_matches_the_wire() {
        let v = Vertex::strip(1.0, 2.0, 3.0, 0xFFAA_BBCC).with_uv(0.25, 0.75);
        let bytes: &[u8; 32] = bytemuck::cast_ref(&v);
        assert_eq!(&bytes[0..4], &CMD_VERTEX.to_ne_bytes());
        assert_eq!(&bytes[4..8], &1.0_f32.to_ne_bytes());
        assert_eq!(&bytes[16..20], &0.25_f32.to_ne_bytes());
        assert_eq!(&bytes[24..28], &0xFFAA_BBCC_u32.to_ne_bytes());
    }

    #[test]
    fn terminator_flag_round_trips() {
        assert!(Vertex::strip_end(0.0, 0.0, 1.0, 0).ends_strip());
        assert!(!Vertex::strip(0.0, 0.0, 1.0, 0).ends_strip());
    }

    #[test]
    fn set_color_f_clamps() {
        let mut v = Vertex::strip(0.0, 0.0, 1.0, 0);
        v.set_color_f(2.0, -0.5, 1.0, 0.0);
        assert_eq!(v.argb, 0xFF00_FF00);
    }
}
