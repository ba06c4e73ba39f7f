//! Context-to-header compilation.
//!
//! Word layout produced here (device contract):
//!
//! - `cmd`:   base header word | list kind `26..24` | color format `5..4` |
//!   texture enable `3` | specular `2` | shading `1` | 16-bit UV `0`
//! - `mode1`: depth compare `31..29` | culling `28..27` | depth-write
//!   disable `26` | texture enable `25`
//! - `mode2`: src blend `31..29` | dst blend `28..26` | fog `23..22` |
//!   color clamp `21` | alpha `20` | UV flip `18..17` | UV clamp `16..15` |
//!   filter `14..12` | texture env `7..6` | U size `5..3` | V size `2..0`
//! - `mode3`: mipmapped `31` | format `29..27` | non-twiddled `26` |
//!   texture base `20..0` (byte offset divided by 8)
//!
//! The four pad words are zeroed; the device ignores them for polygons.

use crate::wire::{CMD_POLYHDR, PolyHeader};

use super::context::{PolyContext, TextureDesc};
use super::enums::UvWrap;

const CMD_LIST_SHIFT: u32 = 24;
const CMD_CLRFMT_SHIFT: u32 = 4;
const CMD_TXRENABLE_BIT: u32 = 1 << 3;
const CMD_SPECULAR_BIT: u32 = 1 << 2;
const CMD_SHADE_SHIFT: u32 = 1;
const CMD_UVFMT_SHIFT: u32 = 0;

const M1_DEPTHCMP_SHIFT: u32 = 29;
const M1_CULLING_SHIFT: u32 = 27;
const M1_DEPTHWRITE_DISABLE_BIT: u32 = 1 << 26;
const M1_TXRENABLE_BIT: u32 = 1 << 25;

const M2_SRCBLEND_SHIFT: u32 = 29;
const M2_DSTBLEND_SHIFT: u32 = 26;
const M2_FOG_SHIFT: u32 = 22;
const M2_CLAMP_BIT: u32 = 1 << 21;
const M2_ALPHA_BIT: u32 = 1 << 20;
const M2_UVFLIP_SHIFT: u32 = 17;
const M2_UVCLAMP_SHIFT: u32 = 15;
const M2_FILTER_SHIFT: u32 = 12;
const M2_USIZE_SHIFT: u32 = 3;
const M2_VSIZE_SHIFT: u32 = 0;

const M3_MIPMAP_BIT: u32 = 1 << 31;
const M3_FORMAT_SHIFT: u32 = 27;
const M3_NONTWIDDLED_BIT: u32 = 1 << 26;
const M3_BASE_MASK: u32 = 0x00FF_FFF8;

impl PolyContext {
    /// Compiles this context into its fixed binary header.
    ///
    /// Pure and deterministic: equal contexts produce byte-identical
    /// headers, so compiled headers can be cached across frames for as long
    /// as the state they describe holds.
    pub fn compile(&self) -> PolyHeader {
        let textured = self.texture.is_some();

        let mut cmd = CMD_POLYHDR
            | u32::from(self.list) << CMD_LIST_SHIFT
            | (self.color_format as u32) << CMD_CLRFMT_SHIFT
            | (self.shading as u32) << CMD_SHADE_SHIFT
            | (self.uv_format as u32) << CMD_UVFMT_SHIFT;
        if textured {
            cmd |= CMD_TXRENABLE_BIT;
        }
        if self.specular {
            cmd |= CMD_SPECULAR_BIT;
        }

        let mut mode1 = (self.depth.compare as u32) << M1_DEPTHCMP_SHIFT
            | (self.culling as u32) << M1_CULLING_SHIFT;
        if !self.depth.write {
            mode1 |= M1_DEPTHWRITE_DISABLE_BIT;
        }
        if textured {
            mode1 |= M1_TXRENABLE_BIT;
        }

        let mut mode2 = (self.blend.src as u32) << M2_SRCBLEND_SHIFT
            | (self.blend.dst as u32) << M2_DSTBLEND_SHIFT
            | (self.fog as u32) << M2_FOG_SHIFT;
        if self.color_clamp {
            mode2 |= M2_CLAMP_BIT;
        }
        if self.alpha {
            mode2 |= M2_ALPHA_BIT;
        }

        let mode3 = match &self.texture {
            None => 0,
            Some(txr) => {
                mode2 |= texture_mode2_bits(txr);
                texture_mode3_word(txr)
            }
        };

        PolyHeader { cmd, mode1, mode2, mode3, d1: 0, d2: 0, d3: 0, d4: 0 }
    }
}

fn texture_mode2_bits(txr: &TextureDesc) -> u32 {
    let flip = axis_bits(txr.wrap_u, txr.wrap_v, UvWrap::Flip);
    let clamp = axis_bits(txr.wrap_u, txr.wrap_v, UvWrap::Clamp);
    flip << M2_UVFLIP_SHIFT
        | clamp << M2_UVCLAMP_SHIFT
        | (txr.filter as u32) << M2_FILTER_SHIFT
        | size_code(txr.width) << M2_USIZE_SHIFT
        | size_code(txr.height) << M2_VSIZE_SHIFT
}

fn texture_mode3_word(txr: &TextureDesc) -> u32 {
    let mut word = (txr.format as u32) << M3_FORMAT_SHIFT | (txr.base.0 & M3_BASE_MASK) >> 3;
    if txr.mipmapped {
        word |= M3_MIPMAP_BIT;
    }
    if !txr.twiddled {
        word |= M3_NONTWIDDLED_BIT;
    }
    word
}

/// Two-bit U/V axis field: bit 1 for U, bit 0 for V.
fn axis_bits(wrap_u: UvWrap, wrap_v: UvWrap, which: UvWrap) -> u32 {
    u32::from(wrap_u == which) << 1 | u32::from(wrap_v == which)
}

/// Three-bit texture dimension code: `log2(dim) - 3`, valid for powers of
/// two in `8..=1024`. Out-of-contract dimensions clamp to the nearest code.
fn size_code(dim: u32) -> u32 {
    debug_assert!(
        dim.is_power_of_two() && (8..=1024).contains(&dim),
        "texture dimension {dim} is not a power of two in 8..=1024"
    );
    let dim = dim.next_power_of_two().clamp(8, 1024);
    dim.trailing_zeros() - 3
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::{DepthMode, TexAddr, TexFormat, TexFilter};
    use crate::scene::ListKind;

    fn base_cxt(list: ListKind) -> PolyContext {
        PolyContext::colored(list)
    }

    // ── determinism ───────────────────────────────────────────────────────

    #[test]
    fn equal_contexts_compile_to_identical_bytes() {
        let a = base_cxt(ListKind::TransPoly).compile();
        let b = base_cxt(ListKind::TransPoly).compile();
        assert_eq!(bytemuck::bytes_of(&a), bytemuck::bytes_of(&b));
    }

    #[test]
    fn compile_is_idempotent_across_calls() {
        let cxt = PolyContext::textured(
            ListKind::OpaquePoly,
            TextureDesc::new(TexFormat::Argb4444, 128, 64, TexAddr(0x0020_0000)),
        );
        assert_eq!(cxt.compile(), cxt.compile());
    }

    // ── cmd word ──────────────────────────────────────────────────────────

    #[test]
    fn list_kind_lands_in_cmd_bits_26_24() {
        for kind in ListKind::ALL {
            let hdr = base_cxt(kind).compile();
            assert_eq!(hdr.cmd >> 24 & 0x7, u32::from(kind));
        }
    }

    #[test]
    fn texture_enable_sets_cmd_and_mode1_bits() {
        let plain = base_cxt(ListKind::OpaquePoly).compile();
        let textured = PolyContext::textured(
            ListKind::OpaquePoly,
            TextureDesc::new(TexFormat::Rgb565, 256, 256, TexAddr(0)),
        )
        .compile();
        assert_eq!(plain.cmd & CMD_TXRENABLE_BIT, 0);
        assert_ne!(textured.cmd & CMD_TXRENABLE_BIT, 0);
        assert_ne!(textured.mode1 & M1_TXRENABLE_BIT, 0);
    }

    // ── mode words ────────────────────────────────────────────────────────

    #[test]
    fn translucent_defaults_differ_from_opaque_in_blend_and_alpha() {
        let opaque = base_cxt(ListKind::OpaquePoly).compile();
        let trans = base_cxt(ListKind::TransPoly).compile();
        // One/Zero vs SrcAlpha/InvSrcAlpha.
        assert_eq!(opaque.mode2 >> M2_SRCBLEND_SHIFT, 1);
        assert_eq!(trans.mode2 >> M2_SRCBLEND_SHIFT, 4);
        assert_eq!(opaque.mode2 & M2_ALPHA_BIT, 0);
        assert_ne!(trans.mode2 & M2_ALPHA_BIT, 0);
    }

    #[test]
    fn disabling_depth_write_sets_the_disable_bit() {
        let mut cxt = base_cxt(ListKind::OpaquePoly);
        assert_eq!(cxt.compile().mode1 & M1_DEPTHWRITE_DISABLE_BIT, 0);
        cxt.depth = DepthMode { write: false, ..DepthMode::default() };
        assert_ne!(cxt.compile().mode1 & M1_DEPTHWRITE_DISABLE_BIT, 0);
    }

    #[test]
    fn untextured_mode3_is_zero() {
        assert_eq!(base_cxt(ListKind::OpaquePoly).compile().mode3, 0);
    }

    #[test]
    fn texture_base_is_masked_and_scaled() {
        let desc = TextureDesc::new(TexFormat::Rgb565, 8, 8, TexAddr(0x0012_3456));
        let hdr = PolyContext::textured(ListKind::OpaquePoly, desc).compile();
        // Low 3 bits dropped, then divided by 8.
        assert_eq!(hdr.mode3 & 0x001F_FFFF, 0x0012_3450 >> 3);
    }

    #[test]
    fn texture_filter_and_sizes_encode() {
        let mut desc = TextureDesc::new(TexFormat::Rgb565, 1024, 8, TexAddr(0));
        desc.filter = TexFilter::Nearest;
        let hdr = PolyContext::textured(ListKind::OpaquePoly, desc).compile();
        assert_eq!(hdr.mode2 >> M2_USIZE_SHIFT & 0x7, 7); // 1024
        assert_eq!(hdr.mode2 >> M2_VSIZE_SHIFT & 0x7, 0); // 8
        assert_eq!(hdr.mode2 >> M2_FILTER_SHIFT & 0x7, 0);
    }

    #[test]
    fn wrap_modes_encode_per_axis() {
        let mut desc = TextureDesc::new(TexFormat::Rgb565, 64, 64, TexAddr(0));
        desc.wrap_u = UvWrap::Clamp;
        desc.wrap_v = UvWrap::Flip;
        let hdr = PolyContext::textured(ListKind::OpaquePoly, desc).compile();
        assert_eq!(hdr.mode2 >> M2_UVCLAMP_SHIFT & 0x3, 0b10);
        assert_eq!(hdr.mode2 >> M2_UVFLIP_SHIFT & 0x3, 0b01);
    }
}
