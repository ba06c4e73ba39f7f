//! Renderer initialization parameters.

use std::time::Duration;

use crate::scene::{LIST_COUNT, ListKind};
use crate::stats::ListMask;

/// Tile bin size for one list kind, in object-pointer-block entries.
///
/// `Zero` disables binning for that list entirely; submissions to a disabled
/// list still flow through the core but the device discards them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum BinSize {
    Zero,
    Eight,
    #[default]
    Sixteen,
    ThirtyTwo,
}

impl BinSize {
    /// Entries per tile bin.
    #[inline]
    pub const fn entries(self) -> u32 {
        match self {
            BinSize::Zero => 0,
            BinSize::Eight => 8,
            BinSize::Sixteen => 16,
            BinSize::ThirtyTwo => 32,
        }
    }
}

/// Initialization parameters for a [`Renderer`](crate::scene::Renderer).
///
/// Keep this structure stable and minimal; add a field only when a concrete
/// device capability requires one.
#[derive(Debug, Clone)]
pub struct InitParams {
    /// Tile bin size per list kind, indexed by [`ListKind`] wire value.
    pub bin_sizes: [BinSize; LIST_COUNT],

    /// Size in bytes of the device-side vertex buffer, per frame.
    ///
    /// Must be a multiple of the 32-byte burst size; the device rounds down
    /// otherwise.
    pub vertex_buf_size: u32,

    /// Transfer vertex data by DMA instead of programmed bursts.
    pub dma_enabled: bool,

    /// Enable full-scene anti-aliasing (doubles horizontal bin cost).
    pub fsaa_enabled: bool,

    /// Disable the device's translucent autosort.
    pub autosort_disabled: bool,

    /// Extra overflow bins to reserve for lists that outgrow their size.
    pub opb_overflow_count: u32,

    /// How long [`wait_ready`](crate::scene::Renderer::wait_ready) polls
    /// before declaring the device stalled. A device that never signals
    /// readiness is a fatal condition, not a transient one.
    pub ready_timeout: Duration,
}

impl Default for InitParams {
    fn default() -> Self {
        // Opaque and punch-through polygons plus translucent polygons, 16
        // entries each; modifier volumes off. 512 KiB of vertex buffer.
        Self {
            bin_sizes: [
                BinSize::Sixteen,
                BinSize::Zero,
                BinSize::Sixteen,
                BinSize::Zero,
                BinSize::Sixteen,
            ],
            vertex_buf_size: 512 * 1024,
            dma_enabled: false,
            fsaa_enabled: false,
            autosort_disabled: false,
            opb_overflow_count: 0,
            ready_timeout: Duration::from_secs(1),
        }
    }
}

impl InitParams {
    /// Mask of list kinds with a non-zero bin size.
    pub fn enabled_lists(&self) -> ListMask {
        let mut mask = ListMask::empty();
        for kind in ListKind::ALL {
            if self.bin_sizes[u32::from(kind) as usize] != BinSize::Zero {
                mask |= ListMask::from(kind);
            }
        }
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_the_three_polygon_lists() {
        let params = InitParams::default();
        assert_eq!(
            params.enabled_lists(),
            ListMask::OPAQUE_POLY | ListMask::TRANS_POLY | ListMask::PUNCH_THRU_POLY
        );
        assert_eq!(params.vertex_buf_size, 512 * 1024);
    }

    #[test]
    fn bin_size_entries() {
        assert_eq!(BinSize::Zero.entries(), 0);
        assert_eq!(BinSize::ThirtyTwo.entries(), 32);
    }
}
