//! Read-only frame counters reported by the device.

use std::time::Duration;

use bitflags::bitflags;

use crate::scene::ListKind;

bitflags! {
    /// Set of list kinds enabled for binning, one bit per [`ListKind`].
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
    pub struct ListMask: u32 {
        const OPAQUE_POLY     = 1 << 0;
        const OPAQUE_MODIFIER = 1 << 1;
        const TRANS_POLY      = 1 << 2;
        const TRANS_MODIFIER  = 1 << 3;
        const PUNCH_THRU_POLY = 1 << 4;
    }
}

impl From<ListKind> for ListMask {
    #[inline]
    fn from(kind: ListKind) -> Self {
        ListMask::from_bits_truncate(1 << u32::from(kind))
    }
}

/// Snapshot of the device's frame counters.
///
/// The device updates these asynchronously as it consumes frames; the core
/// only ever reads them. `enabled_lists` is filled in by the renderer from
/// its own configuration, since the device reports raw counters only.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FrameStats {
    /// Frames the device has finished rendering.
    pub frame_count: u32,
    /// Vertical blanks observed since init.
    pub vbl_count: u32,
    /// Bytes of vertex buffer consumed by the frame in flight.
    pub vtx_buffer_used: u32,
    /// High-water mark of `vtx_buffer_used` across all frames so far.
    pub vtx_buffer_used_max: u32,
    /// Instantaneous frame rate derived from the last frame interval.
    pub frame_rate: f32,
    /// Wall-clock duration of the last completed frame.
    pub frame_last_time: Duration,
    /// List kinds enabled for binning.
    pub enabled_lists: ListMask,
}
