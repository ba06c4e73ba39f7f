use std::alloc::Layout;
use std::ptr::NonNull;

use crate::error::SubmitError;
use crate::stats::FrameStats;
use crate::wire::Burst;

/// The rendering device as the submission core sees it: an opaque sink for
/// 32-byte bursts with an aligned-memory allocator, a visibility barrier,
/// and a readiness signal.
///
/// The device is the second, asynchronous actor in the two-stage pipeline:
/// once [`start_render`](Self::start_render) is called it consumes the
/// handed-over frame concurrently with the CPU building the next one. All
/// trait methods are called from the single producer thread.
pub trait DeviceSink {
    /// Allocates a zeroed device-visible region honoring `layout`'s
    /// alignment, or fails with [`SubmitError::AllocationFailed`].
    fn alloc(&mut self, layout: Layout) -> Result<NonNull<u8>, SubmitError>;

    /// Releases a region.
    ///
    /// # Safety
    ///
    /// `ptr` must come from a prior [`alloc`](Self::alloc) on this same sink
    /// with this same `layout`, and must not be used afterwards.
    unsafe fn free(&mut self, ptr: NonNull<u8>, layout: Layout);

    /// Queues one burst — a compiled header or a vertex record — behind all
    /// previously queued bursts. Submission order is render order within a
    /// strip and within a list.
    fn submit(&mut self, burst: &Burst) -> Result<(), SubmitError>;

    /// Makes all prior CPU writes to the given write-combined region visible
    /// to the device. Must be called before a header that references staged
    /// vertices in that region is submitted.
    fn flush_region(&mut self, base: NonNull<u8>, len: usize);

    /// Hands over the accumulated frame and starts rasterizing it, with the
    /// given background plane color.
    fn start_render(&mut self, bg: [f32; 3]);

    /// True when the device has finished consuming the previously handed
    /// frame and can accept another. Never blocks.
    fn ready(&mut self) -> bool;

    /// Snapshot of the device's frame counters.
    fn stats(&self) -> FrameStats;
}
