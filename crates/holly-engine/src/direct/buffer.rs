use std::alloc::Layout;
use std::ptr::NonNull;

use crate::device::DeviceSink;
use crate::error::{BufferRegion, SubmitError};
use crate::wire::{BURST_ALIGN, BURST_SIZE, PolyHeader, Vertex};

/// Per-half slot capacities of the direct render buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DirectCapacity {
    /// Vertex slots per half.
    pub vertices: u32,
    /// Header slots per half.
    pub headers: u32,
}

impl Default for DirectCapacity {
    fn default() -> Self {
        Self { vertices: 65_536, headers: 1_024 }
    }
}

/// One device-allocated region and the layout it was obtained with.
struct Arena {
    base: NonNull<u8>,
    layout: Layout,
}

impl Arena {
    fn addr(&self) -> usize {
        self.base.as_ptr() as usize
    }
}

/// The double-buffered staging memory of the direct render path.
///
/// Two halves, each holding a vertex arena and a header arena, all bases
/// 32-byte aligned. Ownership of a half alternates at the frame boundary:
/// the half being filled for frame k+1 is never the half the device drains
/// for frame k, so no lock is needed. A single `active` index flips at
/// `end_frame`; nothing is allocated per frame.
///
/// Holds raw device memory, so this type is single-thread only, like the
/// rest of the submission API.
pub struct DirectBuffer {
    verts: Arena,
    hdrs: Arena,
    cap: DirectCapacity,
    /// Index of the half currently owned by the CPU.
    active: usize,
    vertex_count: u32,
    header_count: u32,
    high_water: [u32; 2],
    /// Staged writes not yet published with a flush.
    dirty: bool,
    in_frame: bool,
    misaligned: Option<BufferRegion>,
}

impl DirectBuffer {
    /// Allocates both regions through the device and validates alignment of
    /// every half. The buffer is returned even when misaligned — retained
    /// but unusable — so the failure stays observable via
    /// [`check_alignment`](Self::check_alignment).
    pub(crate) fn allocate<D: DeviceSink>(
        dev: &mut D,
        cap: DirectCapacity,
    ) -> Result<Self, SubmitError> {
        let vert_layout = region_layout(cap.vertices)?;
        let hdr_layout = region_layout(cap.headers)?;

        let verts = dev.alloc(vert_layout)?;
        let hdrs = match dev.alloc(hdr_layout) {
            Ok(ptr) => ptr,
            Err(err) => {
                unsafe { dev.free(verts, vert_layout) };
                return Err(err);
            }
        };

        let mut buf = Self {
            verts: Arena { base: verts, layout: vert_layout },
            hdrs: Arena { base: hdrs, layout: hdr_layout },
            cap,
            active: 0,
            vertex_count: 0,
            header_count: 0,
            high_water: [0; 2],
            dirty: false,
            in_frame: false,
            misaligned: None,
        };
        buf.misaligned = buf.check_alignment().err().and_then(|err| match err {
            SubmitError::AlignmentError { region } => Some(region),
            _ => None,
        });
        Ok(buf)
    }

    /// Returns both regions to the device.
    pub(crate) fn release<D: DeviceSink>(self, dev: &mut D) {
        unsafe {
            dev.free(self.verts.base, self.verts.layout);
            dev.free(self.hdrs.base, self.hdrs.layout);
        }
    }

    /// Revalidates the alignment of all four half-regions. Idempotent;
    /// intended for startup assertions.
    pub fn check_alignment(&self) -> Result<(), SubmitError> {
        let half = |arena: &Arena, slots: u32| {
            [arena.addr(), arena.addr() + slots as usize * BURST_SIZE]
        };
        for addr in half(&self.verts, self.cap.vertices) {
            if addr % BURST_ALIGN != 0 {
                return Err(SubmitError::AlignmentError { region: BufferRegion::Vertices });
            }
        }
        for addr in half(&self.hdrs, self.cap.headers) {
            if addr % BURST_ALIGN != 0 {
                return Err(SubmitError::AlignmentError { region: BufferRegion::Headers });
            }
        }
        Ok(())
    }

    /// Fails with the recorded alignment fault, if any. Gate for every
    /// operation: a misaligned buffer must never be written through.
    pub(crate) fn usable(&self) -> Result<(), SubmitError> {
        match self.misaligned {
            Some(region) => Err(SubmitError::AlignmentError { region }),
            None => Ok(()),
        }
    }

    pub(crate) fn misaligned_region(&self) -> Option<BufferRegion> {
        self.misaligned
    }

    #[inline]
    pub fn capacity(&self) -> DirectCapacity {
        self.cap
    }

    #[inline]
    pub(crate) fn is_in_frame(&self) -> bool {
        self.in_frame
    }

    #[inline]
    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Staged vertices in the active half.
    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// High-water mark of staged vertices in the active half this frame.
    #[inline]
    pub fn high_water(&self) -> u32 {
        self.high_water[self.active]
    }

    /// Index of the half currently owned by the CPU.
    #[inline]
    pub fn active_half(&self) -> usize {
        self.active
    }

    // ── frame bookkeeping (device-free; the view drives the device) ───────

    pub(crate) fn open_frame(&mut self) {
        self.in_frame = true;
        self.vertex_count = 0;
        self.header_count = 0;
        self.high_water[self.active] = 0;
        self.dirty = false;
    }

    /// Flips ownership: the filled half goes to the device, the other half
    /// becomes the CPU's.
    pub(crate) fn close_frame(&mut self) {
        self.in_frame = false;
        self.active ^= 1;
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    // ── staged slots ──────────────────────────────────────────────────────

    /// Claims the next free vertex slot in the active half.
    pub(crate) fn next_vertex(&mut self) -> Result<&mut Vertex, SubmitError> {
        if self.vertex_count >= self.cap.vertices {
            return Err(SubmitError::BufferExhausted { capacity: self.cap.vertices });
        }
        let index = self.vertex_count;
        self.vertex_count += 1;
        self.high_water[self.active] = self.high_water[self.active].max(self.vertex_count);
        self.dirty = true;
        // In range and exclusively CPU-owned until the half flips.
        Ok(unsafe { &mut *self.vertex_ptr(self.active, index) })
    }

    /// A previously claimed slot, or `None` out of range.
    pub(crate) fn vertex_at(&mut self, index: u32) -> Option<&mut Vertex> {
        if index >= self.vertex_count {
            return None;
        }
        self.dirty = true;
        Some(unsafe { &mut *self.vertex_ptr(self.active, index) })
    }

    /// Rewinds (or replays) the staged-vertex cursor, clamped to capacity.
    pub(crate) fn set_vertex_count(&mut self, count: u32) {
        self.vertex_count = count.min(self.cap.vertices);
        self.high_water[self.active] = self.high_water[self.active].max(self.vertex_count);
    }

    /// Reads a staged vertex. Caller guarantees `index < vertex_count`.
    pub(crate) fn staged_vertex(&self, index: u32) -> &Vertex {
        debug_assert!(index < self.vertex_count);
        unsafe { &*self.vertex_ptr(self.active, index) }
    }

    /// Claims the next free header slot in the active half.
    pub(crate) fn next_header(&mut self) -> Result<&mut PolyHeader, SubmitError> {
        if self.header_count >= self.cap.headers {
            return Err(SubmitError::BufferExhausted { capacity: self.cap.headers });
        }
        let index = self.header_count;
        self.header_count += 1;
        self.dirty = true;
        Ok(unsafe { &mut *self.header_ptr(self.active, index) })
    }

    /// Base address and staged length of the active vertex half, for the
    /// visibility flush.
    pub(crate) fn staged_vertex_region(&self) -> (NonNull<u8>, usize) {
        let offset = self.active * self.cap.vertices as usize * BURST_SIZE;
        let base = unsafe { NonNull::new_unchecked(self.verts.base.as_ptr().add(offset)) };
        (base, self.vertex_count as usize * BURST_SIZE)
    }

    /// Base address and staged length of the active header half.
    pub(crate) fn staged_header_region(&self) -> (NonNull<u8>, usize) {
        let offset = self.active * self.cap.headers as usize * BURST_SIZE;
        let base = unsafe { NonNull::new_unchecked(self.hdrs.base.as_ptr().add(offset)) };
        (base, self.header_count as usize * BURST_SIZE)
    }

    fn vertex_ptr(&self, half: usize, index: u32) -> *mut Vertex {
        let offset = (half * self.cap.vertices as usize + index as usize) * BURST_SIZE;
        unsafe { self.verts.base.as_ptr().add(offset).cast::<Vertex>() }
    }

    fn header_ptr(&self, half: usize, index: u32) -> *mut PolyHeader {
        let offset = (half * self.cap.headers as usize + index as usize) * BURST_SIZE;
        unsafe { self.hdrs.base.as_ptr().add(offset).cast::<PolyHeader>() }
    }
}

/// Layout of one double-buffered region: two halves of `slots` 32-byte
/// records each, at the device's burst alignment.
fn region_layout(slots: u32) -> Result<Layout, SubmitError> {
    if slots == 0 {
        return Err(SubmitError::AllocationFailed);
    }
    let size = 2_usize
        .checked_mul(slots as usize)
        .and_then(|n| n.checked_mul(BURST_SIZE))
        .ok_or(SubmitError::AllocationFailed)?;
    Layout::from_size_align(size, BURST_ALIGN).map_err(|_| SubmitError::AllocationFailed)
}
