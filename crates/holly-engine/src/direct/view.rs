use bytemuck::cast_ref;

use crate::device::DeviceSink;
use crate::error::SubmitError;
use crate::scene::{Renderer, SceneState};
use crate::wire::{PolyHeader, Vertex, is_well_formed, quad_strip, triangle_strip};

use super::buffer::{DirectBuffer, DirectCapacity};

impl<D: DeviceSink> Renderer<D> {
    /// Allocates the direct render buffer and validates its alignment.
    ///
    /// On [`SubmitError::AlignmentError`] the buffer is kept but unusable:
    /// every direct operation keeps failing, and
    /// [`Direct::check_alignment`] keeps reporting the fault, until a
    /// successful re-init. Misaligned bursts would corrupt adjacent device
    /// memory, so there is no degraded mode.
    pub fn direct_init(&mut self, cap: DirectCapacity) -> Result<(), SubmitError> {
        if let Some(old) = self.direct.take() {
            old.release(&mut self.dev);
        }

        let buf = DirectBuffer::allocate(&mut self.dev, cap)?;
        let fault = buf.misaligned_region();
        self.direct = Some(buf);

        match fault {
            None => {
                log::info!(
                    "direct render buffer up: 2x{} vertex slots, 2x{} header slots",
                    cap.vertices,
                    cap.headers,
                );
                Ok(())
            }
            Some(region) => {
                log::error!("direct render buffer misaligned ({region:?}); renderer unusable");
                Err(SubmitError::AlignmentError { region })
            }
        }
    }

    /// Frees the direct render buffer. Idempotent.
    pub fn direct_shutdown(&mut self) {
        if let Some(buf) = self.direct.take() {
            buf.release(&mut self.dev);
            log::debug!("direct render buffer released");
        }
    }

    /// The direct-path view, coupling the buffer with the device.
    ///
    /// Fails until [`direct_init`](Self::direct_init) has succeeded at least
    /// once (an alignment-faulted buffer is handed out, but every operation
    /// on it fails).
    pub fn direct(&mut self) -> Result<Direct<'_, D>, SubmitError> {
        let bg = self.bg;
        match self.direct.as_mut() {
            Some(buf) => Ok(Direct { buf, dev: &mut self.dev, state: &mut self.state, bg }),
            None => Err(SubmitError::InvalidState { op: "direct", state: self.state }),
        }
    }
}

/// The low-latency submission path.
///
/// Bypasses the per-call overhead of the scene/list API: callers write
/// vertex fields straight into the staged half and submit in bulk. The
/// price is the visibility contract — staged writes reach the device only
/// after [`flush`](Self::flush), and every staged region must be flushed
/// before the header that references it is submitted. The scene/list path
/// has no such step; it publishes on every submit.
pub struct Direct<'a, D: DeviceSink> {
    buf: &'a mut DirectBuffer,
    dev: &'a mut D,
    state: &'a mut SceneState,
    bg: [f32; 3],
}

impl<'a, D: DeviceSink> Direct<'a, D> {
    // ── frame bracket ─────────────────────────────────────────────────────

    /// Opens a direct frame. Takes the place of `begin_scene`: the two
    /// paths share the device and the one-frame-ahead gate, so a direct
    /// frame is only legal from `Idle`, and the scene/list API is locked
    /// out until [`end_frame`](Self::end_frame).
    pub fn begin_frame(&mut self) -> Result<(), SubmitError> {
        self.buf.usable()?;
        if self.buf.is_in_frame() || *self.state != SceneState::Idle {
            return Err(SubmitError::InvalidState { op: "begin_frame", state: *self.state });
        }
        *self.state = SceneState::Building;
        self.buf.open_frame();
        Ok(())
    }

    /// Closes the frame: publishes any unflushed staged writes, flips the
    /// half, and hands the frame to the device. The readiness gate clears
    /// the resulting `Finished` state.
    pub fn end_frame(&mut self) -> Result<(), SubmitError> {
        self.buf.usable()?;
        if !self.buf.is_in_frame() {
            return Err(SubmitError::FrameNotOpen);
        }
        if self.buf.is_dirty() {
            self.flush()?;
        }
        self.dev.start_render(self.bg);
        self.buf.close_frame();
        *self.state = SceneState::Finished;
        Ok(())
    }

    // ── staged slots ──────────────────────────────────────────────────────

    /// Claims the next free vertex slot for in-place writing.
    ///
    /// The slot counts toward this frame's staging immediately, whether or
    /// not it is later submitted.
    pub fn vertex(&mut self) -> Result<&mut Vertex, SubmitError> {
        self.writable()?;
        self.buf.next_vertex()
    }

    /// A previously claimed slot, for revisiting earlier writes.
    pub fn vertex_at(&mut self, index: u32) -> Option<&mut Vertex> {
        if self.writable().is_err() {
            return None;
        }
        self.buf.vertex_at(index)
    }

    /// Number of vertex slots claimed this frame.
    pub fn vertex_count(&self) -> u32 {
        self.buf.vertex_count()
    }

    /// Rewinds (or replays) the staged-vertex cursor, e.g. to rebuild the
    /// tail of a frame. Clamped to capacity.
    pub fn set_vertex_count(&mut self, count: u32) -> Result<(), SubmitError> {
        self.writable()?;
        self.buf.set_vertex_count(count);
        Ok(())
    }

    /// Claims the next free header slot for in-place writing.
    pub fn header(&mut self) -> Result<&mut PolyHeader, SubmitError> {
        self.writable()?;
        self.buf.next_header()
    }

    // ── submission ────────────────────────────────────────────────────────

    /// Submits a compiled header.
    ///
    /// Staged writes must have been flushed first; an unflushed region here
    /// is the silent-corruption bug class unique to this path, so debug
    /// builds assert on it. Release builds submit regardless, exactly as
    /// the hardware would.
    pub fn submit_header(&mut self, hdr: &PolyHeader) -> Result<(), SubmitError> {
        self.writable()?;
        if self.buf.is_dirty() {
            log::warn!("direct header submitted with unflushed staged writes");
            debug_assert!(false, "flush() must precede submit_header for staged writes");
        }
        self.dev.submit(cast_ref(hdr))
    }

    /// Submits one vertex immediately, bypassing the staged region. No
    /// flush is required for this path.
    pub fn submit_vertex(&mut self, v: &Vertex) -> Result<(), SubmitError> {
        self.writable()?;
        self.dev.submit(cast_ref(v))
    }

    /// Submits an untextured vertex built in place.
    pub fn submit_vertex_colored(
        &mut self,
        x: f32,
        y: f32,
        z: f32,
        argb: u32,
        end: bool,
    ) -> Result<(), SubmitError> {
        let v = if end { Vertex::strip_end(x, y, z, argb) } else { Vertex::strip(x, y, z, argb) };
        self.submit_vertex(&v)
    }

    /// Submits a fully specified vertex built in place.
    #[allow(clippy::too_many_arguments)]
    pub fn submit_vertex_full(
        &mut self,
        x: f32,
        y: f32,
        z: f32,
        u: f32,
        v: f32,
        argb: u32,
        oargb: u32,
        end: bool,
    ) -> Result<(), SubmitError> {
        let base = if end { Vertex::strip_end(x, y, z, argb) } else { Vertex::strip(x, y, z, argb) };
        self.submit_vertex(&base.with_uv(u, v).with_oargb(oargb))
    }

    /// Submits staged vertices `start..end` in staging order.
    pub fn submit_range(&mut self, start: u32, end: u32) -> Result<(), SubmitError> {
        self.writable()?;
        let end = end.min(self.buf.vertex_count());
        if start >= end {
            log::warn!("empty direct submit range {start}..{end}");
            return Ok(());
        }
        for index in start..end {
            let burst = *cast_ref::<Vertex, crate::wire::Burst>(self.buf.staged_vertex(index));
            self.dev.submit(&burst)?;
        }
        Ok(())
    }

    /// Submits every staged vertex in staging order.
    pub fn submit_all(&mut self) -> Result<(), SubmitError> {
        let end = self.buf.vertex_count();
        self.submit_range(0, end)
    }

    /// Submits a header and a complete pre-built strip in one call,
    /// amortizing the per-vertex overhead. The strip must be well-formed.
    pub fn submit_strip(&mut self, hdr: &PolyHeader, verts: &[Vertex]) -> Result<(), SubmitError> {
        self.writable()?;
        if !is_well_formed(verts) {
            return Err(SubmitError::MalformedStrip);
        }
        self.dev.submit(cast_ref(hdr))?;
        for v in verts {
            self.dev.submit(cast_ref(v))?;
        }
        Ok(())
    }

    /// Submits a single flat-colored triangle under `hdr`.
    pub fn triangle(
        &mut self,
        hdr: &PolyHeader,
        p1: (f32, f32),
        p2: (f32, f32),
        p3: (f32, f32),
        z: f32,
        argb: u32,
    ) -> Result<(), SubmitError> {
        self.submit_strip(hdr, &triangle_strip(p1, p2, p3, z, argb))
    }

    /// Submits a single flat-colored quad under `hdr`, corners in strip
    /// order.
    #[allow(clippy::too_many_arguments)]
    pub fn quad(
        &mut self,
        hdr: &PolyHeader,
        p1: (f32, f32),
        p2: (f32, f32),
        p3: (f32, f32),
        p4: (f32, f32),
        z: f32,
        argb: u32,
    ) -> Result<(), SubmitError> {
        self.submit_strip(hdr, &quad_strip(p1, p2, p3, p4, z, argb))
    }

    // ── visibility ────────────────────────────────────────────────────────

    /// Publishes all staged writes in the active half to the device.
    ///
    /// Required between the last staged write and the header submission
    /// that references it.
    pub fn flush(&mut self) -> Result<(), SubmitError> {
        self.writable()?;
        let (vbase, vlen) = self.buf.staged_vertex_region();
        if vlen > 0 {
            self.dev.flush_region(vbase, vlen);
        }
        let (hbase, hlen) = self.buf.staged_header_region();
        if hlen > 0 {
            self.dev.flush_region(hbase, hlen);
        }
        self.buf.mark_clean();
        Ok(())
    }

    // ── queries ───────────────────────────────────────────────────────────

    /// Revalidates buffer alignment. Idempotent; safe to assert at startup.
    pub fn check_alignment(&self) -> Result<(), SubmitError> {
        self.buf.check_alignment()
    }

    /// Per-half capacities.
    pub fn capacity(&self) -> DirectCapacity {
        self.buf.capacity()
    }

    /// High-water mark of staged vertices in the CPU-owned half this frame.
    pub fn high_water(&self) -> u32 {
        self.buf.high_water()
    }

    /// Index of the half currently owned by the CPU.
    pub fn active_half(&self) -> usize {
        self.buf.active_half()
    }

    fn writable(&self) -> Result<(), SubmitError> {
        self.buf.usable()?;
        if !self.buf.is_in_frame() {
            return Err(SubmitError::FrameNotOpen);
        }
        Ok(())
    }
}
