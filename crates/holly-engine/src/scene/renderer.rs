use bytemuck::cast_ref;

use crate::config::InitParams;
use crate::device::{DeviceSink, gate};
use crate::direct::DirectBuffer;
use crate::error::SubmitError;
use crate::stats::FrameStats;
use crate::wire::{PolyHeader, Vertex, is_well_formed};

use super::list::ListKind;

/// Where the current frame's submission session stands.
///
/// ```text
/// Idle --begin_scene--> Building --begin_list--> ListOpen
///                          ^                        |
///                          +-------end_list---------+
/// Building --finish_scene--> Finished --wait_ready--> Idle
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SceneState {
    /// No frame in progress; `begin_scene` is the only legal entry.
    Idle,
    /// A frame is being built and no list is open.
    Building,
    /// A frame is being built and exactly one list is open.
    ListOpen,
    /// The frame was handed to the device; the readiness gate clears this.
    Finished,
}

/// An owned submission session: the device, the scene state machine, and
/// the optional direct render buffer.
///
/// One `Renderer` is one producer. The API has no internal locking and must
/// be driven from a single thread; independent `Renderer` instances (each
/// with their own sink) do not contaminate each other. Illegal call
/// sequences are surfaced immediately as [`SubmitError`]s — never silently
/// ignored or auto-corrected — so caller bugs reproduce during development.
pub struct Renderer<D: DeviceSink> {
    pub(crate) dev: D,
    pub(crate) direct: Option<DirectBuffer>,
    pub(crate) state: SceneState,
    pub(crate) bg: [f32; 3],
    params: InitParams,
    active_list: Option<ListKind>,
    strip_open: bool,
}

impl<D: DeviceSink> Renderer<D> {
    /// Creates a session around `dev`.
    pub fn new(dev: D, params: InitParams) -> Self {
        log::info!(
            "renderer up: {} bytes of vertex buffer, lists {:?}",
            params.vertex_buf_size,
            params.enabled_lists(),
        );
        Self {
            dev,
            direct: None,
            state: SceneState::Idle,
            bg: [0.0, 0.0, 0.0],
            params,
            active_list: None,
            strip_open: false,
        }
    }

    /// Creates a session with default parameters.
    pub fn with_defaults(dev: D) -> Self {
        Self::new(dev, InitParams::default())
    }

    #[inline]
    pub fn state(&self) -> SceneState {
        self.state
    }

    /// The list currently open, if any.
    #[inline]
    pub fn active_list(&self) -> Option<ListKind> {
        self.active_list
    }

    #[inline]
    pub fn params(&self) -> &InitParams {
        &self.params
    }

    /// Borrow the underlying sink. Escape hatch; submissions made behind the
    /// renderer's back bypass every state check.
    #[inline]
    pub fn device(&self) -> &D {
        &self.dev
    }

    #[inline]
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.dev
    }

    /// Background plane color applied at the next frame handover.
    pub fn set_bg_color(&mut self, r: f32, g: f32, b: f32) {
        self.bg = [r, g, b];
    }

    // ── scene lifecycle ───────────────────────────────────────────────────

    /// Opens a frame. Only legal from `Idle`; a previous frame must have
    /// been waited out first, which is what keeps the producer at most one
    /// frame ahead of the device.
    pub fn begin_scene(&mut self) -> Result<(), SubmitError> {
        if self.state != SceneState::Idle {
            return Err(SubmitError::InvalidState { op: "begin_scene", state: self.state });
        }
        self.state = SceneState::Building;
        Ok(())
    }

    /// Closes the frame and hands it to the device, which starts binning and
    /// rasterizing it concurrently with whatever the caller does next.
    ///
    /// Fails with [`SubmitError::InvalidState`] while a list is open; the
    /// open list is left untouched.
    pub fn finish_scene(&mut self) -> Result<(), SubmitError> {
        if self.state != SceneState::Building || self.direct_frame_open() {
            return Err(SubmitError::InvalidState { op: "finish_scene", state: self.state });
        }
        self.dev.start_render(self.bg);
        self.state = SceneState::Finished;
        Ok(())
    }

    // ── list lifecycle ────────────────────────────────────────────────────

    /// Opens a list. Reopening a kind already submitted this frame is fine;
    /// opening while another list is open is not — lists never interleave.
    pub fn begin_list(&mut self, kind: ListKind) -> Result<(), SubmitError> {
        if let Some(open) = self.active_list {
            return Err(SubmitError::ListAlreadyOpen(open));
        }
        if self.state != SceneState::Building || self.direct_frame_open() {
            return Err(SubmitError::InvalidState { op: "begin_list", state: self.state });
        }
        self.active_list = Some(kind);
        self.state = SceneState::ListOpen;
        Ok(())
    }

    /// Closes the open list. Fails mid-strip: every strip must be terminated
    /// before its list closes.
    pub fn end_list(&mut self) -> Result<(), SubmitError> {
        if self.state != SceneState::ListOpen {
            return Err(SubmitError::InvalidState { op: "end_list", state: self.state });
        }
        if self.strip_open {
            return Err(SubmitError::MalformedStrip);
        }
        self.active_list = None;
        self.state = SceneState::Building;
        Ok(())
    }

    // ── submission ────────────────────────────────────────────────────────

    /// Submits a compiled header for the strips that follow. Not legal
    /// mid-strip.
    pub fn submit_header(&mut self, hdr: &PolyHeader) -> Result<(), SubmitError> {
        if self.active_list.is_none() {
            return Err(SubmitError::NotInList);
        }
        if self.strip_open {
            return Err(SubmitError::MalformedStrip);
        }
        self.dev.submit(cast_ref(hdr))
    }

    /// Submits one strip vertex. A vertex carrying the end-of-strip flag
    /// closes the current strip.
    pub fn submit_vertex(&mut self, v: &Vertex) -> Result<(), SubmitError> {
        if self.active_list.is_none() {
            return Err(SubmitError::NotInList);
        }
        self.dev.submit(cast_ref(v))?;
        self.strip_open = !v.ends_strip();
        Ok(())
    }

    /// Submits a header and a complete strip in one call.
    ///
    /// The strip must be well-formed: non-empty, terminated by its final
    /// vertex, no interior terminator.
    pub fn submit_strip(&mut self, hdr: &PolyHeader, verts: &[Vertex]) -> Result<(), SubmitError> {
        if self.active_list.is_none() {
            return Err(SubmitError::NotInList);
        }
        if self.strip_open || !is_well_formed(verts) {
            return Err(SubmitError::MalformedStrip);
        }
        self.dev.submit(cast_ref(hdr))?;
        for v in verts {
            self.dev.submit(cast_ref(v))?;
        }
        Ok(())
    }

    /// True while a direct-path frame bracket is open; the scene/list API is
    /// locked out for its duration.
    pub(crate) fn direct_frame_open(&self) -> bool {
        self.direct.as_ref().is_some_and(DirectBuffer::is_in_frame)
    }

    // ── readiness gate ────────────────────────────────────────────────────

    /// Blocks until the device has consumed the previous frame, then clears
    /// `Finished`. The only blocking call in the crate; typically made once
    /// per frame right after [`finish_scene`](Self::finish_scene).
    pub fn wait_ready(&mut self) -> Result<(), SubmitError> {
        gate::wait(&mut self.dev, self.params.ready_timeout)?;
        if self.state == SceneState::Finished {
            self.state = SceneState::Idle;
        }
        Ok(())
    }

    /// Non-blocking readiness probe, for callers that poll while doing other
    /// work. Clears `Finished` on success.
    pub fn check_ready(&mut self) -> bool {
        let ready = self.dev.ready();
        if ready && self.state == SceneState::Finished {
            self.state = SceneState::Idle;
        }
        ready
    }

    // ── stats ─────────────────────────────────────────────────────────────

    /// Device counters, with the enabled-list mask filled in from this
    /// session's configuration.
    pub fn stats(&self) -> FrameStats {
        let mut stats = self.dev.stats();
        stats.enabled_lists = self.params.enabled_lists();
        stats
    }
}

impl<D: DeviceSink> Drop for Renderer<D> {
    fn drop(&mut self) {
        if let Some(buf) = self.direct.take() {
            log::debug!("releasing direct render buffer on drop");
            buf.release(&mut self.dev);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::SoftSink;
    use crate::poly::PolyContext;

    fn renderer() -> Renderer<SoftSink> {
        Renderer::with_defaults(SoftSink::new())
    }

    fn open_list(r: &mut Renderer<SoftSink>, kind: ListKind) {
        r.begin_scene().unwrap();
        r.begin_list(kind).unwrap();
    }

    // ── scene state machine ───────────────────────────────────────────────

    #[test]
    fn begin_scene_twice_fails() {
        let mut r = renderer();
        r.begin_scene().unwrap();
        assert_eq!(
            r.begin_scene(),
            Err(SubmitError::InvalidState { op: "begin_scene", state: SceneState::Building })
        );
    }

    #[test]
    fn finish_without_begin_fails() {
        let mut r = renderer();
        assert_eq!(
            r.finish_scene(),
            Err(SubmitError::InvalidState { op: "finish_scene", state: SceneState::Idle })
        );
    }

    #[test]
    fn finish_with_open_list_fails_and_stays_list_open() {
        let mut r = renderer();
        open_list(&mut r, ListKind::OpaquePoly);
        assert_eq!(
            r.finish_scene(),
            Err(SubmitError::InvalidState { op: "finish_scene", state: SceneState::ListOpen })
        );
        assert_eq!(r.state(), SceneState::ListOpen);
        assert_eq!(r.active_list(), Some(ListKind::OpaquePoly));
    }

    #[test]
    fn finished_frame_blocks_begin_until_waited() {
        let mut r = renderer();
        r.begin_scene().unwrap();
        r.finish_scene().unwrap();
        assert_eq!(r.state(), SceneState::Finished);

        // One frame ahead is the limit; the gate must clear first.
        assert_eq!(
            r.begin_scene(),
            Err(SubmitError::InvalidState { op: "begin_scene", state: SceneState::Finished })
        );
        r.wait_ready().unwrap();
        assert_eq!(r.state(), SceneState::Idle);
        r.begin_scene().unwrap();
    }

    #[test]
    fn check_ready_clears_finished() {
        let mut r = renderer();
        r.begin_scene().unwrap();
        r.finish_scene().unwrap();
        assert!(r.check_ready());
        assert_eq!(r.state(), SceneState::Idle);
    }

    // ── list manager ──────────────────────────────────────────────────────

    #[test]
    fn begin_list_outside_scene_fails() {
        let mut r = renderer();
        assert_eq!(
            r.begin_list(ListKind::OpaquePoly),
            Err(SubmitError::InvalidState { op: "begin_list", state: SceneState::Idle })
        );
    }

    #[test]
    fn lists_never_interleave() {
        let mut r = renderer();
        open_list(&mut r, ListKind::OpaquePoly);
        r.submit_vertex(&Vertex::strip(0.0, 0.0, 1.0, 0)).unwrap();
        r.submit_vertex(&Vertex::strip(1.0, 0.0, 1.0, 0)).unwrap();
        r.submit_vertex(&Vertex::strip_end(0.0, 1.0, 1.0, 0)).unwrap();

        let before = r.device().in_flight().len();
        assert_eq!(
            r.begin_list(ListKind::TransPoly),
            Err(SubmitError::ListAlreadyOpen(ListKind::OpaquePoly))
        );
        // The open list's accumulated submissions are untouched.
        assert_eq!(r.device().in_flight().len(), before);
        assert_eq!(r.active_list(), Some(ListKind::OpaquePoly));
    }

    #[test]
    fn same_kind_may_reopen_within_one_scene() {
        let mut r = renderer();
        open_list(&mut r, ListKind::OpaquePoly);
        r.end_list().unwrap();
        r.begin_list(ListKind::OpaquePoly).unwrap();
        r.end_list().unwrap();
        r.finish_scene().unwrap();
    }

    #[test]
    fn end_list_mid_strip_fails() {
        let mut r = renderer();
        open_list(&mut r, ListKind::OpaquePoly);
        r.submit_vertex(&Vertex::strip(0.0, 0.0, 1.0, 0)).unwrap();
        assert_eq!(r.end_list(), Err(SubmitError::MalformedStrip));
        // Terminating the strip unblocks the close.
        r.submit_vertex(&Vertex::strip_end(0.0, 1.0, 1.0, 0)).unwrap();
        r.end_list().unwrap();
    }

    // ── submission ────────────────────────────────────────────────────────

    #[test]
    fn vertex_outside_list_fails() {
        let mut r = renderer();
        r.begin_scene().unwrap();
        assert_eq!(
            r.submit_vertex(&Vertex::strip(0.0, 0.0, 1.0, 0)),
            Err(SubmitError::NotInList)
        );
    }

    #[test]
    fn header_outside_list_fails() {
        let mut r = renderer();
        let hdr = PolyContext::colored(ListKind::OpaquePoly).compile();
        assert_eq!(r.submit_header(&hdr), Err(SubmitError::NotInList));
    }

    #[test]
    fn header_mid_strip_fails() {
        let mut r = renderer();
        let hdr = PolyContext::colored(ListKind::OpaquePoly).compile();
        open_list(&mut r, ListKind::OpaquePoly);
        r.submit_header(&hdr).unwrap();
        r.submit_vertex(&Vertex::strip(0.0, 0.0, 1.0, 0)).unwrap();
        assert_eq!(r.submit_header(&hdr), Err(SubmitError::MalformedStrip));
    }

    #[test]
    fn submitted_bursts_reach_the_device_in_order() {
        let mut r = renderer();
        let hdr = PolyContext::colored(ListKind::OpaquePoly).compile();
        let strip = [
            Vertex::strip(0.0, 0.0, 1.0, 1),
            Vertex::strip(1.0, 0.0, 1.0, 2),
            Vertex::strip_end(0.0, 1.0, 1.0, 3),
        ];

        open_list(&mut r, ListKind::OpaquePoly);
        r.submit_strip(&hdr, &strip).unwrap();
        r.end_list().unwrap();
        r.finish_scene().unwrap();

        let bursts = r.device().frame_bursts(0);
        assert_eq!(bursts.len(), 4);
        assert_eq!(&bursts[0], bytemuck::bytes_of(&hdr));
        for (burst, v) in bursts[1..].iter().zip(&strip) {
            assert_eq!(burst, bytemuck::bytes_of(v));
        }
    }

    #[test]
    fn malformed_strips_are_rejected() {
        let mut r = renderer();
        let hdr = PolyContext::colored(ListKind::OpaquePoly).compile();
        open_list(&mut r, ListKind::OpaquePoly);

        assert_eq!(r.submit_strip(&hdr, &[]), Err(SubmitError::MalformedStrip));
        let unterminated = [Vertex::strip(0.0, 0.0, 1.0, 0)];
        assert_eq!(r.submit_strip(&hdr, &unterminated), Err(SubmitError::MalformedStrip));
    }

    // ── stats ─────────────────────────────────────────────────────────────

    #[test]
    fn stats_carry_the_configured_list_mask() {
        let mut r = renderer();
        r.begin_scene().unwrap();
        r.finish_scene().unwrap();
        let stats = r.stats();
        assert_eq!(stats.frame_count, 1);
        assert_eq!(stats.enabled_lists, r.params().enabled_lists());
    }
}
