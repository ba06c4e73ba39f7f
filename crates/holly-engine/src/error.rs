use std::time::Duration;

use thiserror::Error;

use crate::scene::{ListKind, SceneState};

/// Which half-region of the direct render buffer failed validation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferRegion {
    Vertices,
    Headers,
}

/// Errors surfaced by the submission core.
///
/// Every error is detected synchronously at the violating call and returned
/// to the caller. The core never drops, reorders, or retries a submission to
/// recover; a failed frame is the caller's to drop, log, or abort on.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum SubmitError {
    /// Operation not valid in the current scene state (e.g. `finish_scene`
    /// while a list is open, or `begin_scene` before the previous frame was
    /// waited out).
    #[error("{op} is not valid in the {state:?} state")]
    InvalidState {
        op: &'static str,
        state: SceneState,
    },

    /// A primitive was submitted with no list open.
    #[error("primitive submitted with no list open")]
    NotInList,

    /// `begin_list` was called while another list is open. Lists never
    /// interleave; close the open list first.
    #[error("cannot open a list while the {0:?} list is open")]
    ListAlreadyOpen(ListKind),

    /// A strip violated the terminator rule: it must be non-empty and its
    /// final vertex (and only that vertex) must carry the end-of-strip flag.
    #[error("strip must be non-empty and terminated exactly once, by its final vertex")]
    MalformedStrip,

    /// A direct-path operation requiring an open frame bracket was called
    /// outside `begin_frame`/`end_frame`.
    #[error("direct render operation outside a begin_frame/end_frame bracket")]
    FrameNotOpen,

    /// Device-visible memory could not be obtained.
    #[error("device memory allocation failed")]
    AllocationFailed,

    /// An allocated region does not satisfy the device's burst alignment.
    /// Fatal for the direct path: misaligned bursts corrupt adjacent memory
    /// rather than failing visibly, so the buffer stays unusable until a
    /// successful re-init.
    #[error("{region:?} region does not satisfy the {align}-byte device alignment", align = crate::wire::BURST_ALIGN)]
    AlignmentError { region: BufferRegion },

    /// The device never signalled readiness. Fatal; not retried internally.
    #[error("device did not signal readiness within {waited:?}")]
    DeviceTimeout { waited: Duration },

    /// The direct render buffer ran out of staging slots for this frame.
    #[error("direct render buffer is full ({capacity} slots)")]
    BufferExhausted { capacity: u32 },
}
