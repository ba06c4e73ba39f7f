//! Frame timing utilities.
//!
//! Kept free of any device coupling so timing stays testable: the software
//! sink uses a `FrameClock` to derive the frame-rate statistic, and host
//! applications can run one per render loop.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
