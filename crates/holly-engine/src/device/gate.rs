//! The readiness gate: the single synchronization point between the CPU
//! producer and the device consumer.
//!
//! No lock is involved — the scene state machine guarantees only one frame
//! is ever being built — so backpressure reduces to polling the device's
//! readiness signal.

use std::thread;
use std::time::{Duration, Instant};

use crate::error::SubmitError;

use super::sink::DeviceSink;

/// Blocks until `dev` signals readiness, yielding the thread between polls.
///
/// A device that stays busy past `timeout` is reported as
/// [`SubmitError::DeviceTimeout`] — a stalled device is fatal at this layer
/// and is never retried internally.
pub fn wait<D: DeviceSink + ?Sized>(dev: &mut D, timeout: Duration) -> Result<(), SubmitError> {
    let deadline = Instant::now() + timeout;
    loop {
        if dev.ready() {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(SubmitError::DeviceTimeout { waited: timeout });
        }
        thread::yield_now();
    }
}

#[cfg(test)]
mod tests {
    use std::alloc::Layout;
    use std::ptr::NonNull;

    use super::*;
    use crate::device::SoftSink;
    use crate::stats::FrameStats;
    use crate::wire::Burst;

    /// A sink whose readiness signal never arrives.
    struct StalledSink;

    impl DeviceSink for StalledSink {
        fn alloc(&mut self, _: Layout) -> Result<NonNull<u8>, SubmitError> {
            Err(SubmitError::AllocationFailed)
        }
        unsafe fn free(&mut self, _: NonNull<u8>, _: Layout) {}
        fn submit(&mut self, _: &Burst) -> Result<(), SubmitError> {
            Ok(())
        }
        fn flush_region(&mut self, _: NonNull<u8>, _: usize) {}
        fn start_render(&mut self, _: [f32; 3]) {}
        fn ready(&mut self) -> bool {
            false
        }
        fn stats(&self) -> FrameStats {
            FrameStats::default()
        }
    }

    #[test]
    fn idle_device_passes_immediately() {
        let mut dev = SoftSink::new();
        assert_eq!(wait(&mut dev, Duration::from_millis(10)), Ok(()));
    }

    #[test]
    fn busy_device_is_polled_until_ready() {
        let mut dev = SoftSink::with_latency(3);
        dev.start_render([0.0; 3]);
        assert_eq!(wait(&mut dev, Duration::from_secs(1)), Ok(()));
    }

    #[test]
    fn stalled_device_times_out() {
        let timeout = Duration::from_millis(20);
        let err = wait(&mut StalledSink, timeout).unwrap_err();
        assert_eq!(err, SubmitError::DeviceTimeout { waited: timeout });
    }
}
