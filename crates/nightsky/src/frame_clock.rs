//! Fixed-rate frame scheduler for the terminal event loop.

use std::time::{Duration, Instant};

use nightsky_background::{FrameHandle, FrameScheduler};

/// Grants frame requests at a fixed interval, measured from the last
/// delivered frame.
#[derive(Debug)]
pub struct FrameClock {
    interval: Duration,
    origin: Instant,
    last_frame: Instant,
    next_id: u64,
    pending: Vec<(FrameHandle, Instant)>,
}

impl FrameClock {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            origin: now,
            last_frame: now,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Time until the earliest pending frame is due.
    ///
    /// `None` when nothing is pending, so the caller can block on input.
    pub fn timeout(&self, now: Instant) -> Option<Duration> {
        self.pending
            .iter()
            .map(|(_, due)| due.saturating_duration_since(now))
            .min()
    }

    /// Remove the frames due at `now`, paired with their timestamp in
    /// milliseconds since the clock started.
    pub fn take_due(&mut self, now: Instant) -> Vec<(FrameHandle, f64)> {
        let timestamp = now.duration_since(self.origin).as_secs_f64() * 1000.0;
        let mut due = Vec::new();
        self.pending.retain(|&(handle, at)| {
            if at <= now {
                due.push((handle, timestamp));
                false
            } else {
                true
            }
        });
        if !due.is_empty() {
            self.last_frame = now;
        }
        due
    }
}

impl FrameScheduler for FrameClock {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push((handle, self.last_frame + self.interval));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|(h, _)| *h != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(16);

    #[test]
    fn test_nothing_pending_blocks() {
        let clock = FrameClock::new(TICK, Instant::now());
        assert_eq!(clock.timeout(Instant::now()), None);
    }

    #[test]
    fn test_frame_due_after_interval() {
        let start = Instant::now();
        let mut clock = FrameClock::new(TICK, start);
        let handle = clock.request_frame();

        assert_eq!(clock.timeout(start), Some(TICK));
        assert!(clock.take_due(start).is_empty());

        let later = start + TICK;
        assert_eq!(clock.timeout(later), Some(Duration::ZERO));
        let due = clock.take_due(later);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].0, handle);
        assert!((due[0].1 - 16.0).abs() < 1e-6);
        assert_eq!(clock.timeout(later), None);
    }

    #[test]
    fn test_cancelled_frame_never_fires() {
        let start = Instant::now();
        let mut clock = FrameClock::new(TICK, start);
        let handle = clock.request_frame();
        clock.cancel_frame(handle);
        assert!(clock.take_due(start + TICK * 10).is_empty());
    }

    #[test]
    fn test_resume_after_long_gap_fires_immediately() {
        let start = Instant::now();
        let mut clock = FrameClock::new(TICK, start);
        let handle = clock.request_frame();
        clock.cancel_frame(handle);
        let much_later = start + Duration::from_secs(30);
        clock.request_frame();
        assert_eq!(clock.timeout(much_later), Some(Duration::ZERO));
    }
}
