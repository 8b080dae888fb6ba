//! Frame scheduling seam between the animator and the host's refresh timing.

/// Identifies one outstanding frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Requests and cancels display frames.
///
/// A host delivers a granted request by calling
/// [`BackgroundAnimator::on_frame`](crate::BackgroundAnimator::on_frame) with
/// the returned handle. A cancelled handle must never be delivered.
pub trait FrameScheduler {
    /// Ask for one frame callback.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw an outstanding request. Unknown handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// A scheduler driven by hand, for tests and headless stepping.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Vec<FrameHandle>,
    requests: usize,
    cancellations: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests not yet delivered or cancelled.
    pub fn pending(&self) -> &[FrameHandle] {
        &self.pending
    }

    /// Remove and return every pending request, oldest first.
    pub fn take_due(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending)
    }

    /// Total number of `request_frame` calls.
    pub fn request_count(&self) -> usize {
        self.requests
    }

    /// Total number of effective `cancel_frame` calls.
    pub fn cancel_count(&self) -> usize {
        self.cancellations
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        self.requests += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.pending.len();
        self.pending.retain(|h| *h != handle);
        if self.pending.len() != before {
            self.cancellations += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_and_take() {
        let mut sched = ManualScheduler::new();
        let a = sched.request_frame();
        let b = sched.request_frame();
        assert_ne!(a, b);
        assert_eq!(sched.take_due(), vec![a, b]);
        assert!(sched.pending().is_empty());
        assert_eq!(sched.request_count(), 2);
    }

    #[test]
    fn test_cancel() {
        let mut sched = ManualScheduler::new();
        let a = sched.request_frame();
        sched.cancel_frame(a);
        sched.cancel_frame(a);
        assert!(sched.pending().is_empty());
        assert_eq!(sched.cancel_count(), 1);
    }
}
