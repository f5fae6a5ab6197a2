//! Per-refresh scheduling and the cancellable redraw loop

/// Handle of one scheduled frame callback
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Callback run once at the next display refresh
pub type FrameCallback = Box<dyn FnOnce()>;

/// Host primitive firing a callback once per display refresh
/// (`requestAnimationFrame` in the browser).
pub trait FrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;

    /// Cancel a pending callback. Unknown or already-fired handles are ignored.
    fn cancel_frame(&self, handle: FrameHandle);
}

/// Bookkeeping for a repeating redraw task built on `FrameScheduler`.
///
/// At most one cycle is pending at any time. Each activation gets a fresh
/// epoch; a cycle carrying an older epoch is rejected even if the host
/// could not retract it.
#[derive(Debug, Default)]
pub struct RedrawLoop {
    epoch: u64,
    active: bool,
    pending: Option<FrameHandle>,
}

impl RedrawLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Start the loop. Returns the new epoch, or `None` if already running.
    pub fn activate(&mut self) -> Option<u64> {
        if self.active {
            return None;
        }
        self.active = true;
        self.epoch += 1;
        Some(self.epoch)
    }

    /// Record the handle of the cycle just scheduled
    pub fn arm(&mut self, handle: FrameHandle) {
        debug_assert!(self.pending.is_none(), "second redraw cycle scheduled");
        self.pending = Some(handle);
    }

    /// Called when a cycle fires. True if it belongs to the running loop
    /// and should draw and reschedule.
    pub fn accept(&mut self, epoch: u64) -> bool {
        if !self.active || epoch != self.epoch {
            return false;
        }
        self.pending = None;
        true
    }

    /// Stop the loop, handing back the pending cycle for cancellation
    pub fn deactivate(&mut self) -> Option<FrameHandle> {
        self.active = false;
        self.pending.take()
    }
}
