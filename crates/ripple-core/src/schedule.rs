/// Host hook for per-frame callbacks (animation frame requests, redraw polling).
pub trait FrameScheduler {
    fn start_frames(&mut self);
    fn stop_frames(&mut self);
}

/// No-op scheduler for hosts that redraw unconditionally.
impl FrameScheduler for () {
    fn start_frames(&mut self) {}
    fn stop_frames(&mut self) {}
}

/// Keeps a scheduler registered only while the ripple is active.
///
/// `start_frames` fires once per active span, however many times the ripple
/// is re-triggered in between.
pub struct FrameSubscription<S: FrameScheduler> {
    scheduler: S,
    running: bool,
}

impl<S: FrameScheduler> FrameSubscription<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            running: false,
        }
    }

    pub fn set_running(&mut self, running: bool) {
        if running == self.running {
            return;
        }
        self.running = running;
        if running {
            log::debug!("frame callbacks registered");
            self.scheduler.start_frames();
        } else {
            log::debug!("frame callbacks released");
            self.scheduler.stop_frames();
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}
