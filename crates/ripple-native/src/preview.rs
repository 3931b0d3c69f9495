//! Host-side preview policy: when to reset `is_rippling`, which slider is
//! selected, and how redraws are requested while a ripple runs.

use ripple_core::{FrameScheduler, RippleOptions, Slider};
use std::time::{Duration, Instant};

/// Resets `is_rippling` a fixed time after the last tap.
#[derive(Debug)]
pub(crate) struct ResetTimer {
    hold: Duration,
    deadline: Option<Instant>,
}

impl ResetTimer {
    pub(crate) fn new(hold: Duration) -> Self {
        Self {
            hold,
            deadline: None,
        }
    }

    /// A hold too long to represent leaves the timer disarmed.
    pub(crate) fn arm(&mut self, now: Instant) {
        self.deadline = now.checked_add(self.hold);
    }

    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// True exactly once when the deadline has passed.
    pub(crate) fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(d) if now >= d => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Parses `--duration`: finite, non-negative seconds that fit a `Duration`.
pub(crate) fn parse_seconds(arg: &str) -> Result<f32, String> {
    let secs: f32 = arg
        .trim()
        .parse()
        .map_err(|e| format!("`{arg}` is not a number: {e}"))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(format!("`{arg}` must be a finite, non-negative number of seconds"));
    }
    Duration::try_from_secs_f32(secs).map_err(|e| format!("`{arg}`: {e}"))?;
    Ok(secs)
}

/// Redraw scheduling for a winit window.
pub(crate) struct WindowFrames<'w> {
    window: &'w winit::window::Window,
    continuous: bool,
}

impl<'w> WindowFrames<'w> {
    pub(crate) fn new(window: &'w winit::window::Window) -> Self {
        Self {
            window,
            continuous: false,
        }
    }

    pub(crate) fn continuous(&self) -> bool {
        self.continuous
    }
}

impl FrameScheduler for WindowFrames<'_> {
    fn start_frames(&mut self) {
        self.continuous = true;
        self.window.request_redraw();
    }

    fn stop_frames(&mut self) {
        self.continuous = false;
        // one more frame to put the unmodified content back
        self.window.request_redraw();
    }
}

pub(crate) fn window_title(options: &RippleOptions, selected: Slider, passthrough: bool) -> String {
    let params = options.parameters();
    let mut title = String::from("Ripple preview");
    for s in Slider::ALL {
        let marker = if s == selected { ">" } else { " " };
        title.push_str(&format!("  {marker}{}: {:.2}", s.label(), s.get(&params)));
    }
    if passthrough {
        title.push_str("  [passthrough]");
    }
    title
}
