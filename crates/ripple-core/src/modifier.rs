//! Host-facing decorator: wraps content and applies the ripple while the host
//! keeps `is_rippling` set.

use crate::clock::{Clock, SystemClock};
use crate::constants::*;
use crate::controller::{ControllerState, RippleController};
use crate::params::{EffectParameters, Point2D, Size2D};
use crate::renderer::{select_renderer, EffectProcessor, EffectSupport, RippleRenderer};
use crate::schedule::{FrameScheduler, FrameSubscription};
use instant::Instant;

/// Configuration surface of the decorator.
///
/// Resetting `is_rippling` (for example after a fixed duration) is the host's job.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleOptions {
    pub speed: f32,
    pub aberration: f32,
    pub ring_thickness: f32,
    pub intensity: f32,
    pub is_rippling: bool,
    pub trigger_point: Point2D,
}

impl Default for RippleOptions {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            aberration: DEFAULT_ABERRATION,
            ring_thickness: DEFAULT_RING_THICKNESS,
            intensity: DEFAULT_INTENSITY,
            is_rippling: false,
            trigger_point: Point2D::ZERO,
        }
    }
}

impl RippleOptions {
    pub fn speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn aberration(mut self, aberration: f32) -> Self {
        self.aberration = aberration;
        self
    }

    pub fn ring_thickness(mut self, ring_thickness: f32) -> Self {
        self.ring_thickness = ring_thickness;
        self
    }

    pub fn intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn rippling(mut self, is_rippling: bool) -> Self {
        self.is_rippling = is_rippling;
        self
    }

    pub fn trigger_point(mut self, point: Point2D) -> Self {
        self.trigger_point = point;
        self
    }

    pub fn with_parameters(mut self, params: &EffectParameters) -> Self {
        self.speed = params.speed;
        self.aberration = params.aberration;
        self.ring_thickness = params.ring_thickness;
        self.intensity = params.intensity;
        self.trigger_point = params.trigger_point;
        self
    }

    pub fn parameters(&self) -> EffectParameters {
        EffectParameters {
            speed: self.speed,
            aberration: self.aberration,
            ring_thickness: self.ring_thickness,
            intensity: self.intensity,
            trigger_point: self.trigger_point,
        }
    }
}

pub struct Rippling<I, C: Clock = SystemClock, S: FrameScheduler = ()> {
    controller: RippleController<C>,
    renderer: Box<dyn RippleRenderer<I>>,
    frames: FrameSubscription<S>,
    options: RippleOptions,
}

impl<I> Rippling<I> {
    pub fn new(renderer: Box<dyn RippleRenderer<I>>) -> Self {
        Self::with_parts(RippleController::new(), renderer, ())
    }

    /// Decorator over `processor`, falling back to passthrough when unsupported.
    pub fn with_processor<P, F>(support: &EffectSupport, make_processor: F) -> Self
    where
        P: EffectProcessor<Image = I> + 'static,
        F: FnOnce() -> P,
    {
        Self::new(select_renderer(support, make_processor))
    }
}

impl<I, C: Clock, S: FrameScheduler> Rippling<I, C, S> {
    pub fn with_parts(
        controller: RippleController<C>,
        renderer: Box<dyn RippleRenderer<I>>,
        scheduler: S,
    ) -> Self {
        Self {
            controller,
            renderer,
            frames: FrameSubscription::new(scheduler),
            options: RippleOptions::default(),
        }
    }

    /// Reconcile new host options into controller transitions.
    ///
    /// While rippling, any change to the options restarts the session; an
    /// identical update leaves the running session alone.
    pub fn update(&mut self, options: RippleOptions) {
        if options.is_rippling {
            if !self.controller.is_active() || options != self.options {
                self.controller
                    .activate(options.trigger_point, options.parameters());
            }
        } else if self.controller.is_active() {
            self.controller.deactivate();
            self.renderer.end_session();
        }
        self.options = options;
        self.frames.set_running(self.controller.is_active());
    }

    /// Restart the ripple at `point`, even if nothing else changed.
    pub fn retrigger(&mut self, point: Point2D) {
        let options = self.options.trigger_point(point).rippling(true);
        self.controller
            .activate(options.trigger_point, options.parameters());
        self.options = options;
        self.frames.set_running(true);
    }

    pub fn resize(&mut self, viewport: Size2D) {
        self.controller.resize(viewport);
    }

    /// Produce the frame for `now`: rippled while active, `content` otherwise.
    pub fn frame(&mut self, content: I, now: Instant) -> I {
        match self.controller.tick(now) {
            Ok(invocation) => self.renderer.render(content, &invocation),
            Err(_) => content,
        }
    }

    pub fn frame_now(&mut self, content: I) -> I {
        let now = self.controller.clock().now();
        self.frame(content, now)
    }

    pub fn options(&self) -> &RippleOptions {
        &self.options
    }

    pub fn state(&self) -> ControllerState {
        self.controller.state()
    }

    pub fn controller(&self) -> &RippleController<C> {
        &self.controller
    }

    pub fn is_animating(&self) -> bool {
        self.frames.is_running()
    }

    pub fn is_passthrough(&self) -> bool {
        self.renderer.is_passthrough()
    }

    pub fn scheduler(&self) -> &S {
        self.frames.scheduler()
    }
}
