//! Ripple session lifecycle and per-frame parameter derivation.
//!
//! The controller is a two-state machine (`Inactive`, `Active(session)`).
//! Every `activate` replaces the running session with a fresh one, stamped
//! with a new [`SessionId`] and start time, so the effect visibly restarts
//! from zero. `tick` derives the processor inputs for one frame from the
//! absolute start time; nothing is accumulated between frames.

use crate::clock::{Clock, SystemClock};
use crate::error::RippleError;
use crate::params::{EffectParameters, Point2D, Size2D};
use instant::Instant;
use std::time::Duration;

/// Identity of one ripple run. Strictly increasing per controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(pub u64);

/// A running ripple: when it started, where, and with which parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectSession {
    id: SessionId,
    start_time: Instant,
    parameters: EffectParameters,
}

impl EffectSession {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn start_time(&self) -> Instant {
        self.start_time
    }

    pub fn parameters(&self) -> &EffectParameters {
        &self.parameters
    }

    /// Time since the session started, zero if `now` lies before the start.
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        if now > self.start_time {
            now - self.start_time
        } else {
            Duration::ZERO
        }
    }
}

/// Fully specified input for one frame of the effect processor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderInvocation {
    pub session: SessionId,
    pub center: Point2D,
    pub viewport: Size2D,
    /// Seconds since the session started.
    pub elapsed: f32,
    /// Already multiplied by `SPEED_SCALE`.
    pub speed: f32,
    pub aberration: f32,
    pub ring_thickness: f32,
    pub intensity: f32,
}

impl RenderInvocation {
    /// The seven processor inputs in their boundary order.
    pub fn inputs(&self) -> (Point2D, Size2D, f32, f32, f32, f32, f32) {
        (
            self.center,
            self.viewport,
            self.elapsed,
            self.speed,
            self.aberration,
            self.ring_thickness,
            self.intensity,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerState {
    Inactive,
    Active(SessionId),
}

pub struct RippleController<C: Clock = SystemClock> {
    clock: C,
    session: Option<EffectSession>,
    viewport: Size2D,
    next_id: u64,
}

impl Default for RippleController<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl RippleController<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> RippleController<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            session: None,
            viewport: Size2D::ZERO,
            next_id: 0,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Start (or restart) the ripple at `at`, stamped with the clock's current time.
    pub fn activate(&mut self, at: Point2D, params: EffectParameters) -> SessionId {
        let now = self.clock.now();
        self.activate_at(now, at, params)
    }

    /// Start (or restart) the ripple with an explicit start time.
    pub fn activate_at(
        &mut self,
        now: Instant,
        at: Point2D,
        params: EffectParameters,
    ) -> SessionId {
        self.next_id += 1;
        let id = SessionId(self.next_id);
        if let Some(prev) = self.session.take() {
            log::debug!("ripple session {:?} superseded by {:?}", prev.id, id);
        } else {
            log::debug!("ripple session {:?} started at {:?}", id, at);
        }
        self.session = Some(EffectSession {
            id,
            start_time: now,
            parameters: params.with_trigger_point(at),
        });
        id
    }

    pub fn deactivate(&mut self) {
        if let Some(prev) = self.session.take() {
            log::debug!("ripple session {:?} ended", prev.id);
        }
    }

    pub fn resize(&mut self, viewport: Size2D) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Size2D {
        self.viewport
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&EffectSession> {
        self.session.as_ref()
    }

    pub fn state(&self) -> ControllerState {
        match &self.session {
            Some(s) => ControllerState::Active(s.id),
            None => ControllerState::Inactive,
        }
    }

    /// Derive this frame's processor inputs.
    pub fn tick(&self, now: Instant) -> Result<RenderInvocation, RippleError> {
        let session = self.session.as_ref().ok_or(RippleError::Inactive)?;
        let p = &session.parameters;
        Ok(RenderInvocation {
            session: session.id,
            center: p.trigger_point,
            viewport: self.viewport,
            elapsed: session.elapsed_at(now).as_secs_f32(),
            speed: p.scaled_speed(),
            aberration: p.aberration,
            ring_thickness: p.ring_thickness,
            intensity: p.intensity,
        })
    }

    /// `tick` at the clock's current time.
    pub fn tick_now(&self) -> Result<RenderInvocation, RippleError> {
        self.tick(self.clock.now())
    }
}
