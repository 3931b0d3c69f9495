// Host-side tests for render strategy selection, per-session caching and the
// decorator's frame loop. A recording processor stands in for the GPU.

use ripple_core::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

#[derive(Default)]
struct Log {
    sessions_started: Vec<SessionId>,
    applied: Vec<RenderInvocation>,
}

/// Tags each pixel with the frame count of its session so stale state shows up.
struct RecordingProcessor {
    log: Rc<RefCell<Log>>,
}

impl EffectProcessor for RecordingProcessor {
    type Image = Vec<u32>;
    type SessionState = u32;

    fn begin_session(&mut self, invocation: &RenderInvocation) -> u32 {
        self.log.borrow_mut().sessions_started.push(invocation.session);
        0
    }

    fn apply(&mut self, image: Vec<u32>, invocation: &RenderInvocation, frames: &mut u32) -> Vec<u32> {
        *frames += 1;
        self.log.borrow_mut().applied.push(*invocation);
        image.into_iter().map(|px| px.wrapping_add(*frames)).collect()
    }
}

#[derive(Default)]
struct CountingScheduler {
    starts: u32,
    stops: u32,
    running: bool,
}

impl FrameScheduler for CountingScheduler {
    fn start_frames(&mut self) {
        self.starts += 1;
        self.running = true;
    }
    fn stop_frames(&mut self) {
        self.stops += 1;
        self.running = false;
    }
}

fn content() -> Vec<u32> {
    (0..64u32).map(|i| i.wrapping_mul(2_654_435_761)).collect()
}

fn make_rippling(
    support: EffectSupport,
) -> (
    Rippling<Vec<u32>, ManualClock, CountingScheduler>,
    Rc<RefCell<Log>>,
) {
    let log = Rc::new(RefCell::new(Log::default()));
    let processor_log = log.clone();
    let renderer = select_renderer(&support, move || RecordingProcessor { log: processor_log });
    let mut controller = RippleController::with_clock(ManualClock::default());
    controller.resize(Size2D::new(320.0, 240.0));
    let r = Rippling::with_parts(controller, renderer, CountingScheduler::default());
    (r, log)
}

#[test]
fn effect_renderer_prepares_state_once_per_session() {
    let (mut r, log) = make_rippling(EffectSupport::Available);
    r.update(RippleOptions::default().rippling(true));
    for _ in 0..5 {
        let _ = r.frame_now(content());
    }
    assert_eq!(log.borrow().sessions_started.len(), 1);
    assert_eq!(log.borrow().applied.len(), 5);
}

#[test]
fn retrigger_discards_previous_session_state() {
    let (mut r, log) = make_rippling(EffectSupport::Available);
    r.update(RippleOptions::default().rippling(true));
    let _ = r.frame_now(content());
    let _ = r.frame_now(content());
    let third = r.frame_now(content());

    r.retrigger(Point2D::new(100.0, 80.0));
    let fresh = r.frame_now(content());

    // frame counter restarted at 1 for the new session
    let base = content();
    assert_eq!(third[0], base[0].wrapping_add(3));
    assert_eq!(fresh[0], base[0].wrapping_add(1));

    let log = log.borrow();
    assert_eq!(log.sessions_started.len(), 2);
    assert!(log.sessions_started[0] < log.sessions_started[1]);
    let last = log.applied.last().unwrap();
    assert_eq!(last.center, Point2D::new(100.0, 80.0));
    assert_eq!(last.elapsed, 0.0);
}

#[test]
fn processor_receives_scaled_inputs_each_frame() {
    let (mut r, log) = make_rippling(EffectSupport::Available);
    r.update(
        RippleOptions::default()
            .speed(2.0)
            .aberration(0.6)
            .ring_thickness(0.3)
            .intensity(0.5)
            .trigger_point(Point2D::new(12.0, 34.0))
            .rippling(true),
    );
    r.controller().clock().advance(Duration::from_millis(250));
    let _ = r.frame_now(content());
    let log = log.borrow();
    let inv = log.applied[0];
    assert!((inv.speed - 2.7).abs() < 1e-6);
    assert_eq!(inv.aberration, 0.6);
    assert_eq!(inv.ring_thickness, 0.3);
    assert_eq!(inv.intensity, 0.5);
    assert_eq!(inv.center, Point2D::new(12.0, 34.0));
    assert_eq!(inv.viewport, Size2D::new(320.0, 240.0));
    assert!((inv.elapsed - 0.25).abs() < 1e-4);
}

#[test]
fn inactive_decorator_returns_content_unchanged() {
    let (mut r, log) = make_rippling(EffectSupport::Available);
    assert_eq!(r.frame_now(content()), content());
    r.update(RippleOptions::default().rippling(true));
    let _ = r.frame_now(content());
    r.update(RippleOptions::default().rippling(false));
    assert_eq!(r.frame_now(content()), content());
    assert_eq!(log.borrow().applied.len(), 1);
}

#[test]
fn unavailable_processor_is_identical_to_undecorated_content() {
    let option_sets = [
        RippleOptions::default().rippling(true),
        RippleOptions::default()
            .speed(2.5)
            .intensity(-1.0)
            .trigger_point(Point2D::new(5.0, 5.0))
            .rippling(true),
        RippleOptions::default(),
    ];
    for opts in option_sets {
        let (mut r, log) = make_rippling(EffectSupport::unavailable("no shader support"));
        assert!(r.is_passthrough());
        r.update(opts);
        r.controller().clock().advance(Duration::from_millis(40));
        assert_eq!(r.frame_now(content()), content());
        assert!(log.borrow().sessions_started.is_empty());
        assert!(log.borrow().applied.is_empty());
    }
}

#[test]
fn frames_are_registered_only_while_active() {
    let (mut r, _log) = make_rippling(EffectSupport::Available);
    assert!(!r.is_animating());
    r.update(RippleOptions::default().rippling(true));
    r.retrigger(Point2D::new(1.0, 1.0));
    r.update(RippleOptions::default().trigger_point(Point2D::new(2.0, 2.0)).rippling(true));
    assert!(r.is_animating());
    assert_eq!(r.scheduler().starts, 1);
    assert_eq!(r.scheduler().stops, 0);

    r.update(RippleOptions::default().rippling(false));
    assert!(!r.is_animating());
    assert!(!r.scheduler().running);
    assert_eq!(r.scheduler().stops, 1);

    // idle updates do not touch the scheduler
    r.update(RippleOptions::default().rippling(false));
    assert_eq!(r.scheduler().stops, 1);

    r.update(RippleOptions::default().rippling(true));
    assert_eq!(r.scheduler().starts, 2);
}

#[test]
fn changing_options_while_rippling_restarts_the_session() {
    let (mut r, _log) = make_rippling(EffectSupport::Available);
    let opts = RippleOptions::default().rippling(true);
    r.update(opts);
    let first = r.state();
    r.controller().clock().advance(Duration::from_millis(500));
    r.update(opts.intensity(0.4));
    assert_ne!(r.state(), first);
    let session = r.controller().session().unwrap();
    assert_eq!(session.parameters().intensity, 0.4);
    assert_eq!(session.elapsed_at(r.controller().clock().now()), Duration::ZERO);
}

#[test]
fn with_processor_skips_the_factory_when_unavailable() {
    let built = Rc::new(Cell::new(false));
    let flag = built.clone();
    let log = Rc::new(RefCell::new(Log::default()));
    let mut r: Rippling<Vec<u32>> =
        Rippling::with_processor(&EffectSupport::unavailable("no shader support"), move || {
            flag.set(true);
            RecordingProcessor { log }
        });
    assert!(r.is_passthrough());
    assert!(!built.get());
    r.retrigger(Point2D::new(10.0, 10.0));
    assert_eq!(r.frame_now(content()), content());
}

#[test]
fn with_processor_applies_the_effect_when_available() {
    let built = Rc::new(Cell::new(false));
    let flag = built.clone();
    let log = Rc::new(RefCell::new(Log::default()));
    let processor_log = log.clone();
    let mut r: Rippling<Vec<u32>> =
        Rippling::with_processor(&EffectSupport::Available, move || {
            flag.set(true);
            RecordingProcessor { log: processor_log }
        });
    assert!(built.get());
    assert!(!r.is_passthrough());
    r.update(RippleOptions::default().rippling(true));
    assert_ne!(r.frame_now(content()), content());
    assert_eq!(log.borrow().sessions_started.len(), 1);
    assert_eq!(log.borrow().applied.len(), 1);
}

#[test]
fn effect_renderer_tracks_the_cached_session() {
    let log = Rc::new(RefCell::new(Log::default()));
    let mut renderer = EffectRenderer::new(RecordingProcessor { log: log.clone() });
    assert_eq!(renderer.cached_session(), None);
    assert!(Rc::ptr_eq(&renderer.processor().log, &log));

    let mut c = RippleController::with_clock(ManualClock::default());
    let first = c.activate(Point2D::ZERO, EffectParameters::default());
    let inv = c.tick_now().unwrap();
    let _ = renderer.render(content(), &inv);
    assert_eq!(renderer.cached_session(), Some(first));

    let second = c.activate(Point2D::new(4.0, 4.0), EffectParameters::default());
    let inv = c.tick_now().unwrap();
    let _ = renderer.render(content(), &inv);
    assert_eq!(renderer.cached_session(), Some(second));

    renderer.end_session();
    assert_eq!(renderer.cached_session(), None);
}
