mod content;
mod gpu;
mod input;
mod preview;
mod processor;

use clap::Parser;
use content::{ContentImage, CONTENT_SIZE};
use gpu::GpuState;
use input::{key_action, KeyAction};
use preview::{parse_seconds, window_title, ResetTimer, WindowFrames};
use processor::DrawPlan;
use ripple_core::{
    select_renderer, Point2D, RippleController, RippleOptions, Rippling, Size2D, Slider,
    SystemClock, DEFAULT_ABERRATION, DEFAULT_INTENSITY, DEFAULT_RING_THICKNESS, DEFAULT_SPEED,
    PREVIEW_RIPPLE_SECS,
};
use std::time::{Duration, Instant};
use winit::{
    dpi::LogicalSize,
    event::*,
    event_loop::{ControlFlow, EventLoop},
    keyboard::Key,
    window::WindowBuilder,
};

type Preview<'w> = Rippling<DrawPlan, SystemClock, WindowFrames<'w>>;

/// Tap anywhere in the window to ripple the image.
#[derive(Parser, Debug)]
#[command(name = "ripple-native", version, about)]
struct Args {
    /// Ring expansion speed (forwarded multiplied by 1.35)
    #[arg(long, default_value_t = DEFAULT_SPEED)]
    speed: f32,
    /// Chromatic offset magnitude
    #[arg(long, default_value_t = DEFAULT_ABERRATION)]
    aberration: f32,
    /// Width of the distortion ring
    #[arg(long, default_value_t = DEFAULT_RING_THICKNESS)]
    ring_thickness: f32,
    /// Displacement magnitude
    #[arg(long, default_value_t = DEFAULT_INTENSITY)]
    intensity: f32,
    /// Seconds after a tap before the ripple is switched off
    #[arg(long, default_value_t = PREVIEW_RIPPLE_SECS, value_parser = parse_seconds)]
    duration: f32,
    /// Skip the ripple pass and draw the content unmodified
    #[arg(long)]
    passthrough: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    let args = Args::parse();

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Ripple preview")
        .with_inner_size(LogicalSize::new(720.0, 720.0))
        .build(&event_loop)?;

    let content = ContentImage::procedural(CONTENT_SIZE, CONTENT_SIZE);
    let mut gpu = pollster::block_on(GpuState::new(&window, &content, args.passthrough))?;
    let renderer = select_renderer(gpu.support(), || gpu.ripple_processor());
    let mut rippling: Preview<'_> =
        Rippling::with_parts(RippleController::new(), renderer, WindowFrames::new(&window));
    let (w, h) = gpu.size();
    rippling.resize(Size2D::new(w as f32, h as f32));
    rippling.update(
        RippleOptions::default()
            .speed(args.speed)
            .aberration(args.aberration)
            .ring_thickness(args.ring_thickness)
            .intensity(args.intensity),
    );

    let mut timer = ResetTimer::new(Duration::from_secs_f32(args.duration));
    let mut cursor = Point2D::ZERO;
    let mut selected = Slider::Speed;
    window.set_title(&window_title(
        rippling.options(),
        selected,
        rippling.is_passthrough(),
    ));
    log::info!("click or tap to ripple; 1-4 select a slider, arrows adjust, space replays");

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => {
                gpu.resize(size);
                let (w, h) = gpu.size();
                rippling.resize(Size2D::new(w as f32, h as f32));
                gpu.window.request_redraw();
            }
            WindowEvent::CursorMoved { position, .. } => {
                cursor = Point2D::new(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => tap(&mut rippling, &mut timer, cursor),
            WindowEvent::Touch(touch) if touch.phase == TouchPhase::Started => {
                let at = Point2D::new(touch.location.x as f32, touch.location.y as f32);
                tap(&mut rippling, &mut timer, at);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if let Key::Named(winit::keyboard::NamedKey::Escape) = logical_key {
                    elwt.exit();
                    return;
                }
                match key_action(&logical_key) {
                    Some(KeyAction::Select(slider)) => selected = slider,
                    Some(KeyAction::NextSlider) => selected = selected.next(),
                    Some(KeyAction::Nudge(steps)) => {
                        let mut params = rippling.options().parameters();
                        let v = selected.nudge(&mut params, steps);
                        log::info!("{} = {:.2}", selected.label(), v);
                        let options = rippling.options().with_parameters(&params);
                        rippling.update(options);
                    }
                    Some(KeyAction::Replay) => {
                        let (w, h) = gpu.size();
                        let center = Point2D::new(w as f32, h as f32) * 0.5;
                        tap(&mut rippling, &mut timer, center);
                    }
                    None => return,
                }
                gpu.window.set_title(&window_title(
                    rippling.options(),
                    selected,
                    rippling.is_passthrough(),
                ));
            }
            WindowEvent::RedrawRequested => {
                let plan = rippling.frame_now(DrawPlan::Content);
                match gpu.render(&plan) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost) => gpu.resize(gpu.window.inner_size()),
                    Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                    Err(e) => log::warn!("surface error: {e:?}"),
                }
            }
            _ => {}
        },
        Event::AboutToWait => {
            if timer.fire(Instant::now()) {
                let options = rippling.options().rippling(false);
                rippling.update(options);
            }
            if rippling.scheduler().continuous() {
                gpu.window.request_redraw();
                elwt.set_control_flow(ControlFlow::Poll);
            } else if let Some(deadline) = timer.deadline() {
                elwt.set_control_flow(ControlFlow::WaitUntil(deadline));
            } else {
                elwt.set_control_flow(ControlFlow::Wait);
            }
        }
        _ => {}
    })?;
    Ok(())
}

/// Host side of a tap: restart the ripple and schedule its reset.
fn tap(rippling: &mut Preview<'_>, timer: &mut ResetTimer, at: Point2D) {
    log::debug!("tap at ({:.0}, {:.0})", at.x, at.y);
    rippling.retrigger(at);
    timer.arm(Instant::now());
}
