//! Effect parameter types shared by the controller, the decorator and the
//! preview host.

use crate::constants::*;
use glam::Vec2;

/// Interaction coordinate in host pixel space.
pub type Point2D = Vec2;
/// Viewport extent in host pixel space.
pub type Size2D = Vec2;

/// Tunable inputs of one ripple run.
///
/// Values are passed through to the effect processor as-is. Nothing here is
/// validated or clamped; a negative `intensity` reaches the processor unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectParameters {
    pub speed: f32,
    pub aberration: f32,
    pub ring_thickness: f32,
    pub intensity: f32,
    pub trigger_point: Point2D,
}

impl Default for EffectParameters {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            aberration: DEFAULT_ABERRATION,
            ring_thickness: DEFAULT_RING_THICKNESS,
            intensity: DEFAULT_INTENSITY,
            trigger_point: Point2D::ZERO,
        }
    }
}

impl EffectParameters {
    pub fn with_trigger_point(mut self, point: Point2D) -> Self {
        self.trigger_point = point;
        self
    }

    /// Speed as seen by the effect processor.
    #[inline]
    pub fn scaled_speed(&self) -> f32 {
        self.speed * SPEED_SCALE
    }
}

/// One of the four preview sliders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slider {
    Speed,
    Aberration,
    RingThickness,
    Intensity,
}

impl Slider {
    pub const ALL: [Slider; 4] = [
        Slider::Speed,
        Slider::Aberration,
        Slider::RingThickness,
        Slider::Intensity,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Slider::Speed => "Speed",
            Slider::Aberration => "Aberration",
            Slider::RingThickness => "Thickness",
            Slider::Intensity => "Intensity",
        }
    }

    pub fn range(self) -> (f32, f32) {
        match self {
            Slider::Speed => SPEED_RANGE,
            Slider::Aberration => ABERRATION_RANGE,
            Slider::RingThickness => RING_THICKNESS_RANGE,
            Slider::Intensity => INTENSITY_RANGE,
        }
    }

    pub fn get(self, params: &EffectParameters) -> f32 {
        match self {
            Slider::Speed => params.speed,
            Slider::Aberration => params.aberration,
            Slider::RingThickness => params.ring_thickness,
            Slider::Intensity => params.intensity,
        }
    }

    pub fn set(self, params: &mut EffectParameters, value: f32) {
        match self {
            Slider::Speed => params.speed = value,
            Slider::Aberration => params.aberration = value,
            Slider::RingThickness => params.ring_thickness = value,
            Slider::Intensity => params.intensity = value,
        }
    }

    /// Move the slider by `steps` increments of `SLIDER_STEP`, staying inside its range.
    ///
    /// The clamp lives here, in the host-facing slider, not in the controller.
    pub fn nudge(self, params: &mut EffectParameters, steps: i32) -> f32 {
        let (lo, hi) = self.range();
        let v = (self.get(params) + steps as f32 * SLIDER_STEP).clamp(lo, hi);
        self.set(params, v);
        v
    }

    /// Slider shown next in the preview after this one.
    pub fn next(self) -> Slider {
        match self {
            Slider::Speed => Slider::Aberration,
            Slider::Aberration => Slider::RingThickness,
            Slider::RingThickness => Slider::Intensity,
            Slider::Intensity => Slider::Speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_published_values() {
        let p = EffectParameters::default();
        assert_eq!(p.speed, 1.0);
        assert_eq!(p.aberration, 0.2);
        assert_eq!(p.ring_thickness, 0.45);
        assert_eq!(p.intensity, 0.15);
        assert_eq!(p.trigger_point, Point2D::ZERO);
    }

    #[test]
    fn nudge_clamps_to_slider_range() {
        let mut p = EffectParameters::default();
        for _ in 0..100 {
            Slider::Speed.nudge(&mut p, 1);
        }
        assert_eq!(p.speed, SPEED_RANGE.1);
        let v = Slider::Intensity.nudge(&mut p, -100);
        assert_eq!(v, 0.0);
        assert_eq!(p.intensity, 0.0);
    }

    #[test]
    fn slider_cycle_visits_every_slider() {
        let mut s = Slider::Speed;
        for expected in Slider::ALL.iter().cycle().skip(1).take(4) {
            s = s.next();
            assert_eq!(s, *expected);
        }
    }
}
