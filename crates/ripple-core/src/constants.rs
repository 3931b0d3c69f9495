// Shared ripple tuning constants used by the controller and the preview host.

// Fixed multiplier applied to `speed` when it is forwarded to the effect processor
pub const SPEED_SCALE: f32 = 1.35;

// Parameter defaults
pub const DEFAULT_SPEED: f32 = 1.0;
pub const DEFAULT_ABERRATION: f32 = 0.2;
pub const DEFAULT_RING_THICKNESS: f32 = 0.45;
pub const DEFAULT_INTENSITY: f32 = 0.15;

// Preview slider ranges (inclusive)
pub const SPEED_RANGE: (f32, f32) = (0.5, 2.5);
pub const ABERRATION_RANGE: (f32, f32) = (0.0, 1.0);
pub const RING_THICKNESS_RANGE: (f32, f32) = (0.0, 1.0);
pub const INTENSITY_RANGE: (f32, f32) = (0.0, 1.0);
pub const SLIDER_STEP: f32 = 0.05;

// How long the preview keeps `is_rippling` set after a tap (seconds)
pub const PREVIEW_RIPPLE_SECS: f32 = 1.5;
