use glam::Vec2;

pub(crate) const CONTENT_SIZE: u32 = 512;

/// CPU-side RGBA8 image shown under the ripple.
pub(crate) struct ContentImage {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) rgba: Vec<u8>,
}

impl ContentImage {
    /// Checkerboard over a soft radial gradient; fine detail makes the distortion readable.
    pub(crate) fn procedural(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let center = Vec2::new(width as f32, height as f32) * 0.5;
        let max_r = center.length().max(1.0);
        let cell = (width.min(height) / 16).max(1);
        let mut rgba = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let r = (Vec2::new(x as f32, y as f32) - center).length() / max_r;
                let checker = ((x / cell) + (y / cell)) % 2 == 0;
                let shade = if checker { 1.0 } else { 0.55 };
                let base = [
                    0.95 - 0.55 * r,
                    0.35 + 0.35 * (1.0 - r),
                    0.30 + 0.60 * r,
                ];
                for c in base {
                    rgba.push(((c * shade).clamp(0.0, 1.0) * 255.0) as u8);
                }
                rgba.push(255);
            }
        }
        Self {
            width,
            height,
            rgba,
        }
    }
}
