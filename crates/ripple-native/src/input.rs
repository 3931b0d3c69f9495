use ripple_core::Slider;
use winit::keyboard::{Key, NamedKey};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum KeyAction {
    Select(Slider),
    Nudge(i32),
    NextSlider,
    /// Re-trigger at the window center.
    Replay,
}

#[inline]
pub(crate) fn key_action(key: &Key) -> Option<KeyAction> {
    match key {
        Key::Named(NamedKey::ArrowUp) | Key::Named(NamedKey::ArrowRight) => {
            Some(KeyAction::Nudge(1))
        }
        Key::Named(NamedKey::ArrowDown) | Key::Named(NamedKey::ArrowLeft) => {
            Some(KeyAction::Nudge(-1))
        }
        Key::Named(NamedKey::Tab) => Some(KeyAction::NextSlider),
        Key::Named(NamedKey::Space) => Some(KeyAction::Replay),
        Key::Character(c) => match c.as_str() {
            "1" => Some(KeyAction::Select(Slider::Speed)),
            "2" => Some(KeyAction::Select(Slider::Aberration)),
            "3" => Some(KeyAction::Select(Slider::RingThickness)),
            "4" => Some(KeyAction::Select(Slider::Intensity)),
            "+" | "=" => Some(KeyAction::Nudge(1)),
            "-" | "_" => Some(KeyAction::Nudge(-1)),
            " " => Some(KeyAction::Replay),
            _ => None,
        },
        _ => None,
    }
}
