//! Render strategies around the external effect processor.
//!
//! The strategy is picked once, when the host knows whether the processor is
//! usable: [`EffectRenderer`] forwards every frame to the processor, while
//! [`PassthroughRenderer`] hands the content back untouched. Per-session
//! processor state (intermediate buffers, GPU bindings) is cached under the
//! session's [`SessionId`] and never reused across sessions.

use crate::controller::{RenderInvocation, SessionId};

/// The effect-processor boundary: turns an image into its rippled version.
pub trait EffectProcessor {
    type Image;
    /// Resources that live for exactly one ripple session.
    type SessionState;

    fn begin_session(&mut self, invocation: &RenderInvocation) -> Self::SessionState;

    fn apply(
        &mut self,
        image: Self::Image,
        invocation: &RenderInvocation,
        session: &mut Self::SessionState,
    ) -> Self::Image;
}

/// Per-frame strategy used by the decorator while a session is active.
pub trait RippleRenderer<I> {
    fn render(&mut self, content: I, invocation: &RenderInvocation) -> I;

    /// Drop anything held for the current session.
    fn end_session(&mut self) {}

    fn is_passthrough(&self) -> bool {
        false
    }
}

/// Single-slot cache keyed by session identity.
///
/// Asking for a different session evicts whatever the previous one stored.
#[derive(Debug)]
pub struct SessionCache<T> {
    slot: Option<(SessionId, T)>,
}

impl<T> Default for SessionCache<T> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<T> SessionCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_insert_with(&mut self, id: SessionId, init: impl FnOnce() -> T) -> &mut T {
        let hit = matches!(&self.slot, Some((cached, _)) if *cached == id);
        if !hit {
            if let Some((stale, _)) = self.slot.take() {
                log::debug!("evicting render state of session {:?}", stale);
            }
        }
        &mut self.slot.get_or_insert_with(|| (id, init())).1
    }

    pub fn current(&self) -> Option<SessionId> {
        self.slot.as_ref().map(|(id, _)| *id)
    }

    pub fn get(&self, id: SessionId) -> Option<&T> {
        match &self.slot {
            Some((cached, value)) if *cached == id => Some(value),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}

/// Applies the effect processor, one cached session state at a time.
pub struct EffectRenderer<P: EffectProcessor> {
    processor: P,
    sessions: SessionCache<P::SessionState>,
}

impl<P: EffectProcessor> EffectRenderer<P> {
    pub fn new(processor: P) -> Self {
        Self {
            processor,
            sessions: SessionCache::new(),
        }
    }

    pub fn processor(&self) -> &P {
        &self.processor
    }

    pub fn cached_session(&self) -> Option<SessionId> {
        self.sessions.current()
    }
}

impl<P: EffectProcessor> RippleRenderer<P::Image> for EffectRenderer<P> {
    fn render(&mut self, content: P::Image, invocation: &RenderInvocation) -> P::Image {
        let processor = &mut self.processor;
        let state = self
            .sessions
            .get_or_insert_with(invocation.session, || processor.begin_session(invocation));
        processor.apply(content, invocation, state)
    }

    fn end_session(&mut self) {
        self.sessions.clear();
    }
}

/// Fallback used when the effect processor is unavailable.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassthroughRenderer;

impl<I> RippleRenderer<I> for PassthroughRenderer {
    #[inline]
    fn render(&mut self, content: I, _invocation: &RenderInvocation) -> I {
        content
    }

    fn is_passthrough(&self) -> bool {
        true
    }
}

/// Whether the host can run the effect processor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EffectSupport {
    Available,
    Unavailable { reason: String },
}

impl EffectSupport {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        EffectSupport::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, EffectSupport::Available)
    }
}

/// Pick the render strategy once, at setup.
///
/// `make_processor` only runs when the effect is available.
pub fn select_renderer<P, F>(
    support: &EffectSupport,
    make_processor: F,
) -> Box<dyn RippleRenderer<P::Image>>
where
    P: EffectProcessor + 'static,
    F: FnOnce() -> P,
{
    match support {
        EffectSupport::Available => {
            log::info!("ripple effect processor available");
            Box::new(EffectRenderer::new(make_processor()))
        }
        EffectSupport::Unavailable { reason } => {
            log::warn!("ripple effect unavailable ({reason}); rendering content unmodified");
            Box::new(PassthroughRenderer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_evicts_on_new_session() {
        let mut cache = SessionCache::new();
        *cache.get_or_insert_with(SessionId(1), || 10) += 1;
        assert_eq!(cache.get(SessionId(1)), Some(&11));
        let v = *cache.get_or_insert_with(SessionId(2), || 20);
        assert_eq!(v, 20);
        assert_eq!(cache.get(SessionId(1)), None);
        assert_eq!(cache.current(), Some(SessionId(2)));
        cache.clear();
        assert_eq!(cache.current(), None);
    }

    #[test]
    fn cache_hit_keeps_state_and_skips_init() {
        let mut cache = SessionCache::new();
        *cache.get_or_insert_with(SessionId(7), || 1) += 1;
        let v = *cache.get_or_insert_with(SessionId(7), || panic!("re-initialised"));
        assert_eq!(v, 2);
    }

    #[test]
    fn passthrough_reports_itself() {
        let r: &dyn RippleRenderer<u8> = &PassthroughRenderer;
        assert!(r.is_passthrough());
    }

    #[test]
    fn support_availability() {
        assert!(EffectSupport::Available.is_available());
        assert!(!EffectSupport::unavailable("no adapter").is_available());
    }
}
