use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RippleError {
    /// `tick` was called while no ripple session is running.
    #[error("ripple controller is inactive; no session to tick")]
    Inactive,
}
