//! Platform-agnostic core of the tap ripple effect.
//!
//! Nothing here touches a window or a GPU. Front-ends feed interaction events
//! and frame timestamps in and get fully specified effect-processor inputs back.

pub mod clock;
pub mod constants;
pub mod controller;
pub mod error;
pub mod modifier;
pub mod params;
pub mod renderer;
pub mod schedule;

pub use clock::*;
pub use constants::*;
pub use controller::*;
pub use error::*;
pub use modifier::*;
pub use params::*;
pub use renderer::*;
pub use schedule::*;
