//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame scheduling (requestAnimationFrame on web, manual elsewhere)
//! - Viewport fitting and device pixel density

pub mod scheduler;
pub mod viewport;

#[cfg(target_arch = "wasm32")]
pub use scheduler::AnimationFrameLoop;
pub use scheduler::{FrameScheduler, ManualScheduler};
pub use viewport::{ViewportFit, fit_viewport};
