//! Simulation core
//!
//! All gameplay logic lives here:
//! - Difficulty profile derived from mode and viewport
//! - Obstacle generation with a passability guarantee
//! - Physics tick, collisions and scoring
//!
//! No rendering, audio or platform dependencies. Randomness is injected.

pub mod collision;
pub mod obstacle;
pub mod profile;
pub mod state;
pub mod tick;

pub use obstacle::{Obstacle, ObstacleFactory, ObstacleId};
pub use profile::{Ambient, Mode, Profile, Viewport};
pub use state::{Entity, SessionPhase, WorldState};
pub use tick::{TickEvents, tick};
