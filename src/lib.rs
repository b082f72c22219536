//! Flappy Gap - A side-scrolling gap-flying arcade game
//!
//! Core modules:
//! - `sim`: Simulation core (difficulty profile, obstacles, physics tick)
//! - `renderer`: Read-only scene drawing and the WebGPU pipeline
//! - `input`: Raw events to game intents
//! - `controller`: Session lifecycle, wiring input, simulation and rendering
//! - `platform`: Frame scheduling and viewport fitting
//! - `persistence`: Best score and settings storage
//! - `autopilot`: Scripted flapping for demos and soak tests

pub mod audio;
pub mod autopilot;
pub mod controller;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use controller::GameController;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Viewport height the physics constants are tuned for
    pub const DESIGN_HEIGHT: f32 = 480.0;

    /// Obstacles seeded at session start
    pub const INITIAL_OBSTACLES: usize = 6;
    /// How far past the left edge an obstacle must be before it is recycled
    pub const RECYCLE_MARGIN: f32 = 10.0;
    /// Gap margin above/below, as a fraction of viewport height
    pub const GAP_MARGIN_FRACTION: f32 = 0.06;

    /// Entity start position, as fractions of the viewport
    pub const START_X_FRACTION: f32 = 0.18;
    pub const START_Y_FRACTION: f32 = 0.5;
    /// Entity radius at the design height
    pub const ENTITY_RADIUS: f32 = 16.0;

    /// Visual tilt (radians) per unit of vertical velocity, and its clamp
    pub const TILT_PER_VELOCITY: f32 = 0.07;
    pub const TILT_MIN: f32 = -0.45;
    pub const TILT_MAX: f32 = 1.1;

    /// Logical viewport bounds (CSS pixels), always 2:1
    pub const MIN_VIEWPORT_WIDTH: f32 = 320.0;
    pub const MAX_VIEWPORT_WIDTH: f32 = 960.0;
    pub const VIEWPORT_ASPECT: f32 = 2.0;
}
