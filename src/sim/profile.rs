//! Difficulty profiles
//!
//! A profile is the full set of physics and spawn constants for one session,
//! derived from the selected mode and the viewport size. It never changes
//! mid-flight: a new mode or viewport means a new profile and a fresh session.

use serde::{Deserialize, Serialize};

use crate::consts::DESIGN_HEIGHT;

/// Difficulty mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Easy, Mode::Normal, Mode::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Easy => "easy",
            Mode::Normal => "normal",
            Mode::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Mode::Easy),
            "normal" => Some(Mode::Normal),
            "hard" => Some(Mode::Hard),
            _ => None,
        }
    }

    /// Gap height multiplier (larger gap is easier)
    pub fn gap_factor(&self) -> f32 {
        match self {
            Mode::Easy => 1.35,
            Mode::Normal => 1.0,
            Mode::Hard => 0.85,
        }
    }

    /// Scroll speed at the design height, pixels per tick
    pub fn base_speed(&self) -> f32 {
        match self {
            Mode::Easy => 2.4,
            Mode::Normal => 3.0,
            Mode::Hard => 3.4,
        }
    }

    pub fn ambient(&self) -> Ambient {
        match self {
            Mode::Easy => Ambient::Dawn,
            Mode::Normal => Ambient::Day,
            Mode::Hard => Ambient::Dusk,
        }
    }
}

/// Cosmetic backdrop tone, one per mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ambient {
    Dawn,
    Day,
    Dusk,
}

impl Ambient {
    pub fn sky_color(&self) -> [f32; 4] {
        match self {
            Ambient::Dawn => [0.98, 0.80, 0.70, 1.0],
            Ambient::Day => [0.44, 0.77, 0.81, 1.0],
            Ambient::Dusk => [0.24, 0.20, 0.42, 1.0],
        }
    }
}

/// Logical viewport size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Replace zero, negative or non-finite dimensions with 1px
    pub fn normalized(self) -> Self {
        let fix = |v: f32| if v.is_finite() && v >= 1.0 { v } else { 1.0 };
        Self {
            width: fix(self.width),
            height: fix(self.height),
        }
    }
}

/// Scaled physics and spawn constants for one session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub mode: Mode,
    pub viewport: Viewport,
    /// Downward acceleration, pixels per tick²
    pub gravity: f32,
    /// Vertical velocity set by a flap (negative = upward)
    pub flap_impulse: f32,
    pub gap_height: f32,
    pub obstacle_width: f32,
    /// Distance between consecutive obstacle left edges
    pub spacing: f32,
    /// Horizontal scroll, pixels per tick
    pub speed: f32,
    /// Y coordinate of the top of the ground band
    pub ground_y: f32,
    pub entity_radius: f32,
    pub ambient: Ambient,
}

impl Profile {
    /// Derive a profile from mode and viewport. Total: degenerate viewports are
    /// normalized first.
    pub fn compute(mode: Mode, viewport: Viewport) -> Self {
        let viewport = viewport.normalized();
        let (w, h) = (viewport.width, viewport.height);
        let s = h / DESIGN_HEIGHT;

        Self {
            mode,
            viewport,
            gravity: 0.5 * s,
            flap_impulse: -9.0 * s,
            gap_height: (120.0 * s).max(0.28 * h) * mode.gap_factor(),
            obstacle_width: (0.06 * w).max(54.0),
            spacing: (0.32 * w).max(260.0),
            speed: mode.base_speed() * s,
            ground_y: h - (0.08 * h).max(36.0),
            entity_radius: crate::consts::ENTITY_RADIUS * s,
            ambient: mode.ambient(),
        }
    }

    /// Scale factor relative to the design height
    pub fn scale(&self) -> f32 {
        self.viewport.height / DESIGN_HEIGHT
    }
}
