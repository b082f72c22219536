//! World state and core simulation types
//!
//! `WorldState` is owned by the simulation; everything else reads it.

use std::collections::{HashSet, VecDeque};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::obstacle::{Obstacle, ObstacleFactory, ObstacleId};
use super::profile::Profile;
use crate::consts::*;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for the first flap
    Idle,
    /// Active gameplay
    Running,
    /// Suspended by the player
    Paused,
    /// Crashed; only a restart leaves this phase
    Terminal,
}

/// The player-controlled flyer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// x never changes within a session
    pub pos: Vec2,
    /// Vertical velocity (positive = down)
    pub vy: f32,
    pub radius: f32,
}

impl Entity {
    /// Spawn at the mode-independent start position
    pub fn spawn(profile: &Profile) -> Self {
        let vp = profile.viewport;
        Self {
            pos: Vec2::new(vp.width * START_X_FRACTION, vp.height * START_Y_FRACTION),
            vy: 0.0,
            radius: profile.entity_radius,
        }
    }

    /// Set vertical velocity to the flap impulse. Repeated flaps overwrite,
    /// they do not stack.
    pub fn flap(&mut self, impulse: f32) {
        self.vy = impulse;
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    /// Display-only tilt angle in radians
    pub fn tilt(&self) -> f32 {
        (self.vy * TILT_PER_VELOCITY).clamp(TILT_MIN, TILT_MAX)
    }
}

/// Complete mutable simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    pub entity: Entity,
    /// Ordered left to right; front is the oldest
    pub obstacles: VecDeque<Obstacle>,
    pub score: u64,
    /// Obstacles already credited, by identity
    pub scored: HashSet<ObstacleId>,
    pub phase: SessionPhase,
    /// Cosmetic animation clock, advanced once per tick
    pub ticks: u64,
    next_obstacle_id: ObstacleId,
}

impl WorldState {
    /// Fresh idle world for the given profile
    pub fn new<R: Rng + ?Sized>(profile: &Profile, rng: &mut R) -> Self {
        let mut next_obstacle_id = ObstacleId(1);
        let obstacles = ObstacleFactory::new(profile).generate_initial(&mut next_obstacle_id, rng);

        Self {
            entity: Entity::spawn(profile),
            obstacles,
            score: 0,
            scored: HashSet::new(),
            phase: SessionPhase::Idle,
            ticks: 0,
            next_obstacle_id,
        }
    }

    /// Re-seed everything for a new session in the given phase
    pub fn reset<R: Rng + ?Sized>(&mut self, profile: &Profile, rng: &mut R, phase: SessionPhase) {
        *self = Self::new(profile, rng);
        self.phase = phase;
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, SessionPhase::Running | SessionPhase::Paused)
    }

    pub fn is_paused(&self) -> bool {
        self.phase == SessionPhase::Paused
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == SessionPhase::Terminal
    }

    /// Whether a tick would advance the simulation
    pub fn can_advance(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Refill an empty queue with the opening layout
    pub fn refill_obstacles<R: Rng + ?Sized>(&mut self, factory: &ObstacleFactory, rng: &mut R) {
        self.obstacles = factory.generate_initial(&mut self.next_obstacle_id, rng);
    }

    /// Append a new obstacle one spacing after the current last one
    pub fn push_next_obstacle<R: Rng + ?Sized>(&mut self, factory: &ObstacleFactory, rng: &mut R) {
        match self.obstacles.back().copied() {
            Some(last) => {
                let next = factory.make_after(&last, &mut self.next_obstacle_id, rng);
                self.obstacles.push_back(next);
            }
            None => self.refill_obstacles(factory, rng),
        }
    }

    /// Drop an obstacle from the front, forgetting its scoring record
    pub fn pop_front_obstacle(&mut self) -> Option<Obstacle> {
        let obstacle = self.obstacles.pop_front()?;
        self.scored.remove(&obstacle.id);
        Some(obstacle)
    }
}
