//! Scene drawing
//!
//! A read-only pass over the world. Parallax and tilt are derived from the
//! tick counter and velocity and never feed back into the simulation.

use glam::Vec2;

use super::surface::{Align, Surface, TextLabel};
use super::vertex::colors;
use crate::sim::{Profile, SessionPhase, WorldState};

/// One band of scrolling background decoration
#[derive(Debug, Clone, Copy)]
pub struct ParallaxLayer {
    /// Distance between items
    pub step: f32,
    /// Pixels moved per tick
    pub rate: f32,
    /// Vertical position as a fraction of the ground line
    pub y_fraction: f32,
    /// Item half-size as a fraction of viewport height
    pub size_fraction: f32,
    pub color: [f32; 4],
}

impl ParallaxLayer {
    /// Horizontal position of item `index` at the given tick
    pub fn offset(&self, index: usize, ticks: u64, width: f32) -> f32 {
        let raw = index as f32 * self.step - ticks as f32 * self.rate;
        raw.rem_euclid(width + self.step)
    }

    /// Items needed to cover the viewport plus one wrap slot
    pub fn count(&self, width: f32) -> usize {
        ((width + self.step) / self.step).ceil() as usize
    }
}

/// Back to front: far clouds, near clouds, hills
pub const LAYERS: [ParallaxLayer; 3] = [
    ParallaxLayer {
        step: 260.0,
        rate: 0.25,
        y_fraction: 0.15,
        size_fraction: 0.05,
        color: colors::CLOUD,
    },
    ParallaxLayer {
        step: 200.0,
        rate: 0.6,
        y_fraction: 0.35,
        size_fraction: 0.035,
        color: colors::CLOUD,
    },
    ParallaxLayer {
        step: 150.0,
        rate: 1.2,
        y_fraction: 1.0,
        size_fraction: 0.09,
        color: colors::HILL,
    },
];

/// Draws the world onto any `Surface`
#[derive(Debug, Clone)]
pub struct Renderer {
    pub parallax: bool,
    /// Shown under the score when non-zero
    pub best_score: u64,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            parallax: true,
            best_score: 0,
        }
    }
}

impl Renderer {
    pub fn new(parallax: bool) -> Self {
        Self {
            parallax,
            ..Default::default()
        }
    }

    pub fn render<S: Surface>(&self, world: &WorldState, profile: &Profile, surface: &mut S) {
        let vp = profile.viewport;

        surface.clear(profile.ambient.sky_color());

        if self.parallax {
            self.draw_parallax(world.ticks, profile, surface);
        }

        // Ground band
        let ground = profile.ground_y;
        surface.fill_rect(
            Vec2::new(0.0, ground),
            Vec2::new(vp.width, vp.height - ground),
            colors::GROUND,
        );
        surface.fill_rect(
            Vec2::new(0.0, ground),
            Vec2::new(vp.width, (vp.height - ground) * 0.15),
            colors::GRASS,
        );

        self.draw_obstacles(world, profile, surface);
        self.draw_entity(world, surface);
        self.draw_overlay(world, profile, surface);
    }

    fn draw_parallax<S: Surface>(&self, ticks: u64, profile: &Profile, surface: &mut S) {
        let vp = profile.viewport;
        for layer in &LAYERS {
            let half = layer.size_fraction * vp.height;
            let y = profile.ground_y * layer.y_fraction;
            for i in 0..layer.count(vp.width) {
                // Shift left by one step so items enter from off-screen
                let x = layer.offset(i, ticks, vp.width) - layer.step / 2.0;
                surface.fill_ellipse(
                    Vec2::new(x, y),
                    Vec2::new(half * 1.8, half),
                    0.0,
                    layer.color,
                );
            }
        }
    }

    fn draw_obstacles<S: Surface>(&self, world: &WorldState, profile: &Profile, surface: &mut S) {
        let width = profile.obstacle_width;
        let lip = (profile.scale() * 12.0).max(4.0);

        for o in &world.obstacles {
            let bottom = o.gap_bottom(profile.gap_height);

            // Above the gap
            surface.fill_rect(Vec2::new(o.x, 0.0), Vec2::new(width, o.gap_top), colors::OBSTACLE);
            surface.fill_rect(
                Vec2::new(o.x - 3.0, o.gap_top - lip),
                Vec2::new(width + 6.0, lip),
                colors::OBSTACLE_LIP,
            );

            // Below the gap
            surface.fill_rect(
                Vec2::new(o.x, bottom),
                Vec2::new(width, profile.ground_y - bottom),
                colors::OBSTACLE,
            );
            surface.fill_rect(
                Vec2::new(o.x - 3.0, bottom),
                Vec2::new(width + 6.0, lip),
                colors::OBSTACLE_LIP,
            );
        }
    }

    fn draw_entity<S: Surface>(&self, world: &WorldState, surface: &mut S) {
        let e = &world.entity;
        let tilt = e.tilt();
        let r = e.radius;
        let facing = Vec2::from_angle(tilt);
        let local = |x: f32, y: f32| e.pos + facing.rotate(Vec2::new(x, y));

        surface.fill_ellipse(e.pos, Vec2::new(r * 1.15, r), tilt, colors::ENTITY);
        surface.fill_ellipse(local(r * 0.95, r * 0.15), Vec2::new(r * 0.45, r * 0.22), tilt, colors::BEAK);
        surface.fill_circle(local(r * 0.45, -r * 0.35), r * 0.3, colors::EYE);
        surface.fill_circle(local(r * 0.55, -r * 0.35), r * 0.13, colors::PUPIL);
    }

    fn draw_overlay<S: Surface>(&self, world: &WorldState, profile: &Profile, surface: &mut S) {
        let vp = profile.viewport;
        let s = profile.scale().max(0.5);

        surface.text(TextLabel {
            text: world.score.to_string(),
            pos: Vec2::new(vp.width / 2.0, 40.0 * s),
            size: 36.0 * s,
            align: Align::Center,
            color: colors::TEXT,
        });

        if self.best_score > 0 {
            surface.text(TextLabel {
                text: format!("Best {}", self.best_score),
                pos: Vec2::new(vp.width - 12.0 * s, 24.0 * s),
                size: 16.0 * s,
                align: Align::Right,
                color: colors::TEXT,
            });
        }

        let hint = match world.phase {
            SessionPhase::Idle => Some("Tap or press Space to start"),
            SessionPhase::Paused => Some("Paused - press P to resume"),
            SessionPhase::Terminal => Some("Game over - press Space or R to restart"),
            SessionPhase::Running => None,
        };
        if let Some(hint) = hint {
            surface.text(TextLabel {
                text: hint.to_string(),
                pos: Vec2::new(vp.width / 2.0, vp.height * 0.4),
                size: 22.0 * s,
                align: Align::Center,
                color: colors::HINT,
            });
        }
    }
}
