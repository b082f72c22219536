//! Collision tests between the entity, obstacles and the playfield bounds
//!
//! The entity is treated as its axis-aligned extent `[x-r, x+r] x [y-r, y+r]`.

use super::obstacle::Obstacle;
use super::state::Entity;

/// Whether the entity's horizontal extent overlaps the obstacle's columns
pub fn in_range(entity: &Entity, obstacle: &Obstacle, width: f32) -> bool {
    entity.pos.x + entity.radius > obstacle.x && entity.pos.x - entity.radius < obstacle.right_edge(width)
}

/// Whether the entity's vertical extent lies entirely inside the gap
pub fn within_gap(entity: &Entity, obstacle: &Obstacle, gap_height: f32) -> bool {
    entity.top() >= obstacle.gap_top && entity.bottom() <= obstacle.gap_bottom(gap_height)
}

/// Whether the entity hits the obstacle this tick
pub fn hits_obstacle(entity: &Entity, obstacle: &Obstacle, width: f32, gap_height: f32) -> bool {
    in_range(entity, obstacle, width) && !within_gap(entity, obstacle, gap_height)
}

pub fn below_ground(entity: &Entity, ground_y: f32) -> bool {
    entity.bottom() > ground_y
}

pub fn above_ceiling(entity: &Entity) -> bool {
    entity.top() < 0.0
}
