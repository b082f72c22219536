//! Simple autopilot for demos and soak tests
//!
//! Flaps whenever the next tick would carry the entity's bottom edge past the
//! bottom of the upcoming gap.

use crate::sim::{Obstacle, Profile, WorldState};

/// Clearance kept above the gap bottom
const CLEARANCE: f32 = 2.0;

/// First obstacle the entity has not fully passed
pub fn next_obstacle<'a>(world: &'a WorldState, profile: &Profile) -> Option<&'a Obstacle> {
    let e = &world.entity;
    world
        .obstacles
        .iter()
        .find(|o| o.right_edge(profile.obstacle_width) > e.pos.x - e.radius)
}

pub fn should_flap(world: &WorldState, profile: &Profile) -> bool {
    let e = &world.entity;
    let predicted_bottom = e.pos.y + e.vy + profile.gravity + e.radius;
    let limit = match next_obstacle(world, profile) {
        Some(o) => o.gap_bottom(profile.gap_height),
        None => profile.ground_y,
    };
    predicted_bottom > limit - CLEARANCE
}
