//! Discrete simulation tick
//!
//! Advances the world by one frame. Step order is fixed: integrate, scroll,
//! recycle, bounds, obstacles/scoring, animation clock.

use rand::Rng;

use super::collision;
use super::obstacle::ObstacleFactory;
use super::profile::Profile;
use super::state::{SessionPhase, WorldState};
use crate::consts::RECYCLE_MARGIN;

/// What happened during a tick, for the caller's side effects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// Obstacles credited this tick
    pub scored: u32,
    /// The best score was raised this tick
    pub best_raised: bool,
    /// The session ended this tick
    pub terminal: bool,
}

/// Advance the world by one tick.
///
/// No-op unless the session is running, unpaused and not terminal. `best` is
/// raised in step whenever the score passes it.
pub fn tick<R: Rng + ?Sized>(
    world: &mut WorldState,
    profile: &Profile,
    rng: &mut R,
    best: &mut u64,
) -> TickEvents {
    let mut events = TickEvents::default();
    if !world.can_advance() {
        return events;
    }

    // 1. Integrate
    let entity = &mut world.entity;
    entity.vy += profile.gravity;
    entity.pos.y += entity.vy;

    // 2. Scroll
    for obstacle in world.obstacles.iter_mut() {
        obstacle.x -= profile.speed;
    }

    // 3. Recycle
    let factory = ObstacleFactory::new(profile);
    if world.obstacles.is_empty() {
        world.refill_obstacles(&factory, rng);
    }
    while world
        .obstacles
        .front()
        .is_some_and(|o| o.right_edge(profile.obstacle_width) < -RECYCLE_MARGIN)
    {
        world.pop_front_obstacle();
        world.push_next_obstacle(&factory, rng);
    }

    // 4. Ground is fatal, ceiling is a soft bound
    let entity = &mut world.entity;
    if collision::below_ground(entity, profile.ground_y) {
        entity.pos.y = profile.ground_y - entity.radius;
        world.phase = SessionPhase::Terminal;
        events.terminal = true;
        return events;
    }
    if collision::above_ceiling(entity) {
        entity.pos.y = entity.radius;
        entity.vy = 0.0;
    }

    // 5. Obstacles, left to right
    let entity = world.entity;
    for obstacle in world.obstacles.iter() {
        if collision::hits_obstacle(&entity, obstacle, profile.obstacle_width, profile.gap_height) {
            world.phase = SessionPhase::Terminal;
            events.terminal = true;
            break;
        }

        if obstacle.center_x(profile.obstacle_width) < entity.pos.x
            && world.scored.insert(obstacle.id)
        {
            world.score += 1;
            events.scored += 1;
            if world.score > *best {
                *best = world.score;
                events.best_raised = true;
            }
        }
    }

    // 6. Animation clock
    world.ticks += 1;

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::{Obstacle, ObstacleId};
    use crate::sim::profile::{Mode, Viewport};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (WorldState, Profile, Pcg32) {
        let profile = Profile::compute(Mode::Normal, Viewport::new(960.0, 480.0));
        let mut rng = Pcg32::seed_from_u64(42);
        let mut world = WorldState::new(&profile, &mut rng);
        world.phase = SessionPhase::Running;
        (world, profile, rng)
    }

    /// Profile with gravity and scrolling switched off
    fn frozen(profile: &Profile) -> Profile {
        Profile {
            gravity: 0.0,
            speed: 0.0,
            ..*profile
        }
    }

    #[test]
    fn test_gravity_only_tick() {
        let (mut world, profile, mut rng) = setup();
        let mut best = 0;

        tick(&mut world, &profile, &mut rng, &mut best);
        assert_eq!(world.entity.vy, 0.5);
        assert_eq!(world.entity.pos.y, 240.5);
        assert_eq!(world.ticks, 1);
    }

    #[test]
    fn test_flap_then_tick() {
        let (mut world, profile, mut rng) = setup();
        let mut best = 0;

        world.entity.flap(profile.flap_impulse);
        tick(&mut world, &profile, &mut rng, &mut best);
        assert_eq!(world.entity.vy, -8.5);
        assert_eq!(world.entity.pos.y, 231.5);
    }

    #[test]
    fn test_obstacles_scroll() {
        let (mut world, profile, mut rng) = setup();
        let mut best = 0;
        let before: Vec<f32> = world.obstacles.iter().map(|o| o.x).collect();

        tick(&mut world, &profile, &mut rng, &mut best);
        for (o, x) in world.obstacles.iter().zip(before) {
            assert!((o.x - (x - 3.0)).abs() < 1e-4);
        }
    }

    #[test]
    fn test_ground_collision_clamps_and_ends() {
        let (mut world, profile, mut rng) = setup();
        let profile = Profile {
            ground_y: 440.0,
            ..profile
        };
        world.entity.radius = 16.0;
        world.entity.pos.y = 432.0;
        let mut best = 0;

        let events = tick(&mut world, &profile, &mut rng, &mut best);
        assert!(events.terminal);
        assert!(world.is_terminal());
        assert_eq!(world.entity.pos.y, 424.0);
        // Ended early: clock not advanced
        assert_eq!(world.ticks, 0);

        // Second call is a no-op
        let snapshot = world.clone();
        let events = tick(&mut world, &profile, &mut rng, &mut best);
        assert_eq!(events, TickEvents::default());
        assert_eq!(world.entity, snapshot.entity);
        assert_eq!(world.ticks, snapshot.ticks);
    }

    #[test]
    fn test_ceiling_is_soft() {
        let (mut world, profile, mut rng) = setup();
        world.entity.pos.y = 10.0;
        world.entity.vy = -9.0;
        let mut best = 0;

        let events = tick(&mut world, &profile, &mut rng, &mut best);
        assert!(!events.terminal);
        assert_eq!(world.entity.pos.y, world.entity.radius);
        assert_eq!(world.entity.vy, 0.0);
        assert_eq!(world.phase, SessionPhase::Running);
    }

    #[test]
    fn test_idle_and_paused_do_not_advance() {
        let (mut world, profile, mut rng) = setup();
        let mut best = 0;
        for phase in [SessionPhase::Idle, SessionPhase::Paused, SessionPhase::Terminal] {
            world.phase = phase;
            let y = world.entity.pos.y;
            tick(&mut world, &profile, &mut rng, &mut best);
            assert_eq!(world.entity.pos.y, y);
            assert_eq!(world.ticks, 0);
        }
    }

    #[test]
    fn test_obstacle_hit_outside_gap() {
        let (mut world, profile, mut rng) = setup();
        let profile = frozen(&profile);
        let x = world.entity.pos.x - 10.0;
        world.obstacles.clear();
        // Gap far below the entity
        world.obstacles.push_back(Obstacle {
            id: ObstacleId(100),
            x,
            gap_top: 300.0,
        });
        let mut best = 0;

        let events = tick(&mut world, &profile, &mut rng, &mut best);
        assert!(events.terminal);
        assert!(world.is_terminal());
        assert_eq!(world.score, 0);
    }

    #[test]
    fn test_inside_gap_survives() {
        let (mut world, profile, mut rng) = setup();
        let profile = frozen(&profile);
        let x = world.entity.pos.x - 10.0;
        let gap_top = world.entity.pos.y - profile.gap_height / 2.0;
        world.obstacles.clear();
        world.obstacles.push_back(Obstacle {
            id: ObstacleId(100),
            x,
            gap_top,
        });
        let mut best = 0;

        for _ in 0..5 {
            let events = tick(&mut world, &profile, &mut rng, &mut best);
            assert!(!events.terminal);
        }
        assert_eq!(world.phase, SessionPhase::Running);
    }

    #[test]
    fn test_score_once_per_obstacle() {
        let (mut world, profile, mut rng) = setup();
        let profile = Profile {
            gravity: 0.0,
            ..profile
        };
        let entity_x = world.entity.pos.x;
        let width = profile.obstacle_width;
        // Center sits 1px right of the entity; the next scroll crosses it
        let gap_top = world.entity.pos.y - profile.gap_height / 2.0;
        world.obstacles.clear();
        world.obstacles.push_back(Obstacle {
            id: ObstacleId(100),
            x: entity_x - width / 2.0 + 1.0,
            gap_top,
        });
        let mut best = 0;

        let events = tick(&mut world, &profile, &mut rng, &mut best);
        assert_eq!(events.scored, 1);
        assert!(events.best_raised);
        assert_eq!(world.score, 1);
        assert_eq!(best, 1);

        for _ in 0..10 {
            let events = tick(&mut world, &profile, &mut rng, &mut best);
            assert_eq!(events.scored, 0);
        }
        assert_eq!(world.score, 1);
    }

    #[test]
    fn test_recycled_slot_scores_by_identity() {
        let (mut world, profile, mut rng) = setup();
        let profile = frozen(&profile);
        let entity_x = world.entity.pos.x;
        let gap_top = world.entity.pos.y - profile.gap_height / 2.0;
        let slot_x = entity_x + 200.0;
        world.obstacles.clear();
        world.obstacles.push_back(Obstacle {
            id: ObstacleId(7),
            x: slot_x,
            gap_top,
        });
        world.scored.insert(ObstacleId(7));
        let mut best = 5;

        // Old identity leaves; a new one takes the same slot
        world.pop_front_obstacle();
        assert!(world.scored.is_empty());
        world.obstacles.push_back(Obstacle {
            id: ObstacleId(8),
            x: slot_x,
            gap_top,
        });
        let events = tick(&mut world, &profile, &mut rng, &mut best);
        assert_eq!(events.scored, 0);
        assert_eq!(best, 5);
    }

    #[test]
    fn test_best_not_lowered() {
        let (mut world, profile, mut rng) = setup();
        let mut best = 99;
        for _ in 0..20 {
            tick(&mut world, &profile, &mut rng, &mut best);
        }
        assert_eq!(best, 99);
    }

    #[test]
    fn test_recycle_keeps_queue_length_and_order() {
        let (mut world, profile, mut rng) = setup();
        let profile = Profile {
            gravity: 0.0,
            ..profile
        };
        // Entity well above every gap would crash; park it out of reach
        world.entity.pos.x = -10_000.0;
        let mut best = 0;

        let first_id = world.obstacles.front().unwrap().id;
        for _ in 0..1000 {
            tick(&mut world, &profile, &mut rng, &mut best);
        }
        assert_eq!(world.obstacles.len(), crate::consts::INITIAL_OBSTACLES);
        assert!(world.obstacles.front().unwrap().id > first_id);
        let xs: Vec<f32> = world.obstacles.iter().map(|o| o.x).collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
        assert!(xs[0] + profile.obstacle_width >= -RECYCLE_MARGIN);
    }

    #[test]
    fn test_empty_queue_is_refilled() {
        let (mut world, profile, mut rng) = setup();
        world.obstacles.clear();
        let mut best = 0;

        tick(&mut world, &profile, &mut rng, &mut best);
        assert_eq!(world.obstacles.len(), crate::consts::INITIAL_OBSTACLES);
    }
}
