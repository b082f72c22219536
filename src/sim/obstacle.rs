//! Obstacle generation
//!
//! Every obstacle the factory produces has its gap fully inside the playfield,
//! with a margin above and below, whatever the RNG returns.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::profile::Profile;
use crate::consts::{GAP_MARGIN_FRACTION, INITIAL_OBSTACLES};

/// Identity of an obstacle, unique within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObstacleId(pub u64);

impl ObstacleId {
    /// Return the current id and advance to the next one
    pub fn bump(&mut self) -> ObstacleId {
        let id = *self;
        self.0 += 1;
        id
    }
}

/// A top/bottom barrier pair with a passable gap between them.
///
/// Width and gap height are profile constants, not stored per obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: ObstacleId,
    /// Left edge
    pub x: f32,
    pub gap_top: f32,
}

impl Obstacle {
    pub fn right_edge(&self, width: f32) -> f32 {
        self.x + width
    }

    pub fn center_x(&self, width: f32) -> f32 {
        self.x + width / 2.0
    }

    pub fn gap_bottom(&self, gap_height: f32) -> f32 {
        self.gap_top + gap_height
    }
}

/// Builds obstacles for one profile
#[derive(Debug, Clone, Copy)]
pub struct ObstacleFactory {
    margin: f32,
    min_top: f32,
    max_top: f32,
    spacing: f32,
    start_x: f32,
}

impl ObstacleFactory {
    pub fn new(profile: &Profile) -> Self {
        let margin = GAP_MARGIN_FRACTION * profile.viewport.height;
        let min_top = margin;
        let max_top = profile.ground_y - margin - profile.gap_height;
        // Degenerate viewports collapse the range to a single value
        let (min_top, max_top) = if min_top > max_top {
            let top = max_top.max(0.0);
            (top, top)
        } else {
            (min_top, max_top)
        };

        Self {
            margin,
            min_top,
            max_top,
            spacing: profile.spacing,
            start_x: profile.viewport.width,
        }
    }

    /// Margin kept above and below every gap
    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Inclusive range of allowed gap-top values
    pub fn gap_top_range(&self) -> (f32, f32) {
        (self.min_top, self.max_top)
    }

    /// Create one obstacle with its left edge at `x` and a uniformly random
    /// integer gap top inside the allowed range.
    pub fn make_at<R: Rng + ?Sized>(&self, id: ObstacleId, x: f32, rng: &mut R) -> Obstacle {
        let lo = self.min_top.ceil();
        let hi = self.max_top.floor();
        let gap_top = if lo < hi {
            rng.random_range(lo as i64..=hi as i64) as f32
        } else if lo == hi {
            lo
        } else {
            // Range narrower than one pixel
            self.min_top
        };

        Obstacle { id, x, gap_top }
    }

    /// Seed the opening queue: a fixed count of obstacles starting at the
    /// right edge of the viewport, `spacing` apart.
    pub fn generate_initial<R: Rng + ?Sized>(
        &self,
        next_id: &mut ObstacleId,
        rng: &mut R,
    ) -> VecDeque<Obstacle> {
        (0..INITIAL_OBSTACLES)
            .map(|i| {
                let x = self.start_x + i as f32 * self.spacing;
                self.make_at(next_id.bump(), x, rng)
            })
            .collect()
    }

    /// Obstacle that follows `last` in the queue
    pub fn make_after<R: Rng + ?Sized>(
        &self,
        last: &Obstacle,
        next_id: &mut ObstacleId,
        rng: &mut R,
    ) -> Obstacle {
        self.make_at(next_id.bump(), last.x + self.spacing, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::profile::{Mode, Viewport};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_initial_queue_layout() {
        let profile = Profile::compute(Mode::Normal, Viewport::new(960.0, 480.0));
        let factory = ObstacleFactory::new(&profile);
        let mut rng = Pcg32::seed_from_u64(7);
        let mut next = ObstacleId(1);

        let queue = factory.generate_initial(&mut next, &mut rng);
        assert_eq!(queue.len(), INITIAL_OBSTACLES);
        assert_eq!(next, ObstacleId(1 + INITIAL_OBSTACLES as u64));
        assert_eq!(queue[0].x, 960.0);
        for pair in queue.iter().collect::<Vec<_>>().windows(2) {
            assert!((pair[1].x - pair[0].x - profile.spacing).abs() < 1e-3);
            assert!(pair[1].id > pair[0].id);
        }
    }

    #[test]
    fn test_gap_top_is_integer() {
        let profile = Profile::compute(Mode::Easy, Viewport::new(800.0, 400.0));
        let factory = ObstacleFactory::new(&profile);
        let mut rng = Pcg32::seed_from_u64(3);
        for i in 0..50 {
            let o = factory.make_at(ObstacleId(i), 0.0, &mut rng);
            assert_eq!(o.gap_top, o.gap_top.round());
        }
    }

    #[test]
    fn test_degenerate_viewport_collapses_range() {
        let profile = Profile::compute(Mode::Easy, Viewport::new(40.0, 50.0));
        let factory = ObstacleFactory::new(&profile);
        let (lo, hi) = factory.gap_top_range();
        assert_eq!(lo, hi);
        assert!(lo >= 0.0);

        let mut rng = Pcg32::seed_from_u64(11);
        let o = factory.make_at(ObstacleId(0), 10.0, &mut rng);
        assert!(o.gap_top.is_finite());
    }

    proptest! {
        #[test]
        fn prop_gap_always_fits_playfield(
            w in 320.0f32..4000.0,
            h in 240.0f32..2000.0,
            mode_idx in 0usize..3,
            seed in any::<u64>(),
        ) {
            let profile = Profile::compute(Mode::ALL[mode_idx], Viewport::new(w, h));
            let factory = ObstacleFactory::new(&profile);
            let margin = factory.margin();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut next = ObstacleId(0);

            for o in factory.generate_initial(&mut next, &mut rng) {
                prop_assert!(o.gap_top >= margin - 1e-3);
                prop_assert!(o.gap_bottom(profile.gap_height) <= profile.ground_y - margin + 1e-3);
            }
        }
    }
}
