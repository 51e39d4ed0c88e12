//! Time-gated target spawner

use gallery_engine::foundation::math::{Point3, Vec3};
use rand::Rng;

use crate::config::GameplayConfig;
use crate::entities::Target;

/// Drops targets around the player
///
/// At most one target per tick, and only when there are none left or more
/// than `interval` seconds have passed since the last spawn.
#[derive(Debug)]
pub struct Spawner<R: Rng> {
    rng: R,
    interval: f64,
    min_distance: i32,
    max_distance: i32,
    last_spawn: f64,
    next_sequence: u64,
}

impl<R: Rng> Spawner<R> {
    /// Create a spawner drawing offsets from `rng`
    pub fn new(rng: R, config: &GameplayConfig) -> Self {
        Self {
            rng,
            interval: config.spawn_interval,
            min_distance: config.min_target_distance,
            max_distance: config.max_target_distance,
            last_spawn: 0.0,
            next_sequence: 0,
        }
    }

    /// Run the spawn rule for the frame at time `now`
    ///
    /// Returns the spawned target, which has also been pushed onto `targets`.
    pub fn tick(&mut self, now: f64, player: &Point3, targets: &mut Vec<Target>) -> Option<Target> {
        if !targets.is_empty() && now - self.last_spawn <= self.interval {
            return None;
        }

        let target = Target {
            position: *player + self.random_offset(),
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.last_spawn = now;
        targets.push(target);

        log::debug!("Spawned target #{} at {:?}", target.sequence, target.position);
        Some(target)
    }

    /// Number of targets spawned so far
    pub fn spawned(&self) -> u64 {
        self.next_sequence
    }

    fn random_offset(&mut self) -> Vec3 {
        Vec3::new(self.axis_offset(), self.axis_offset(), self.axis_offset())
    }

    fn axis_offset(&mut self) -> f32 {
        let sign = if self.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let magnitude = self.rng.gen_range(self.min_distance..=self.max_distance);
        sign * magnitude as f32
    }
}
