//! Gallery entities
//!
//! Projectiles and targets are plain records. Their tunables are not stored
//! per entity; each kind has its own fixed record in the gameplay
//! configuration, looked up by [`EntityKind`] where only the radius matters.

use gallery_engine::foundation::math::{Point3, Vec3};
use serde::{Deserialize, Serialize};

/// Entity type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Fireball shot by the player
    Projectile,
    /// Stationary target
    Target,
}

/// Fixed tunables of a projectile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileParams {
    /// Distance travelled per frame
    pub speed: f32,
    /// Collision sphere radius
    pub radius: f32,
}

/// Fixed tunables of a target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetParams {
    /// Collision sphere radius, also the distance at which it reaches the player
    pub radius: f32,
}

/// A fireball in flight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    /// Current world position
    pub position: Point3,
    /// Unit flight direction
    pub direction: Vec3,
}

impl Projectile {
    /// Fire from `origin` along `aim`, starting `start_distance` ahead of it
    pub fn fired_from(origin: Point3, aim: Vec3, start_distance: f32) -> Self {
        Self {
            position: origin + aim * start_distance,
            direction: aim,
        }
    }

    /// One fixed-step Euler update
    pub fn advance(&mut self, speed: f32) {
        self.position += self.direction * speed;
    }
}

/// A target waiting to be hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    /// World position, fixed once spawned
    pub position: Point3,
    /// Spawn order, starting at 0
    pub sequence: u64,
}

impl Target {
    /// Which of the two target looks this target uses
    pub fn variant(&self) -> TargetVariant {
        if self.sequence % 2 == 0 {
            TargetVariant::Primary
        } else {
            TargetVariant::Alternate
        }
    }
}

/// Visual variant of a target, alternating with spawn order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetVariant {
    /// Even sequence numbers
    Primary,
    /// Odd sequence numbers
    Alternate,
}
