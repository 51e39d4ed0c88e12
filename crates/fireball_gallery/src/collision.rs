//! Collision resolver
//!
//! Sphere-sphere tests between every live target and projectile. Matches are
//! only flagged during the scan; both collections are compacted afterwards,
//! so removal never disturbs the iteration.

use gallery_engine::foundation::math::Point3;
use nalgebra::distance;

use crate::config::GameplayConfig;
use crate::entities::{EntityKind, Projectile, Target};

/// Outcome of one resolver pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Targets destroyed by projectiles
    pub hits: usize,
    /// Projectiles removed for flying too far
    pub expired: usize,
    /// A surviving target reached the player
    pub player_hit: bool,
}

/// Collision and expiry rules for one game
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResolver {
    projectile_radius: f32,
    target_radius: f32,
    expiry_distance: f32,
}

impl CollisionResolver {
    /// Build the resolver from gameplay tunables
    pub fn new(config: &GameplayConfig) -> Self {
        Self {
            projectile_radius: config.radius(EntityKind::Projectile),
            target_radius: config.radius(EntityKind::Target),
            expiry_distance: config.expiry_distance(),
        }
    }

    /// Run hits, then expiry, then the loss check
    ///
    /// Every target and projectile closer than the sum of the radii is
    /// removed, so one projectile can take out several overlapping targets.
    pub fn resolve(&self, targets: &mut Vec<Target>, projectiles: &mut Vec<Projectile>, player: &Point3) -> CollisionReport {
        let mut report = CollisionReport::default();
        let reach = self.target_radius + self.projectile_radius;

        let mut target_hit = vec![false; targets.len()];
        let mut projectile_hit = vec![false; projectiles.len()];

        for (target_index, target) in targets.iter().enumerate() {
            for (projectile_index, projectile) in projectiles.iter().enumerate() {
                if distance(&target.position, &projectile.position) < reach {
                    target_hit[target_index] = true;
                    projectile_hit[projectile_index] = true;
                }
            }

            if target_hit[target_index] {
                report.hits += 1;
                log::info!("Target #{} hit at {:?}", target.sequence, target.position);
            }
        }

        if report.hits > 0 {
            retain_unflagged(targets, &target_hit);
            retain_unflagged(projectiles, &projectile_hit);
        }

        let before = projectiles.len();
        projectiles.retain(|p| distance(player, &p.position) <= self.expiry_distance);
        report.expired = before - projectiles.len();
        if report.expired > 0 {
            log::debug!("{} projectile(s) expired", report.expired);
        }

        report.player_hit = targets
            .iter()
            .any(|t| distance(player, &t.position) < self.target_radius);

        report
    }
}

fn retain_unflagged<T>(items: &mut Vec<T>, flags: &[bool]) {
    let mut flags = flags.iter();
    items.retain(|_| !flags.next().copied().unwrap_or(false));
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_engine::foundation::math::Vec3;

    fn resolver() -> CollisionResolver {
        CollisionResolver::new(&GameplayConfig::default())
    }

    fn target(sequence: u64, x: f32, y: f32, z: f32) -> Target {
        Target { position: Point3::new(x, y, z), sequence }
    }

    fn projectile(x: f32, y: f32, z: f32) -> Projectile {
        Projectile { position: Point3::new(x, y, z), direction: Vec3::z() }
    }

    #[test]
    fn test_overlapping_pair_is_removed_without_side_effects() {
        let mut targets = vec![target(0, 10.0, 0.0, 0.0), target(1, 0.0, 10.0, 0.0), target(2, 0.0, 0.0, 10.0)];
        let mut projectiles = vec![projectile(-10.0, 0.0, 0.0), projectile(0.0, 10.5, 0.0), projectile(0.0, 0.0, -10.0)];

        let report = resolver().resolve(&mut targets, &mut projectiles, &Point3::origin());

        assert_eq!(report.hits, 1);
        assert_eq!(targets.iter().map(|t| t.sequence).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(projectiles, vec![projectile(-10.0, 0.0, 0.0), projectile(0.0, 0.0, -10.0)]);
    }

    #[test]
    fn test_touching_spheres_do_not_collide() {
        let mut targets = vec![target(0, 0.0, 0.0, 10.0)];
        let mut projectiles = vec![projectile(0.0, 0.0, 12.0)];

        let report = resolver().resolve(&mut targets, &mut projectiles, &Point3::origin());

        assert_eq!(report.hits, 0);
        assert_eq!((targets.len(), projectiles.len()), (1, 1));
    }

    #[test]
    fn test_one_projectile_destroys_every_target_in_reach() {
        let mut targets = vec![target(0, 0.0, 0.0, 10.0), target(1, 0.0, 0.5, 10.0), target(2, 0.0, 5.0, 10.0)];
        let mut projectiles = vec![projectile(0.0, 0.2, 10.0)];

        let report = resolver().resolve(&mut targets, &mut projectiles, &Point3::origin());

        assert_eq!(report.hits, 2);
        assert!(projectiles.is_empty());
        assert_eq!(targets, vec![target(2, 0.0, 5.0, 10.0)]);
    }

    #[test]
    fn test_shared_projectile_does_not_shield_other_pairs() {
        // The middle projectile reaches both targets; the lower one only reaches the first
        let mut targets = vec![target(0, 0.0, 0.0, 10.0), target(1, 0.0, 1.9, 10.0)];
        let mut projectiles = vec![projectile(0.0, 0.95, 10.0), projectile(0.0, -1.5, 10.0)];

        let report = resolver().resolve(&mut targets, &mut projectiles, &Point3::origin());

        assert_eq!(report.hits, 2);
        assert!(targets.is_empty());
        assert!(projectiles.is_empty());
    }

    #[test]
    fn test_target_in_reach_of_two_projectiles_takes_both() {
        let mut targets = vec![target(0, 0.0, 0.0, 10.0)];
        let mut projectiles = vec![projectile(0.0, 0.0, 11.0), projectile(0.0, 0.0, 9.0), projectile(0.0, 0.0, 20.0)];

        let report = resolver().resolve(&mut targets, &mut projectiles, &Point3::origin());

        assert_eq!(report.hits, 1);
        assert!(targets.is_empty());
        assert_eq!(projectiles, vec![projectile(0.0, 0.0, 20.0)]);
    }

    #[test]
    fn test_adjacent_pairs_are_all_found_in_one_pass() {
        let mut targets = vec![target(0, 0.0, 0.0, 10.0), target(1, 0.0, 0.0, 20.0), target(2, 0.0, 0.0, 30.0)];
        let mut projectiles = vec![projectile(0.0, 0.0, 30.5), projectile(0.0, 0.0, 10.5), projectile(0.0, 0.0, 20.5)];

        let report = resolver().resolve(&mut targets, &mut projectiles, &Point3::origin());

        assert_eq!(report.hits, 3);
        assert!(targets.is_empty());
        assert!(projectiles.is_empty());
    }

    #[test]
    fn test_far_projectile_expires_regardless_of_targets() {
        let mut targets = vec![target(0, 0.0, 0.0, 61.0)];
        let mut projectiles = vec![projectile(0.0, 0.0, 60.5), projectile(0.0, 0.0, 59.0)];

        let report = resolver().resolve(&mut targets, &mut projectiles, &Point3::origin());

        // 60.5 is past the 60 unit limit but still within reach of the target
        assert_eq!(report.hits, 1);
        assert_eq!(report.expired, 0);

        let mut projectiles = vec![projectile(0.0, 0.0, 60.5)];
        let mut targets = Vec::new();
        let report = resolver().resolve(&mut targets, &mut projectiles, &Point3::origin());
        assert_eq!(report.expired, 1);
        assert!(projectiles.is_empty());
    }

    #[test]
    fn test_expiry_is_measured_from_the_player() {
        let player = Point3::new(100.0, 0.0, 0.0);
        let mut targets = Vec::new();
        let mut projectiles = vec![projectile(100.0, 0.0, 59.0), projectile(0.0, 0.0, 0.0)];

        let report = resolver().resolve(&mut targets, &mut projectiles, &player);

        assert_eq!(report.expired, 1);
        assert_eq!(projectiles, vec![projectile(100.0, 0.0, 59.0)]);
    }

    #[test]
    fn test_loss_only_when_target_strictly_within_radius() {
        let resolver = resolver();
        let player = Point3::new(1.0, 1.0, 1.0);

        let mut targets = vec![target(0, 1.0, 1.0, 2.0)];
        assert!(!resolver.resolve(&mut targets, &mut Vec::new(), &player).player_hit);

        let mut targets = vec![target(0, 1.0, 1.0, 1.99)];
        assert!(resolver.resolve(&mut targets, &mut Vec::new(), &player).player_hit);
    }

    #[test]
    fn test_destroyed_target_cannot_cause_a_loss() {
        let mut targets = vec![target(0, 0.0, 0.0, 0.5)];
        let mut projectiles = vec![projectile(0.0, 0.0, 1.0)];

        let report = resolver().resolve(&mut targets, &mut projectiles, &Point3::origin());

        assert_eq!(report.hits, 1);
        assert!(!report.player_hit);
    }

    #[test]
    fn test_unreachable_target_outlives_projectile() {
        let resolver = resolver();
        let config = GameplayConfig::default();
        let player = Point3::origin();
        let mut targets = vec![target(0, 0.0, 0.0, 150.0)];
        let mut projectiles = vec![Projectile::fired_from(player, Vec3::z(), config.projectile_start_distance)];

        let mut frames = 0;
        let mut total = CollisionReport::default();
        while !projectiles.is_empty() {
            for p in &mut projectiles {
                p.advance(config.projectile.speed);
            }
            let report = resolver.resolve(&mut targets, &mut projectiles, &player);
            total.hits += report.hits;
            total.expired += report.expired;
            frames += 1;
            assert!(frames < 1000, "projectile never expired");
        }

        assert_eq!(total.hits, 0);
        assert_eq!(total.expired, 1);
        assert_eq!(targets.len(), 1);
    }
}
