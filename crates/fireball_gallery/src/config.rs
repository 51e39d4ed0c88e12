//! Game configuration
//!
//! One structure holds every tunable; the two classic tunings are presets of
//! it rather than separate programs.

use std::str::FromStr;

use gallery_engine::config::{Config, ConfigError};
use gallery_engine::render::camera::FpsCameraConfig;
use gallery_engine::window::WindowConfig;
use serde::{Deserialize, Serialize};

use crate::entities::{EntityKind, ProjectileParams, TargetParams};

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window settings
    pub window: WindowConfig,

    /// Gameplay settings
    pub gameplay: GameplayConfig,

    /// Graphics settings
    pub graphics: GraphicsConfig,

    /// Camera settings
    pub camera: FpsCameraConfig,
}

impl Config for GameConfig {}

/// Gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Fireball speed (per frame) and radius
    pub projectile: ProjectileParams,

    /// How far in front of the player a fireball appears
    pub projectile_start_distance: f32,

    /// Target radius
    pub target: TargetParams,

    /// Smallest per-axis spawn offset from the player
    pub min_target_distance: i32,

    /// Largest per-axis spawn offset from the player
    pub max_target_distance: i32,

    /// Seconds between automatic spawns
    pub spawn_interval: f64,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            projectile: ProjectileParams { speed: 0.75, radius: 1.0 },
            projectile_start_distance: 1.0,
            target: TargetParams { radius: 1.0 },
            min_target_distance: 5,
            max_target_distance: 30,
            spawn_interval: 2.0,
        }
    }
}

impl GameplayConfig {
    /// Collision radius of an entity kind
    pub fn radius(&self, kind: EntityKind) -> f32 {
        match kind {
            EntityKind::Projectile => self.projectile.radius,
            EntityKind::Target => self.target.radius,
        }
    }

    /// Distance from the player beyond which fireballs are dropped
    pub fn expiry_distance(&self) -> f32 {
        2.0 * self.max_target_distance as f32
    }
}

/// Graphics configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicsConfig {
    /// Background RGBA
    pub clear_color: [f32; 4],

    /// Uniform scale applied to every world-space object
    pub base_scale: f32,

    /// Directory holding `shaders/`, `meshes/` and `textures/`
    pub resource_dir: String,
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.1, 0.1, 0.2, 0.0],
            base_scale: 0.7,
            resource_dir: "resources".to_string(),
        }
    }
}

/// Named tunings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Slower fireballs, a target every second, dark blue sky
    Classic,
    /// The default tuning
    #[default]
    Arcade,
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "arcade" => Ok(Self::Arcade),
            other => Err(ConfigError::Invalid(format!("unknown preset {other:?} (expected classic or arcade)"))),
        }
    }
}

impl GameConfig {
    /// Configuration for a named tuning
    pub fn preset(preset: Preset) -> Self {
        let mut config = Self::default();
        if preset == Preset::Classic {
            config.gameplay.projectile.speed = 0.5;
            config.gameplay.spawn_interval = 1.0;
            config.graphics.clear_color = [0.0, 0.0, 0.4, 0.0];
        }
        config
    }

    /// Reject values the game loop cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let gameplay = &self.gameplay;

        require_positive("projectile.radius", gameplay.projectile.radius.into())?;
        require_positive("target.radius", gameplay.target.radius.into())?;
        require_positive("projectile.speed", gameplay.projectile.speed.into())?;
        require_finite("projectile_start_distance", gameplay.projectile_start_distance.into())?;
        if gameplay.min_target_distance < 0 {
            return Err(ConfigError::Invalid("min_target_distance cannot be negative".to_string()));
        }
        if gameplay.min_target_distance > gameplay.max_target_distance {
            return Err(ConfigError::Invalid(format!(
                "min_target_distance ({}) exceeds max_target_distance ({})",
                gameplay.min_target_distance, gameplay.max_target_distance
            )));
        }
        require_positive("spawn_interval", gameplay.spawn_interval)?;
        require_positive("base_scale", self.graphics.base_scale.into())?;
        if !self.graphics.clear_color.iter().all(|c| c.is_finite()) {
            return Err(ConfigError::Invalid("clear_color must be finite".to_string()));
        }

        Ok(())
    }
}

fn require_finite(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be a finite number, got {value}")))
    }
}

fn require_positive(name: &str, value: f64) -> Result<(), ConfigError> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")))
    }
}
