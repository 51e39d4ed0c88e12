//! # Fireball Gallery
//!
//! A first-person shooting gallery. Targets appear around the player on a
//! timer; the player shoots fireballs at them with the left mouse button. The
//! game ends when a target reaches the player or the player quits.
//!
//! The loop itself lives in [`game::Gallery`]. Everything platform-specific
//! (window, GL, camera, clock) comes from `gallery_engine` and is passed in
//! through [`game::Collaborators`], so the loop runs unchanged against test
//! doubles.

pub mod collision;
pub mod config;
pub mod entities;
pub mod error;
pub mod fire_control;
pub mod game;
pub mod renderable;
pub mod spawner;
pub mod transform;

#[cfg(test)]
mod testing;

pub use config::{GameConfig, Preset};
pub use error::{GameError, GameResult};
pub use game::{Collaborators, EndReason, Gallery, GameState, World};
