//! Game error type
//!
//! Only startup can fail. Once the loop runs, every outcome (hit, expiry,
//! loss, quit) is ordinary game state.

use gallery_engine::assets::AssetError;
use gallery_engine::config::ConfigError;
use gallery_engine::render::RenderError;
use gallery_engine::window::WindowError;
use thiserror::Error;

/// Startup errors
#[derive(Error, Debug)]
pub enum GameError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Window or GL context creation failed
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    /// The renderer rejected a resource
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// An asset file is missing or malformed
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),
}

/// Result alias for game startup
pub type GameResult<T> = Result<T, GameError>;
