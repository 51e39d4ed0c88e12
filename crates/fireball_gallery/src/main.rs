//! Fireball Gallery
//!
//! Usage: `fireball_gallery [CONFIG] [--preset classic|arcade]`
//!
//! Without arguments the configuration comes from `FIREBALL_GALLERY_CONFIG`,
//! then `config/gallery.toml`, then built-in defaults.

use std::path::PathBuf;

use fireball_gallery::{Collaborators, GameConfig, GameResult, Gallery, Preset};
use gallery_engine::config::{Config, ConfigError};
use gallery_engine::foundation::logging::{self, LevelFilter};
use gallery_engine::foundation::time::Stopwatch;
use gallery_engine::render::camera::FpsCamera;
use gallery_engine::render::GlBackend;
use gallery_engine::window::GlfwWindow;
use rand::rngs::StdRng;
use rand::SeedableRng;

const CONFIG_ENV: &str = "FIREBALL_GALLERY_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/gallery.toml";

/// Where the configuration comes from
#[derive(Debug, PartialEq)]
enum ConfigSource {
    File(PathBuf),
    Preset(Preset),
    Default,
}

fn parse_args(args: &[String]) -> Result<ConfigSource, ConfigError> {
    let mut source = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--preset" {
            let name = iter
                .next()
                .ok_or_else(|| ConfigError::Invalid("--preset needs a name".to_string()))?;
            source = Some(ConfigSource::Preset(name.parse()?));
        } else if let Some(name) = arg.strip_prefix("--preset=") {
            source = Some(ConfigSource::Preset(name.parse()?));
        } else if source.is_none() {
            source = Some(ConfigSource::File(PathBuf::from(arg)));
        }
    }

    Ok(source.unwrap_or_else(|| match std::env::var_os(CONFIG_ENV) {
        Some(path) => ConfigSource::File(PathBuf::from(path)),
        None => ConfigSource::Default,
    }))
}

fn load_config(source: ConfigSource) -> Result<GameConfig, ConfigError> {
    let config = match source {
        ConfigSource::File(path) => {
            log::info!("Loading configuration from {}", path.display());
            GameConfig::load_from_file(&path)?
        }
        ConfigSource::Preset(preset) => {
            log::info!("Using {:?} preset", preset);
            GameConfig::preset(preset)
        }
        ConfigSource::Default => GameConfig::load_or_default(DEFAULT_CONFIG_PATH)?,
    };
    config.validate()?;
    Ok(config)
}

fn run() -> GameResult<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = load_config(parse_args(&args)?)?;

    let mut window = GlfwWindow::new(&config.window)?;
    let mut backend = GlBackend::new(&window);
    let mut camera = FpsCamera::new(config.camera.clone());
    let clock = Stopwatch::start_new();

    let mut gallery = Gallery::new(&config, StdRng::from_entropy());
    let mut ctx = Collaborators {
        window: &mut window,
        backend: &mut backend,
        camera: &mut camera,
        clock: &clock,
    };

    let reason = gallery.launch(&mut ctx, config.graphics.resource_dir.as_ref())?;
    log::info!("Final result: {} after {} hits", reason, gallery.hits());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_default(LevelFilter::Info);

    log::info!("Starting Fireball Gallery");

    match run() {
        Ok(()) => {
            log::info!("Fireball Gallery exited cleanly");
            Ok(())
        }
        Err(e) => {
            log::error!("Fireball Gallery failed to start: {}", e);
            Err(e.into())
        }
    }
}
