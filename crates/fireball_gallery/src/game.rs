//! Game loop driver
//!
//! One tick, in order: clear, poll input, update the camera, detect the fire
//! edge, draw and advance projectiles, run the spawner, draw targets, draw
//! the crosshair, resolve collisions, present. Quit requests (Escape or a
//! window close) are checked between ticks.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use gallery_engine::foundation::math::{Mat4, Point3};
use gallery_engine::foundation::time::{Clock, Timer};
use gallery_engine::input::{KeyCode, MouseButton};
use gallery_engine::render::camera::CameraController;
use gallery_engine::render::RenderBackend;
use gallery_engine::window::WindowBackend;
use rand::rngs::StdRng;
use rand::Rng;

use crate::collision::CollisionResolver;
use crate::config::{GameConfig, GameplayConfig};
use crate::entities::{Projectile, Target};
use crate::error::GameResult;
use crate::fire_control::FireControl;
use crate::renderable::{Renderables, Visual};
use crate::spawner::Spawner;
use crate::transform::TransformCalculator;

/// Why the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Escape pressed or window closed
    Quit,
    /// A target reached the player
    Lost,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quit => write!(f, "quit"),
            Self::Lost => write!(f, "lost"),
        }
    }
}

/// Loop state; `Ended` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Ticking
    Running,
    /// Finished for the given reason
    Ended(EndReason),
}

impl GameState {
    /// Whether the loop should keep ticking
    pub fn is_running(self) -> bool {
        self == Self::Running
    }
}

/// Live entities, owned by the loop
#[derive(Debug, Clone, Default, PartialEq)]
pub struct World {
    /// Fireballs in flight
    pub projectiles: Vec<Projectile>,
    /// Targets waiting to be hit
    pub targets: Vec<Target>,
}

/// Everything the loop talks to but does not own
pub struct Collaborators<'a> {
    /// Window, input and presentation
    pub window: &'a mut dyn WindowBackend,
    /// Drawing
    pub backend: &'a mut dyn RenderBackend,
    /// Player pose and matrices
    pub camera: &'a mut dyn CameraController,
    /// Spawn timing
    pub clock: &'a dyn Clock,
}

/// The shooting gallery
pub struct Gallery<R: Rng = StdRng> {
    gameplay: GameplayConfig,
    clear_color: [f32; 4],
    world: World,
    state: GameState,
    fire_control: FireControl,
    spawner: Spawner<R>,
    collision: CollisionResolver,
    transform: TransformCalculator,
    timer: Timer,
    last_frame_time: Option<f64>,
    hits: usize,
}

impl<R: Rng> Gallery<R> {
    /// Create a gallery in the `Running` state with an empty world
    pub fn new(config: &GameConfig, rng: R) -> Self {
        Self {
            gameplay: config.gameplay.clone(),
            clear_color: config.graphics.clear_color,
            world: World::default(),
            state: GameState::Running,
            fire_control: FireControl::new(),
            spawner: Spawner::new(rng, &config.gameplay),
            collision: CollisionResolver::new(&config.gameplay),
            transform: TransformCalculator::new(config.graphics.base_scale),
            timer: Timer::new(),
            last_frame_time: None,
            hits: 0,
        }
    }

    /// Current entities
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Current state
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Targets destroyed so far
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Ticks run so far
    pub fn frames(&self) -> u64 {
        self.timer.frame_count()
    }

    /// Load the renderables from `resource_dir`, then run until the game ends
    pub fn launch(&mut self, ctx: &mut Collaborators<'_>, resource_dir: &Path) -> GameResult<EndReason> {
        let renderables = Renderables::load(&mut *ctx.backend, resource_dir)?;
        Ok(self.run(ctx, renderables))
    }

    /// Run until quit or loss; `renderables` are released on every exit
    pub fn run(&mut self, ctx: &mut Collaborators<'_>, renderables: Renderables) -> EndReason {
        log::info!("Gallery running");

        let reason = self.run_loop(ctx, &renderables);
        renderables.release_all(&mut *ctx.backend);

        log::info!(
            "Game over ({}): {} hits in {} frames, {:.1} FPS average",
            reason,
            self.hits,
            self.timer.frame_count(),
            self.timer.average_fps()
        );
        reason
    }

    fn run_loop(&mut self, ctx: &mut Collaborators<'_>, renderables: &Renderables) -> EndReason {
        loop {
            if let GameState::Ended(reason) = self.tick(ctx, renderables) {
                return reason;
            }
            if ctx.window.is_key_pressed(KeyCode::Escape) || ctx.window.should_close() {
                self.state = GameState::Ended(EndReason::Quit);
                return EndReason::Quit;
            }
        }
    }

    /// Run one frame and return the resulting state
    ///
    /// Does nothing once the game has ended.
    pub fn tick(&mut self, ctx: &mut Collaborators<'_>, renderables: &Renderables) -> GameState {
        if !self.state.is_running() {
            return self.state;
        }

        let now = ctx.clock.elapsed_secs();
        let delta = self.last_frame_time.map_or(0.0, |last| (now - last).max(0.0));
        self.last_frame_time = Some(now);
        self.timer.record_frame(Duration::from_secs_f64(delta));

        ctx.backend.clear(self.clear_color);
        ctx.window.poll_events();

        ctx.camera.compute_matrices_from_input(&mut *ctx.window, delta as f32);
        let projection = ctx.camera.projection_matrix();
        let view = ctx.camera.view_matrix();
        let player = Point3::from(ctx.camera.position());
        let aim = ctx.camera.direction();

        if self.fire_control.update(ctx.window.is_mouse_button_pressed(MouseButton::Left)) {
            let projectile = Projectile::fired_from(player, aim, self.gameplay.projectile_start_distance);
            log::debug!("Fired projectile from {:?} towards {:?}", projectile.position, aim);
            self.world.projectiles.push(projectile);
        }

        self.draw_and_advance_projectiles(&mut *ctx.backend, renderables, &projection, &view);

        self.spawner.tick(now, &player, &mut self.world.targets);

        self.draw_targets(&mut *ctx.backend, renderables, &projection, &view);

        let crosshair = renderables.get(Visual::Crosshair);
        self.transform.apply_screen_space(&mut *ctx.backend, crosshair, &Point3::origin());
        crosshair.draw(&mut *ctx.backend);

        let report = self.collision.resolve(&mut self.world.targets, &mut self.world.projectiles, &player);
        self.hits += report.hits;
        if report.player_hit {
            log::info!("A target reached the player");
            self.state = GameState::Ended(EndReason::Lost);
        }

        ctx.window.swap_buffers();
        self.state
    }

    fn draw_and_advance_projectiles(
        &mut self,
        backend: &mut dyn RenderBackend,
        renderables: &Renderables,
        projection: &Mat4,
        view: &Mat4,
    ) {
        let fireball = renderables.get(Visual::Fireball);
        let speed = self.gameplay.projectile.speed;

        for projectile in &mut self.world.projectiles {
            self.transform.apply(backend, fireball, &projectile.position, projection, view);
            fireball.draw(backend);
            projectile.advance(speed);
        }
    }

    fn draw_targets(&self, backend: &mut dyn RenderBackend, renderables: &Renderables, projection: &Mat4, view: &Mat4) {
        for target in &self.world.targets {
            let object = renderables.get(Visual::for_target(target));
            self.transform.apply(backend, object, &target.position, projection, view);
            object.draw(backend);
        }
    }
}
