//! Time management utilities

use std::time::{Duration, Instant};

/// Monotonic source of elapsed time
///
/// Gameplay code reads time through this trait so that tests can drive it
/// by hand instead of sleeping.
pub trait Clock {
    /// Seconds elapsed since the clock started
    fn elapsed_secs(&self) -> f64;
}

/// High-precision timer for frame timing
#[derive(Debug)]
pub struct Timer {
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Account for one frame of the given length
    pub fn record_frame(&mut self, elapsed: Duration) {
        self.total_time += elapsed.as_secs_f32();
        self.frame_count += 1;
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

/// Simple stopwatch for measuring elapsed time
#[derive(Debug)]
pub struct Stopwatch {
    start_time: Option<Instant>,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    /// Create a new stopped stopwatch
    pub fn new() -> Self {
        Self { start_time: None }
    }

    /// Create a new stopwatch and start it immediately
    pub fn start_new() -> Self {
        let mut stopwatch = Self::new();
        stopwatch.start();
        stopwatch
    }

    /// Start (or restart) the stopwatch
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Time since the last start, zero if never started
    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |start| start.elapsed())
    }
}

impl Clock for Stopwatch {
    fn elapsed_secs(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }
}
