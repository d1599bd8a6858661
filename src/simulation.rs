//! Simulation builder and runner.
//!
//! [`Simulation`] is the configuration surface: chain `with_*` calls, then
//! either `run()` to open a window and paint into the live field, or
//! `build()` to get a headless [`Engine`] you can drive yourself.
//!
//! # Example
//!
//! ```ignore
//! use rdfield::prelude::*;
//!
//! fn main() -> Result<(), rdfield::SimulationError> {
//!     Simulation::new()
//!         .with_resolution(256, 256)
//!         .with_steps_per_frame(30)
//!         .with_noise_seed(42)
//!         .run()
//! }
//! ```

use std::sync::Arc;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::brush::Brush;
use crate::error::{ConfigError, SimulationError};
use crate::gpu::GpuState;
use crate::grid::{Cell, Grid};
use crate::kernel;
use crate::params::{BankConfig, KernelParams, NoiseRange, ParameterBank};

/// A reaction-diffusion simulation builder.
///
/// Use method chaining to configure, then call `.run()` to start, or
/// `.build()` for a headless engine. All settings are static tunables,
/// validated once at build time.
pub struct Simulation {
    width: u32,
    height: u32,
    steps_per_frame: u32,
    bank: BankConfig,
    noise_seed: u32,
    seed_radius: f32,
    brush_radius: f32,
    brush_strength: f32,
    log_interval: u64,
    threshold: f32,
    delta: f32,
}

impl Simulation {
    /// Create a simulation with default settings.
    pub fn new() -> Self {
        Self {
            width: 256,
            height: 256,
            steps_per_frame: 30,
            bank: BankConfig::default(),
            noise_seed: 0,
            seed_radius: 0.06,
            brush_radius: 0.03,
            brush_strength: 0.9,
            log_interval: 1000,
            threshold: 0.7,
            delta: 0.05,
        }
    }

    /// Set the grid resolution. Fixed for the lifetime of the run.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the number of kernel invocations per output frame.
    ///
    /// More steps evolve the pattern faster at the cost of throughput.
    pub fn with_steps_per_frame(mut self, steps: u32) -> Self {
        self.steps_per_frame = steps;
        self
    }

    /// Set the time-step multiplier.
    pub fn with_dt(mut self, dt: f32) -> Self {
        self.bank.dt = dt;
        self
    }

    /// Set the base seed for the parameter noise walks.
    pub fn with_noise_seed(mut self, seed: u32) -> Self {
        self.noise_seed = seed;
        self
    }

    /// Set the feed-rate walk: bounds and drift speed.
    pub fn with_feed(mut self, lower: f32, upper: f32, speed: f64) -> Self {
        self.bank.feed = NoiseRange::new(lower, upper, speed);
        self
    }

    /// Set the kill-offset walk: bounds and drift speed.
    pub fn with_kill_offset(mut self, lower: f32, upper: f32, speed: f64) -> Self {
        self.bank.kill_offset = NoiseRange::new(lower, upper, speed);
        self
    }

    /// Set the diffusion walk: bounds and drift speed for chemical A.
    /// Chemical B always diffuses at half the sampled rate.
    pub fn with_diffusion(mut self, lower: f32, upper: f32, speed: f64) -> Self {
        self.bank.diffusion = NoiseRange::new(lower, upper, speed);
        self
    }

    /// Set the band formula constants tying kill to feed.
    pub fn with_band(mut self, f0: f32, k0: f32, slope: f32) -> Self {
        self.bank.f0 = f0;
        self.bank.k0 = k0;
        self.bank.slope = slope;
        self
    }

    /// Set the normalized radius of the initial chemical-B patch.
    pub fn with_seed_radius(mut self, radius: f32) -> Self {
        self.seed_radius = radius;
        self
    }

    /// Set the brush radius and strength (normalized units).
    pub fn with_brush(mut self, radius: f32, strength: f32) -> Self {
        self.brush_radius = radius;
        self.brush_strength = strength;
        self
    }

    /// Print the live parameters every `interval` ticks. 0 disables.
    pub fn with_log_interval(mut self, interval: u64) -> Self {
        self.log_interval = interval;
        self
    }

    /// Set the display threshold and transition width on channel A.
    pub fn with_threshold(mut self, threshold: f32, delta: f32) -> Self {
        self.threshold = threshold;
        self.delta = delta;
        self
    }

    /// Validate the configuration and build a headless engine.
    pub fn build(&self) -> Result<Engine, ConfigError> {
        if self.steps_per_frame == 0 {
            return Err(ConfigError::ZeroSteps);
        }
        let grid = Grid::new(self.width, self.height, self.seed_radius)?;
        let bank = ParameterBank::new(self.bank, self.noise_seed)?;
        let params = bank.sample(0);

        Ok(Engine {
            grid,
            bank,
            brush: Brush::new(self.brush_radius, self.brush_strength),
            params,
            tick: 0,
            steps_per_frame: self.steps_per_frame,
            log_interval: self.log_interval,
        })
    }

    /// Run the simulation in a window. Blocks until the window is closed.
    pub fn run(self) -> Result<(), SimulationError> {
        let engine = self.build()?;

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App {
            engine,
            threshold: self.threshold,
            delta: self.delta,
            window: None,
            gpu: None,
            cursor: None,
        };
        event_loop.run_app(&mut app)?;
        Ok(())
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

/// The running simulation core: grid, parameter bank, brush and tick.
///
/// One call to [`advance_frame`](Engine::advance_frame) is one output
/// frame: the tick advances, the parameter bank publishes a fresh
/// [`KernelParams`], and the kernel runs `steps_per_frame` times with a
/// buffer swap after each invocation. Between frames the front buffer is a
/// stable read-only snapshot; it is never observed mid-write.
#[derive(Debug)]
pub struct Engine {
    grid: Grid,
    bank: ParameterBank,
    brush: Brush,
    params: KernelParams,
    tick: u64,
    steps_per_frame: u32,
    log_interval: u64,
}

impl Engine {
    /// Advance the simulation by one output frame.
    pub fn advance_frame(&mut self) {
        self.tick += 1;
        self.params = self.bank.sample(self.tick);

        if self.log_interval > 0 && self.tick % self.log_interval == 0 {
            println!(
                "tick {:>6}  feed {:.4}  kill {:.4}  dA {:.3}  dB {:.3}",
                self.tick, self.params.feed, self.params.kill, self.params.diff_a, self.params.diff_b
            );
        }

        // Input events land between frames; the stamp is fixed for the
        // whole inner loop.
        let stamp = self.brush.stamp();
        for _ in 0..self.steps_per_frame {
            let width = self.grid.width();
            let height = self.grid.height();
            let (src, dst) = self.grid.buffers_mut();
            kernel::step(src, dst, width, height, &self.params, stamp);
            self.grid.swap();
        }
    }

    /// Pointer went down at a normalized y-up position.
    pub fn pointer_pressed(&mut self, position: Vec2) {
        self.brush.press(position);
    }

    /// Pointer moved while possibly held.
    pub fn pointer_moved(&mut self, position: Vec2) {
        self.brush.moved(position);
    }

    /// Pointer released or left the window.
    pub fn pointer_released(&mut self) {
        self.brush.release();
    }

    /// Read-only snapshot of the live field.
    pub fn field(&self) -> &[Cell] {
        self.grid.front()
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Frames advanced so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// The parameter set published for the current frame.
    pub fn params(&self) -> KernelParams {
        self.params
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Re-seed the field, keeping tick and parameters.
    pub fn reseed(&mut self) {
        self.grid.seed();
    }

    /// Recreate the grid at a new resolution and re-seed.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), ConfigError> {
        self.grid.resize(width, height)
    }
}

struct App {
    engine: Engine,
    threshold: f32,
    delta: f32,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    /// Last cursor position, normalized to [0,1]^2 with y up.
    cursor: Option<Vec2>,
}

impl App {
    fn normalize_cursor(&self, x: f64, y: f64) -> Option<Vec2> {
        let window = self.window.as_ref()?;
        let size = window.inner_size();
        if size.width == 0 || size.height == 0 {
            return None;
        }
        // winit's y grows down; the grid's y grows up.
        let nx = (x / size.width as f64).clamp(0.0, 1.0) as f32;
        let ny = 1.0 - (y / size.height as f64).clamp(0.0, 1.0) as f32;
        Some(Vec2::new(nx, ny))
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window_attrs = Window::default_attributes()
                .with_title("rdfield - Gray-Scott reaction diffusion")
                .with_inner_size(winit::dpi::LogicalSize::new(900, 900));

            let window = match event_loop.create_window(window_attrs) {
                Ok(window) => Arc::new(window),
                Err(e) => {
                    eprintln!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };
            self.window = Some(window.clone());

            match pollster::block_on(GpuState::new(
                window,
                self.engine.width() as u32,
                self.engine.height() as u32,
                self.threshold,
                self.delta,
            )) {
                Ok(gpu) => self.gpu = Some(gpu),
                Err(e) => {
                    eprintln!("{}", e);
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(pos) = self.normalize_cursor(position.x, position.y) {
                    self.cursor = Some(pos);
                    self.engine.pointer_moved(pos);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    match state {
                        ElementState::Pressed => {
                            if let Some(pos) = self.cursor {
                                self.engine.pointer_pressed(pos);
                            }
                        }
                        ElementState::Released => self.engine.pointer_released(),
                    }
                }
            }
            WindowEvent::CursorLeft { .. } => {
                self.engine.pointer_released();
            }
            WindowEvent::RedrawRequested => {
                self.engine.advance_frame();

                if let Some(gpu) = &mut self.gpu {
                    match gpu.render(self.engine.field()) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost) => gpu.resize(winit::dpi::PhysicalSize {
                            width: gpu.config.width,
                            height: gpu.config.height,
                        }),
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => eprintln!("Render error: {:?}", e),
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_rejects_zero_steps() {
        let err = Simulation::new().with_steps_per_frame(0).build().unwrap_err();
        assert_eq!(err, ConfigError::ZeroSteps);
    }

    #[test]
    fn test_build_rejects_bad_resolution() {
        let err = Simulation::new().with_resolution(0, 64).build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidResolution { .. }));
    }

    #[test]
    fn test_build_rejects_inverted_feed_bounds() {
        let err = Simulation::new()
            .with_feed(0.06, 0.015, 0.001)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvertedBounds { name: "feed", .. }));
    }

    #[test]
    fn test_frame_advances_tick_and_buffers() {
        let mut engine = Simulation::new()
            .with_resolution(32, 32)
            .with_steps_per_frame(3)
            .with_log_interval(0)
            .build()
            .unwrap();
        assert_eq!(engine.tick(), 0);
        assert_eq!(engine.grid().front_index(), 0);

        engine.advance_frame();
        assert_eq!(engine.tick(), 1);
        // 3 swaps: front index is 3 mod 2.
        assert_eq!(engine.grid().front_index(), 1);

        engine.advance_frame();
        assert_eq!(engine.grid().front_index(), 0);
    }

    #[test]
    fn test_params_refresh_once_per_frame() {
        let mut engine = Simulation::new()
            .with_resolution(16, 16)
            .with_log_interval(0)
            .build()
            .unwrap();

        engine.advance_frame();
        let expected = engine.params();
        // Re-sampling the bank at the same tick reproduces what was
        // published for the frame.
        let resampled = {
            let bank = ParameterBank::new(BankConfig::default(), 0).unwrap();
            bank.sample(1)
        };
        assert_eq!(expected, resampled);
    }

    #[test]
    fn test_pointer_events_drive_brush() {
        let mut engine = Simulation::new()
            .with_resolution(16, 16)
            .with_log_interval(0)
            .build()
            .unwrap();

        engine.pointer_pressed(Vec2::new(0.3, 0.6));
        assert!(engine.brush().is_active());
        engine.pointer_moved(Vec2::new(0.4, 0.6));
        assert_eq!(engine.brush().position(), Vec2::new(0.4, 0.6));
        engine.pointer_released();
        assert!(!engine.brush().is_active());
    }

    #[test]
    fn test_engines_with_same_seed_agree() {
        let build = || {
            Simulation::new()
                .with_resolution(48, 48)
                .with_steps_per_frame(5)
                .with_noise_seed(2024)
                .with_log_interval(0)
                .build()
                .unwrap()
        };
        let mut a = build();
        let mut b = build();

        for _ in 0..4 {
            a.advance_frame();
            b.advance_frame();
        }
        assert_eq!(a.field(), b.field());
    }
}
