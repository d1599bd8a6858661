//! # rdfield - Interactive Gray-Scott reaction diffusion
//!
//! A two-species reaction-diffusion simulation on a double-buffered 2D
//! grid, driven toward ever-changing patterns by noise-modulated
//! parameters and perturbed interactively with a pointer brush.
//!
//! ## Quick Start
//!
//! ```ignore
//! use rdfield::prelude::*;
//!
//! fn main() -> Result<(), rdfield::SimulationError> {
//!     Simulation::new()
//!         .with_resolution(256, 256)
//!         .with_noise_seed(42)
//!         .run()
//! }
//! ```
//!
//! Hold the left mouse button to paint chemical B into the field and watch
//! the reaction grow around the stroke.
//!
//! ## Core Concepts
//!
//! ### The field
//!
//! The state is a grid of [`Cell`]s, each holding the concentrations of a
//! substrate species A and a pattern-forming species B. Two equal-size
//! buffers alternate roles every step ([`Grid`]): the kernel reads a frozen
//! front buffer and writes the complete next state to the other, so there
//! is never an in-place read/write hazard and the renderer always sees a
//! finished frame.
//!
//! ### The step kernel
//!
//! [`kernel::step`] applies the Gray-Scott update per cell: a weighted 3x3
//! Laplacian (toroidal wrap at the borders) scaled by each species'
//! diffusion rate, plus the autocatalytic reaction `A + 2B -> 3B` with
//! feed and kill terms. Rows are processed in parallel with rayon.
//!
//! ### Drifting parameters
//!
//! Fixed feed/kill values eventually settle into a static pattern. The
//! [`ParameterBank`] instead walks feed, kill and diffusion through
//! seeded coherent-noise trajectories, with the kill rate tied to the feed
//! rate by a linear band formula that keeps the pair inside the region of
//! parameter space where bounded, non-trivial patterns live. Runs are
//! fully reproducible from a single seed.
//!
//! ### The brush
//!
//! Pointer input drives a small state machine ([`Brush`]); while held, a
//! circular smooth-falloff stamp blends extra B into the field. Inactive,
//! it has exactly zero effect on the step.
//!
//! ### Presentation
//!
//! The simulation itself runs on the CPU; per frame the front buffer is
//! uploaded as an `Rg32Float` texture and a fullscreen threshold shader
//! maps depleted-substrate regions to ink. Headless use needs no GPU at
//! all: build an [`Engine`] directly and export PNGs via [`snapshot`].

pub mod brush;
pub mod error;
mod gpu;
pub mod grid;
pub mod kernel;
pub mod params;
pub mod shader;
mod simulation;
pub mod snapshot;

pub use brush::{Brush, BrushStamp};
pub use error::{ConfigError, GpuError, SimulationError, SnapshotError};
pub use glam::Vec2;
pub use grid::{Cell, Grid};
pub use params::{BankConfig, KernelParams, NoiseParam, NoiseRange, ParameterBank};
pub use simulation::{Engine, Simulation};

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use rdfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::brush::{Brush, BrushStamp};
    pub use crate::error::{ConfigError, SimulationError};
    pub use crate::grid::{Cell, Grid};
    pub use crate::kernel;
    pub use crate::params::{BankConfig, KernelParams, NoiseParam, NoiseRange, ParameterBank};
    pub use crate::simulation::{Engine, Simulation};
    pub use crate::snapshot;
    pub use crate::Vec2;
}
