//! Scripted brush strokes on a headless engine.
//!
//! Draws a ring of brush dabs around the center, lets the reaction grow
//! into them, and exports the result. Shows how pointer input maps onto
//! the engine without any window plumbing.
//!
//! Run with: `cargo run --example painted`

use rdfield::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = Simulation::new()
        .with_resolution(512, 512)
        .with_steps_per_frame(20)
        .with_noise_seed(99)
        .with_brush(0.04, 0.9)
        .with_log_interval(0)
        .build()?;

    // A ring of dabs: press, hold for a few frames, release, move on.
    let dabs = 8;
    for i in 0..dabs {
        let angle = i as f32 / dabs as f32 * std::f32::consts::TAU;
        let pos = Vec2::new(0.5 + 0.25 * angle.cos(), 0.5 + 0.25 * angle.sin());

        engine.pointer_pressed(pos);
        for _ in 0..3 {
            engine.advance_frame();
        }
        engine.pointer_released();
    }

    // Let the pattern grow out of the strokes.
    for _ in 0..250 {
        engine.advance_frame();
    }

    snapshot::save_png(
        "painted.png",
        engine.field(),
        engine.width(),
        engine.height(),
        0.7,
        0.05,
    )?;
    println!("wrote painted.png after {} frames", engine.tick());
    Ok(())
}
