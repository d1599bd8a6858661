//! Evolve the field without a window and export the result as a PNG.
//!
//! Run with: `cargo run --example headless`

use rdfield::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = Simulation::new()
        .with_resolution(512, 512)
        .with_steps_per_frame(30)
        .with_noise_seed(7)
        .with_log_interval(100)
        .build()?;

    for _ in 0..400 {
        engine.advance_frame();
    }

    snapshot::save_png(
        "pattern.png",
        engine.field(),
        engine.width(),
        engine.height(),
        0.7,
        0.05,
    )?;
    println!("wrote pattern.png after {} frames", engine.tick());
    Ok(())
}
